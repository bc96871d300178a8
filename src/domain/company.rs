use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub employees: Option<f64>,
    pub external_id: Option<i64>,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>) -> Self {
        CompanyRecord {
            name: name.into(),
            employees: None,
            external_id: None,
        }
    }

    pub fn with_employees(mut self, employees: f64) -> Self {
        self.employees = Some(employees).filter(|e| *e >= 0.0);
        self
    }

    pub fn with_external_id(mut self, id: i64) -> Self {
        self.external_id = Some(id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub employees: Option<f64>,
    pub is_checked: bool,
    pub has_website: bool,
    pub website: Option<String>,
}

impl From<&Company> for CompanyRecord {
    fn from(company: &Company) -> Self {
        let record = CompanyRecord::new(company.name.clone()).with_external_id(company.id);
        match company.employees {
            Some(employees) => record.with_employees(employees),
            None => record,
        }
    }
}

#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn fetch_batch(&self, max_companies: Option<usize>) -> anyhow::Result<Vec<CompanyRecord>>;
}
