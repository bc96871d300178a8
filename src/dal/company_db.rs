use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use crate::domain::{
    company::{Company, CompanyRecord, CompanySource},
    outcome::{MatchOutcome, OutcomeStatus},
};

pub async fn add_company(
    pool: &SqlitePool,
    name: &str,
    employees: Option<f64>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r"
        insert or ignore into companies
            (name, employees)
        values
            (?, ?)
        ",
    )
    .bind(name)
    .bind(employees)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn get_company_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r"
        select
            id, name, employees, is_checked, has_website, website
        from
            companies
        where
            name = ?
        ",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn get_all_companies(pool: &SqlitePool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r"
        select
            id, name, employees, is_checked, has_website, website
        from
            companies
        order by
            name
        ",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_unchecked_companies(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r"
        select
            id, name, employees, is_checked, has_website, website
        from
            companies
        where
            is_checked = 0
        order by
            name
        limit ?
        ",
    )
    .bind(limit.map_or(-1, |n| n as i64))
    .fetch_all(pool)
    .await
}

pub async fn update_website(
    con: &mut SqliteConnection,
    company_id: i64,
    website: Option<&str>,
    has_website: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        update companies set
            website = ?,
            has_website = ?,
            is_checked = 1
        where
            id = ?
        ",
    )
    .bind(website)
    .bind(has_website)
    .bind(company_id)
    .execute(&mut *con)
    .await?;

    Ok(())
}

pub async fn record_outcomes(
    pool: &SqlitePool,
    outcomes: &[MatchOutcome],
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut recorded = 0;

    for outcome in outcomes {
        let Some(company_id) = outcome.company.external_id else {
            log::warn!("Not recording {}: no company id", outcome.company.name);
            continue;
        };

        match &outcome.status {
            OutcomeStatus::Matched { url } => {
                update_website(&mut tx, company_id, Some(url.as_str()), true).await?
            }
            OutcomeStatus::NoMatch => update_website(&mut tx, company_id, None, false).await?,
            // Failed checks stay unchecked for the next run
            OutcomeStatus::Failed { .. } => continue,
        }
        recorded += 1;
    }

    tx.commit().await?;

    Ok(recorded)
}

pub async fn reset_all_companies(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r"
        update companies set
            is_checked = 0,
            has_website = 0,
            website = null
        ",
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_all_companies(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("delete from companies").execute(pool).await?;

    Ok(result.rows_affected())
}

pub struct CompanyStore {
    pool: SqlitePool,
}

impl CompanyStore {
    pub fn new(pool: SqlitePool) -> Self {
        CompanyStore { pool }
    }
}

#[async_trait]
impl CompanySource for CompanyStore {
    async fn fetch_batch(&self, max_companies: Option<usize>) -> anyhow::Result<Vec<CompanyRecord>> {
        let companies = get_unchecked_companies(&self.pool, max_companies).await?;

        Ok(companies.iter().map(CompanyRecord::from).collect())
    }
}
