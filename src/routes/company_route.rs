use std::num::NonZeroU32;

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    dal::company_db,
    domain::{
        call_budget::CallBudget,
        company::{Company, CompanyRecord},
    },
    routes::reconcile_route::ReconcileLock,
    services::{DirectoryClient, ReconciliationPipeline},
};

#[get("")]
pub async fn get_companies(pool: web::Data<SqlitePool>) -> HttpResponse {
    match company_db::get_all_companies(&pool).await {
        Ok(companies) => HttpResponse::Ok().json(companies),
        Err(e) => {
            log::error!("Error listing companies: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
pub struct NewCompany {
    name: String,
    employees: Option<f64>,
}

#[post("")]
pub async fn create_company(
    pool: web::Data<SqlitePool>,
    body: web::Json<NewCompany>,
) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().body("Company name cannot be empty");
    }
    let employees = body.employees.filter(|e| *e >= 0.0);

    match company_db::add_company(&pool, name, employees).await {
        Ok(true) => {
            log::info!("Added company {}", name);
            HttpResponse::Created().body(format!("Added {}", name))
        }
        Ok(false) => HttpResponse::Conflict().body(format!("{} already exists", name)),
        Err(e) => {
            log::error!("Error adding company {}: {:?}", name, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
pub struct CheckCompanyQuery {
    name: String,
}

#[post("/check")]
pub async fn check_company(
    pool: web::Data<SqlitePool>,
    pipeline: web::Data<ReconciliationPipeline>,
    lock: web::Data<ReconcileLock>,
    query: web::Query<CheckCompanyQuery>,
) -> HttpResponse {
    let name = query.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().body("Company name cannot be empty");
    }

    let Some(_guard) = lock.try_acquire() else {
        return HttpResponse::Conflict().body("A reconciliation run is already in progress");
    };
    pipeline.cancel_handle().reset();

    let company = match find_or_add_company(&pool, name).await {
        Ok(company) => company,
        Err(e) => {
            log::error!("Error loading company {}: {:?}", name, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut budget = CallBudget::new(NonZeroU32::MIN);
    let summary = pipeline
        .run(vec![CompanyRecord::from(&company)], &mut budget, 0)
        .await;
    let Some(outcome) = summary.outcomes.into_iter().next() else {
        return HttpResponse::Conflict().body(format!("Check of {} was cancelled", name));
    };

    if let Err(e) = company_db::record_outcomes(&pool, std::slice::from_ref(&outcome)).await {
        log::error!("Error recording website check of {}: {:?}", name, e);
        return HttpResponse::InternalServerError().json(outcome);
    }

    if outcome.error().is_some() {
        return HttpResponse::BadGateway().json(outcome);
    }

    HttpResponse::Ok().json(outcome)
}

async fn find_or_add_company(pool: &SqlitePool, name: &str) -> Result<Company, sqlx::Error> {
    company_db::add_company(pool, name, None).await?;

    company_db::get_company_by_name(pool, name)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

#[derive(Deserialize)]
pub struct ImportCompaniesQuery {
    business_type: String,
    #[serde(default = "default_max_pages")]
    max_pages: u8,
}

fn default_max_pages() -> u8 {
    1
}

#[derive(Serialize)]
struct ImportCompaniesResponse {
    fetched: usize,
    inserted: usize,
}

#[post("/import")]
pub async fn import_companies(
    pool: web::Data<SqlitePool>,
    directory_client: web::Data<DirectoryClient>,
    query: web::Query<ImportCompaniesQuery>,
) -> HttpResponse {
    let companies = match directory_client
        .search(&query.business_type, query.max_pages)
        .await
    {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Error fetching companies from directory: {:?}", e);
            return HttpResponse::BadGateway().body(format!("Directory search failed: {}", e));
        }
    };

    let mut inserted = 0;
    for company in companies.iter() {
        match company_db::add_company(&pool, &company.company_name, company.employees).await {
            Ok(true) => inserted += 1,
            Ok(false) => {}
            Err(e) => {
                log::error!("Error inserting company {}: {:?}", company.company_name, e);
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    log::info!(
        "Imported {} new of {} fetched companies for {}",
        inserted,
        companies.len(),
        query.business_type
    );

    HttpResponse::Ok().json(ImportCompaniesResponse {
        fetched: companies.len(),
        inserted,
    })
}

#[post("/reset")]
pub async fn reset_companies(pool: web::Data<SqlitePool>) -> HttpResponse {
    match company_db::reset_all_companies(&pool).await {
        Ok(count) => HttpResponse::Ok().body(format!("Reset {} companies", count)),
        Err(e) => {
            log::error!("Error resetting companies: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("")]
pub async fn delete_companies(pool: web::Data<SqlitePool>) -> HttpResponse {
    match company_db::delete_all_companies(&pool).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {} companies", count)),
        Err(e) => {
            log::error!("Error deleting companies: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
