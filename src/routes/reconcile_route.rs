use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    configuration::ReconciliationSettings,
    dal::company_db::{self, CompanyStore},
    domain::{call_budget::CallBudget, company::CompanySource, outcome::RunSummary},
    services::ReconciliationPipeline,
};

// Held while a run or single check spends the provider quota
#[derive(Default)]
pub struct ReconcileLock(Mutex<()>);

impl ReconcileLock {
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, ()>> {
        self.0.try_lock().ok()
    }
}

#[derive(Deserialize)]
pub struct ReconcileQuery {
    limit: Option<u32>,
    max_companies: Option<usize>,
}

#[derive(Serialize)]
struct UnrecordedRun<'a> {
    error: String,
    summary: &'a RunSummary,
}

#[post("")]
pub async fn run_reconciliation(
    pool: web::Data<SqlitePool>,
    company_store: web::Data<CompanyStore>,
    pipeline: web::Data<ReconciliationPipeline>,
    settings: web::Data<ReconciliationSettings>,
    lock: web::Data<ReconcileLock>,
    query: web::Query<ReconcileQuery>,
) -> HttpResponse {
    let Some(_guard) = lock.try_acquire() else {
        return HttpResponse::Conflict().body("A reconciliation run is already in progress");
    };
    // Cancels sent while no run was active are stale
    pipeline.cancel_handle().reset();

    let limit = query.limit.unwrap_or(settings.call_limit);
    let Some(mut budget) = CallBudget::with_limit(limit) else {
        return HttpResponse::BadRequest().body("Search call limit must be greater than zero");
    };

    let companies = match company_store
        .fetch_batch(query.max_companies.or(settings.max_companies))
        .await
    {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Error fetching companies to check: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let summary = pipeline
        .run(companies, &mut budget, settings.min_delay_ms)
        .await;

    if let Err(e) = company_db::record_outcomes(&pool, &summary.outcomes).await {
        log::error!("Error recording outcomes of run {}: {:?}", summary.run_id, e);
        return HttpResponse::InternalServerError().json(UnrecordedRun {
            error: format!("Recording outcomes failed: {}", e),
            summary: &summary,
        });
    }

    HttpResponse::Ok().json(summary)
}

#[post("/cancel")]
pub async fn cancel_reconciliation(pipeline: web::Data<ReconciliationPipeline>) -> HttpResponse {
    pipeline.cancel_handle().cancel();

    HttpResponse::Accepted().body("Cancellation requested")
}
