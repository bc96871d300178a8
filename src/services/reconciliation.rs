use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use uuid::Uuid;

use crate::domain::{
    call_budget::CallBudget,
    company::CompanyRecord,
    outcome::{RunSummary, StopReason},
};

use super::WebsiteChecker;

#[derive(Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ReconciliationPipeline {
    checker: WebsiteChecker,
    cancel: CancelHandle,
}

impl ReconciliationPipeline {
    pub fn new(checker: WebsiteChecker) -> Self {
        ReconciliationPipeline {
            checker,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub async fn run(
        &self,
        companies: Vec<CompanyRecord>,
        budget: &mut CallBudget,
        min_delay_ms: u64,
    ) -> RunSummary {
        let run_id = Uuid::new_v4();
        let total_batch = companies.len();
        let min_delay = Duration::from_millis(min_delay_ms);

        log::info!(
            "Run {} started: {} companies, {} of {} search calls left",
            run_id,
            total_batch,
            budget.remaining(),
            budget.limit()
        );

        let mut outcomes = Vec::with_capacity(total_batch.min(budget.remaining() as usize));
        let mut stop_reason = StopReason::Completed;

        for company in companies {
            if self.cancel.is_cancelled() {
                log::warn!("Run {} cancelled before {}", run_id, company.name);
                stop_reason = StopReason::Cancelled;
                break;
            }
            if budget.is_exhausted() {
                log::warn!(
                    "Run {} reached the search call limit ({}), stopping",
                    run_id,
                    budget.limit()
                );
                stop_reason = StopReason::BudgetExhausted;
                break;
            }

            if !outcomes.is_empty() {
                tokio::time::sleep(min_delay).await;

                if self.cancel.is_cancelled() {
                    log::warn!("Run {} cancelled before {}", run_id, company.name);
                    stop_reason = StopReason::Cancelled;
                    break;
                }
            }

            budget.record_call();
            outcomes.push(self.checker.check_company(&company).await);
        }

        // A cancel only ever applies to the run it arrived during
        self.cancel.reset();

        let summary = RunSummary::new(run_id, total_batch, outcomes, budget, stop_reason);
        summary.log_report();

        summary
    }
}
