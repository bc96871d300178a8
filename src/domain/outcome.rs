use serde::Serialize;
use uuid::Uuid;

use super::{call_budget::CallBudget, company::CompanyRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Matched { url: String },
    NoMatch,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub company: CompanyRecord,
    pub candidate_urls: Vec<String>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl MatchOutcome {
    pub fn matched(company: CompanyRecord, url: String, candidate_urls: Vec<String>) -> Self {
        MatchOutcome {
            company,
            candidate_urls,
            status: OutcomeStatus::Matched { url },
        }
    }

    pub fn no_match(company: CompanyRecord, candidate_urls: Vec<String>) -> Self {
        MatchOutcome {
            company,
            candidate_urls,
            status: OutcomeStatus::NoMatch,
        }
    }

    pub fn failed(company: CompanyRecord, error: String) -> Self {
        MatchOutcome {
            company,
            candidate_urls: vec![],
            status: OutcomeStatus::Failed { error },
        }
    }

    pub fn matched_url(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Matched { url } => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Failed { error } => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn is_no_match(&self) -> bool {
        self.status == OutcomeStatus::NoMatch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Completed,
    BudgetExhausted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub total_batch: usize,
    pub processed: usize,
    pub skipped: usize,
    pub with_website: usize,
    pub without_website: usize,
    pub errors: usize,
    pub calls_used: u32,
    pub call_limit: u32,
    pub stop_reason: StopReason,
    pub outcomes: Vec<MatchOutcome>,
}

impl RunSummary {
    pub fn new(
        run_id: Uuid,
        total_batch: usize,
        outcomes: Vec<MatchOutcome>,
        budget: &CallBudget,
        stop_reason: StopReason,
    ) -> Self {
        let with_website = outcomes.iter().filter(|o| o.matched_url().is_some()).count();
        let errors = outcomes.iter().filter(|o| o.error().is_some()).count();
        let without_website = outcomes.iter().filter(|o| o.is_no_match()).count();

        RunSummary {
            run_id,
            total_batch,
            processed: outcomes.len(),
            skipped: total_batch.saturating_sub(outcomes.len()),
            with_website,
            without_website,
            errors,
            calls_used: budget.used(),
            call_limit: budget.limit(),
            stop_reason,
            outcomes,
        }
    }

    pub fn companies_with_website(&self) -> impl Iterator<Item = &MatchOutcome> {
        self.outcomes.iter().filter(|o| o.matched_url().is_some())
    }

    pub fn companies_without_website(&self) -> impl Iterator<Item = &MatchOutcome> {
        self.outcomes.iter().filter(|o| o.is_no_match())
    }

    pub fn failed_companies(&self) -> impl Iterator<Item = &MatchOutcome> {
        self.outcomes.iter().filter(|o| o.error().is_some())
    }

    pub fn log_report(&self) {
        log::info!(
            "Run {} finished ({:?}): checked {} of {}, {} with website, {} without website, {} errors, {}/{} search calls used",
            self.run_id,
            self.stop_reason,
            self.processed,
            self.total_batch,
            self.with_website,
            self.without_website,
            self.errors,
            self.calls_used,
            self.call_limit,
        );

        if self.skipped > 0 {
            log::warn!("Run {} skipped {} companies", self.run_id, self.skipped);
        }
        for outcome in self.companies_without_website() {
            log::info!(
                "No website: {} (employees: {})",
                outcome.company.name,
                outcome
                    .company
                    .employees
                    .map_or("unknown".to_string(), |e| e.to_string())
            );
        }
        for outcome in self.companies_with_website() {
            log::info!(
                "Has website: {} -> {}",
                outcome.company.name,
                outcome.matched_url().unwrap_or_default()
            );
        }
        for outcome in self.failed_companies() {
            log::error!(
                "Check failed: {}: {}",
                outcome.company.name,
                outcome.error().unwrap_or_default()
            );
        }
    }
}
