pub mod call_budget;
pub mod company;
pub mod company_name;
pub mod domain_match;
pub mod outcome;
