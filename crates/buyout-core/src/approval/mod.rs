//! Lender approval workflow. Every transition takes an application snapshot
//! and returns a new one; recording decisions is the host's job.

pub mod pipeline;
pub mod policy;
pub mod workflow;

pub use policy::LendingPolicy;
pub use workflow::{
    approve, reject, revise_terms, seed_terms, start_review, ApplicationStatus, ApprovalDecision,
    ApprovalTerms, LoanApplication, Rejection, TermOverrides,
};
