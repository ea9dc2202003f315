pub mod affordability;
pub mod classifier;

pub use classifier::{
    classify, default_interest_rate, RateBand, RiskAssessment, RiskCategory, ScoreRating,
};
