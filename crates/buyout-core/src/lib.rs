pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "buyout")]
pub mod buyout;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "approval")]
pub mod approval;

pub use error::BuyoutFinanceError;
pub use types::*;

/// Standard result type for all buyout-core operations
pub type BuyoutFinanceResult<T> = Result<T, BuyoutFinanceError>;
