pub mod amortization;
pub mod approval;
pub mod buyout;
pub mod risk;
