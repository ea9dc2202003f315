pub mod calculator;
pub mod quote;

pub use calculator::{
    calculate_buyout, calculate_buyout_from_annual_ctc, BuyoutOutput, SalaryProfile,
};
