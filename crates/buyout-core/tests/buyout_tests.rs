use buyout_core::buyout::calculator::{self, SalaryProfile, STANDARD_NOTICE_PERIODS};
use buyout_core::buyout::quote::{self, BuyoutQuoteInput};
use buyout_core::BuyoutFinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Buyout amount
// ===========================================================================

#[test]
fn test_buyout_matches_rounded_formula_across_inputs() {
    let salaries = [dec!(25_000), dec!(47_500), dec!(83_333.33), dec!(100_000), dec!(275_000)];
    for salary in salaries {
        for days in [1, 7, 30, 45, 60, 90, 120, 180] {
            let out = calculator::calculate_buyout(salary, days).unwrap();
            let expected = (salary * Decimal::from(days) / dec!(30))
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(out.buyout_amount, expected, "salary {salary}, days {days}");
        }
    }
}

#[test]
fn test_standard_notice_periods_scale_linearly() {
    let amounts: Vec<Decimal> = STANDARD_NOTICE_PERIODS
        .iter()
        .map(|&d| calculator::calculate_buyout(dec!(90_000), d).unwrap().buyout_amount)
        .collect();
    assert_eq!(
        amounts,
        vec![dec!(90_000), dec!(180_000), dec!(270_000), dec!(360_000)]
    );
}

#[test]
fn test_thirty_day_month_is_calendar_blind() {
    // Thirty days of notice always costs exactly one month's salary.
    let out = calculator::calculate_buyout(dec!(73_219), 30).unwrap();
    assert_eq!(out.buyout_amount, dec!(73_219));
}

#[test]
fn test_profile_wrapper() {
    let profile = SalaryProfile {
        monthly_salary: dec!(100_000),
        notice_period_days: 90,
    };
    let out = calculator::calculate_buyout_for(&profile).unwrap();
    assert_eq!(out.buyout_amount, dec!(300_000));
}

#[test]
fn test_dashboard_preview_from_ctc() {
    // 18L CTC -> 1.5L a month -> 60 days = 3L
    let out = calculator::calculate_buyout_from_annual_ctc(dec!(1_800_000), 60).unwrap();
    assert_eq!(out.buyout_amount, dec!(300_000));
    assert_eq!(out.daily_salary, dec!(5000));
}

#[test]
fn test_invalid_inputs_name_the_field() {
    match calculator::calculate_buyout(dec!(-1), 30).unwrap_err() {
        BuyoutFinanceError::InvalidArgument { field, .. } => assert_eq!(field, "monthly_salary"),
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
    match calculator::calculate_buyout(dec!(1), 0).unwrap_err() {
        BuyoutFinanceError::InvalidArgument { field, .. } => {
            assert_eq!(field, "notice_period_days")
        }
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

// ===========================================================================
// Calculator quote
// ===========================================================================

#[test]
fn test_quote_envelope() {
    let input = BuyoutQuoteInput {
        monthly_salary: dec!(100_000),
        notice_period_days: 90,
        annual_rate_percent: None,
        tenures: None,
    };
    let out = quote::quote_buyout_financing(&input).unwrap();
    assert!(!out.methodology.is_empty());
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert_eq!(out.assumptions["days_per_month"], 30);
    assert_eq!(out.result.emi_options.len(), 3);
}

#[test]
fn test_quote_deserializes_from_json() {
    let input: BuyoutQuoteInput = serde_json::from_str(
        r#"{"monthly_salary": "60000", "notice_period_days": 60, "tenures": [6, 12]}"#,
    )
    .unwrap();
    let out = quote::quote_buyout_financing(&input).unwrap();
    assert_eq!(out.result.buyout.buyout_amount, dec!(120_000));
    assert_eq!(out.result.emi_options.len(), 2);
}

#[test]
fn test_unaffordable_quote_warns() {
    // Four months of notice financed over six months eats most of a salary.
    let input = BuyoutQuoteInput {
        monthly_salary: dec!(50_000),
        notice_period_days: 120,
        annual_rate_percent: Some(dec!(12)),
        tenures: Some(vec![6]),
    };
    let out = quote::quote_buyout_financing(&input).unwrap();
    assert!(!out.result.emi_options[0].affordable);
    assert!(out
        .warnings
        .iter()
        .any(|w| w.contains("30% of monthly salary")));
}
