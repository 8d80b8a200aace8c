use super::common::*;
use serde_json::json;

use crate::qualification::domain::MortgageCategory;
use crate::qualification::error::ErrorKind;

#[test]
fn reference_applicant_debt_service() {
    let response = dispatcher().handle("calculate_gds_tds", &reference_ratio_args());
    let result = ratios(&response);

    assert_eq!(result.monthly_income, 7_083.33);
    assert_eq!(result.housing_costs, 2_550.0);
    assert_eq!(result.gds_ratio, 36.0);
    assert_eq!(result.tds_ratio, 42.35);
    assert!(result.gds_compliant && result.tds_compliant);
}

#[test]
fn reference_purchase_down_payment() {
    let response = dispatcher().handle(
        "calculate_down_payment",
        &args(json!({ "purchase_price": 650_000, "proposed_down_payment": 50_000 })),
    );
    let result = down_payment(&response);

    assert_eq!(result.minimum_required, 40_000.0);
    assert!(result.meets_minimum);
    assert_eq!(result.loan_to_value, 92.31);
    assert!(result.insurance_required);
}

#[test]
fn reference_applicant_credit() {
    let response = dispatcher().handle(
        "check_credit_threshold",
        &args(json!({ "credit_score": 680, "down_payment_percentage": 7.7 })),
    );
    let result = credit(&response);

    assert_eq!(result.mortgage_category, MortgageCategory::Insured);
    assert_eq!(result.required_threshold, 600);
    assert!(result.meets_threshold);
}

#[test]
fn down_payment_above_price_is_a_domain_violation() {
    let response = dispatcher().handle(
        "calculate_down_payment",
        &args(json!({ "purchase_price": 650_000, "proposed_down_payment": 700_000 })),
    );

    assert_eq!(response.error_kind(), Some(ErrorKind::DomainViolation));
    assert_eq!(
        response.error_detail().and_then(|detail| detail.field.as_deref()),
        Some("proposed_down_payment")
    );
}

#[test]
fn stress_test_payment_feeds_back_into_ratios() {
    let dispatcher = dispatcher();
    let stress_response = dispatcher.handle("osfi_b20_stress_test", &reference_stress_args());
    let qualifying_payment = stress(&stress_response).qualifying_payment;

    let mut ratio_args = reference_ratio_args();
    ratio_args.insert("monthly_mortgage_payment".to_string(), json!(qualifying_payment));
    let ratio_response = dispatcher.handle("calculate_gds_tds", &ratio_args);
    let result = ratios(&ratio_response);

    // At the 7% qualifying rate the reference applicant no longer fits the TDS limit.
    assert!(qualifying_payment > 4_000.0);
    assert!(!result.tds_compliant);
}
