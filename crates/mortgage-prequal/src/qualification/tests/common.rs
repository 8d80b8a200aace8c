use serde_json::{json, Map, Value};

use crate::qualification::dispatch::{ToolDispatcher, ToolResponse, ToolResult};
use crate::qualification::domain::{
    CreditResult, DownPaymentResult, RatioResult, StressTestResult,
};
use crate::qualification::QualificationConfig;

pub(super) fn dispatcher() -> ToolDispatcher {
    ToolDispatcher::new(QualificationConfig::default())
}

pub(super) fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("test arguments must be an object, got {other}"),
    }
}

pub(super) fn reference_ratio_args() -> Map<String, Value> {
    args(json!({
        "gross_annual_income": 85_000,
        "monthly_mortgage_payment": 2_200,
        "monthly_property_taxes": 250,
        "monthly_heating": 100,
        "monthly_condo_fees": 0,
        "monthly_other_debts": 450,
    }))
}

pub(super) fn reference_stress_args() -> Map<String, Value> {
    args(json!({
        "purchase_price": 650_000,
        "down_payment": 50_000,
        "contract_interest_rate": 5.0,
        "amortization_years": 25,
    }))
}

pub(super) fn ratios(response: &ToolResponse) -> &RatioResult {
    match response.result() {
        Some(ToolResult::Ratios(result)) => result,
        other => panic!("expected ratio result, got {other:?}"),
    }
}

pub(super) fn stress(response: &ToolResponse) -> &StressTestResult {
    match response.result() {
        Some(ToolResult::StressTest(result)) => result,
        other => panic!("expected stress-test result, got {other:?}"),
    }
}

pub(super) fn down_payment(response: &ToolResponse) -> &DownPaymentResult {
    match response.result() {
        Some(ToolResult::DownPayment(result)) => result,
        other => panic!("expected down-payment result, got {other:?}"),
    }
}

pub(super) fn credit(response: &ToolResponse) -> &CreditResult {
    match response.result() {
        Some(ToolResult::Credit(result)) => result,
        other => panic!("expected credit result, got {other:?}"),
    }
}
