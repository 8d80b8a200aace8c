use std::ops::RangeInclusive;

use crate::qualification::config::QualificationConfig;
use crate::qualification::domain::{CreditInputs, CreditResult, CreditTier, MortgageCategory};

/// Scores accepted by Canadian credit bureaus.
pub const CREDIT_SCORE_RANGE: RangeInclusive<u16> = 300..=900;

/// Insured when the buyer puts down less than the conventional threshold.
pub fn mortgage_category(
    down_payment_percentage: f64,
    config: &QualificationConfig,
) -> MortgageCategory {
    if down_payment_percentage < config.conventional_down_payment_pct {
        MortgageCategory::Insured
    } else {
        MortgageCategory::Conventional
    }
}

/// Checks a credit score against the minimum for the mortgage category.
///
/// Range validation happens at the dispatcher; this function trusts its input.
pub fn check_credit_threshold(
    inputs: &CreditInputs,
    config: &QualificationConfig,
) -> CreditResult {
    let mortgage_category = mortgage_category(inputs.down_payment_percentage, config);
    let required_threshold = match mortgage_category {
        MortgageCategory::Insured => config.insured_credit_minimum,
        MortgageCategory::Conventional => config.conventional_credit_minimum,
    };
    let meets_threshold = inputs.credit_score >= required_threshold;
    let points_above_minimum = i32::from(inputs.credit_score) - i32::from(required_threshold);

    let recommendation = if meets_threshold {
        "Approved - credit score meets requirements".to_string()
    } else {
        format!(
            "Denied - credit score too low (need {}+ for a {} mortgage)",
            required_threshold,
            mortgage_category.label()
        )
    };

    CreditResult {
        credit_score: inputs.credit_score,
        credit_tier: CreditTier::from_score(inputs.credit_score),
        mortgage_category,
        required_threshold,
        meets_threshold,
        points_above_minimum,
        recommendation,
    }
}
