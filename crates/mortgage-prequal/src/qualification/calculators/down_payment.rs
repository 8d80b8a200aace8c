use super::round2;
use crate::qualification::config::{QualificationConfig, LTV_TOLERANCE};
use crate::qualification::domain::{DownPaymentInputs, DownPaymentResult};
use crate::qualification::error::DomainViolation;

/// Minimum down payment under the tiered CMHC rule.
///
/// Prices up to the first ceiling pay the first-tier rate; prices up to the insurable cap add
/// the second-tier rate on the remainder; anything above the cap needs the high-value rate on
/// the whole price.
pub fn minimum_down_payment(purchase_price: f64, config: &QualificationConfig) -> f64 {
    if purchase_price <= config.first_tier_ceiling {
        purchase_price * config.first_tier_rate
    } else if purchase_price <= config.insurable_price_cap {
        config.first_tier_ceiling * config.first_tier_rate
            + (purchase_price - config.first_tier_ceiling) * config.second_tier_rate
    } else {
        purchase_price * config.high_value_rate
    }
}

/// Evaluates a proposed down payment and the CMHC insurance it triggers.
pub fn evaluate_down_payment(
    inputs: &DownPaymentInputs,
    config: &QualificationConfig,
) -> Result<DownPaymentResult, DomainViolation> {
    let DownPaymentInputs {
        purchase_price,
        proposed_down_payment,
    } = *inputs;

    if purchase_price <= 0.0 {
        return Err(DomainViolation::NonPositivePrice(purchase_price));
    }
    if proposed_down_payment >= purchase_price {
        return Err(DomainViolation::DownPaymentExceedsPrice {
            field: "proposed_down_payment",
            down_payment: proposed_down_payment,
            purchase_price,
        });
    }

    let minimum_required = minimum_down_payment(purchase_price, config);
    let meets_minimum = proposed_down_payment >= minimum_required;
    let shortfall = (minimum_required - proposed_down_payment).max(0.0);

    let loan_amount = purchase_price - proposed_down_payment;
    let down_payment_percentage = proposed_down_payment / purchase_price * 100.0;
    let loan_to_value = loan_amount / purchase_price * 100.0;

    let within_price_cap = purchase_price <= config.insurable_price_cap;
    let insurance_required =
        within_price_cap && loan_to_value > config.insurance_ltv_threshold + LTV_TOLERANCE;
    let insurable =
        within_price_cap && loan_to_value <= config.max_insurable_ltv() + LTV_TOLERANCE;

    let insurance_premium_rate = if insurance_required {
        config
            .premium_band_for(loan_to_value)
            .map(|band| band.premium_rate)
            .unwrap_or(0.0)
    } else {
        0.0
    };
    let insurance_premium = loan_amount * insurance_premium_rate / 100.0;

    let recommendation = if !meets_minimum {
        format!(
            "Need ${:.2} more to reach the minimum down payment of ${:.2}",
            shortfall, minimum_required
        )
    } else if insurance_required && !insurable {
        format!(
            "Loan-to-value of {:.2}% exceeds the {:.2}% CMHC maximum; insurance unavailable",
            loan_to_value,
            config.max_insurable_ltv()
        )
    } else if insurance_required {
        format!(
            "Approved - down payment sufficient; CMHC insurance required at {:.2}%",
            insurance_premium_rate
        )
    } else {
        "Approved - down payment sufficient; no CMHC insurance required".to_string()
    };

    Ok(DownPaymentResult {
        purchase_price: round2(purchase_price),
        proposed_down_payment: round2(proposed_down_payment),
        minimum_required: round2(minimum_required),
        meets_minimum,
        shortfall: round2(shortfall),
        down_payment_percentage: round2(down_payment_percentage),
        loan_to_value: round2(loan_to_value),
        insurance_required,
        insurable,
        insurance_premium_rate,
        insurance_premium: round2(insurance_premium),
        total_loan_amount: round2(loan_amount + insurance_premium),
        recommendation,
    })
}
