use super::round2;
use crate::qualification::config::QualificationConfig;
use crate::qualification::domain::{RatioInputs, RatioResult};
use crate::qualification::error::DomainViolation;

/// Computes GDS and TDS against the CMHC limits.
///
/// Condo fees count at `condo_fee_share` of their face value. Compliance flags are decided on
/// the unrounded ratios; the reported figures are rounded to two decimals.
pub fn debt_service_ratios(
    inputs: &RatioInputs,
    config: &QualificationConfig,
) -> Result<RatioResult, DomainViolation> {
    let monthly_income = inputs.gross_annual_income / 12.0;
    if monthly_income <= 0.0 || !monthly_income.is_finite() {
        return Err(DomainViolation::NonPositiveIncome { monthly_income });
    }

    let housing_costs = inputs.monthly_mortgage_payment
        + inputs.monthly_property_taxes
        + inputs.monthly_heating
        + config.condo_fee_share * inputs.monthly_condo_fees;
    let total_debt_costs = housing_costs + inputs.monthly_other_debts;

    let gds = housing_costs / monthly_income * 100.0;
    let tds = total_debt_costs / monthly_income * 100.0;
    if !gds.is_finite() || !tds.is_finite() {
        return Err(DomainViolation::UnboundedCosts);
    }

    let gds_compliant = gds <= config.gds_limit;
    let tds_compliant = tds <= config.tds_limit;
    let overall_compliant = gds_compliant && tds_compliant;

    let recommendation = match (gds_compliant, tds_compliant) {
        (true, true) => "Approved - debt ratios within CMHC limits".to_string(),
        (false, true) => format!(
            "Denied - GDS {:.2}% exceeds the {:.2}% limit",
            gds, config.gds_limit
        ),
        (true, false) => format!(
            "Denied - TDS {:.2}% exceeds the {:.2}% limit",
            tds, config.tds_limit
        ),
        (false, false) => format!(
            "Denied - GDS {:.2}% and TDS {:.2}% exceed CMHC limits",
            gds, tds
        ),
    };

    Ok(RatioResult {
        gds_ratio: round2(gds),
        tds_ratio: round2(tds),
        gds_compliant,
        tds_compliant,
        overall_compliant,
        gds_limit: config.gds_limit,
        tds_limit: config.tds_limit,
        monthly_income: round2(monthly_income),
        housing_costs: round2(housing_costs),
        total_debt_costs: round2(total_debt_costs),
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RatioInputs {
        RatioInputs {
            gross_annual_income: 85_000.0,
            monthly_mortgage_payment: 2_200.0,
            monthly_property_taxes: 250.0,
            monthly_heating: 100.0,
            monthly_condo_fees: 0.0,
            monthly_other_debts: 450.0,
        }
    }

    #[test]
    fn reference_applicant_is_within_limits() {
        let result = debt_service_ratios(&inputs(), &QualificationConfig::default())
            .expect("ratios compute");

        assert_eq!(result.monthly_income, 7_083.33);
        assert_eq!(result.housing_costs, 2_550.0);
        assert_eq!(result.gds_ratio, 36.0);
        assert_eq!(result.tds_ratio, 42.35);
        assert!(result.gds_compliant);
        assert!(result.tds_compliant);
        assert!(result.overall_compliant);
        assert!(result.recommendation.starts_with("Approved"));
    }

    #[test]
    fn condo_fees_count_at_half() {
        let mut with_condo = inputs();
        with_condo.monthly_condo_fees = 400.0;

        let result = debt_service_ratios(&with_condo, &QualificationConfig::default())
            .expect("ratios compute");

        assert_eq!(result.housing_costs, 2_750.0);
        assert_eq!(result.total_debt_costs, 3_200.0);
    }

    #[test]
    fn flags_tds_breach_only() {
        let mut heavy_debt = inputs();
        heavy_debt.monthly_other_debts = 900.0;

        let result = debt_service_ratios(&heavy_debt, &QualificationConfig::default())
            .expect("ratios compute");

        assert!(result.gds_compliant);
        assert!(!result.tds_compliant);
        assert!(!result.overall_compliant);
        assert!(result.recommendation.contains("TDS"));
    }

    #[test]
    fn limit_is_inclusive() {
        let exact = RatioInputs {
            gross_annual_income: 120_000.0,
            monthly_mortgage_payment: 3_900.0,
            monthly_property_taxes: 0.0,
            monthly_heating: 0.0,
            monthly_condo_fees: 0.0,
            monthly_other_debts: 0.0,
        };

        let result =
            debt_service_ratios(&exact, &QualificationConfig::default()).expect("ratios compute");

        assert_eq!(result.gds_ratio, 39.0);
        assert!(result.gds_compliant);
    }

    #[test]
    fn rejects_zero_income() {
        let mut broke = inputs();
        broke.gross_annual_income = 0.0;

        let err = debt_service_ratios(&broke, &QualificationConfig::default())
            .expect_err("zero income is not physical");

        assert!(matches!(err, DomainViolation::NonPositiveIncome { .. }));
        assert_eq!(err.field(), Some("gross_annual_income"));
    }

    #[test]
    fn rejects_costs_that_overflow() {
        let mut huge = inputs();
        huge.monthly_mortgage_payment = 1e308;
        huge.monthly_property_taxes = 1e308;

        let err = debt_service_ratios(&huge, &QualificationConfig::default())
            .expect_err("costs overflow to infinity");

        assert_eq!(err, DomainViolation::UnboundedCosts);
        assert_eq!(err.field(), None);
    }
}
