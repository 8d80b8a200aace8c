//! Property-based checks for the qualification calculators.

use mortgage_prequal::qualification::calculators::{down_payment, ratios, stress_test};
use mortgage_prequal::qualification::{QualificationConfig, RatioInputs, StressTestInputs};
use proptest::prelude::*;

fn amount() -> impl Strategy<Value = f64> {
    0.0f64..20_000.0
}

proptest! {
    #[test]
    fn gds_never_exceeds_tds(
        income in 1_000.0f64..1_000_000.0,
        mortgage in amount(),
        taxes in amount(),
        heating in amount(),
        condo in amount(),
        other in amount(),
    ) {
        let inputs = RatioInputs {
            gross_annual_income: income,
            monthly_mortgage_payment: mortgage,
            monthly_property_taxes: taxes,
            monthly_heating: heating,
            monthly_condo_fees: condo,
            monthly_other_debts: other,
        };
        let result = ratios::debt_service_ratios(&inputs, &QualificationConfig::default())
            .expect("positive income");
        prop_assert!(result.gds_ratio <= result.tds_ratio);
        if !result.tds_compliant {
            prop_assert!(!result.overall_compliant);
        }
    }

    #[test]
    fn minimum_down_payment_is_non_decreasing_within_tiers(
        price in 1.0f64..1_000_000.0,
        step in 0.0f64..10_000.0,
    ) {
        let config = QualificationConfig::default();
        let next = (price + step).min(config.insurable_price_cap);
        prop_assert!(
            down_payment::minimum_down_payment(next, &config)
                >= down_payment::minimum_down_payment(price, &config)
        );
    }

    #[test]
    fn qualifying_rate_respects_floor_and_buffer(contract in 0.01f64..15.0) {
        let config = QualificationConfig::default();
        let rate = stress_test::qualifying_rate(contract, &config);
        prop_assert!(rate >= config.qualifying_rate_floor);
        if contract + config.stress_buffer > config.qualifying_rate_floor {
            prop_assert_eq!(rate, contract + config.stress_buffer);
        }
    }

    #[test]
    fn stress_test_is_deterministic(
        price in 100_000.0f64..2_000_000.0,
        down_share in 0.0f64..0.9,
        contract in 0.5f64..10.0,
        years in 5i64..=35,
    ) {
        let inputs = StressTestInputs {
            purchase_price: price,
            down_payment: price * down_share,
            contract_interest_rate: contract,
            amortization_years: years,
        };
        let config = QualificationConfig::default();
        let first = stress_test::stress_test(&inputs, &config).expect("valid inputs");
        let second = stress_test::stress_test(&inputs, &config).expect("valid inputs");
        prop_assert_eq!(first.qualifying_payment.to_bits(), second.qualifying_payment.to_bits());
        prop_assert!(first.qualifying_payment >= first.contract_payment);
    }
}

#[test]
fn minimum_down_payment_is_continuous_at_first_ceiling() {
    let config = QualificationConfig::default();
    let below = down_payment::minimum_down_payment(499_999.99, &config);
    let at = down_payment::minimum_down_payment(500_000.0, &config);
    let above = down_payment::minimum_down_payment(500_000.01, &config);

    assert!((at - below) < 0.01);
    assert!((above - at) < 0.01);
    assert!(above >= at && at >= below);
}
