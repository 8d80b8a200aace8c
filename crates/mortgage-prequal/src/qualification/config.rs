use serde::{Deserialize, Serialize};

/// Slack for float noise when a loan-to-value sits exactly on a band edge.
pub const LTV_TOLERANCE: f64 = 1e-9;

/// CMHC insurance premium applied to loans whose loan-to-value falls at or below `max_ltv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumBand {
    pub max_ltv: f64,
    pub premium_rate: f64,
}

/// Read-only rule table shared by every calculator.
///
/// Built once at startup and handed to calculators by reference. Percentages are expressed on a
/// 0-100 scale; down-payment tier rates are fractions of the price slice they apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationConfig {
    pub gds_limit: f64,
    pub tds_limit: f64,
    pub condo_fee_share: f64,
    pub stress_buffer: f64,
    pub qualifying_rate_floor: f64,
    pub first_tier_ceiling: f64,
    pub first_tier_rate: f64,
    pub second_tier_rate: f64,
    pub high_value_rate: f64,
    pub insurable_price_cap: f64,
    pub insurance_ltv_threshold: f64,
    /// Sorted by ascending `max_ltv`; the last band marks the highest insurable LTV.
    pub premium_bands: Vec<PremiumBand>,
    pub conventional_down_payment_pct: f64,
    pub insured_credit_minimum: u16,
    pub conventional_credit_minimum: u16,
}

impl QualificationConfig {
    /// CMHC guideline and OSFI B-20 values.
    pub fn canadian_defaults() -> Self {
        Self {
            gds_limit: 39.0,
            tds_limit: 44.0,
            condo_fee_share: 0.5,
            stress_buffer: 2.0,
            qualifying_rate_floor: 5.25,
            first_tier_ceiling: 500_000.0,
            first_tier_rate: 0.05,
            second_tier_rate: 0.10,
            high_value_rate: 0.20,
            insurable_price_cap: 1_000_000.0,
            insurance_ltv_threshold: 80.0,
            premium_bands: vec![
                PremiumBand {
                    max_ltv: 85.0,
                    premium_rate: 2.80,
                },
                PremiumBand {
                    max_ltv: 90.0,
                    premium_rate: 3.10,
                },
                PremiumBand {
                    max_ltv: 95.0,
                    premium_rate: 4.00,
                },
            ],
            conventional_down_payment_pct: 20.0,
            insured_credit_minimum: 600,
            conventional_credit_minimum: 650,
        }
    }

    /// Premium band covering `loan_to_value`, if the loan is insurable at all.
    pub fn premium_band_for(&self, loan_to_value: f64) -> Option<&PremiumBand> {
        self.premium_bands
            .iter()
            .find(|band| loan_to_value <= band.max_ltv + LTV_TOLERANCE)
    }

    pub fn max_insurable_ltv(&self) -> f64 {
        self.premium_bands
            .last()
            .map(|band| band.max_ltv)
            .unwrap_or(self.insurance_ltv_threshold)
    }

    /// Checks cross-field consistency after overrides are applied.
    pub fn validate(&self) -> Result<(), String> {
        if self.gds_limit > self.tds_limit {
            return Err(format!(
                "GDS limit {:.2} cannot exceed TDS limit {:.2}",
                self.gds_limit, self.tds_limit
            ));
        }

        if self.first_tier_ceiling > self.insurable_price_cap {
            return Err(format!(
                "first down-payment tier ceiling {:.2} exceeds insurable price cap {:.2}",
                self.first_tier_ceiling, self.insurable_price_cap
            ));
        }

        let sorted = self
            .premium_bands
            .windows(2)
            .all(|pair| pair[0].max_ltv < pair[1].max_ltv);
        if !sorted {
            return Err("premium bands must be sorted by ascending loan-to-value".to_string());
        }

        Ok(())
    }
}

impl Default for QualificationConfig {
    fn default() -> Self {
        Self::canadian_defaults()
    }
}
