use serde::{Deserialize, Serialize};

/// Inputs to the GDS/TDS calculation, all monthly amounts except income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioInputs {
    pub gross_annual_income: f64,
    pub monthly_mortgage_payment: f64,
    pub monthly_property_taxes: f64,
    pub monthly_heating: f64,
    pub monthly_condo_fees: f64,
    pub monthly_other_debts: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressTestInputs {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub contract_interest_rate: f64,
    pub amortization_years: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentInputs {
    pub purchase_price: f64,
    pub proposed_down_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditInputs {
    pub credit_score: u16,
    pub down_payment_percentage: f64,
}

/// Gross and Total Debt Service ratios against the configured limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    pub gds_ratio: f64,
    pub tds_ratio: f64,
    pub gds_compliant: bool,
    pub tds_compliant: bool,
    pub overall_compliant: bool,
    pub gds_limit: f64,
    pub tds_limit: f64,
    pub monthly_income: f64,
    pub housing_costs: f64,
    pub total_debt_costs: f64,
    pub recommendation: String,
}

/// Payments at the contract and OSFI B-20 qualifying rates.
///
/// `passes` is not a verdict on its own: affordability is decided by feeding
/// `qualifying_payment` back into the debt-service ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestResult {
    pub contract_rate: f64,
    pub qualifying_rate: f64,
    pub stress_test_applied: bool,
    pub qualifying_payment: f64,
    pub contract_payment: f64,
    pub additional_qualifying_amount: f64,
    pub loan_amount: f64,
    pub amortization_years: u32,
    pub passes: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentResult {
    pub purchase_price: f64,
    pub proposed_down_payment: f64,
    pub minimum_required: f64,
    pub meets_minimum: bool,
    pub shortfall: f64,
    pub down_payment_percentage: f64,
    pub loan_to_value: f64,
    pub insurance_required: bool,
    /// False when CMHC cannot insure the loan (price above the cap or LTV above the last band).
    pub insurable: bool,
    pub insurance_premium_rate: f64,
    pub insurance_premium: f64,
    pub total_loan_amount: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MortgageCategory {
    Insured,
    Conventional,
}

impl MortgageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MortgageCategory::Insured => "CMHC Insured",
            MortgageCategory::Conventional => "Conventional",
        }
    }
}

/// Bureau-style grouping reported alongside the threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl CreditTier {
    pub fn from_score(score: u16) -> Self {
        match score {
            800.. => CreditTier::Excellent,
            720..=799 => CreditTier::VeryGood,
            650..=719 => CreditTier::Good,
            600..=649 => CreditTier::Fair,
            _ => CreditTier::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditTier::Excellent => "Excellent",
            CreditTier::VeryGood => "Very Good",
            CreditTier::Good => "Good",
            CreditTier::Fair => "Fair",
            CreditTier::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditResult {
    pub credit_score: u16,
    pub credit_tier: CreditTier,
    pub mortgage_category: MortgageCategory,
    pub required_threshold: u16,
    pub meets_threshold: bool,
    pub points_above_minimum: i32,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumResult {
    pub a: i64,
    pub b: i64,
    pub sum: i64,
}
