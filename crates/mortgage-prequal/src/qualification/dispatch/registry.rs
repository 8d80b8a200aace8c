use serde_json::{json, Map, Value};

use super::arguments::{FieldSpec, ToolArguments};
use super::envelope::ToolResult;
use crate::qualification::calculators::{arithmetic, credit, down_payment, ratios, stress_test};
use crate::qualification::config::QualificationConfig;
use crate::qualification::domain::{
    CreditInputs, DownPaymentInputs, RatioInputs, StressTestInputs,
};
use crate::qualification::error::ToolError;

pub type OperationHandler =
    fn(&ToolArguments, &QualificationConfig) -> Result<ToolResult, ToolError>;

/// One registered operation: its public name, argument contract and handler.
#[derive(Clone, Copy)]
pub struct OperationSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    pub(crate) handler: OperationHandler,
}

impl OperationSpec {
    /// Tool schema in the shape gateways expect (`name`, `description`, `input_schema`).
    pub fn schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.is_required())
            .map(|field| field.name)
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}

impl std::fmt::Debug for OperationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSpec")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

const DEBT_SERVICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("gross_annual_income", "Gross annual household income in dollars"),
    FieldSpec::number("monthly_mortgage_payment", "Monthly principal and interest payment")
        .non_negative(),
    FieldSpec::number("monthly_property_taxes", "Monthly property taxes").non_negative(),
    FieldSpec::number("monthly_heating", "Monthly heating costs").non_negative(),
    FieldSpec::number("monthly_condo_fees", "Monthly condo fees (counted at 50%)")
        .optional(0.0)
        .non_negative(),
    FieldSpec::number(
        "monthly_other_debts",
        "Other monthly debt payments (cards, car loans, lines of credit)",
    )
    .optional(0.0)
    .non_negative(),
];

const STRESS_TEST_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("purchase_price", "Purchase price of the property"),
    FieldSpec::number("down_payment", "Down payment amount").non_negative(),
    FieldSpec::number(
        "contract_interest_rate",
        "Contract interest rate as a percentage (e.g. 5.0)",
    ),
    FieldSpec::integer("amortization_years", "Amortization period in years").optional(25.0),
];

const DOWN_PAYMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("purchase_price", "Purchase price of the property"),
    FieldSpec::number("proposed_down_payment", "Down payment the buyer proposes").non_negative(),
];

const CREDIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("credit_score", "Credit bureau score (300-900)").within(300.0, 900.0),
    FieldSpec::number(
        "down_payment_percentage",
        "Down payment as a percentage of the purchase price",
    )
    .non_negative(),
];

const ADD_NUMBERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("a", "First addend"),
    FieldSpec::integer("b", "Second addend"),
];

/// Fixed operation registry. Adding an operation means adding one entry here.
pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "calculate_gds_tds",
        description: "Calculate Gross and Total Debt Service ratios against CMHC limits \
                      (GDS <= 39%, TDS <= 44%)",
        fields: DEBT_SERVICE_FIELDS,
        handler: run_debt_service,
    },
    OperationSpec {
        name: "osfi_b20_stress_test",
        description: "Apply the OSFI B-20 stress test: payment at the higher of contract \
                      rate + 2% or 5.25%",
        fields: STRESS_TEST_FIELDS,
        handler: run_stress_test,
    },
    OperationSpec {
        name: "calculate_down_payment",
        description: "Check the minimum down payment and CMHC insurance premium for a purchase",
        fields: DOWN_PAYMENT_FIELDS,
        handler: run_down_payment,
    },
    OperationSpec {
        name: "check_credit_threshold",
        description: "Check a credit score against the CMHC insured or conventional minimum",
        fields: CREDIT_FIELDS,
        handler: run_credit_threshold,
    },
    OperationSpec {
        name: "add_numbers",
        description: "Return the sum of two integers",
        fields: ADD_NUMBERS_FIELDS,
        handler: run_add_numbers,
    },
];

pub fn find_operation(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|operation| operation.name == name)
}

fn run_debt_service(
    args: &ToolArguments,
    config: &QualificationConfig,
) -> Result<ToolResult, ToolError> {
    let inputs = RatioInputs {
        gross_annual_income: args.number("gross_annual_income")?,
        monthly_mortgage_payment: args.number("monthly_mortgage_payment")?,
        monthly_property_taxes: args.number("monthly_property_taxes")?,
        monthly_heating: args.number("monthly_heating")?,
        monthly_condo_fees: args.number("monthly_condo_fees")?,
        monthly_other_debts: args.number("monthly_other_debts")?,
    };
    let result = ratios::debt_service_ratios(&inputs, config)?;
    Ok(ToolResult::Ratios(result))
}

fn run_stress_test(
    args: &ToolArguments,
    config: &QualificationConfig,
) -> Result<ToolResult, ToolError> {
    let inputs = StressTestInputs {
        purchase_price: args.number("purchase_price")?,
        down_payment: args.number("down_payment")?,
        contract_interest_rate: args.number("contract_interest_rate")?,
        amortization_years: args.integer("amortization_years")?,
    };
    let result = stress_test::stress_test(&inputs, config)?;
    Ok(ToolResult::StressTest(result))
}

fn run_down_payment(
    args: &ToolArguments,
    config: &QualificationConfig,
) -> Result<ToolResult, ToolError> {
    let inputs = DownPaymentInputs {
        purchase_price: args.number("purchase_price")?,
        proposed_down_payment: args.number("proposed_down_payment")?,
    };
    let result = down_payment::evaluate_down_payment(&inputs, config)?;
    Ok(ToolResult::DownPayment(result))
}

fn run_credit_threshold(
    args: &ToolArguments,
    config: &QualificationConfig,
) -> Result<ToolResult, ToolError> {
    let raw_score = args.integer("credit_score")?;
    let credit_score = u16::try_from(raw_score)
        .ok()
        .filter(|score| credit::CREDIT_SCORE_RANGE.contains(score))
        .ok_or_else(|| {
            ToolError::invalid(
                "credit_score",
                format!("must be between 300 and 900, got {raw_score}"),
            )
        })?;

    let inputs = CreditInputs {
        credit_score,
        down_payment_percentage: args.number("down_payment_percentage")?,
    };
    Ok(ToolResult::Credit(credit::check_credit_threshold(&inputs, config)))
}

fn run_add_numbers(
    args: &ToolArguments,
    _config: &QualificationConfig,
) -> Result<ToolResult, ToolError> {
    let result = arithmetic::add_numbers(args.integer("a")?, args.integer("b")?)?;
    Ok(ToolResult::Sum(result))
}
