use clap::Args;
use mortgage_prequal::error::AppError;
use mortgage_prequal::qualification::{
    CreditResult, DownPaymentResult, RatioResult, StressTestResult, ToolDispatcher, ToolResponse,
    ToolResult,
};
use serde_json::{json, Map, Value};

#[derive(Args, Debug, Clone)]
pub(crate) struct DemoArgs {
    /// Purchase price of the property
    #[arg(long, default_value_t = 650_000.0)]
    pub(crate) purchase_price: f64,
    /// Down payment the buyer proposes
    #[arg(long, default_value_t = 50_000.0)]
    pub(crate) down_payment: f64,
    /// Gross annual household income
    #[arg(long, default_value_t = 85_000.0)]
    pub(crate) annual_income: f64,
    /// Monthly property taxes
    #[arg(long, default_value_t = 350.0)]
    pub(crate) property_taxes: f64,
    /// Monthly heating costs
    #[arg(long, default_value_t = 100.0)]
    pub(crate) heating: f64,
    /// Monthly condo fees
    #[arg(long, default_value_t = 0.0)]
    pub(crate) condo_fees: f64,
    /// Other monthly debt payments
    #[arg(long, default_value_t = 450.0)]
    pub(crate) other_debts: f64,
    /// Contract interest rate as a percentage
    #[arg(long, default_value_t = 5.0)]
    pub(crate) contract_rate: f64,
    /// Amortization period in years
    #[arg(long, default_value_t = 25)]
    pub(crate) amortization_years: u32,
    /// Credit bureau score
    #[arg(long, default_value_t = 680)]
    pub(crate) credit_score: u16,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            purchase_price: 650_000.0,
            down_payment: 50_000.0,
            annual_income: 85_000.0,
            property_taxes: 350.0,
            heating: 100.0,
            condo_fees: 0.0,
            other_debts: 450.0,
            contract_rate: 5.0,
            amortization_years: 25,
            credit_score: 680,
        }
    }
}

/// Results of one pass through the four mortgage tools for a single applicant.
#[derive(Debug)]
pub(crate) struct DemoReport {
    pub(crate) down_payment: DownPaymentResult,
    pub(crate) stress_test: StressTestResult,
    pub(crate) ratios: RatioResult,
    pub(crate) credit: CreditResult,
}

impl DemoReport {
    pub(crate) fn pre_qualified(&self) -> bool {
        self.down_payment.meets_minimum
            && self.ratios.overall_compliant
            && self.credit.meets_threshold
    }
}

pub(crate) fn run_demo(args: DemoArgs, dispatcher: &ToolDispatcher) -> Result<(), AppError> {
    println!("Mortgage pre-qualification demo");
    println!(
        "Applicant: ${:.0} purchase | ${:.0} down | ${:.0} income | credit {}",
        args.purchase_price, args.down_payment, args.annual_income, args.credit_score
    );

    let report = build_report(&args, dispatcher)?;
    render_report(&report);
    Ok(())
}

/// Runs the tools in the order an advisor would: down payment, stress test, ratios at the
/// qualifying payment, then credit against the resulting mortgage category.
pub(crate) fn build_report(
    args: &DemoArgs,
    dispatcher: &ToolDispatcher,
) -> Result<DemoReport, AppError> {
    let down_payment = match invoke(
        dispatcher,
        "calculate_down_payment",
        json!({
            "purchase_price": args.purchase_price,
            "proposed_down_payment": args.down_payment,
        }),
    )? {
        ToolResult::DownPayment(result) => result,
        other => return Err(unexpected("calculate_down_payment", &other)),
    };

    let stress_test = match invoke(
        dispatcher,
        "osfi_b20_stress_test",
        json!({
            "purchase_price": args.purchase_price,
            "down_payment": args.down_payment,
            "contract_interest_rate": args.contract_rate,
            "amortization_years": args.amortization_years,
        }),
    )? {
        ToolResult::StressTest(result) => result,
        other => return Err(unexpected("osfi_b20_stress_test", &other)),
    };

    let ratios = match invoke(
        dispatcher,
        "calculate_gds_tds",
        json!({
            "gross_annual_income": args.annual_income,
            "monthly_mortgage_payment": stress_test.qualifying_payment,
            "monthly_property_taxes": args.property_taxes,
            "monthly_heating": args.heating,
            "monthly_condo_fees": args.condo_fees,
            "monthly_other_debts": args.other_debts,
        }),
    )? {
        ToolResult::Ratios(result) => result,
        other => return Err(unexpected("calculate_gds_tds", &other)),
    };

    let credit = match invoke(
        dispatcher,
        "check_credit_threshold",
        json!({
            "credit_score": args.credit_score,
            "down_payment_percentage": down_payment.down_payment_percentage,
        }),
    )? {
        ToolResult::Credit(result) => result,
        other => return Err(unexpected("check_credit_threshold", &other)),
    };

    Ok(DemoReport {
        down_payment,
        stress_test,
        ratios,
        credit,
    })
}

fn invoke(
    dispatcher: &ToolDispatcher,
    tool: &str,
    arguments: Value,
) -> Result<ToolResult, AppError> {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let response = dispatcher.handle(tool, &arguments);
    match response.result() {
        Some(result) => Ok(result.clone()),
        None => Err(AppError::Usage(failure_message(&response))),
    }
}

fn failure_message(response: &ToolResponse) -> String {
    match response.error_detail() {
        Some(detail) => format!(
            "{} rejected the sample applicant ({}): {}",
            response.operation,
            detail.kind.label(),
            detail.message
        ),
        None => format!("{} returned no result", response.operation),
    }
}

fn unexpected(tool: &str, result: &ToolResult) -> AppError {
    AppError::Usage(format!("{tool} returned an unexpected result: {result:?}"))
}

fn render_report(report: &DemoReport) {
    let DemoReport {
        down_payment,
        stress_test,
        ratios,
        credit,
    } = report;

    println!("\nDown payment");
    println!(
        "- {:.2}% down | minimum ${:.2} | {}",
        down_payment.down_payment_percentage,
        down_payment.minimum_required,
        pass_label(down_payment.meets_minimum)
    );
    if down_payment.insurance_required {
        println!(
            "- CMHC insurance at {:.2}%: premium ${:.2} | total loan ${:.2}",
            down_payment.insurance_premium_rate,
            down_payment.insurance_premium,
            down_payment.total_loan_amount
        );
    }
    println!("  {}", down_payment.recommendation);

    println!("\nOSFI B-20 stress test");
    println!(
        "- Contract {:.2}% -> qualifying {:.2}% over {} years",
        stress_test.contract_rate, stress_test.qualifying_rate, stress_test.amortization_years
    );
    println!(
        "- Payment ${:.2} at contract | ${:.2} at qualifying (+${:.2})",
        stress_test.contract_payment,
        stress_test.qualifying_payment,
        stress_test.additional_qualifying_amount
    );

    println!("\nDebt service at the qualifying payment");
    println!(
        "- GDS {:.2}% (limit {:.0}%) {} | TDS {:.2}% (limit {:.0}%) {}",
        ratios.gds_ratio,
        ratios.gds_limit,
        pass_label(ratios.gds_compliant),
        ratios.tds_ratio,
        ratios.tds_limit,
        pass_label(ratios.tds_compliant)
    );
    println!("  {}", ratios.recommendation);

    println!("\nCredit");
    println!(
        "- {} ({}) | {} minimum {} | {}",
        credit.credit_score,
        credit.credit_tier.label(),
        credit.mortgage_category.label(),
        credit.required_threshold,
        pass_label(credit.meets_threshold)
    );

    println!(
        "\nOutcome: {}",
        if report.pre_qualified() {
            "pre-qualified"
        } else {
            "does not pre-qualify as submitted"
        }
    );
}

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "pass"
    } else {
        "fail"
    }
}
