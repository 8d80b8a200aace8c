use serde::{Deserialize, Serialize};

/// Well-typed input that cannot describe a real mortgage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainViolation {
    #[error("gross annual income must produce a positive monthly income (found {monthly_income:.2})")]
    NonPositiveIncome { monthly_income: f64 },
    #[error("purchase price must be positive (found {0:.2})")]
    NonPositivePrice(f64),
    #[error("{field} of {down_payment:.2} must be less than the purchase price of {purchase_price:.2}")]
    DownPaymentExceedsPrice {
        field: &'static str,
        down_payment: f64,
        purchase_price: f64,
    },
    #[error("monthly costs are too large to evaluate")]
    UnboundedCosts,
    #[error("contract interest rate must be positive (found {0})")]
    NonPositiveRate(f64),
    #[error("amortization period must be a positive number of years (found {0})")]
    InvalidAmortization(i64),
    #[error("sum of {a} and {b} overflows a 64-bit integer")]
    ArithmeticOverflow { a: i64, b: i64 },
}

impl DomainViolation {
    /// Argument the violation is attributed to, when a single one is responsible.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainViolation::NonPositiveIncome { .. } => Some("gross_annual_income"),
            DomainViolation::NonPositivePrice(_) => Some("purchase_price"),
            DomainViolation::DownPaymentExceedsPrice { field, .. } => Some(*field),
            DomainViolation::NonPositiveRate(_) => Some("contract_interest_rate"),
            DomainViolation::InvalidAmortization(_) => Some("amortization_years"),
            DomainViolation::UnboundedCosts | DomainViolation::ArithmeticOverflow { .. } => None,
        }
    }
}

/// Failure produced at the dispatcher boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },
    #[error(transparent)]
    Domain(#[from] DomainViolation),
    #[error("operation '{operation}' aborted: {detail}")]
    CalculatorFault { operation: String, detail: String },
}

impl ToolError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            ToolError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ToolError::Domain(_) | ToolError::CalculatorFault { .. } => ErrorKind::DomainViolation,
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            ToolError::InvalidArgument { field, .. } => Some(field.clone()),
            ToolError::Domain(violation) => violation.field().map(str::to_string),
            ToolError::UnknownOperation { .. } | ToolError::CalculatorFault { .. } => None,
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            kind: self.kind(),
            message: self.to_string(),
            field: self.field(),
        }
    }
}

/// Error taxonomy surfaced to callers. None of the kinds are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownOperation,
    InvalidArgument,
    DomainViolation,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::UnknownOperation => "UnknownOperation",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::DomainViolation => "DomainViolation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
