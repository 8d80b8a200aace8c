//! Canadian residential mortgage pre-qualification rules and the dispatcher that exposes them
//! as named tools.
//!
//! Calculators are pure functions of their inputs and the read-only [`QualificationConfig`];
//! the [`ToolDispatcher`] is the only boundary external callers need.

pub mod calculators;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::{PremiumBand, QualificationConfig};
pub use dispatch::{
    resolve_tool_name, OperationSpec, ToolDispatcher, ToolPayload, ToolResponse, ToolResult,
    ToolStatus,
};
pub use domain::{
    CreditInputs, CreditResult, CreditTier, DownPaymentInputs, DownPaymentResult,
    MortgageCategory, RatioInputs, RatioResult, StressTestInputs, StressTestResult, SumResult,
};
pub use error::{DomainViolation, ErrorDetail, ErrorKind, ToolError};
