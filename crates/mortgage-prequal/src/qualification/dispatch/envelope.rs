use serde::Serialize;

use crate::qualification::domain::{
    CreditResult, DownPaymentResult, RatioResult, StressTestResult, SumResult,
};
use crate::qualification::error::{ErrorDetail, ErrorKind, ToolError};

/// Calculator output carried by a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Ratios(RatioResult),
    StressTest(StressTestResult),
    DownPayment(DownPaymentResult),
    Credit(CreditResult),
    Sum(SumResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolPayload {
    Result(ToolResult),
    Error(ErrorDetail),
}

/// Uniform envelope returned for every invocation, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub operation: String,
    pub status: ToolStatus,
    pub payload: ToolPayload,
}

impl ToolResponse {
    pub fn ok(operation: impl Into<String>, result: ToolResult) -> Self {
        Self {
            operation: operation.into(),
            status: ToolStatus::Ok,
            payload: ToolPayload::Result(result),
        }
    }

    pub fn error(operation: impl Into<String>, error: &ToolError) -> Self {
        Self {
            operation: operation.into(),
            status: ToolStatus::Error,
            payload: ToolPayload::Error(error.detail()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ToolStatus::Ok
    }

    pub fn result(&self) -> Option<&ToolResult> {
        match &self.payload {
            ToolPayload::Result(result) => Some(result),
            ToolPayload::Error(_) => None,
        }
    }

    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        match &self.payload {
            ToolPayload::Result(_) => None,
            ToolPayload::Error(detail) => Some(detail),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_detail().map(|detail| detail.kind)
    }
}
