//! Name-based routing from tool invocations to calculators.
//!
//! Every operation runs through the same pipeline: look up the name in the static registry,
//! validate the arguments against the operation's field specs, run the handler and wrap the
//! outcome in a [`ToolResponse`].

mod arguments;
mod envelope;
mod registry;

pub use arguments::{Bound, FieldKind, FieldSpec, Requirement, ToolArguments};
pub use envelope::{ToolPayload, ToolResponse, ToolResult, ToolStatus};
pub use registry::{find_operation, OperationHandler, OperationSpec, OPERATIONS};

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::config::QualificationConfig;
use super::error::ToolError;

/// Separator used by gateways that prefix tool names with their target (`Target___tool`).
const GATEWAY_NAME_SEPARATOR: &str = "___";

/// Strips a gateway target prefix from an extended tool name.
pub fn resolve_tool_name(extended: &str) -> &str {
    extended
        .split_once(GATEWAY_NAME_SEPARATOR)
        .map(|(_, tool)| tool)
        .unwrap_or(extended)
        .trim()
}

/// Single entry point for tool invocations.
///
/// Holds the rule table behind an `Arc` so one dispatcher can serve concurrent callers; no
/// state changes after construction.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    config: Arc<QualificationConfig>,
    operations: &'static [OperationSpec],
}

impl ToolDispatcher {
    pub fn new(config: QualificationConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    pub fn with_shared_config(config: Arc<QualificationConfig>) -> Self {
        Self {
            config,
            operations: OPERATIONS,
        }
    }

    pub fn config(&self) -> &QualificationConfig {
        &self.config
    }

    pub fn operations(&self) -> &'static [OperationSpec] {
        self.operations
    }

    pub fn schemas(&self) -> Vec<Value> {
        self.operations.iter().map(OperationSpec::schema).collect()
    }

    /// Runs one invocation and always returns an envelope.
    pub fn handle(&self, operation_name: &str, arguments: &Map<String, Value>) -> ToolResponse {
        let started = Instant::now();
        let name = resolve_tool_name(operation_name);

        debug!(
            operation = %name,
            arguments = ?arguments.keys().collect::<Vec<_>>(),
            "tool invocation received"
        );

        let response = match self.execute(name, arguments) {
            Ok(result) => ToolResponse::ok(name, result),
            Err(error) => ToolResponse::error(name, &error),
        };

        let elapsed_us = started.elapsed().as_micros() as u64;
        match response.error_detail() {
            None => info!(operation = %name, elapsed_us, "tool invocation succeeded"),
            Some(detail) => warn!(
                operation = %name,
                kind = detail.kind.label(),
                field = detail.field.as_deref().unwrap_or("-"),
                error = %detail.message,
                elapsed_us,
                "tool invocation failed"
            ),
        }

        response
    }

    /// Like [`handle`](Self::handle) but accepts any JSON value; `null` means no arguments.
    pub fn handle_value(&self, operation_name: &str, arguments: &Value) -> ToolResponse {
        match arguments {
            Value::Object(map) => self.handle(operation_name, map),
            Value::Null => self.handle(operation_name, &Map::new()),
            other => {
                let error = ToolError::invalid(
                    "arguments",
                    format!("expected a JSON object, got {}", json_type(other)),
                );
                warn!(operation = %operation_name, error = %error, "tool invocation rejected");
                ToolResponse::error(resolve_tool_name(operation_name), &error)
            }
        }
    }

    fn execute(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<ToolResult, ToolError> {
        if name.is_empty() {
            return Err(ToolError::invalid("tool_name", "missing tool name"));
        }

        let operation = self
            .operations
            .iter()
            .find(|operation| operation.name == name)
            .ok_or_else(|| ToolError::UnknownOperation {
                name: name.to_string(),
            })?;

        let validated = ToolArguments::validate(operation.fields, arguments)?;

        catch_unwind(AssertUnwindSafe(|| {
            (operation.handler)(&validated, self.config.as_ref())
        }))
        .unwrap_or_else(|panic| {
            Err(ToolError::CalculatorFault {
                operation: name.to_string(),
                detail: panic_message(panic.as_ref()),
            })
        })
    }
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new(QualificationConfig::default())
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "calculator panicked".to_string()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
