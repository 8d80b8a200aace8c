use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::qualification::error::ToolError;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Integer,
}

impl FieldKind {
    fn schema_type(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    Required,
    Optional { default: f64 },
}

/// Range check applied before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    NonNegative,
    Inclusive { min: f64, max: f64 },
}

/// Declares one argument of an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub bound: Bound,
}

impl FieldSpec {
    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: FieldKind::Number,
            requirement: Requirement::Required,
            bound: Bound::Unbounded,
        }
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Integer,
            ..Self::number(name, description)
        }
    }

    pub const fn optional(self, default: f64) -> Self {
        Self {
            requirement: Requirement::Optional { default },
            ..self
        }
    }

    pub const fn non_negative(self) -> Self {
        Self {
            bound: Bound::NonNegative,
            ..self
        }
    }

    pub const fn within(self, min: f64, max: f64) -> Self {
        Self {
            bound: Bound::Inclusive { min, max },
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }

    /// JSON-schema fragment advertised to gateways.
    pub fn schema(&self) -> Value {
        let mut property = json!({
            "type": self.kind.schema_type(),
            "description": self.description,
        });

        if let Value::Object(map) = &mut property {
            if let Requirement::Optional { default } = self.requirement {
                map.insert("default".to_string(), json!(default));
            }
            match self.bound {
                Bound::Unbounded => {}
                Bound::NonNegative => {
                    map.insert("minimum".to_string(), json!(0));
                }
                Bound::Inclusive { min, max } => {
                    map.insert("minimum".to_string(), json!(min));
                    map.insert("maximum".to_string(), json!(max));
                }
            }
        }

        property
    }

    fn coerce(&self, raw: &Value) -> Result<ArgumentValue, ToolError> {
        let number = match raw {
            Value::Number(number) => {
                if self.kind == FieldKind::Integer {
                    if let Some(value) = number.as_i64() {
                        self.check_bound(value as f64)?;
                        return Ok(ArgumentValue::Integer(value));
                    }
                }
                number.as_f64()
            }
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };

        let number = number
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                ToolError::invalid(self.name, format!("expected a number, got {raw}"))
            })?;

        self.check_bound(number)?;

        match self.kind {
            FieldKind::Number => Ok(ArgumentValue::Number(number)),
            FieldKind::Integer => {
                if number.fract() != 0.0 || number.abs() > MAX_SAFE_INTEGER {
                    return Err(ToolError::invalid(
                        self.name,
                        format!("expected a whole number, got {number}"),
                    ));
                }
                Ok(ArgumentValue::Integer(number as i64))
            }
        }
    }

    fn check_bound(&self, value: f64) -> Result<(), ToolError> {
        match self.bound {
            Bound::Unbounded => Ok(()),
            Bound::NonNegative if value >= 0.0 => Ok(()),
            Bound::NonNegative => Err(ToolError::invalid(
                self.name,
                format!("must not be negative, got {value}"),
            )),
            Bound::Inclusive { min, max } if (min..=max).contains(&value) => Ok(()),
            Bound::Inclusive { min, max } => Err(ToolError::invalid(
                self.name,
                format!("must be between {min} and {max}, got {value}"),
            )),
        }
    }

    fn default_value(&self) -> Option<ArgumentValue> {
        match (self.requirement, self.kind) {
            (Requirement::Required, _) => None,
            (Requirement::Optional { default }, FieldKind::Number) => {
                Some(ArgumentValue::Number(default))
            }
            (Requirement::Optional { default }, FieldKind::Integer) => {
                Some(ArgumentValue::Integer(default as i64))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ArgumentValue {
    Number(f64),
    Integer(i64),
}

/// Arguments that passed validation against an operation's field specs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: BTreeMap<&'static str, ArgumentValue>,
}

impl ToolArguments {
    /// Validates raw arguments, filling defaults for absent optional fields.
    ///
    /// A JSON `null` counts as absent. Unknown keys are ignored so gateways may pass through
    /// extra context.
    pub fn validate(fields: &[FieldSpec], raw: &Map<String, Value>) -> Result<Self, ToolError> {
        let mut values = BTreeMap::new();

        for field in fields {
            let value = match raw.get(field.name) {
                None | Some(Value::Null) => field
                    .default_value()
                    .ok_or_else(|| ToolError::invalid(field.name, "required argument missing"))?,
                Some(value) => field.coerce(value)?,
            };
            values.insert(field.name, value);
        }

        Ok(Self { values })
    }

    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        match self.values.get(name) {
            Some(ArgumentValue::Number(value)) => Ok(*value),
            Some(ArgumentValue::Integer(value)) => Ok(*value as f64),
            None => Err(ToolError::invalid(name, "argument not declared by operation")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        match self.values.get(name) {
            Some(ArgumentValue::Integer(value)) => Ok(*value),
            Some(ArgumentValue::Number(_)) => {
                Err(ToolError::invalid(name, "argument is not declared as an integer"))
            }
            None => Err(ToolError::invalid(name, "argument not declared by operation")),
        }
    }
}
