use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::operation::CalculationType;
use super::repo_types::Calculation;

/// Body of a creation request, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationRequest {
    #[serde(deserialize_with = "lax_f64")]
    pub a: f64,
    #[serde(deserialize_with = "lax_f64")]
    pub b: f64,
    /// Any JSON value; only the four tag strings pass validation.
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
}

/// Accepts a JSON number or a string holding a finite number (`"4"`, `" 2.5 "`).
fn lax_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Operand {
        Number(f64),
        Text(String),
    }

    match Operand::deserialize(deserializer)? {
        Operand::Number(n) => Ok(n),
        Operand::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| D::Error::custom(format!("{:?} is not a valid number", s))),
    }
}

/// Creation input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationCreate {
    pub a: f64,
    pub b: f64,
    pub kind: CalculationType,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid type: {}. Must be one of Add, Sub, Multiply, Divide", display_tag(.0))]
    UnsupportedType(Option<String>),

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

fn display_tag(tag: &Option<String>) -> &str {
    tag.as_deref().unwrap_or("None")
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedType(_) => "unsupported_type",
            ValidationError::DivisionByZero => "division_by_zero",
            ValidationError::InvalidBody(_) => "invalid_body",
        }
    }
}

impl CalculationCreate {
    /// Gate applied before any entity is built: the tag must be supported,
    /// and `Divide` must not have a zero divisor.
    pub fn validate(raw: CalculationRequest) -> Result<Self, ValidationError> {
        let kind = match raw.kind {
            Some(Value::String(tag)) => {
                CalculationType::parse(&tag).ok_or(ValidationError::UnsupportedType(Some(tag)))?
            }
            None | Some(Value::Null) => return Err(ValidationError::UnsupportedType(None)),
            Some(other) => return Err(ValidationError::UnsupportedType(Some(other.to_string()))),
        };

        if kind == CalculationType::Divide && raw.b == 0.0 {
            return Err(ValidationError::DivisionByZero);
        }

        Ok(Self {
            a: raw.a,
            b: raw.b,
            kind,
        })
    }
}

/// What a stored calculation looks like to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRead {
    pub id: Uuid,
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub result: Option<f64>,
}

impl CalculationRead {
    pub fn project(calc: &Calculation) -> Self {
        Self {
            id: calc.id,
            a: calc.a,
            b: calc.b,
            kind: calc.kind.clone(),
            result: calc.result(),
        }
    }
}

impl From<Calculation> for CalculationRead {
    fn from(calc: Calculation) -> Self {
        Self::project(&calc)
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 { 20 }

impl Pagination {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}
