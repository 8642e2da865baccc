//! Decoding a `/bfhl` body into the single operation it asks for.

use crate::services::error::DispatchError;
use crate::services::math::{self, MathError};
use serde::Serialize;
use serde_json::Value;

pub const FIBONACCI: &str = "fibonacci";
pub const PRIME: &str = "prime";
pub const LCM: &str = "lcm";
pub const HCF: &str = "hcf";
pub const AI: &str = "AI";

/// The one operation a request selects by its sole key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Compute(Computation),
    /// A question for the AI provider.
    Ai(String),
}

/// Operations answered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Computation {
    Fibonacci(i64),
    Prime(Vec<i64>),
    Lcm(Vec<i64>),
    Hcf(Vec<i64>),
}

/// The `data` field of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Terms(Vec<u64>),
    Integers(Vec<i64>),
    Integer(i64),
    Word(String),
}

impl Operation {
    /// Accepts only a JSON object with exactly one recognized key whose
    /// value has the type that key expects.
    pub fn from_body(body: Value) -> Result<Self, DispatchError> {
        let Value::Object(map) = body else {
            return Err(DispatchError::InvalidEnvelope(
                "body must be a JSON object".to_string(),
            ));
        };
        if map.len() != 1 {
            return Err(DispatchError::InvalidEnvelope(format!(
                "expected exactly one key, found {}",
                map.len()
            )));
        }
        let Some((key, value)) = map.into_iter().next() else {
            return Err(DispatchError::InvalidEnvelope("empty body".to_string()));
        };

        match key.as_str() {
            FIBONACCI => Ok(Self::Compute(Computation::Fibonacci(integer(
                FIBONACCI, &value,
            )?))),
            PRIME => Ok(Self::Compute(Computation::Prime(integers(PRIME, &value)?))),
            LCM => Ok(Self::Compute(Computation::Lcm(integers(LCM, &value)?))),
            HCF => Ok(Self::Compute(Computation::Hcf(integers(HCF, &value)?))),
            AI => match value {
                Value::String(question) => Ok(Self::Ai(question)),
                _ => Err(DispatchError::InvalidValue {
                    operation: AI,
                    expected: "a string",
                }),
            },
            _ => Err(DispatchError::UnknownOperation(key)),
        }
    }

    /// The request key this operation came from.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compute(computation) => computation.name(),
            Self::Ai(_) => AI,
        }
    }
}

impl Computation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fibonacci(_) => FIBONACCI,
            Self::Prime(_) => PRIME,
            Self::Lcm(_) => LCM,
            Self::Hcf(_) => HCF,
        }
    }

    pub fn run(self) -> Result<OperationOutput, MathError> {
        match self {
            Self::Fibonacci(count) => math::fibonacci(count).map(OperationOutput::Terms),
            Self::Prime(values) => Ok(OperationOutput::Integers(math::primes(&values))),
            Self::Lcm(values) => math::lcm(&values).map(OperationOutput::Integer),
            Self::Hcf(values) => math::hcf(&values).map(OperationOutput::Integer),
        }
    }
}

/// Only exact JSON integers within `i64` qualify: no floats, booleans or
/// numeric strings.
fn integer(operation: &'static str, value: &Value) -> Result<i64, DispatchError> {
    value.as_i64().ok_or(DispatchError::InvalidValue {
        operation,
        expected: "an integer",
    })
}

fn integers(operation: &'static str, value: &Value) -> Result<Vec<i64>, DispatchError> {
    let invalid = || DispatchError::InvalidValue {
        operation,
        expected: "an array of integers",
    };

    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_i64().ok_or_else(invalid))
        .collect()
}
