//! Generation parameters (Value Object)
//!
//! The sampling knobs a session forwards with every completion call.

use crate::core::error::DomainError;
use serde::Serialize;

pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;

/// Tolerance used when comparing a value against an enumerated choice.
const CHOICE_EPSILON: f64 = 1e-9;

/// Sampling parameters owned by a session.
///
/// Values built through [`GenerationParameters::new`] always satisfy
/// `max_tokens > 0`, `temperature >= 0` and `0 <= top_p <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl GenerationParameters {
    /// Create validated parameters.
    pub fn new(max_tokens: u32, temperature: f64, top_p: f64) -> Result<Self, DomainError> {
        let params = Self {
            max_tokens,
            temperature,
            top_p,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_tokens == 0 {
            return Err(DomainError::invalid("max_tokens", "must be greater than 0"));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(DomainError::invalid(
                "temperature",
                format!("must be a non-negative number, got {}", self.temperature),
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(DomainError::invalid(
                "top_p",
                format!("must be within [0, 1], got {}", self.top_p),
            ));
        }
        Ok(())
    }

    /// Return a copy with one field replaced from its textual form.
    ///
    /// Accepts `max_tokens`, `temperature` and `top_p`. The result is
    /// validated as a whole.
    pub fn with_field(&self, field: &str, value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        let mut updated = *self;
        match field {
            "max_tokens" => {
                updated.max_tokens = value
                    .parse()
                    .map_err(|_| DomainError::invalid("max_tokens", format!("'{value}' is not a positive integer")))?;
            }
            "temperature" => {
                updated.temperature = value
                    .parse()
                    .map_err(|_| DomainError::invalid("temperature", format!("'{value}' is not a number")))?;
            }
            "top_p" => {
                updated.top_p = value
                    .parse()
                    .map_err(|_| DomainError::invalid("top_p", format!("'{value}' is not a number")))?;
            }
            other => return Err(DomainError::UnknownParameter(other.to_string())),
        }
        updated.validate()?;
        Ok(updated)
    }
}

/// The discrete settings surface: the values each field may take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterChoices {
    pub max_tokens: Vec<u32>,
    pub temperature: Vec<f64>,
    pub top_p: Vec<f64>,
}

impl Default for ParameterChoices {
    fn default() -> Self {
        Self {
            max_tokens: vec![128, 256, 512, 1024, 2048],
            temperature: vec![0.0, 0.3, 0.5, 0.7, 1.0],
            top_p: vec![0.5, 0.8, 0.9, 0.95, 1.0],
        }
    }
}

impl ParameterChoices {
    /// Reject any field whose value is not one of the allowed choices.
    pub fn check(&self, params: &GenerationParameters) -> Result<(), DomainError> {
        if !self.max_tokens.contains(&params.max_tokens) {
            return Err(not_allowed("max_tokens", params.max_tokens, &self.max_tokens));
        }
        if !contains_float(&self.temperature, params.temperature) {
            return Err(not_allowed("temperature", params.temperature, &self.temperature));
        }
        if !contains_float(&self.top_p, params.top_p) {
            return Err(not_allowed("top_p", params.top_p, &self.top_p));
        }
        Ok(())
    }
}

fn contains_float(choices: &[f64], value: f64) -> bool {
    choices.iter().any(|c| (c - value).abs() < CHOICE_EPSILON)
}

fn not_allowed<T: std::fmt::Display>(field: &str, value: T, allowed: &[T]) -> DomainError {
    DomainError::ParameterNotAllowed {
        field: field.to_string(),
        value: value.to_string(),
        allowed: allowed
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// How parameter updates are checked before they replace the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum ParameterConstraint {
    /// Domain range checks only.
    #[default]
    Range,
    /// Range checks plus membership in a fixed set of choices.
    Choices(ParameterChoices),
}

impl ParameterConstraint {
    pub fn check(&self, params: &GenerationParameters) -> Result<(), DomainError> {
        params.validate()?;
        match self {
            ParameterConstraint::Range => Ok(()),
            ParameterConstraint::Choices(choices) => choices.check(params),
        }
    }
}
