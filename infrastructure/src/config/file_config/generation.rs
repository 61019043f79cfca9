//! Generation configuration from TOML (`[generation]` section)

use legalease_domain::{
    ConfigIssue, DomainError, GenerationParameters, ParameterChoices, ParameterConstraint,
};
use serde::{Deserialize, Serialize};

/// Raw generation parameters from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// Restrict updates to the discrete settings surface
    pub constrain_to_choices: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParameters::default();
        Self {
            max_tokens: params.max_tokens(),
            temperature: params.temperature(),
            top_p: params.top_p(),
            constrain_to_choices: false,
        }
    }
}

impl FileGenerationConfig {
    pub fn constraint(&self) -> ParameterConstraint {
        if self.constrain_to_choices {
            ParameterConstraint::Choices(ParameterChoices::default())
        } else {
            ParameterConstraint::Range
        }
    }

    /// Parse into validated parameters.
    ///
    /// Returns the defaults together with an issue when the configured values
    /// are rejected.
    pub fn to_parameters(&self) -> (GenerationParameters, Vec<ConfigIssue>) {
        let checked = GenerationParameters::new(self.max_tokens, self.temperature, self.top_p)
            .and_then(|params| self.constraint().check(&params).map(|()| params));

        match checked {
            Ok(params) => (params, Vec::new()),
            Err(e) => {
                let field = match &e {
                    DomainError::InvalidParameter { field, .. }
                    | DomainError::ParameterNotAllowed { field, .. } => {
                        format!("generation.{}", field)
                    }
                    _ => "generation".to_string(),
                };
                (
                    GenerationParameters::default(),
                    vec![ConfigIssue::error(field, e.to_string())],
                )
            }
        }
    }
}
