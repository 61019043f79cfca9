//! Model value object representing a hosted completion model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion models served by the AI71 endpoint (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Falcon180BChat,
    Falcon40BInstruct,
    Falcon11B,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier sent in the `model` request field
    pub fn as_str(&self) -> &str {
        match self {
            Model::Falcon180BChat => "tiiuae/falcon-180B-chat",
            Model::Falcon40BInstruct => "tiiuae/falcon-40b-instruct",
            Model::Falcon11B => "tiiuae/falcon-11B",
            Model::Custom(s) => s,
        }
    }

    /// Models known to be served by the endpoint
    pub fn known_models() -> Vec<Model> {
        vec![
            Model::Falcon180BChat,
            Model::Falcon40BInstruct,
            Model::Falcon11B,
        ]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Model::Custom(_))
    }
}

impl Default for Model {
    /// Returns the default model (Falcon 180B chat)
    fn default() -> Self {
        Model::Falcon180BChat
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "tiiuae/falcon-180B-chat" => Model::Falcon180BChat,
            "tiiuae/falcon-40b-instruct" => Model::Falcon40BInstruct,
            "tiiuae/falcon-11B" => Model::Falcon11B,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::known_models() {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
            assert!(!parsed.is_custom());
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "tiiuae/falcon-7b".parse().unwrap();
        assert_eq!(model, Model::Custom("tiiuae/falcon-7b".to_string()));
        assert_eq!(model.to_string(), "tiiuae/falcon-7b");
        assert!(model.is_custom());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), "tiiuae/falcon-180B-chat");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Model::Falcon180BChat).unwrap();
        assert_eq!(json, "\"tiiuae/falcon-180B-chat\"");
        let model: Model = serde_json::from_str("\"tiiuae/falcon-11B\"").unwrap();
        assert_eq!(model, Model::Falcon11B);
    }
}
