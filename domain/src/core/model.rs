//! Model value object identifying the text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models known to the story engine (Value Object)
///
/// Every request to the completion provider names one of these. Anything
/// not listed is carried verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // DeepSeek models
    DeepseekR1,
    DeepseekV3,
    // GPT models
    Gpt4oMini,
    Gpt4o,
    Gpt41,
    // Qwen models
    QwenPlus,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepseekR1 => "deepseek-r1",
            Model::DeepseekV3 => "deepseek-v3",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt41 => "gpt-4.1",
            Model::QwenPlus => "qwen-plus",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (DeepSeek-R1)
    fn default() -> Self {
        Model::DeepseekR1
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
            "deepseek-r1" => Model::DeepseekR1,
            "deepseek-v3" => Model::DeepseekV3,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4.1" => Model::Gpt41,
            "qwen-plus" => Model::QwenPlus,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
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
        Ok(Model::from(s.as_str()))
    }
}
