use serde::Deserialize;

/// Element template as it appears in template JSON files.
#[derive(Debug, Deserialize, Clone)]
pub struct RawTemplate {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<u32>,
    #[serde(default, alias = "appliesTo")]
    pub applies_to: Vec<String>,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
}

/// One custom property declaration.
#[derive(Debug, Deserialize, Clone)]
pub struct RawProperty {
    pub label: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
    pub value: Option<serde_json::Value>,
    pub binding: RawBinding,
    pub constraints: Option<RawConstraints>,
}

/// Binding with its discriminant kept as a plain string; validated during conversion.
#[derive(Debug, Deserialize, Clone)]
pub struct RawBinding {
    #[serde(rename = "type")]
    pub binding_type: String,
    pub target: Option<String>,
    pub name: Option<String>,
    pub source: Option<String>,
    #[serde(alias = "scriptFormat")]
    pub script_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawConstraints {
    #[serde(default, alias = "notEmpty")]
    pub not_empty: bool,
    #[serde(alias = "maxLength")]
    pub max_length: Option<usize>,
    #[serde(alias = "minLength")]
    pub min_length: Option<usize>,
    pub pattern: Option<RawPattern>,
}

/// A pattern is either a bare regular expression or one paired with a custom message.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawPattern {
    Plain(String),
    WithMessage {
        value: String,
        message: Option<String>,
    },
}
