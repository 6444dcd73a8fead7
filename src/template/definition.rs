use crate::model::Value;
use regex::Regex;
use std::fmt;

/// A loaded element template: a named bundle of property descriptors for one or more
/// element types. Immutable once converted.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<u32>,
    pub applies_to: Vec<String>,
    pub properties: Vec<PropertyDescriptor>,
}

impl Template {
    pub fn applies_to(&self, element_type: &str) -> bool {
        self.applies_to.iter().any(|t| t == element_type)
    }
}

/// Widget-level type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Boolean,
    String,
    Text,
    /// Declared with a type no widget exists for; such properties produce no entry.
    Unsupported(String),
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        match name {
            "Boolean" => PropertyType::Boolean,
            "String" => PropertyType::String,
            "Text" => PropertyType::Text,
            other => PropertyType::Unsupported(other.to_string()),
        }
    }
}

/// A declared custom property and the rule that maps it into the document.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Entry id, `custom-<template id>-<index>`.
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub property_type: PropertyType,
    /// Default value; `None` when the template declares none.
    pub value: Option<Value>,
    pub constraints: Option<Constraints>,
    pub binding: Binding,
}

impl PropertyDescriptor {
    /// The declared default, or `Null` when there is none.
    pub fn default_value(&self) -> Value {
        self.value.clone().unwrap_or_default()
    }
}

/// Where a property lives in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A plain attribute of the element. `conditionExpression` is stored as a
    /// `bpmn:FormalExpression` whose language is `script_format`.
    Property {
        target: String,
        script_format: Option<String>,
    },
    /// A name/value pair inside the element's `camunda:Properties` container.
    CamundaProperty { name: String },
    /// A named input parameter of the element's `camunda:InputOutput` container.
    InputParameter {
        target: String,
        script_format: Option<String>,
    },
    /// An output parameter found by reverse lookup of its value or script body.
    OutputParameter {
        source: String,
        script_format: Option<String>,
    },
}

impl Binding {
    pub const PROPERTY: &'static str = "property";
    pub const CAMUNDA_PROPERTY: &'static str = "camunda:property";
    pub const INPUT_PARAMETER: &'static str = "camunda:inputParameter";
    pub const OUTPUT_PARAMETER: &'static str = "camunda:outputParameter";

    /// The discriminant as written in template JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Property { .. } => Self::PROPERTY,
            Binding::CamundaProperty { .. } => Self::CAMUNDA_PROPERTY,
            Binding::InputParameter { .. } => Self::INPUT_PARAMETER,
            Binding::OutputParameter { .. } => Self::OUTPUT_PARAMETER,
        }
    }

    /// Bindings stored below `extensionElements`.
    pub fn is_extension(&self) -> bool {
        !matches!(self, Binding::Property { .. })
    }

    /// Bindings stored in the `camunda:InputOutput` container.
    pub fn is_input_output(&self) -> bool {
        matches!(
            self,
            Binding::InputParameter { .. } | Binding::OutputParameter { .. }
        )
    }

    /// Whether `set` knows how to write this binding. Input/output parameter writes
    /// are a recognised limitation and resolve to no parameter update.
    pub fn is_writable(&self) -> bool {
        !self.is_input_output()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Property { target, .. } => write!(f, "{}({})", self.kind(), target),
            Binding::CamundaProperty { name } => write!(f, "{}({})", self.kind(), name),
            Binding::InputParameter { target, .. } => write!(f, "{}({})", self.kind(), target),
            Binding::OutputParameter { source, .. } => write!(f, "{}({})", self.kind(), source),
        }
    }
}

/// Input constraints checked by the validator.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub not_empty: bool,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

/// A pattern constraint. `regex` is `None` when the source uses syntax `regex` cannot
/// compile.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub source: String,
    pub regex: Option<Regex>,
    pub message: Option<String>,
}

impl Pattern {
    pub fn new(source: &str, message: Option<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Some(Regex::new(source)?),
            message,
        })
    }

    /// Keeps a pattern that could not be compiled, so validation can still report it.
    pub fn unsupported(source: &str, message: Option<String>) -> Self {
        Self {
            source: source.to_string(),
            regex: None,
            message,
        }
    }

    /// Searches `text` for the pattern. An uncompiled pattern never matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}
