use crate::model::ElementId;
use thiserror::Error;

/// Errors that can occur while loading and converting element templates.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Failed to parse template JSON: {0}")]
    JsonParseError(String),

    #[error("Property '{property}' has an unknown binding: <{kind}>")]
    UnknownBindingKind { property: String, kind: String },

    #[error("Binding of type <{kind}> is missing the required field '{field}'")]
    MissingBindingField { kind: String, field: String },

    #[error("Template '{0}' is registered more than once")]
    DuplicateTemplate(String),

    #[error("Could not read template file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised by the binding resolver while reading or writing a property.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("cannot set moddle type <{type_name}> of attribute '{attribute}' on <{element_type}>")]
    UnsupportedComplexAttribute {
        element_type: String,
        attribute: String,
        type_name: String,
    },

    #[error("Attribute '{attribute}' is not declared on element type <{element_type}>")]
    UndeclaredAttribute {
        element_type: String,
        attribute: String,
    },

    #[error("Element type <{0}> is not declared in the model schema")]
    UnknownElementType(String),
}

/// Errors that can occur while importing a document or applying operations to it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Failed to parse document JSON: {0}")]
    JsonParseError(String),

    #[error("Document object is missing its '$type' discriminant")]
    MissingType,

    #[error("Attribute '{attribute}' is invalid: {message}")]
    InvalidAttribute { attribute: String, message: String },

    #[error("Element {0} not found in the document")]
    ElementNotFound(ElementId),

    #[error("Attribute '{attribute}' of element {element} is not a list")]
    NotAList { element: ElementId, attribute: String },

    #[error("Element {0} is already part of the document")]
    DuplicateElementId(ElementId),
}

/// Errors that can occur while loading a model schema.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read schema file '{path}': {message}")]
    Io { path: String, message: String },
}
