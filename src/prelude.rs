//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the stencil crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use stencil::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let registry = TemplateRegistry::from_file("path/to/templates.json")?;
//! let document = Document::from_file("path/to/task.json", Arc::new(ElementFactory::new()))?;
//!
//! let ctx = EntryContext::new(Arc::new(BindingResolver::default()));
//! for entry in entries_for_element(&registry, &document.root, &ctx) {
//!     println!("{}: {:?}", entry.id, (entry.get)(&document.root));
//! }
//! # Ok(())
//! # }
//! ```

// Resolution and validation
pub use crate::resolver::{BindingResolver, Operation};
pub use crate::validator::validate;

// Document model
pub use crate::model::{
    Attr, AttributeType, Document, Element, ElementFactory, ElementId, ModelSchema,
    TypeDescriptor, Value,
};

// Templates
pub use crate::template::{
    Binding, Constraints, IntoTemplate, Pattern, PropertyDescriptor, PropertyType, Template,
    TemplateRegistry,
};

// Panel entries
pub use crate::entries::{
    EntryContext, EntryErrors, EntryValues, PropertyEntry, WidgetKind, build_property_entries,
    entries_for_element,
};

// Error types
pub use crate::error::{BindingError, DocumentError, SchemaError, TemplateError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
