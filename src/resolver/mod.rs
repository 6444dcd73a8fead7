use crate::model::{Document, Element, ModelSchema, TypeDescriptor, Value};
use crate::error::BindingError;
use crate::template::PropertyDescriptor;

mod get;
mod operation;
mod set;

pub use operation::Operation;

/// Reads template properties out of a document element and computes the operations that
/// write them back.
///
/// The resolver never mutates the document. `set` returns a batch of [`Operation`]s that the
/// caller applies transactionally, e.g. with [`Document::apply`](crate::model::Document::apply).
#[derive(Debug, Clone)]
pub struct BindingResolver {
    schema: ModelSchema,
}

pub struct BindingResolverBuilder {
    schema: ModelSchema,
}

impl BindingResolverBuilder {
    /// Starts from the built-in BPMN/Camunda schema.
    pub fn new() -> Self {
        Self {
            schema: ModelSchema::bpmn(),
        }
    }

    /// Replaces the schema entirely.
    pub fn with_schema(mut self, schema: ModelSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Declares an additional element type, or extends an existing one.
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.schema.register(ty);
        self
    }

    pub fn build(self) -> BindingResolver {
        BindingResolver {
            schema: self.schema,
        }
    }
}

impl Default for BindingResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for BindingResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BindingResolver {
    pub fn builder() -> BindingResolverBuilder {
        BindingResolverBuilder::new()
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Returns the current value of `property` on `element`, falling back to the declared
    /// default where the binding finds nothing.
    pub fn get(&self, element: &Element, property: &PropertyDescriptor) -> Value {
        get::property_value(element, property)
    }

    /// Computes the operations that store `value` for `property` on `element`, an element
    /// of `document`.
    ///
    /// New elements are created through the document's factory. An empty batch means there
    /// is nothing to apply.
    pub fn set(
        &self,
        document: &Document,
        element: &Element,
        property: &PropertyDescriptor,
        value: Value,
    ) -> Result<Vec<Operation>, BindingError> {
        set::property_updates(&self.schema, element, property, value, document.factory())
    }
}
