//! Widget descriptors for the properties panel.
//!
//! Each supported template property becomes a [`PropertyEntry`]: an id, label and
//! description plus `get`/`set`/`validate` closures bound to one property descriptor.
//! The closures exchange values keyed by entry id, the way the panel's form state does.

use crate::error::BindingError;
use crate::model::{Document, Element, Value};
use crate::resolver::{BindingResolver, Operation};
use crate::template::{PropertyDescriptor, PropertyType, Template, TemplateRegistry};
use crate::validator;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::debug;

/// Form values keyed by entry id.
pub type EntryValues = AHashMap<String, Value>;

/// Validation messages keyed by entry id.
pub type EntryErrors = AHashMap<String, String>;

pub type Getter = Box<dyn Fn(&Element) -> EntryValues + Send + Sync>;
pub type Setter = Box<
    dyn Fn(&Document, &Element, &EntryValues) -> Result<Vec<Operation>, BindingError> + Send + Sync,
>;
pub type Validator = Box<dyn Fn(&Element, &EntryValues) -> Option<EntryErrors> + Send + Sync>;

/// The widget a property is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Checkbox,
    TextField,
    TextArea,
}

impl WidgetKind {
    pub fn for_type(ty: &PropertyType) -> Option<Self> {
        match ty {
            PropertyType::Boolean => Some(WidgetKind::Checkbox),
            PropertyType::String => Some(WidgetKind::TextField),
            PropertyType::Text => Some(WidgetKind::TextArea),
            PropertyType::Unsupported(_) => None,
        }
    }
}

pub struct PropertyEntry {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub model_property: String,
    pub widget: WidgetKind,
    pub get: Getter,
    pub set: Setter,
    pub validate: Validator,
}

impl std::fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("widget", &self.widget)
            .finish_non_exhaustive()
    }
}

/// Shared collaborators the entry closures close over.
///
/// Setters receive the document they write to, so new elements always take their ids
/// from that document's factory.
#[derive(Debug, Clone)]
pub struct EntryContext {
    pub resolver: Arc<BindingResolver>,
}

impl EntryContext {
    pub fn new(resolver: Arc<BindingResolver>) -> Self {
        Self { resolver }
    }
}

impl Default for EntryContext {
    fn default() -> Self {
        Self::new(Arc::new(BindingResolver::default()))
    }
}

/// Builds one entry per template property that has a widget, in declaration order.
pub fn build_property_entries(template: &Template, ctx: &EntryContext) -> Vec<PropertyEntry> {
    template
        .properties
        .iter()
        .filter_map(|property| {
            let entry = property_entry(property, ctx);
            if entry.is_none() {
                debug!(
                    template = %template.id,
                    property = %property.id,
                    property_type = ?property.property_type,
                    "skipping property without a widget"
                );
            }
            entry
        })
        .collect()
}

/// Builds the entries of the template applied to `element`, if any.
pub fn entries_for_element(
    registry: &TemplateRegistry,
    element: &Element,
    ctx: &EntryContext,
) -> Vec<PropertyEntry> {
    registry
        .template_for(element)
        .map(|template| build_property_entries(template, ctx))
        .unwrap_or_default()
}

fn property_entry(property: &PropertyDescriptor, ctx: &EntryContext) -> Option<PropertyEntry> {
    let widget = WidgetKind::for_type(&property.property_type)?;
    let property = Arc::new(property.clone());

    Some(PropertyEntry {
        id: property.id.clone(),
        label: property.label.clone(),
        description: property.description.clone(),
        model_property: property.id.clone(),
        widget,
        get: getter(property.clone(), ctx.resolver.clone()),
        set: setter(property.clone(), ctx.resolver.clone()),
        validate: entry_validator(property),
    })
}

fn getter(property: Arc<PropertyDescriptor>, resolver: Arc<BindingResolver>) -> Getter {
    Box::new(move |element: &Element| {
        let value = resolver.get(element, &property);
        EntryValues::from_iter([(property.id.clone(), value)])
    })
}

fn setter(property: Arc<PropertyDescriptor>, resolver: Arc<BindingResolver>) -> Setter {
    Box::new(move |document: &Document, element: &Element, values: &EntryValues| {
        let value = values.get(&property.id).cloned().unwrap_or_default();
        resolver.set(document, element, &property, value)
    })
}

fn entry_validator(property: Arc<PropertyDescriptor>) -> Validator {
    Box::new(move |_element: &Element, values: &EntryValues| {
        let value = values.get(&property.id).cloned().unwrap_or_default();
        validator::validate(&value, &property)
            .map(|message| EntryErrors::from_iter([(property.id.clone(), message)]))
    })
}
