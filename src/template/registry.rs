use super::conversion::IntoTemplate;
use super::definition::Template;
use super::raw::RawTemplate;
use crate::error::TemplateError;
use crate::model::{Element, kinds};
use ahash::AHashMap;
use itertools::Itertools;
use std::fs;
use std::sync::Arc;
use tracing::{debug, trace};

/// Loaded templates, keyed by template id.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: AHashMap<String, Arc<Template>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let raw: Vec<RawTemplate> =
            serde_json::from_str(json).map_err(|e| TemplateError::JsonParseError(e.to_string()))?;
        let mut registry = Self::new();
        for template in raw {
            registry.register(template.into_template()?)?;
        }
        debug!(count = registry.len(), "loaded element templates");
        Ok(registry)
    }

    pub fn from_file(path: &str) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn register(&mut self, template: Template) -> Result<(), TemplateError> {
        if self.templates.contains_key(&template.id) {
            return Err(TemplateError::DuplicateTemplate(template.id));
        }
        trace!(
            id = %template.id,
            applies_to = %template.applies_to.iter().join(", "),
            properties = template.properties.len(),
            "registered template"
        );
        self.templates.insert(template.id.clone(), Arc::new(template));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Template>> {
        self.templates.get(id)
    }

    /// Returns the template the element is bound to through its `camunda:modelerTemplate`
    /// attribute, provided the template applies to the element's type.
    pub fn template_for(&self, element: &Element) -> Option<&Arc<Template>> {
        let id = element.str_value(kinds::ATTR_MODELER_TEMPLATE)?;
        self.get(id).filter(|t| t.applies_to(&element.kind))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.values()
    }
}
