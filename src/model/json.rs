use super::{Attr, Document, Element, ElementFactory, Value};
use crate::error::DocumentError;
use serde_json::{Map, Value as Json};
use std::fs;
use std::sync::Arc;

const TYPE_KEY: &str = "$type";

impl Element {
    /// Imports an element from its moddle-style JSON form:
    ///
    /// ```json
    /// { "$type": "bpmn:ServiceTask", "id": "Task_1",
    ///   "extensionElements": { "$type": "bpmn:ExtensionElements", "values": [] } }
    /// ```
    ///
    /// Nested objects become child elements and arrays become child lists.
    pub fn from_json(json: &Json, factory: &ElementFactory) -> Result<Element, DocumentError> {
        let object = json.as_object().ok_or_else(|| DocumentError::InvalidAttribute {
            attribute: TYPE_KEY.to_string(),
            message: "expected a JSON object".to_string(),
        })?;
        let kind = object
            .get(TYPE_KEY)
            .and_then(Json::as_str)
            .ok_or(DocumentError::MissingType)?;

        let mut element = factory.create(kind);
        for (name, raw) in object.iter().filter(|(k, _)| k.as_str() != TYPE_KEY) {
            let attr = match raw {
                Json::Object(_) => Attr::Element(Element::from_json(raw, factory)?),
                Json::Array(items) => Attr::List(
                    items
                        .iter()
                        .map(|item| {
                            Element::from_json(item, factory).map_err(|e| match e {
                                DocumentError::InvalidAttribute { message, .. } => {
                                    DocumentError::InvalidAttribute {
                                        attribute: name.clone(),
                                        message,
                                    }
                                }
                                other => other,
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                Json::Null => continue,
                scalar => Attr::Value(Value::from(scalar)),
            };
            element.attrs.insert(name.clone(), attr);
        }
        Ok(element)
    }

    /// Exports the element to moddle-style JSON. Engine ids are not part of the output.
    pub fn to_json(&self) -> Json {
        let mut object = Map::new();
        object.insert(TYPE_KEY.to_string(), Json::String(self.kind.clone()));

        let mut names: Vec<_> = self.attrs.keys().collect();
        names.sort();
        for name in names {
            let json = match &self.attrs[name] {
                Attr::Value(value) => match serde_json::to_value(value) {
                    Ok(json) => json,
                    Err(_) => Json::Null,
                },
                Attr::Element(child) => child.to_json(),
                Attr::List(items) => Json::Array(items.iter().map(Element::to_json).collect()),
            };
            object.insert(name.clone(), json);
        }
        Json::Object(object)
    }
}

impl Document {
    pub fn from_json(json: &str, factory: Arc<ElementFactory>) -> Result<Self, DocumentError> {
        let raw: Json =
            serde_json::from_str(json).map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
        let root = Element::from_json(&raw, &factory)?;
        Ok(Self::new(root, factory))
    }

    pub fn from_file(path: &str, factory: Arc<ElementFactory>) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DocumentError::JsonParseError(format!("Could not read file '{}': {}", path, e))
        })?;
        Self::from_json(&content, factory)
    }

    pub fn to_json(&self) -> Json {
        self.root.to_json()
    }
}
