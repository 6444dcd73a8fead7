use crate::model::{Attr, Element, ElementId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An atomic document mutation, produced by the resolver and applied by the caller.
///
/// A batch returned by one `set` call must be applied as a unit: intermediate states,
/// e.g. an extension container without its child container, are not valid documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    /// Sets (or, for `Null` values, unsets) attributes of the target element.
    UpdateProperties {
        target: ElementId,
        properties: AHashMap<String, Attr>,
    },
    /// Appends elements to a list attribute of the target, creating the list if needed.
    AddElementsToList {
        target: ElementId,
        list: String,
        elements: Vec<Element>,
    },
}

impl Operation {
    /// Updates a single attribute.
    pub fn update(target: ElementId, name: &str, attr: impl Into<Attr>) -> Self {
        let mut properties = AHashMap::new();
        properties.insert(name.to_string(), attr.into());
        Operation::UpdateProperties { target, properties }
    }

    pub fn add_to_list(target: ElementId, list: &str, elements: Vec<Element>) -> Self {
        Operation::AddElementsToList {
            target,
            list: list.to_string(),
            elements,
        }
    }

    pub fn target(&self) -> ElementId {
        match self {
            Operation::UpdateProperties { target, .. } => *target,
            Operation::AddElementsToList { target, .. } => *target,
        }
    }
}
