//! The extensible document tree the resolver reads from and computes updates against.
//!
//! An [`Element`] is a typed node (`"bpmn:ServiceTask"`, `"camunda:Properties"`, ...) carrying
//! named attributes. Attributes hold scalars, a single child element, or an ordered list of
//! child elements. Elements are addressed by an engine-assigned [`ElementId`], which is what
//! [`Operation`](crate::resolver::Operation)s use to name their targets.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod apply;
mod factory;
mod json;
pub mod kinds;
pub mod schema;
mod value;

pub use factory::ElementFactory;
pub use schema::{AttributeType, ModelSchema, TypeDescriptor};
pub use value::Value;

/// Engine-assigned identity of an element inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The content of a single element attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr {
    Value(Value),
    Element(Element),
    List(Vec<Element>),
}

impl From<Value> for Attr {
    fn from(value: Value) -> Self {
        Attr::Value(value)
    }
}

impl From<Element> for Attr {
    fn from(element: Element) -> Self {
        Attr::Element(element)
    }
}

/// A typed node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: String,
    pub attrs: AHashMap<String, Attr>,
}

impl Element {
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    /// Scalar value of an attribute; absent or non-scalar attributes read as `Null`.
    pub fn value(&self, name: &str) -> Value {
        match self.attrs.get(name) {
            Some(Attr::Value(v)) => v.clone(),
            _ => Value::Null,
        }
    }

    /// String value of an attribute, if it holds one.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(Attr::Value(Value::String(s))) => Some(s),
            _ => None,
        }
    }

    /// Single child element held by an attribute.
    pub fn element(&self, name: &str) -> Option<&Element> {
        match self.attrs.get(name) {
            Some(Attr::Element(e)) => Some(e),
            _ => None,
        }
    }

    /// Child list held by an attribute; absent lists read as empty.
    pub fn list(&self, name: &str) -> &[Element] {
        match self.attrs.get(name) {
            Some(Attr::List(items)) => items,
            _ => &[],
        }
    }

    /// First element of a child list matching `predicate`.
    pub fn find_in_list<P>(&self, list: &str, predicate: P) -> Option<&Element>
    where
        P: FnMut(&&Element) -> bool,
    {
        self.list(list).iter().find(predicate)
    }

    /// Locates the extension container of the given type below `extensionElements`.
    pub fn find_extension(&self, kind: &str) -> Option<&Element> {
        self.element(kinds::ATTR_EXTENSION_ELEMENTS)
            .and_then(|ext| ext.find_in_list(kinds::ATTR_VALUES, |e| e.is(kind)))
    }

    pub fn set(&mut self, name: impl Into<String>, attr: impl Into<Attr>) {
        self.attrs.insert(name.into(), attr.into());
    }

    /// Depth-first search for an element by id, including `self`.
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.attrs.values().find_map(|attr| match attr {
            Attr::Element(child) => child.find(id),
            Attr::List(items) => items.iter().find_map(|child| child.find(id)),
            Attr::Value(_) => None,
        })
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.attrs.values_mut().find_map(|attr| match attr {
            Attr::Element(child) => child.find_mut(id),
            Attr::List(items) => items.iter_mut().find_map(|child| child.find_mut(id)),
            Attr::Value(_) => None,
        })
    }

    /// Calls `visit` for this element and every element below it.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for attr in self.attrs.values() {
            match attr {
                Attr::Element(child) => child.walk(visit),
                Attr::List(items) => items.iter().for_each(|child| child.walk(visit)),
                Attr::Value(_) => {}
            }
        }
    }

    /// Finds the element carrying the given BPMN `id` attribute.
    pub fn find_by_bpmn_id(&self, bpmn_id: &str) -> Option<&Element> {
        if self.str_value("id") == Some(bpmn_id) {
            return Some(self);
        }
        self.attrs.values().find_map(|attr| match attr {
            Attr::Element(child) => child.find_by_bpmn_id(bpmn_id),
            Attr::List(items) => items.iter().find_map(|child| child.find_by_bpmn_id(bpmn_id)),
            Attr::Value(_) => None,
        })
    }
}

/// A document tree together with the factory that owns its id space.
///
/// Elements created for this document must come from [`Document::factory`]; the resolver
/// takes the factory from the document for that reason.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Element,
    factory: Arc<ElementFactory>,
}

impl Document {
    /// Wraps `root`, advancing `factory` past every id already in the tree so that new
    /// elements never reuse one.
    pub fn new(root: Element, factory: Arc<ElementFactory>) -> Self {
        let mut max_id = root.id;
        root.walk(&mut |element| max_id = max_id.max(element.id));
        factory.reserve_past(max_id);
        Self { root, factory }
    }

    pub fn factory(&self) -> &Arc<ElementFactory> {
        &self.factory
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn find_by_bpmn_id(&self, bpmn_id: &str) -> Option<&Element> {
        self.root.find_by_bpmn_id(bpmn_id)
    }
}
