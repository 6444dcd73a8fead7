use super::{Attr, Document, Element};
use crate::error::DocumentError;
use crate::resolver::Operation;
use tracing::debug;

impl Document {
    /// Applies a batch of operations as one transaction.
    ///
    /// Operations run in order against a working copy of the tree, so later operations can
    /// target elements introduced by earlier ones. The document is only replaced once every
    /// operation succeeded; on error it is left untouched.
    pub fn apply(&mut self, operations: &[Operation]) -> Result<(), DocumentError> {
        let mut working = self.root.clone();
        for operation in operations {
            apply_one(&mut working, operation)?;
        }
        debug!(count = operations.len(), "applied operations");
        self.root = working;
        Ok(())
    }
}

fn apply_one(root: &mut Element, operation: &Operation) -> Result<(), DocumentError> {
    match operation {
        Operation::UpdateProperties { target, properties } => {
            for attr in properties.values() {
                match attr {
                    Attr::Element(child) => ensure_new(&*root, child)?,
                    Attr::List(items) => items.iter().try_for_each(|child| ensure_new(&*root, child))?,
                    Attr::Value(_) => {}
                }
            }
            let element = root
                .find_mut(*target)
                .ok_or(DocumentError::ElementNotFound(*target))?;
            for (name, attr) in properties {
                match attr {
                    Attr::Value(v) if v.is_null() => {
                        element.attrs.remove(name);
                    }
                    _ => {
                        element.attrs.insert(name.clone(), attr.clone());
                    }
                }
            }
        }
        Operation::AddElementsToList {
            target,
            list,
            elements,
        } => {
            for child in elements {
                ensure_new(&*root, child)?;
            }
            let element = root
                .find_mut(*target)
                .ok_or(DocumentError::ElementNotFound(*target))?;
            match element
                .attrs
                .entry(list.clone())
                .or_insert_with(|| Attr::List(Vec::new()))
            {
                Attr::List(items) => items.extend(elements.iter().cloned()),
                _ => {
                    return Err(DocumentError::NotAList {
                        element: *target,
                        attribute: list.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Rejects inserting `element` when it, or anything below it, already lives in the tree.
fn ensure_new(root: &Element, element: &Element) -> Result<(), DocumentError> {
    let mut taken = None;
    element.walk(&mut |candidate| {
        if taken.is_none() && root.find(candidate.id).is_some() {
            taken = Some(candidate.id);
        }
    });
    match taken {
        Some(id) => Err(DocumentError::DuplicateElementId(id)),
        None => Ok(()),
    }
}
