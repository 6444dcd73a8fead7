//! # Stencil - Element Template Property Binding
//!
//! **Stencil** binds declarative element templates (JSON descriptions of custom properties
//! for a diagram element) to the extensible document tree of a BPMN diagram. Given a
//! property descriptor and its binding, it reads the property's current value out of the
//! tree and computes the minimal batch of operations that writes a new value back.
//!
//! ## Core Workflow
//!
//! 1.  **Load Templates**: Parse template JSON into a [`TemplateRegistry`](template::TemplateRegistry),
//!     or implement [`IntoTemplate`](template::IntoTemplate) for your own template format.
//! 2.  **Build a Resolver**: Use [`BindingResolver::builder`](resolver::BindingResolver::builder)
//!     to configure the model schema that declares attribute kinds per element type.
//! 3.  **Build Entries**: [`build_property_entries`](entries::build_property_entries) turns each
//!     template property into a panel entry with `get`, `set` and `validate` closures.
//! 4.  **Apply**: `set` returns [`Operation`](resolver::Operation)s. Apply them as one unit, e.g.
//!     with [`Document::apply`](model::Document::apply).
//!
//! ## Quick Start
//!
//! ```rust
//! use stencil::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let registry = TemplateRegistry::from_json(r#"[{
//!         "id": "mail-task",
//!         "appliesTo": ["bpmn:ServiceTask"],
//!         "properties": [{
//!             "label": "Recipient",
//!             "type": "String",
//!             "binding": { "type": "camunda:property", "name": "recipient" },
//!             "constraints": { "notEmpty": true }
//!         }]
//!     }]"#)?;
//!
//!     let mut document = Document::from_json(
//!         r#"{ "$type": "bpmn:ServiceTask", "id": "Task_1",
//!              "camunda:modelerTemplate": "mail-task" }"#,
//!         Arc::new(ElementFactory::new()),
//!     )?;
//!
//!     let ctx = EntryContext::new(Arc::new(BindingResolver::default()));
//!     let entries = entries_for_element(&registry, &document.root, &ctx);
//!     let recipient = &entries[0];
//!
//!     let mut values = EntryValues::new();
//!     values.insert(recipient.id.clone(), Value::from("ops@example.com"));
//!     assert!((recipient.validate)(&document.root, &values).is_none());
//!
//!     let operations = (recipient.set)(&document, &document.root, &values)?;
//!     document.apply(&operations)?;
//!
//!     let current = (recipient.get)(&document.root);
//!     assert_eq!(current[&recipient.id], Value::from("ops@example.com"));
//!     Ok(())
//! }
//! ```

pub mod entries;
pub mod error;
pub mod model;
pub mod prelude;
pub mod resolver;
pub mod template;
pub mod validator;
