//! Common test fixtures for templates, documents and resolvers.
use stencil::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const TEMPLATES_JSON: &str = include_str!("../demos/templates.json");

#[allow(dead_code)]
pub const MAIL_TASK_JSON: &str = include_str!("../demos/mail-task.json");

/// A service task with no extension elements at all.
#[allow(dead_code)]
pub const BARE_TASK_JSON: &str = r#"{ "$type": "bpmn:ServiceTask", "id": "Task_1" }"#;

/// Loads a document with a fresh factory.
#[allow(dead_code)]
pub fn load(json: &str) -> Document {
    Document::from_json(json, Arc::new(ElementFactory::new())).expect("Failed to load document")
}

#[allow(dead_code)]
pub fn resolver() -> BindingResolver {
    BindingResolver::default()
}

#[allow(dead_code)]
pub fn context() -> EntryContext {
    EntryContext::new(Arc::new(resolver()))
}

#[allow(dead_code)]
pub fn registry() -> TemplateRegistry {
    TemplateRegistry::from_json(TEMPLATES_JSON).expect("Failed to load templates")
}

/// Creates a property descriptor with the given binding and no constraints.
#[allow(dead_code)]
pub fn property(property_type: PropertyType, binding: Binding, value: Option<Value>) -> PropertyDescriptor {
    PropertyDescriptor {
        id: "custom-test-0".to_string(),
        label: Some("Test".to_string()),
        description: None,
        property_type,
        value,
        constraints: None,
        binding,
    }
}

#[allow(dead_code)]
pub fn attribute(target: &str) -> Binding {
    Binding::Property {
        target: target.to_string(),
        script_format: None,
    }
}

#[allow(dead_code)]
pub fn named(name: &str) -> Binding {
    Binding::CamundaProperty {
        name: name.to_string(),
    }
}

#[allow(dead_code)]
pub fn with_constraints(constraints: Constraints) -> PropertyDescriptor {
    PropertyDescriptor {
        constraints: Some(constraints),
        ..property(PropertyType::String, named("x"), None)
    }
}

/// Applies `set` for `value` and returns the operations, after applying them to `document`.
#[allow(dead_code)]
pub fn set_and_apply(document: &mut Document, property: &PropertyDescriptor, value: Value) -> Vec<Operation> {
    let operations = resolver()
        .set(document, &document.root, property, value)
        .expect("set failed");
    document.apply(&operations).expect("apply failed");
    operations
}

/// In-memory log sink for asserting on emitted events.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result with the warnings it logged.
#[allow(dead_code)]
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&capture.0.lock().expect("log buffer poisoned")).into_owned();
    (result, logs)
}
