//! End-to-end tests: templates and documents loaded from JSON, edited through entries and
//! written back.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use stencil::prelude::*;
use std::sync::Arc;

#[test]
fn test_single_named_property_scenario() {
    let registry = TemplateRegistry::from_json(
        r#"[{ "id": "t", "appliesTo": ["bpmn:ServiceTask"], "properties": [
            { "label": "X", "type": "String", "binding": { "type": "camunda:property", "name": "x" } }
        ]}]"#,
    )
    .unwrap();
    let template = registry.get("t").unwrap();
    let mut document = load(BARE_TASK_JSON);
    let entries = build_property_entries(template, &context());

    let mut values = EntryValues::new();
    values.insert("custom-t-0".to_string(), Value::from("hello"));
    let operations = (entries[0].set)(&document, &document.root, &values).unwrap();
    assert_eq!(operations.len(), 3);

    document.apply(&operations).unwrap();
    assert_eq!(
        document.to_json(),
        json!({
            "$type": "bpmn:ServiceTask",
            "id": "Task_1",
            "extensionElements": {
                "$type": "bpmn:ExtensionElements",
                "values": [{
                    "$type": "camunda:Properties",
                    "values": [{ "$type": "camunda:Property", "name": "x", "value": "hello" }]
                }]
            }
        })
    );
}

#[test]
fn test_editing_every_writable_entry_of_a_template() {
    let mut document = load(MAIL_TASK_JSON);
    let entries = entries_for_element(&registry(), &document.root, &context());

    let edits = [
        (0, Value::from("com.acme.SmtpDelegate")),
        (1, Value::Bool(true)),
        (2, Value::from("ops@example.com")),
    ];
    for (idx, value) in edits.iter().cloned() {
        let entry = &entries[idx];
        let mut values = EntryValues::new();
        values.insert(entry.id.clone(), value.clone());

        assert!((entry.validate)(&document.root, &values).is_none());
        let operations = (entry.set)(&document, &document.root, &values).unwrap();
        document.apply(&operations).unwrap();
        assert_eq!((entry.get)(&document.root)[&entry.id], value);
    }

    let json = document.to_json();
    assert_eq!(json["camunda:class"], "com.acme.SmtpDelegate");
    assert_eq!(json["camunda:asyncBefore"], true);
    assert_eq!(
        json["extensionElements"]["values"][1]["values"][0],
        json!({ "$type": "camunda:Property", "name": "recipient", "value": "ops@example.com" })
    );
}

#[test]
fn test_condition_expression_template_on_sequence_flow() {
    let mut document = load(
        r#"{ "$type": "bpmn:SequenceFlow", "id": "Flow_1", "camunda:modelerTemplate": "guarded-flow" }"#,
    );
    let entries = entries_for_element(&registry(), &document.root, &context());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].widget, WidgetKind::TextArea);

    let mut values = EntryValues::new();
    values.insert(entries[0].id.clone(), Value::from("${approved}"));
    let operations = (entries[0].set)(&document, &document.root, &values).unwrap();
    document.apply(&operations).unwrap();

    assert_eq!(
        document.to_json()["conditionExpression"],
        json!({ "$type": "bpmn:FormalExpression", "body": "${approved}", "language": "juel" })
    );
}

#[test]
fn test_operations_target_nested_elements() {
    let mut document = load(
        r#"{ "$type": "bpmn:Process", "flowElements": [
            { "$type": "bpmn:ServiceTask", "id": "A" },
            { "$type": "bpmn:ServiceTask", "id": "B", "camunda:modelerTemplate": "mail-task" }
        ]}"#,
    );
    let ctx = EntryContext::default();

    let task = document.find_by_bpmn_id("B").unwrap().clone();
    let entries = entries_for_element(&registry(), &task, &ctx);
    let recipient = &entries[2];

    let mut values = EntryValues::new();
    values.insert(recipient.id.clone(), Value::from("a@b.c"));
    let operations = (recipient.set)(&document, &task, &values).unwrap();
    document.apply(&operations).unwrap();

    let task = document.find_by_bpmn_id("B").unwrap();
    assert_eq!((recipient.get)(task)[&recipient.id], Value::from("a@b.c"));
    assert!(document.find_by_bpmn_id("A").unwrap().get("extensionElements").is_none());
}

#[test]
fn test_document_built_with_a_fresh_factory_gets_unique_ids() {
    // The tree was imported through one factory and wrapped with another.
    let imported = load(BARE_TASK_JSON);
    let mut document = Document::new(imported.root.clone(), Arc::new(ElementFactory::new()));
    let registry = TemplateRegistry::from_json(
        r#"[{ "id": "t", "appliesTo": ["bpmn:ServiceTask"], "properties": [
            { "label": "X", "type": "String", "binding": { "type": "camunda:property", "name": "x" } }
        ]}]"#,
    )
    .unwrap();
    let entries = build_property_entries(registry.get("t").unwrap(), &context());

    let mut values = EntryValues::new();
    values.insert(entries[0].id.clone(), Value::from("hello"));
    let operations = (entries[0].set)(&document, &document.root, &values).unwrap();
    document.apply(&operations).unwrap();

    assert_eq!((entries[0].get)(&document.root)["custom-t-0"], Value::from("hello"));
    assert!(document.to_json().get("values").is_none());
    assert_eq!(
        document.to_json()["extensionElements"]["values"][0]["values"][0]["value"],
        "hello"
    );
}

#[test]
fn test_operations_from_another_document_cannot_reuse_ids() {
    let mut document = load(MAIL_TASK_JSON);
    let other = load(BARE_TASK_JSON);
    let prop = property(PropertyType::String, named("x"), None);

    // `other` hands out ids that are already taken in `document`.
    let foreign = resolver()
        .set(&other, &document.root, &prop, Value::from("hello"))
        .unwrap();

    let before = document.to_json();
    assert!(matches!(
        document.apply(&foreign),
        Err(DocumentError::DuplicateElementId(_))
    ));
    assert_eq!(document.to_json(), before);
}

#[test]
fn test_partial_batches_are_rejected_atomically() {
    let mut document = load(BARE_TASK_JSON);
    let prop = property(PropertyType::String, named("x"), None);

    // Without the first step, the created extension elements never enter the tree.
    let mut operations = resolver()
        .set(&document, &document.root, &prop, Value::from("v"))
        .unwrap();
    operations.remove(0);

    let before = document.to_json();
    assert!(matches!(
        document.apply(&operations),
        Err(DocumentError::ElementNotFound(_))
    ));
    assert_eq!(document.to_json(), before);
}

#[test]
fn test_custom_schema_from_json() {
    let schema = ModelSchema::from_json(
        r#"{ "types": [ { "name": "bpmn:ServiceTask", "properties": { "acme:secure": "Boolean" } } ] }"#,
    )
    .unwrap();
    let resolver = BindingResolver::builder()
        .with_schema(ModelSchema::bpmn().merge(schema))
        .build();
    let mut document = load(BARE_TASK_JSON);
    let prop = property(PropertyType::Boolean, attribute("acme:secure"), None);

    let operations = resolver
        .set(&document, &document.root, &prop, Value::from("on"))
        .unwrap();
    document.apply(&operations).unwrap();
    assert_eq!(resolver.get(&document.root, &prop), Value::Bool(true));
}
