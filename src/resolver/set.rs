use super::Operation;
use crate::error::BindingError;
use crate::model::{Attr, AttributeType, Element, ElementFactory, ModelSchema, Value, kinds};
use crate::template::{Binding, PropertyDescriptor};
use ahash::AHashMap;
use std::borrow::Cow;
use tracing::{debug, warn};

pub(super) fn property_updates(
    schema: &ModelSchema,
    element: &Element,
    property: &PropertyDescriptor,
    value: Value,
    factory: &ElementFactory,
) -> Result<Vec<Operation>, BindingError> {
    let binding = &property.binding;
    let mut updates = Vec::new();

    if let Binding::Property {
        target,
        script_format,
    } = binding
    {
        let attr = attribute_update(schema, element, target, script_format.as_deref(), value.clone(), factory)?;
        if let Some(attr) = attr {
            updates.push(Operation::update(element.id, target, attr));
        }
    }

    if binding.is_extension() {
        // Later operations target the container by id, whether it exists yet or not.
        let extension_elements = match element.element(kinds::ATTR_EXTENSION_ELEMENTS) {
            Some(existing) => Cow::Borrowed(existing),
            None => {
                let created = factory.create(kinds::EXTENSION_ELEMENTS);
                updates.push(Operation::update(
                    element.id,
                    kinds::ATTR_EXTENSION_ELEMENTS,
                    created.clone(),
                ));
                Cow::Owned(created)
            }
        };

        match binding {
            Binding::CamundaProperty { name } => {
                camunda_property_updates(&extension_elements, name, value.clone(), factory, &mut updates)
            }
            Binding::InputParameter { .. } | Binding::OutputParameter { .. } => {
                debug!(
                    property = %property.id,
                    binding = %binding,
                    "input/output parameter writes are not supported"
                );
            }
            Binding::Property { .. } => {}
        }
    }

    if updates.is_empty() {
        warn!(
            element = %element.id,
            property = %property.id,
            binding = %binding,
            value = %value,
            "no update"
        );
    }

    Ok(updates)
}

/// Computes the new content of a plain attribute, or `None` when nothing is to be written.
fn attribute_update(
    schema: &ModelSchema,
    element: &Element,
    target: &str,
    script_format: Option<&str>,
    value: Value,
    factory: &ElementFactory,
) -> Result<Option<Attr>, BindingError> {
    if target == kinds::ATTR_CONDITION_EXPRESSION {
        let mut attrs = AHashMap::new();
        attrs.insert(kinds::ATTR_BODY.to_string(), Attr::Value(value));
        attrs.insert(
            kinds::ATTR_LANGUAGE.to_string(),
            Attr::Value(script_format.map(Value::from).unwrap_or_default()),
        );
        let expression = factory.create_with(kinds::FORMAL_EXPRESSION, attrs);
        return Ok(Some(Attr::Element(expression)));
    }

    // Structured attributes must never be overwritten through the generic path.
    let ty = schema.attribute_type(&element.kind, target)?;
    if !ty.is_primitive() {
        return Err(BindingError::UnsupportedComplexAttribute {
            element_type: element.kind.clone(),
            attribute: target.to_string(),
            type_name: ty.to_string(),
        });
    }

    let coerced = coerce(ty, value);
    Ok((!coerced.is_null()).then_some(Attr::Value(coerced)))
}

fn coerce(ty: &AttributeType, value: Value) -> Value {
    match ty {
        AttributeType::Boolean => Value::Bool(value.is_truthy()),
        // TODO: parse textual input into Integer/Real once the panel defines a policy for
        // unparsable numbers. Until then the raw value is stored unchanged.
        AttributeType::Integer | AttributeType::Real => value,
        AttributeType::String | AttributeType::Element(_) => value,
    }
}

fn camunda_property_updates(
    extension_elements: &Element,
    name: &str,
    value: Value,
    factory: &ElementFactory,
    updates: &mut Vec<Operation>,
) {
    let properties = match extension_elements
        .find_in_list(kinds::ATTR_VALUES, |e| e.is(kinds::PROPERTIES))
    {
        Some(existing) => Cow::Borrowed(existing),
        None => {
            let created = factory.create(kinds::PROPERTIES);
            updates.push(Operation::add_to_list(
                extension_elements.id,
                kinds::ATTR_VALUES,
                vec![created.clone()],
            ));
            Cow::Owned(created)
        }
    };

    let existing = properties.find_in_list(kinds::ATTR_VALUES, |p| {
        p.str_value(kinds::ATTR_NAME) == Some(name)
    });

    match existing {
        Some(pair) => updates.push(Operation::update(pair.id, kinds::ATTR_VALUE, value)),
        None => {
            let mut attrs = AHashMap::new();
            attrs.insert(kinds::ATTR_NAME.to_string(), Attr::Value(Value::from(name)));
            attrs.insert(kinds::ATTR_VALUE.to_string(), Attr::Value(value));
            let pair = factory.create_with(kinds::PROPERTY, attrs);
            updates.push(Operation::add_to_list(properties.id, kinds::ATTR_VALUES, vec![pair]));
        }
    }
}
