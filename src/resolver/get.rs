use crate::model::{Attr, Element, Value, kinds};
use crate::template::{Binding, PropertyDescriptor};

pub(super) fn property_value(element: &Element, property: &PropertyDescriptor) -> Value {
    match &property.binding {
        Binding::Property { target, .. } => attribute_value(element, target, property),
        Binding::CamundaProperty { name } => camunda_property_value(element, name, property),
        Binding::InputParameter {
            target,
            script_format,
        } => input_parameter_value(element, target, script_format.as_deref(), property),
        Binding::OutputParameter {
            source,
            script_format,
        } => output_parameter_name(element, source, script_format.as_deref(), property),
    }
}

fn attribute_value(element: &Element, target: &str, property: &PropertyDescriptor) -> Value {
    if target == kinds::ATTR_CONDITION_EXPRESSION {
        return match element.element(target) {
            Some(expression) => expression.value(kinds::ATTR_BODY),
            None => property.default_value(),
        };
    }

    // Only an undefined attribute falls back; `false`, `0` and "" are values.
    match element.get(target) {
        Some(Attr::Value(value)) if !value.is_null() => value.clone(),
        _ => property.default_value(),
    }
}

fn camunda_property_value(element: &Element, name: &str, property: &PropertyDescriptor) -> Value {
    let pair = element
        .find_extension(kinds::PROPERTIES)
        .and_then(|properties| {
            properties.find_in_list(kinds::ATTR_VALUES, |p| p.str_value(kinds::ATTR_NAME) == Some(name))
        });

    match pair {
        Some(pair) => pair.value(kinds::ATTR_VALUE),
        None => property
            .value
            .clone()
            .filter(Value::is_truthy)
            .unwrap_or_else(|| Value::from("")),
    }
}

fn input_parameter_value(
    element: &Element,
    target: &str,
    script_format: Option<&str>,
    property: &PropertyDescriptor,
) -> Value {
    let parameter = element
        .find_extension(kinds::INPUT_OUTPUT)
        .and_then(|io| {
            io.find_in_list(kinds::ATTR_INPUT_PARAMETERS, |p| {
                p.str_value(kinds::ATTR_NAME) == Some(target)
            })
        });

    match (parameter, script_format) {
        (Some(parameter), Some(_)) => match parameter.element(kinds::ATTR_DEFINITION) {
            Some(script) => script.value(kinds::ATTR_VALUE),
            None => property.default_value(),
        },
        (Some(parameter), None) => parameter.value(kinds::ATTR_VALUE),
        (None, _) => property.default_value(),
    }
}

fn output_parameter_name(
    element: &Element,
    source: &str,
    script_format: Option<&str>,
    property: &PropertyDescriptor,
) -> Value {
    let matches_source = |parameter: &&Element| match script_format {
        Some(format) => parameter
            .element(kinds::ATTR_DEFINITION)
            .is_some_and(|script| {
                script.str_value(kinds::ATTR_SCRIPT_FORMAT) == Some(format)
                    && script.str_value(kinds::ATTR_VALUE) == Some(source)
            }),
        None => parameter.str_value(kinds::ATTR_VALUE) == Some(source),
    };

    element
        .find_extension(kinds::INPUT_OUTPUT)
        .and_then(|io| io.find_in_list(kinds::ATTR_OUTPUT_PARAMETERS, matches_source))
        .map(|parameter| parameter.value(kinds::ATTR_NAME))
        .unwrap_or_else(|| property.default_value())
}
