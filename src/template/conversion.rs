use super::definition::{Binding, Constraints, Pattern, PropertyDescriptor, PropertyType, Template};
use super::raw::{RawBinding, RawConstraints, RawPattern, RawProperty, RawTemplate};
use crate::error::TemplateError;
use crate::model::Value;
use tracing::warn;

/// A trait for template sources that can be converted into a loaded [`Template`].
///
/// [`RawTemplate`] implements it for the JSON template format. Other formats plug in by
/// implementing it on their own structs.
///
/// # Example
///
/// ```rust
/// use stencil::prelude::*;
/// use stencil::error::TemplateError;
///
/// struct FixedClassTemplate { class_name: String }
///
/// impl IntoTemplate for FixedClassTemplate {
///     fn into_template(self) -> std::result::Result<Template, TemplateError> {
///         Ok(Template {
///             id: "fixed-class".to_string(),
///             name: None,
///             version: None,
///             applies_to: vec!["bpmn:ServiceTask".to_string()],
///             properties: vec![PropertyDescriptor {
///                 id: "custom-fixed-class-0".to_string(),
///                 label: Some("Class".to_string()),
///                 description: None,
///                 property_type: PropertyType::String,
///                 value: Some(Value::from(self.class_name)),
///                 constraints: None,
///                 binding: Binding::Property {
///                     target: "camunda:class".to_string(),
///                     script_format: None,
///                 },
///             }],
///         })
///     }
/// }
///
/// let template = FixedClassTemplate { class_name: "com.acme.Task".into() }
///     .into_template()
///     .unwrap();
/// assert!(template.applies_to("bpmn:ServiceTask"));
/// ```
pub trait IntoTemplate {
    /// Consumes the object and converts it into a loaded template.
    fn into_template(self) -> Result<Template, TemplateError>;
}

impl IntoTemplate for RawTemplate {
    fn into_template(self) -> Result<Template, TemplateError> {
        let properties = self
            .properties
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| convert_property(&self.id, idx, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Template {
            id: self.id,
            name: self.name,
            version: self.version,
            applies_to: self.applies_to,
            properties,
        })
    }
}

fn convert_property(
    template_id: &str,
    idx: usize,
    raw: RawProperty,
) -> Result<PropertyDescriptor, TemplateError> {
    let id = format!("custom-{}-{}", template_id, idx);
    let binding = convert_binding(&id, raw.binding)?;
    let constraints = raw.constraints.map(|c| convert_constraints(&id, c));

    Ok(PropertyDescriptor {
        id,
        label: raw.label,
        description: raw.description,
        property_type: PropertyType::from(raw.property_type.as_str()),
        value: raw.value.as_ref().map(Value::from),
        constraints,
        binding,
    })
}

fn convert_binding(property_id: &str, raw: RawBinding) -> Result<Binding, TemplateError> {
    let require = |field: Option<String>, name: &str| {
        field.ok_or_else(|| TemplateError::MissingBindingField {
            kind: raw.binding_type.clone(),
            field: name.to_string(),
        })
    };

    match raw.binding_type.as_str() {
        Binding::PROPERTY => Ok(Binding::Property {
            // `name` is accepted as well, newer templates use it for plain properties.
            target: require(raw.target.clone().or(raw.name.clone()), "target")?,
            script_format: raw.script_format.clone(),
        }),
        Binding::CAMUNDA_PROPERTY => Ok(Binding::CamundaProperty {
            name: require(raw.name.clone(), "name")?,
        }),
        Binding::INPUT_PARAMETER => Ok(Binding::InputParameter {
            target: require(raw.target.clone(), "target")?,
            script_format: raw.script_format.clone(),
        }),
        Binding::OUTPUT_PARAMETER => Ok(Binding::OutputParameter {
            source: require(raw.source.clone(), "source")?,
            script_format: raw.script_format.clone(),
        }),
        other => Err(TemplateError::UnknownBindingKind {
            property: property_id.to_string(),
            kind: other.to_string(),
        }),
    }
}

fn convert_constraints(property_id: &str, raw: RawConstraints) -> Constraints {
    let pattern = raw.pattern.map(|pattern| match pattern {
        RawPattern::Plain(source) => compile_pattern(property_id, &source, None),
        RawPattern::WithMessage { value, message } => compile_pattern(property_id, &value, message),
    });

    Constraints {
        not_empty: raw.not_empty,
        max_length: raw.max_length,
        min_length: raw.min_length,
        pattern,
    }
}

/// Template patterns are JavaScript regular expressions. Lookaround and backreferences
/// have no equivalent in `regex`; such a pattern only affects its own property, whose
/// values then never pass the pattern check.
fn compile_pattern(property_id: &str, source: &str, message: Option<String>) -> Pattern {
    Pattern::new(source, message.clone()).unwrap_or_else(|e| {
        warn!(
            property = %property_id,
            pattern = %source,
            error = %e,
            "unsupported constraint pattern"
        );
        Pattern::unsupported(source, message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Template, TemplateError> {
        let raw: RawTemplate = serde_json::from_str(json).unwrap();
        raw.into_template()
    }

    #[test]
    fn converts_all_binding_kinds() {
        let template = parse(
            r#"{
                "id": "t", "appliesTo": ["bpmn:ServiceTask"],
                "properties": [
                    { "type": "String", "binding": { "type": "property", "target": "name" } },
                    { "type": "String", "binding": { "type": "camunda:property", "name": "x" } },
                    { "type": "Text", "binding": { "type": "camunda:inputParameter", "target": "in", "scriptFormat": "groovy" } },
                    { "type": "String", "binding": { "type": "camunda:outputParameter", "source": "${out}" } }
                ]
            }"#,
        )
        .unwrap();

        let bindings: Vec<_> = template.properties.iter().map(|p| p.binding.clone()).collect();
        assert_eq!(
            bindings,
            vec![
                Binding::Property { target: "name".into(), script_format: None },
                Binding::CamundaProperty { name: "x".into() },
                Binding::InputParameter { target: "in".into(), script_format: Some("groovy".into()) },
                Binding::OutputParameter { source: "${out}".into(), script_format: None },
            ]
        );
        assert_eq!(template.properties[2].id, "custom-t-2");
    }

    #[test]
    fn unknown_binding_kind_is_rejected() {
        let err = parse(
            r#"{ "id": "t", "properties": [
                { "type": "String", "binding": { "type": "camunda:field", "name": "x" } }
            ] }"#,
        )
        .unwrap_err();
        match err {
            TemplateError::UnknownBindingKind { property, kind } => {
                assert_eq!(property, "custom-t-0");
                assert_eq!(kind, "camunda:field");
            }
            other => panic!("Expected UnknownBindingKind, got {:?}", other),
        }
    }

    #[test]
    fn missing_binding_field_is_rejected() {
        let err = parse(
            r#"{ "id": "t", "properties": [
                { "type": "String", "binding": { "type": "camunda:property" } }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::MissingBindingField { field, .. } if field == "name"));
    }

    #[test]
    fn unsupported_pattern_only_affects_its_property() {
        let template = parse(
            r#"{ "id": "t", "properties": [
                { "type": "String", "binding": { "type": "property", "target": "name" },
                  "constraints": { "pattern": "^(?!admin).*$" } },
                { "type": "String", "binding": { "type": "property", "target": "camunda:class" },
                  "constraints": { "pattern": "^[a-z.]+$" } }
            ] }"#,
        )
        .unwrap();

        let lookahead = template.properties[0].constraints.as_ref().unwrap();
        let pattern = lookahead.pattern.as_ref().unwrap();
        assert_eq!(pattern.source, "^(?!admin).*$");
        assert!(pattern.regex.is_none());

        let plain = template.properties[1].constraints.as_ref().unwrap();
        assert!(plain.pattern.as_ref().unwrap().regex.is_some());
    }

    #[test]
    fn unsupported_property_type_is_kept() {
        let template = parse(
            r#"{ "id": "t", "properties": [
                { "type": "Dropdown", "binding": { "type": "property", "target": "name" } }
            ] }"#,
        )
        .unwrap();
        assert_eq!(
            template.properties[0].property_type,
            PropertyType::Unsupported("Dropdown".to_string())
        );
    }
}
