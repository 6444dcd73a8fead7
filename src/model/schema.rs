//! Declared attribute kinds per element type.
//!
//! The resolver consults the schema before writing a plain attribute so that only primitive
//! attributes are touched through the generic property path.

use crate::error::{BindingError, SchemaError};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::fs;

/// Declared kind of an element attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    Boolean,
    Integer,
    Real,
    String,
    /// A structured attribute holding elements of the named type.
    Element(String),
}

impl AttributeType {
    pub fn element(kind: &str) -> Self {
        AttributeType::Element(kind.to_string())
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, AttributeType::Element(_))
    }
}

impl From<String> for AttributeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Boolean" => AttributeType::Boolean,
            "Integer" => AttributeType::Integer,
            "Real" => AttributeType::Real,
            "String" => AttributeType::String,
            _ => AttributeType::Element(name),
        }
    }
}

impl From<AttributeType> for String {
    fn from(ty: AttributeType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Boolean => write!(f, "Boolean"),
            AttributeType::Integer => write!(f, "Integer"),
            AttributeType::Real => write!(f, "Real"),
            AttributeType::String => write!(f, "String"),
            AttributeType::Element(kind) => write!(f, "{}", kind),
        }
    }
}

/// Declaration of one element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default, rename = "superClass")]
    pub super_types: Vec<String>,
    #[serde(default)]
    pub properties: AHashMap<String, AttributeType>,
}

impl TypeDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_types: Vec::new(),
            properties: AHashMap::new(),
        }
    }

    pub fn extends(mut self, super_type: &str) -> Self {
        self.super_types.push(super_type.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, ty: AttributeType) -> Self {
        self.properties.insert(name.to_string(), ty);
        self
    }
}

#[derive(Deserialize)]
struct RawSchema {
    types: Vec<TypeDescriptor>,
}

/// Registry of element type declarations.
#[derive(Debug, Clone, Default)]
pub struct ModelSchema {
    types: AHashMap<String, TypeDescriptor>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{ "types": [ { "name", "superClass", "properties" } ] }`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema =
            serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
        let mut schema = Self::new();
        for ty in raw.types {
            schema.register(ty);
        }
        Ok(schema)
    }

    pub fn from_file(path: &str) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Registers a type. A type that is already known gets the new properties and
    /// supertypes merged into its declaration.
    pub fn register(&mut self, ty: TypeDescriptor) {
        match self.types.get_mut(&ty.name) {
            Some(existing) => {
                for super_type in ty.super_types {
                    if !existing.super_types.contains(&super_type) {
                        existing.super_types.push(super_type);
                    }
                }
                existing.properties.extend(ty.properties);
            }
            None => {
                self.types.insert(ty.name.clone(), ty);
            }
        }
    }

    pub fn merge(mut self, other: ModelSchema) -> Self {
        for ty in other.types.into_values() {
            self.register(ty);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Resolves the declared kind of `attribute` on `element_type`, searching supertypes
    /// breadth first.
    pub fn attribute_type(
        &self,
        element_type: &str,
        attribute: &str,
    ) -> Result<&AttributeType, BindingError> {
        if !self.types.contains_key(element_type) {
            return Err(BindingError::UnknownElementType(element_type.to_string()));
        }

        let mut queue = VecDeque::from([element_type]);
        let mut visited = AHashSet::new();
        while let Some(name) = queue.pop_front() {
            if !visited.insert(name) {
                continue;
            }
            let Some(ty) = self.types.get(name) else {
                continue;
            };
            if let Some(attr) = ty.properties.get(attribute) {
                return Ok(attr);
            }
            queue.extend(ty.super_types.iter().map(String::as_str));
        }

        Err(BindingError::UndeclaredAttribute {
            element_type: element_type.to_string(),
            attribute: attribute.to_string(),
        })
    }

    /// Built-in declarations for the BPMN elements and Camunda extensions templates
    /// commonly bind to.
    pub fn bpmn() -> Self {
        use AttributeType::*;

        let mut schema = Self::new();
        let types = [
            TypeDescriptor::new("bpmn:BaseElement")
                .with_property("id", String)
                .with_property("extensionElements", AttributeType::element("bpmn:ExtensionElements"))
                .with_property("documentation", AttributeType::element("bpmn:Documentation")),
            TypeDescriptor::new("bpmn:RootElement").extends("bpmn:BaseElement"),
            TypeDescriptor::new("bpmn:CallableElement")
                .extends("bpmn:RootElement")
                .with_property("name", String),
            TypeDescriptor::new("bpmn:Process")
                .extends("bpmn:CallableElement")
                .with_property("processType", String)
                .with_property("isClosed", Boolean)
                .with_property("isExecutable", Boolean)
                .with_property("flowElements", AttributeType::element("bpmn:FlowElement"))
                .with_property("camunda:candidateStarterGroups", String)
                .with_property("camunda:candidateStarterUsers", String)
                .with_property("camunda:versionTag", String)
                .with_property("camunda:historyTimeToLive", String)
                .with_property("camunda:isStartableInTasklist", Boolean)
                .with_property("camunda:jobPriority", String)
                .with_property("camunda:taskPriority", String),
            TypeDescriptor::new("bpmn:Participant")
                .extends("bpmn:BaseElement")
                .with_property("name", String)
                .with_property("processRef", AttributeType::element("bpmn:Process"))
                .with_property("camunda:modelerTemplate", String),
            TypeDescriptor::new("bpmn:FlowElement")
                .extends("bpmn:BaseElement")
                .with_property("name", String)
                .with_property("camunda:modelerTemplate", String),
            TypeDescriptor::new("bpmn:FlowNode")
                .extends("bpmn:FlowElement")
                .with_property("camunda:asyncBefore", Boolean)
                .with_property("camunda:asyncAfter", Boolean)
                .with_property("camunda:exclusive", Boolean)
                .with_property("camunda:jobPriority", String),
            TypeDescriptor::new("bpmn:Activity")
                .extends("bpmn:FlowNode")
                .with_property("isForCompensation", Boolean)
                .with_property("startQuantity", Integer)
                .with_property("completionQuantity", Integer)
                .with_property("default", AttributeType::element("bpmn:SequenceFlow"))
                .with_property("loopCharacteristics", AttributeType::element("bpmn:LoopCharacteristics")),
            TypeDescriptor::new("bpmn:Task").extends("bpmn:Activity"),
            TypeDescriptor::new("bpmn:ManualTask").extends("bpmn:Task"),
            TypeDescriptor::new("bpmn:ServiceTask")
                .extends("bpmn:Task")
                .with_property("implementation", String)
                .with_property("camunda:class", String)
                .with_property("camunda:expression", String)
                .with_property("camunda:delegateExpression", String)
                .with_property("camunda:resultVariable", String)
                .with_property("camunda:type", String)
                .with_property("camunda:topic", String)
                .with_property("camunda:taskPriority", String),
            TypeDescriptor::new("bpmn:SendTask")
                .extends("bpmn:ServiceTask")
                .with_property("messageRef", AttributeType::element("bpmn:Message")),
            TypeDescriptor::new("bpmn:BusinessRuleTask")
                .extends("bpmn:ServiceTask")
                .with_property("camunda:decisionRef", String)
                .with_property("camunda:decisionRefBinding", String)
                .with_property("camunda:decisionRefVersion", String)
                .with_property("camunda:decisionRefVersionTag", String)
                .with_property("camunda:decisionRefTenantId", String)
                .with_property("camunda:mapDecisionResult", String),
            TypeDescriptor::new("bpmn:ReceiveTask")
                .extends("bpmn:Task")
                .with_property("implementation", String)
                .with_property("instantiate", Boolean)
                .with_property("messageRef", AttributeType::element("bpmn:Message")),
            TypeDescriptor::new("bpmn:UserTask")
                .extends("bpmn:Task")
                .with_property("camunda:assignee", String)
                .with_property("camunda:candidateUsers", String)
                .with_property("camunda:candidateGroups", String)
                .with_property("camunda:dueDate", String)
                .with_property("camunda:followUpDate", String)
                .with_property("camunda:priority", String)
                .with_property("camunda:formKey", String),
            TypeDescriptor::new("bpmn:ScriptTask")
                .extends("bpmn:Task")
                .with_property("scriptFormat", String)
                .with_property("script", String)
                .with_property("camunda:resultVariable", String)
                .with_property("camunda:resource", String),
            TypeDescriptor::new("bpmn:SubProcess")
                .extends("bpmn:Activity")
                .with_property("triggeredByEvent", Boolean)
                .with_property("flowElements", AttributeType::element("bpmn:FlowElement")),
            TypeDescriptor::new("bpmn:AdHocSubProcess")
                .extends("bpmn:SubProcess")
                .with_property("cancelRemainingInstances", Boolean)
                .with_property("ordering", String),
            TypeDescriptor::new("bpmn:Transaction")
                .extends("bpmn:SubProcess")
                .with_property("method", String),
            TypeDescriptor::new("bpmn:CallActivity")
                .extends("bpmn:Activity")
                .with_property("calledElement", String)
                .with_property("camunda:calledElementBinding", String)
                .with_property("camunda:calledElementVersion", String)
                .with_property("camunda:calledElementVersionTag", String)
                .with_property("camunda:calledElementTenantId", String)
                .with_property("camunda:caseRef", String)
                .with_property("camunda:variableMappingClass", String)
                .with_property("camunda:variableMappingDelegateExpression", String),
            TypeDescriptor::new("bpmn:Gateway")
                .extends("bpmn:FlowNode")
                .with_property("gatewayDirection", String),
            TypeDescriptor::new("bpmn:ExclusiveGateway")
                .extends("bpmn:Gateway")
                .with_property("default", AttributeType::element("bpmn:SequenceFlow")),
            TypeDescriptor::new("bpmn:InclusiveGateway")
                .extends("bpmn:Gateway")
                .with_property("default", AttributeType::element("bpmn:SequenceFlow")),
            TypeDescriptor::new("bpmn:ComplexGateway")
                .extends("bpmn:Gateway")
                .with_property("default", AttributeType::element("bpmn:SequenceFlow"))
                .with_property("activationCondition", AttributeType::element("bpmn:Expression")),
            TypeDescriptor::new("bpmn:ParallelGateway").extends("bpmn:Gateway"),
            TypeDescriptor::new("bpmn:EventBasedGateway")
                .extends("bpmn:Gateway")
                .with_property("instantiate", Boolean)
                .with_property("eventGatewayType", String),
            TypeDescriptor::new("bpmn:Event").extends("bpmn:FlowNode"),
            TypeDescriptor::new("bpmn:CatchEvent")
                .extends("bpmn:Event")
                .with_property("parallelMultiple", Boolean)
                .with_property("eventDefinitions", AttributeType::element("bpmn:EventDefinition")),
            TypeDescriptor::new("bpmn:ThrowEvent")
                .extends("bpmn:Event")
                .with_property("eventDefinitions", AttributeType::element("bpmn:EventDefinition")),
            TypeDescriptor::new("bpmn:StartEvent")
                .extends("bpmn:CatchEvent")
                .with_property("isInterrupting", Boolean)
                .with_property("camunda:initiator", String)
                .with_property("camunda:formKey", String),
            TypeDescriptor::new("bpmn:IntermediateCatchEvent").extends("bpmn:CatchEvent"),
            TypeDescriptor::new("bpmn:BoundaryEvent")
                .extends("bpmn:CatchEvent")
                .with_property("cancelActivity", Boolean)
                .with_property("attachedToRef", AttributeType::element("bpmn:Activity")),
            TypeDescriptor::new("bpmn:IntermediateThrowEvent").extends("bpmn:ThrowEvent"),
            TypeDescriptor::new("bpmn:EndEvent").extends("bpmn:ThrowEvent"),
            TypeDescriptor::new("bpmn:SequenceFlow")
                .extends("bpmn:FlowElement")
                .with_property("isImmediate", Boolean)
                .with_property("conditionExpression", AttributeType::element("bpmn:Expression"))
                .with_property("sourceRef", AttributeType::element("bpmn:FlowNode"))
                .with_property("targetRef", AttributeType::element("bpmn:FlowNode")),
            TypeDescriptor::new("bpmn:Expression")
                .extends("bpmn:BaseElement")
                .with_property("body", String),
            TypeDescriptor::new("bpmn:FormalExpression")
                .extends("bpmn:Expression")
                .with_property("language", String),
            TypeDescriptor::new("bpmn:ExtensionElements")
                .extends("bpmn:BaseElement")
                .with_property("values", AttributeType::element("Element")),
            TypeDescriptor::new("camunda:Properties")
                .with_property("values", AttributeType::element("camunda:Property")),
            TypeDescriptor::new("camunda:Property")
                .with_property("id", String)
                .with_property("name", String)
                .with_property("value", String),
            TypeDescriptor::new("camunda:InputOutput")
                .with_property("inputParameters", AttributeType::element("camunda:InputParameter"))
                .with_property("outputParameters", AttributeType::element("camunda:OutputParameter")),
            TypeDescriptor::new("camunda:InputOutputParameter")
                .with_property("name", String)
                .with_property("value", String)
                .with_property("definition", AttributeType::element("camunda:InputOutputParameterDefinition")),
            TypeDescriptor::new("camunda:InputParameter").extends("camunda:InputOutputParameter"),
            TypeDescriptor::new("camunda:OutputParameter").extends("camunda:InputOutputParameter"),
            TypeDescriptor::new("camunda:Script")
                .with_property("scriptFormat", String)
                .with_property("resource", String)
                .with_property("value", String),
        ];
        for ty in types {
            schema.register(ty);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_walks_supertypes() {
        let schema = ModelSchema::bpmn();
        assert_eq!(
            schema.attribute_type("bpmn:ServiceTask", "camunda:asyncBefore"),
            Ok(&AttributeType::Boolean)
        );
        assert_eq!(
            schema.attribute_type("bpmn:ServiceTask", "name"),
            Ok(&AttributeType::String)
        );
        assert!(
            !schema
                .attribute_type("bpmn:SequenceFlow", "conditionExpression")
                .unwrap()
                .is_primitive()
        );
    }

    #[test]
    fn undeclared_and_unknown_types_are_errors() {
        let schema = ModelSchema::bpmn();
        assert_eq!(
            schema.attribute_type("bpmn:Nope", "name"),
            Err(BindingError::UnknownElementType("bpmn:Nope".to_string()))
        );
        assert!(matches!(
            schema.attribute_type("bpmn:ServiceTask", "nope"),
            Err(BindingError::UndeclaredAttribute { .. })
        ));
    }

    #[test]
    fn common_flow_node_types_are_declared() {
        let schema = ModelSchema::bpmn();
        let cases = [
            ("bpmn:ExclusiveGateway", "name", AttributeType::String),
            ("bpmn:EventBasedGateway", "camunda:asyncBefore", AttributeType::Boolean),
            ("bpmn:BusinessRuleTask", "camunda:decisionRef", AttributeType::String),
            ("bpmn:ReceiveTask", "name", AttributeType::String),
            ("bpmn:ManualTask", "camunda:asyncAfter", AttributeType::Boolean),
            ("bpmn:IntermediateCatchEvent", "name", AttributeType::String),
            ("bpmn:IntermediateThrowEvent", "camunda:asyncBefore", AttributeType::Boolean),
            ("bpmn:BoundaryEvent", "cancelActivity", AttributeType::Boolean),
            ("bpmn:SubProcess", "camunda:asyncBefore", AttributeType::Boolean),
            ("bpmn:Process", "isExecutable", AttributeType::Boolean),
            ("bpmn:Participant", "name", AttributeType::String),
        ];
        for (element_type, attribute, expected) in cases {
            assert_eq!(
                schema.attribute_type(element_type, attribute),
                Ok(&expected),
                "{element_type}.{attribute}"
            );
        }
        assert!(
            !schema
                .attribute_type("bpmn:ExclusiveGateway", "default")
                .unwrap()
                .is_primitive()
        );
    }

    #[test]
    fn supertype_cycles_terminate() {
        let mut schema = ModelSchema::new();
        schema.register(TypeDescriptor::new("a").extends("b"));
        schema.register(TypeDescriptor::new("b").extends("a"));
        assert!(schema.attribute_type("a", "x").is_err());
    }

    #[test]
    fn json_schema_merges_into_builtin() {
        let custom = ModelSchema::from_json(
            r#"{ "types": [
                { "name": "bpmn:ServiceTask", "properties": { "acme:retries": "Integer" } },
                { "name": "acme:Config", "superClass": ["bpmn:BaseElement"],
                  "properties": { "endpoint": "String", "auth": "acme:Auth" } }
            ] }"#,
        )
        .unwrap();

        let schema = ModelSchema::bpmn().merge(custom);
        assert_eq!(
            schema.attribute_type("bpmn:ServiceTask", "acme:retries"),
            Ok(&AttributeType::Integer)
        );
        assert_eq!(
            schema.attribute_type("bpmn:ServiceTask", "camunda:class"),
            Ok(&AttributeType::String)
        );
        assert_eq!(
            schema.attribute_type("acme:Config", "auth"),
            Ok(&AttributeType::Element("acme:Auth".to_string()))
        );
    }
}
