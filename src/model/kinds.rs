//! Element types and attribute names the binding resolver navigates.

pub const EXTENSION_ELEMENTS: &str = "bpmn:ExtensionElements";
pub const FORMAL_EXPRESSION: &str = "bpmn:FormalExpression";
pub const PROPERTIES: &str = "camunda:Properties";
pub const PROPERTY: &str = "camunda:Property";
pub const INPUT_OUTPUT: &str = "camunda:InputOutput";

pub const ATTR_EXTENSION_ELEMENTS: &str = "extensionElements";
pub const ATTR_CONDITION_EXPRESSION: &str = "conditionExpression";
pub const ATTR_MODELER_TEMPLATE: &str = "camunda:modelerTemplate";
pub const ATTR_VALUES: &str = "values";
pub const ATTR_INPUT_PARAMETERS: &str = "inputParameters";
pub const ATTR_OUTPUT_PARAMETERS: &str = "outputParameters";
pub const ATTR_NAME: &str = "name";
pub const ATTR_VALUE: &str = "value";
pub const ATTR_BODY: &str = "body";
pub const ATTR_LANGUAGE: &str = "language";
pub const ATTR_DEFINITION: &str = "definition";
pub const ATTR_SCRIPT_FORMAT: &str = "scriptFormat";
