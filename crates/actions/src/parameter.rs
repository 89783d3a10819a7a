//! Typed parameter declarations and their JSON-Schema projection.
//!
//! Declarations are plain data: nothing here validates argument values.
//! The serde derives double as the structural fingerprint used by change
//! detection in `weft-binding`.

use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value, json},
};

/// Wire type tag for a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "string[]")]
    StringArray,
    #[serde(rename = "number[]")]
    NumberArray,
    #[serde(rename = "boolean[]")]
    BooleanArray,
    #[serde(rename = "object[]")]
    ObjectArray,
}

impl ParamType {
    fn scalar_name(self) -> &'static str {
        match self {
            Self::String | Self::StringArray => "string",
            Self::Number | Self::NumberArray => "number",
            Self::Boolean | Self::BooleanArray => "boolean",
            Self::Object | Self::ObjectArray => "object",
        }
    }

    fn is_array(self) -> bool {
        matches!(
            self,
            Self::StringArray | Self::NumberArray | Self::BooleanArray | Self::ObjectArray
        )
    }
}

/// One declared parameter of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Allowed values, for string parameters.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Nested declarations, for object-typed parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Parameter>>,
}

fn default_required() -> bool {
    true
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: true,
            allowed_values: None,
            attributes: None,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_allowed_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<Parameter>) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Project a parameter list into the JSON-Schema object sent to the LLM.
pub fn json_schema(parameters: &[Parameter]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in parameters {
        properties.insert(param.name.clone(), property_schema(param));
        if param.required {
            required.push(Value::String(param.name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn property_schema(param: &Parameter) -> Value {
    let mut schema = scalar_schema(param);
    if param.kind.is_array() {
        schema = json!({ "type": "array", "items": schema });
    }
    if let Some(description) = &param.description
        && let Value::Object(obj) = &mut schema
    {
        obj.insert("description".into(), json!(description));
    }
    schema
}

fn scalar_schema(param: &Parameter) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), json!(param.kind.scalar_name()));
    if let Some(values) = &param.allowed_values {
        obj.insert("enum".into(), json!(values));
    }
    if let Some(attributes) = &param.attributes
        && let Value::Object(nested) = json_schema(attributes)
    {
        for (field, value) in nested {
            if field != "type" {
                obj.insert(field, value);
            }
        }
    }
    Value::Object(obj)
}
