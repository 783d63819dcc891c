//! Record shapes produced by the source streams.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An entity as emitted by the entity producer, paired with the uid of the
/// content type it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    pub content_type: String,
    pub entity: Map<String, Value>,
}

impl RawEntity {
    pub fn new(content_type: impl Into<String>, entity: Map<String, Value>) -> Self {
        Self {
            content_type: content_type.into(),
            entity,
        }
    }
}

/// Entity record in its transfer shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub type_uid: String,
    pub id: Value,
    pub data: Map<String, Value>,
}

impl From<RawEntity> for Entity {
    fn from(raw: RawEntity) -> Self {
        let id = raw.entity.get("id").cloned().unwrap_or(Value::Null);
        Self {
            type_uid: raw.content_type,
            id,
            data: raw.entity,
        }
    }
}

/// One side of a relation between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEnd {
    #[serde(rename = "type")]
    pub type_uid: String,
    #[serde(rename = "ref")]
    pub reference: Value,
    pub field: String,
}

/// A relation between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub kind: String,
    pub relation: String,
    pub left: LinkEnd,
    pub right: LinkEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigurationKind {
    CoreStore,
    Webhook,
}

/// A piece of instance configuration (core store entry or webhook).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    #[serde(rename = "type")]
    pub kind: ConfigurationKind,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
    ContentType,
    Component,
}

/// Schema descriptor of a content type or reusable component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub uid: String,
    #[serde(rename = "modelType")]
    pub model_type: ModelType,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Map<String, Value>>,
}

impl Schema {
    pub fn content_type(uid: impl Into<String>) -> Self {
        Self::with_model_type(uid, ModelType::ContentType)
    }

    pub fn component(uid: impl Into<String>) -> Self {
        Self::with_model_type(uid, ModelType::Component)
    }

    fn with_model_type(uid: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            uid: uid.into(),
            model_type,
            attributes: Map::new(),
            info: None,
        }
    }

    /// Set the attribute definitions.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }
}
