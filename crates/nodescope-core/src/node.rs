use crate::coerce::{coerce_finite_number, first_nonzero, first_text, scalar_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node entry as the metrics service sent it. Every field is optional and
/// untyped; nothing here is trusted until [`NormalizedNode::from_raw`] runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNodeRecord {
    pub node_name: Option<Value>,
    pub ip: Option<Value>,
    pub internal_ip: Option<Value>,
    pub os: Option<Value>,
    pub arch: Option<Value>,
    pub cpu_usage: Option<Value>,
    pub cpu_count: Option<Value>,
    pub used_memory: Option<Value>,
    pub total_memory: Option<Value>,
    pub mem_usage: Option<Value>,
    pub total_storage: Option<Value>,
    pub storage_total: Option<Value>,
    pub storage_usage: Option<Value>,
    pub used_storage: Option<Value>,
}

impl RawNodeRecord {
    /// Elements that are not objects become an all-empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Node telemetry with every numeric field guaranteed finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedNode {
    pub name: String,
    #[serde(rename = "internalIP")]
    pub internal_ip: String,
    pub os: String,
    pub arch: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub total_storage: f64,
    pub storage_usage: f64,
    pub cpu_count: f64,
    pub used_memory: f64,
    pub total_memory: f64,
}

impl NormalizedNode {
    pub fn from_raw(raw: &RawNodeRecord) -> Self {
        Self {
            name: scalar_text(raw.node_name.as_ref()).unwrap_or_default(),
            internal_ip: first_text([raw.ip.as_ref(), raw.internal_ip.as_ref()]).unwrap_or_default(),
            os: first_text([raw.os.as_ref()]).unwrap_or_default(),
            arch: first_text([raw.arch.as_ref()]).unwrap_or_default(),
            cpu_usage: coerce_finite_number(raw.cpu_usage.as_ref(), 0.0),
            memory_usage: coerce_finite_number(raw.mem_usage.as_ref(), 0.0),
            total_storage: first_nonzero([raw.total_storage.as_ref(), raw.storage_total.as_ref()]),
            storage_usage: first_nonzero([raw.storage_usage.as_ref(), raw.used_storage.as_ref()]),
            cpu_count: coerce_finite_number(raw.cpu_count.as_ref(), 0.0),
            used_memory: coerce_finite_number(raw.used_memory.as_ref(), 0.0),
            total_memory: coerce_finite_number(raw.total_memory.as_ref(), 0.0),
        }
    }
}

/// Result of one pipeline pass, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub success: bool,
    pub nodes: Vec<NormalizedNode>,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn populated(nodes: Vec<NormalizedNode>) -> Self {
        Self {
            success: true,
            nodes,
            error: None,
        }
    }

    /// Quiet non-success: nothing to show, nothing went wrong.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            nodes: Vec::new(),
            error: Some(error.into()),
        }
    }
}
