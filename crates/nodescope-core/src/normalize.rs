//! Turns a parsed nodes-API payload into a [`FetchOutcome`].

use crate::node::{FetchOutcome, NormalizedNode, RawNodeRecord};
use crate::NodeScopeError;
use serde_json::Value;

/// Top-level payload layouts the nodes API is known to return.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[ {...}, ... ]`
    Sequence(Vec<Value>),
    /// `{ "nodes": [ {...}, ... ], ... }`
    Wrapped(Vec<Value>),
    Unexpected,
}

impl ResponseShape {
    pub fn classify(payload: Value) -> Self {
        match payload {
            Value::Array(items) => Self::Sequence(items),
            Value::Object(mut map) => match map.remove("nodes") {
                Some(Value::Array(items)) => Self::Wrapped(items),
                _ => Self::Unexpected,
            },
            _ => Self::Unexpected,
        }
    }

    pub fn into_records(self) -> Option<Vec<Value>> {
        match self {
            Self::Sequence(items) | Self::Wrapped(items) => Some(items),
            Self::Unexpected => None,
        }
    }
}

pub fn normalize_nodes(items: Vec<Value>) -> Vec<NormalizedNode> {
    items
        .into_iter()
        .map(RawNodeRecord::from_value)
        .map(|raw| NormalizedNode::from_raw(&raw))
        .collect()
}

pub fn normalize_payload(payload: Value) -> FetchOutcome {
    let Some(items) = ResponseShape::classify(payload).into_records() else {
        return FetchOutcome::failed(NodeScopeError::UnexpectedShape.to_string());
    };

    if items.is_empty() {
        return FetchOutcome::empty();
    }

    FetchOutcome::populated(normalize_nodes(items))
}
