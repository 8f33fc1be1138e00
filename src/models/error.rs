//! Structured error representations attached to events.
//!
//! Two shapes exist: [`ErrorInfo`] keeps the call stack as frames,
//! [`SimpleErrorInfo`] flattens it to text.

use crate::models::exception::{CapturedException, StackFrame};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known keys in an error model's `data`.
pub mod known_error_data_keys {
    /// JSON text of the exception's extra properties
    pub const EXTRA_PROPERTIES: &str = "@ext";
    /// Set when the error was not handled by the host application
    pub const UNHANDLED: &str = "@unhandled";
}

/// Detailed error model with a frame-level call stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    /// Error message
    pub message: String,
    /// Concrete error type name
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Call stack
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<StackFrame>,
    /// Wrapped cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<ErrorInfo>>,
    /// Extended data
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl ErrorInfo {
    /// Build the model from a captured exception and its cause chain.
    pub fn from_exception(exception: &CapturedException) -> Self {
        Self {
            message: exception.message.clone(),
            error_type: exception.type_name.clone(),
            code: exception.code.clone(),
            stack_trace: exception.stack_trace.clone(),
            inner: exception
                .inner
                .as_deref()
                .map(|inner| Box::new(Self::from_exception(inner))),
            data: Map::new(),
        }
    }

    /// Raw extra-properties JSON text, if any.
    pub fn extra_properties(&self) -> Option<&str> {
        self.data
            .get(known_error_data_keys::EXTRA_PROPERTIES)
            .and_then(Value::as_str)
    }
}

/// Flattened error model with the call stack rendered as text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleErrorInfo {
    /// Error message
    pub message: String,
    /// Concrete error type name
    #[serde(rename = "type")]
    pub error_type: String,
    /// Rendered call stack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Wrapped cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<SimpleErrorInfo>>,
    /// Extended data
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl SimpleErrorInfo {
    /// Build the model from a captured exception and its cause chain.
    pub fn from_exception(exception: &CapturedException) -> Self {
        let stack_trace = if exception.stack_trace.is_empty() {
            None
        } else {
            Some(
                exception
                    .stack_trace
                    .iter()
                    .map(|frame| format!("   at {}", frame))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };

        Self {
            message: exception.message.clone(),
            error_type: exception.type_name.clone(),
            stack_trace,
            inner: exception
                .inner
                .as_deref()
                .map(|inner| Box::new(Self::from_exception(inner))),
            data: Map::new(),
        }
    }

    /// Raw extra-properties JSON text, if any.
    pub fn extra_properties(&self) -> Option<&str> {
        self.data
            .get(known_error_data_keys::EXTRA_PROPERTIES)
            .and_then(Value::as_str)
    }
}
