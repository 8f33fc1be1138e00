//! Captured exceptions handed to the pipeline through context data.
//!
//! A [`CapturedException`] is the language-neutral snapshot of a failure:
//! its type, message, call stack, cause chain and the extra fields its
//! concrete type declares. The capture step lives outside the pipeline;
//! error plugins only read it.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single call-stack frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackFrame {
    /// Function or method name
    pub name: String,
    /// Module path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,
    /// Source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Line number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    /// Column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl StackFrame {
    /// Create a frame for a function.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Set module path.
    pub fn with_module(mut self, module_path: &str) -> Self {
        self.module_path = Some(module_path.to_string());
        self
    }

    /// Set source location.
    pub fn with_location(mut self, file_name: &str, line_number: u32) -> Self {
        self.file_name = Some(file_name.to_string());
        self.line_number = Some(line_number);
        self
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module_path {
            write!(f, "{}::", module)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(file) = &self.file_name {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line_number {
                write!(f, ":line {}", line)?;
            }
        }
        Ok(())
    }
}

/// Property names every exception carries; never reported as extra properties.
pub const BASE_PROPERTY_NAMES: &[&str] = &[
    "message",
    "source",
    "stack_trace",
    "inner",
    "inner_exception",
    "inner_error",
    "data",
    "help_link",
    "target_site",
    "h_result",
    "type",
    "code",
];

/// Snapshot of a failure, as captured by the host application.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapturedException {
    /// Concrete type name
    pub type_name: String,
    /// Message
    pub message: String,
    /// Error code
    pub code: Option<String>,
    /// Call stack, innermost frame first
    pub stack_trace: Vec<StackFrame>,
    /// Wrapped cause
    pub inner: Option<Box<CapturedException>>,
    /// Fields declared by the concrete type, in declaration order
    pub properties: Vec<(String, Value)>,
}

impl CapturedException {
    /// Create a new captured exception.
    pub fn new(type_name: &str, message: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    /// Capture a Rust error, walking its `source()` chain into `inner`.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let mut captured = Self::new(short_type_name::<E>(), &err.to_string());
        captured.inner = err.source().map(|s| Box::new(Self::from_source(s)));
        captured
    }

    fn from_source(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut captured = Self::new("Error", &err.to_string());
        captured.inner = err.source().map(|s| Box::new(Self::from_source(s)));
        captured
    }

    /// Set error code.
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    /// Append a stack frame.
    pub fn with_stack_frame(mut self, frame: StackFrame) -> Self {
        self.stack_trace.push(frame);
        self
    }

    /// Set the wrapped cause.
    pub fn with_inner(mut self, inner: CapturedException) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Declare a single extra property.
    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.push((name.to_string(), value.into()));
        self
    }

    /// Declare extra properties from a serializable struct.
    ///
    /// Fields are appended in declaration order. The value must serialize
    /// to a JSON object.
    pub fn with_properties<T: Serialize>(mut self, properties: &T) -> Result<Self> {
        match serde_json::to_value(properties)? {
            Value::Object(map) => {
                self.properties.extend(map);
                Ok(self)
            }
            other => Err(Error::SerializationError(format!(
                "exception properties must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Depth of the cause chain, including this exception.
    pub fn depth(&self) -> usize {
        1 + self.inner.as_ref().map_or(0, |inner| inner.depth())
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
