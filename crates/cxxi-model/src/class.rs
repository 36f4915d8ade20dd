//! Class and library descriptors

use crate::method::MethodDescriptor;
use serde::{Deserialize, Serialize};

/// A native class and the methods discovered on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Class name
    pub name: String,

    /// Base classes in declaration order; the first one is the primary base
    #[serde(default)]
    pub bases: Vec<String>,

    /// Methods declared directly on this class
    #[serde(rename = "method", default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Create a class with no bases and no methods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Append a base class
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Append a method
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// The primary base, whose layout the class shares
    pub fn primary_base(&self) -> Option<&str> {
        self.bases.first().map(String::as_str)
    }

    /// Bases whose methods must be forwarded explicitly
    pub fn non_primary_bases(&self) -> &[String] {
        self.bases.get(1..).unwrap_or(&[])
    }
}

/// A native library: the set of classes bound together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Native library name (used to locate symbols at runtime)
    pub name: String,

    /// Target namespace for the generated bindings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Classes in the library
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassDescriptor>,
}

impl Library {
    /// Create an empty library
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            classes: Vec::new(),
        }
    }

    /// Look up a class by name
    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }
}
