//! Library description file (cxxi.toml)
//!
//! Describes the native library, the names used by generated wrapper
//! bodies, and the parsed classes with their methods.

use cxxi_gen::ImplRegistry;
use cxxi_model::{ClassDescriptor, Library};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a library description
#[derive(Debug, Error)]
pub enum LibraryConfigError {
    /// Failed to read the file
    #[error("Failed to read library description: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse library description: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid library description: {0}")]
    Validation(String),
}

/// Parsed library description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Library metadata
    pub library: LibraryInfo,

    /// Names used in generated bodies (optional)
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Classes to bind
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassDescriptor>,
}

/// Library metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryInfo {
    /// Native library name
    pub name: String,

    /// Namespace of the generated bindings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Member names of the generated class context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Implementation lookup field (default: "impl")
    #[serde(default = "default_impl_field")]
    pub impl_field: String,

    /// Native handle property (default: "Native")
    #[serde(default = "default_native_handle")]
    pub native_handle: String,

    /// Native pointer field assigned by constructors (default: "native_ptr")
    #[serde(default = "default_native_ptr_field")]
    pub native_ptr_field: String,

    /// Allocator member (default: "Alloc")
    #[serde(default = "default_alloc_method")]
    pub alloc_method: String,
}

fn default_impl_field() -> String {
    "impl".to_string()
}

fn default_native_handle() -> String {
    "Native".to_string()
}

fn default_native_ptr_field() -> String {
    "native_ptr".to_string()
}

fn default_alloc_method() -> String {
    "Alloc".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            impl_field: default_impl_field(),
            native_handle: default_native_handle(),
            native_ptr_field: default_native_ptr_field(),
            alloc_method: default_alloc_method(),
        }
    }
}

impl GeneratorConfig {
    /// Build the implementation registry these names describe
    pub fn registry(&self) -> ImplRegistry {
        ImplRegistry {
            impl_field: self.impl_field.clone(),
            native_handle: self.native_handle.clone(),
            native_ptr_field: self.native_ptr_field.clone(),
            alloc_method: self.alloc_method.clone(),
        }
    }
}

impl LibraryConfig {
    /// Parse a description from a file
    pub fn from_file(path: &Path) -> Result<Self, LibraryConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a description from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, LibraryConfigError> {
        let config: LibraryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the description.
    ///
    /// Method descriptors are left alone here; the generator rejects
    /// invalid ones when it reaches them.
    pub fn validate(&self) -> Result<(), LibraryConfigError> {
        if self.library.name.is_empty() {
            return Err(LibraryConfigError::Validation(
                "Library name cannot be empty".to_string(),
            ));
        }

        let generator = &self.generator;
        for (key, value) in [
            ("impl_field", &generator.impl_field),
            ("native_handle", &generator.native_handle),
            ("native_ptr_field", &generator.native_ptr_field),
            ("alloc_method", &generator.alloc_method),
        ] {
            if value.is_empty() {
                return Err(LibraryConfigError::Validation(format!(
                    "generator.{} cannot be empty",
                    key
                )));
            }
        }

        let mut seen = HashSet::new();
        for class in &self.classes {
            if class.name.is_empty() {
                return Err(LibraryConfigError::Validation(
                    "Class name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(LibraryConfigError::Validation(format!(
                    "Class '{}' is declared more than once",
                    class.name
                )));
            }
        }

        Ok(())
    }

    /// The library as seen by the generator
    pub fn to_library(&self) -> Library {
        Library {
            name: self.library.name.clone(),
            namespace: self.library.namespace.clone(),
            classes: self.classes.clone(),
        }
    }
}
