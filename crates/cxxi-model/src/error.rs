//! Descriptor validation errors

use thiserror::Error;

/// Errors raised when a method descriptor breaks its input contract
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The native method name is empty, so no public name can be derived
    #[error("Method name cannot be empty")]
    EmptyName,

    /// The flag set does not describe a single method category
    #[error("Conflicting flags on method '{method}': {reason}")]
    ConflictingFlags {
        /// Native method name
        method: String,
        /// Which flags collide
        reason: String,
    },

    /// Two parameters share a name
    #[error("Duplicate parameter '{parameter}' in method '{method}'")]
    DuplicateParameter {
        /// Native method name
        method: String,
        /// The repeated parameter name
        parameter: String,
    },

    /// A parameter is unnamed or takes the receiver's name
    #[error("Invalid parameter name '{parameter}' in method '{method}'")]
    InvalidParameterName {
        /// Native method name
        method: String,
        /// The offending parameter name
        parameter: String,
    },

    /// A copy constructor without the source-object parameter
    #[error("Copy constructor '{method}' must take the source object as its first parameter")]
    MalformedCopyConstructor {
        /// Native method name
        method: String,
    },
}
