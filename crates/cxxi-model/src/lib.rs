//! Cxxi Model
//!
//! Descriptors for native C++ methods, their parameters and types, as
//! produced by the header-parsing stage and consumed by `cxxi-gen`.

#![warn(missing_docs)]

pub mod class;
pub mod error;
pub mod method;
pub mod ty;

pub use class::{ClassDescriptor, Library};
pub use error::DescriptorError;
pub use method::{
    derived_public_name, MethodCategory, MethodDescriptor, MethodFlags, Parameter, RECEIVER_NAME,
};
pub use ty::{CppModifier, CppType, CppTypeKind};
