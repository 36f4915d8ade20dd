//! Cxxi Generator - native method descriptors to binding declarations
//!
//! For every [`MethodDescriptor`](cxxi_model::MethodDescriptor) the generator
//! derives an ABI-facing declaration carrying dispatch and marshaling tags,
//! and a caller-facing wrapper whose body forwards to it through the
//! implementation registry. Generation is pure: the same descriptor and the
//! same mapper answers always give the same declarations.

pub mod decl;
pub mod error;
pub mod generator;
pub mod mapper;
pub mod pretty;
pub mod registry;

pub use decl::{AbiMethod, Expr, MethodTag, ParamDecl, Statement, TypeRef, WrapperKind, WrapperMethod};
pub use error::{GenResult, GenerateError};
pub use generator::{BindingGenerator, ClassBinding, ClassIndex, MethodBinding};
pub use mapper::{CSharpTypeMapper, MappedType, TypeMapper};
pub use pretty::PrettyPrint;
pub use registry::ImplRegistry;
