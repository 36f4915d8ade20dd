//! Binding generation
//!
//! [`BindingGenerator`] holds the two ambient services a method needs: the
//! type mapper and the implementation registry of the owning class. Each
//! entry point validates the descriptor first and either returns complete
//! declarations or an error, never a partial result.

mod abi;
mod class;
mod wrapper;

pub use class::{ClassBinding, ClassIndex};

use crate::decl::{AbiMethod, WrapperMethod};
use crate::error::GenResult;
use crate::mapper::TypeMapper;
use crate::registry::ImplRegistry;
use cxxi_model::MethodDescriptor;
use serde::Serialize;

/// Both declarations generated for one method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBinding {
    pub abi: AbiMethod,
    /// Absent when the descriptor suppresses wrapper generation
    pub wrapper: Option<WrapperMethod>,
}

pub struct BindingGenerator<'a, M: TypeMapper + ?Sized> {
    mapper: &'a M,
    registry: &'a ImplRegistry,
}

impl<'a, M: TypeMapper + ?Sized> BindingGenerator<'a, M> {
    pub fn new(mapper: &'a M, registry: &'a ImplRegistry) -> Self {
        Self { mapper, registry }
    }

    pub fn registry(&self) -> &ImplRegistry {
        self.registry
    }

    /// Generate the ABI declaration and, unless suppressed, the wrapper
    pub fn generate(&self, method: &MethodDescriptor) -> GenResult<MethodBinding> {
        let abi = self.abi_method(method)?;
        let wrapper = if method.generate_wrapper {
            Some(self.wrapper_method(method)?)
        } else {
            None
        };
        Ok(MethodBinding { abi, wrapper })
    }
}
