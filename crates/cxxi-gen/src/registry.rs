//! Implementation registry of the owning class
//!
//! Every wrapper body reaches native code through members named here:
//! the implementation-lookup field whose members match ABI method names,
//! the native-handle property, the native-pointer field, and the allocator.
//! The registry is passed to the generator explicitly.

use crate::decl::{Expr, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplRegistry {
    /// Field holding the ABI implementation (`impl`)
    pub impl_field: String,
    /// Property exposing the current instance's native handle (`Native`)
    pub native_handle: String,
    /// Field assigned by constructors (`native_ptr`)
    pub native_ptr_field: String,
    /// Allocator member on the implementation (`Alloc`)
    pub alloc_method: String,
}

impl Default for ImplRegistry {
    fn default() -> Self {
        Self {
            impl_field: "impl".to_string(),
            native_handle: "Native".to_string(),
            native_ptr_field: "native_ptr".to_string(),
            alloc_method: "Alloc".to_string(),
        }
    }
}

impl ImplRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `impl.<method>(args...)`, keyed by the ABI method name
    pub fn invoke(&self, method: &str, args: Vec<Expr>) -> Expr {
        Expr::call(Expr::field(self.impl_field.as_str()), method, args)
    }

    /// Native handle of the current instance
    pub fn native_handle(&self) -> Expr {
        Expr::field(self.native_handle.as_str())
    }

    /// Native handle of another instance
    pub fn native_handle_of(&self, target: Expr) -> Expr {
        Expr::field_of(target, self.native_handle.as_str())
    }

    /// `native_ptr = impl.Alloc(this)`
    pub fn allocate(&self) -> Statement {
        Statement::Assign {
            target: Expr::field(self.native_ptr_field.as_str()),
            value: self.invoke(&self.alloc_method, vec![Expr::This]),
        }
    }
}
