//! Whole-class generation
//!
//! A class binding is the implementation interface (every ABI declaration),
//! the wrappers of the class's own methods, and forwarding wrappers for the
//! methods of each non-primary base.

use super::BindingGenerator;
use crate::decl::{AbiMethod, WrapperMethod};
use crate::error::{GenResult, GenerateError};
use crate::mapper::TypeMapper;
use cxxi_model::{ClassDescriptor, Library, MethodCategory};
use log::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Generated bindings for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBinding {
    pub name: String,
    pub primary_base: Option<String>,
    /// ABI declarations, in descriptor order
    pub interface: Vec<AbiMethod>,
    /// Own wrappers followed by forwarding wrappers
    pub wrappers: Vec<WrapperMethod>,
}

/// Name lookup over a library's classes
pub struct ClassIndex<'l> {
    classes: FxHashMap<&'l str, &'l ClassDescriptor>,
}

impl<'l> ClassIndex<'l> {
    pub fn new(library: &'l Library) -> Self {
        let classes = library
            .classes
            .iter()
            .map(|class| (class.name.as_str(), class))
            .collect();
        Self { classes }
    }

    pub fn get(&self, name: &str) -> Option<&'l ClassDescriptor> {
        self.classes.get(name).copied()
    }
}

impl<'a, M: TypeMapper + ?Sized> BindingGenerator<'a, M> {
    /// Generate every class of a library, stopping at the first error
    pub fn generate_library(&self, library: &Library) -> GenResult<Vec<ClassBinding>> {
        let index = ClassIndex::new(library);
        library
            .classes
            .iter()
            .map(|class| self.generate_class(class, &index))
            .collect()
    }

    pub fn generate_class(
        &self,
        class: &ClassDescriptor,
        index: &ClassIndex<'_>,
    ) -> GenResult<ClassBinding> {
        debug!(
            "generating class {} ({} methods, {} bases)",
            class.name,
            class.methods.len(),
            class.bases.len()
        );

        let mut interface = Vec::with_capacity(class.methods.len());
        let mut wrappers = Vec::new();
        for method in &class.methods {
            let binding = self.generate(method)?;
            interface.push(binding.abi);
            wrappers.extend(binding.wrapper);
        }

        for base_name in class.non_primary_bases() {
            let base = index
                .get(base_name)
                .ok_or_else(|| GenerateError::MissingBaseContext {
                    target: class.name.clone(),
                    base: Some(base_name.clone()),
                })?;

            for method in &base.methods {
                let category = method.validate()?;
                if !method.generate_wrapper || !is_forwardable(category) {
                    continue;
                }
                wrappers.push(self.inherited_wrapper_method(method, Some(base))?);
            }
        }

        Ok(ClassBinding {
            name: class.name.clone(),
            primary_base: class.primary_base().map(str::to_string),
            interface,
            wrappers,
        })
    }
}

fn is_forwardable(category: MethodCategory) -> bool {
    matches!(category, MethodCategory::Instance | MethodCategory::Virtual)
}
