//! ABI-facing declarations

use super::BindingGenerator;
use crate::decl::{AbiMethod, MethodTag, ParamDecl, TypeRef};
use crate::error::GenResult;
use crate::mapper::TypeMapper;
use cxxi_model::{MethodCategory, MethodDescriptor, MethodFlags, Parameter};
use log::trace;

impl<'a, M: TypeMapper + ?Sized> BindingGenerator<'a, M> {
    /// Generate the declaration matching the native calling convention.
    ///
    /// Keeps the native name, prepends the instance handle unless static,
    /// marks by-value aggregates, and tags non-virtual parameters with their
    /// native signature so overloads resolve to one mangled symbol.
    pub fn abi_method(&self, method: &MethodDescriptor) -> GenResult<AbiMethod> {
        let category = method.validate()?;
        trace!("abi declaration for {} ({:?})", method.name, category);

        let mut params = Vec::with_capacity(method.parameters.len() + 1);
        if method.has_receiver() {
            params.push(ParamDecl::receiver());
        }

        for (index, param) in method.parameters.iter().enumerate() {
            let mut decl = if index == 0 && category == MethodCategory::CopyConstructor {
                // Source object travels as its native handle
                ParamDecl::new(param.name.as_str(), TypeRef::InstanceHandle)
            } else {
                self.abi_param(param)
            };

            if !method.flags.is_virtual {
                let signature = param.ty.signature_text();
                if !signature.is_empty() {
                    decl.mangle_as = Some(signature);
                }
            }
            params.push(decl);
        }

        Ok(AbiMethod {
            name: method.name.clone(),
            params,
            return_type: self.mapper.map_type(&method.return_type),
            return_by_value: method.return_type.is_passed_by_value(),
            tags: method_tags(&method.flags),
        })
    }

    fn abi_param(&self, param: &Parameter) -> ParamDecl {
        let mapped = self.mapper.map_passing(&param.ty);
        ParamDecl {
            name: param.name.clone(),
            ty: mapped.ty,
            by_ref: mapped.by_ref,
            by_value: param.ty.is_passed_by_value(),
            mangle_as: None,
        }
    }
}

/// One tag per set flag, in a fixed order
fn method_tags(flags: &MethodFlags) -> Vec<MethodTag> {
    [
        (flags.is_virtual, MethodTag::Virtual),
        (flags.is_constructor, MethodTag::Constructor),
        (flags.is_destructor, MethodTag::Destructor),
        (flags.is_const, MethodTag::Const),
        (flags.is_inline, MethodTag::Inline),
        (flags.is_artificial, MethodTag::Artificial),
        (flags.is_copy_constructor, MethodTag::CopyConstructor),
        (flags.is_static, MethodTag::Static),
    ]
    .into_iter()
    .filter_map(|(set, tag)| set.then_some(tag))
    .collect()
}
