//! Caller-facing wrapper declarations and their bodies

use super::BindingGenerator;
use crate::decl::{Expr, ParamDecl, Statement, WrapperKind, WrapperMethod};
use crate::error::{GenResult, GenerateError};
use crate::mapper::TypeMapper;
use cxxi_model::{ClassDescriptor, MethodCategory, MethodDescriptor};
use log::trace;

impl<'a, M: TypeMapper + ?Sized> BindingGenerator<'a, M> {
    /// Declare the wrapper without a body: public name, mapped parameters,
    /// no receiver and no tags.
    pub fn wrapper_declaration(&self, method: &MethodDescriptor) -> GenResult<WrapperMethod> {
        let category = method.validate()?;
        self.declare_wrapper(method, category)
    }

    /// Wrapper whose body invokes the ABI method through the registry.
    ///
    /// Constructors allocate the native instance before anything else and
    /// never return the call's result.
    pub fn wrapper_method(&self, method: &MethodDescriptor) -> GenResult<WrapperMethod> {
        let category = method.validate()?;
        let mut wrapper = self.declare_wrapper(method, category)?;
        trace!("wrapper {} for {}", wrapper.name, method.name);

        if category.is_constructor() {
            wrapper.body.push(self.registry.allocate());
        }

        let mut args = Vec::with_capacity(method.parameters.len() + 1);
        if method.has_receiver() {
            args.push(self.registry.native_handle());
        }
        args.extend(self.argument_expressions(method, category));

        let call = self.registry.invoke(&method.name, args);
        if wrapper.return_type.is_void() || category.is_constructor() {
            wrapper.body.push(Statement::Expr(call));
        } else {
            wrapper.body.push(Statement::Return(call));
        }
        Ok(wrapper)
    }

    /// Wrapper for a method inherited from a non-primary base: forwards to
    /// the same public method on `this` re-typed as the base class.
    pub fn inherited_wrapper_method(
        &self,
        method: &MethodDescriptor,
        base: Option<&ClassDescriptor>,
    ) -> GenResult<WrapperMethod> {
        let category = method.validate()?;
        let base = base
            .filter(|b| !b.name.is_empty())
            .ok_or_else(|| GenerateError::MissingBaseContext {
                target: method.name.clone(),
                base: None,
            })?;

        let mut wrapper = self.declare_wrapper(method, category)?;
        trace!("forwarding {} to base {}", wrapper.name, base.name);

        let args = self.argument_expressions(method, category);
        let call = Expr::call(
            Expr::cast(base.name.as_str(), Expr::This),
            wrapper.name.as_str(),
            args,
        );
        let statement = if wrapper.return_type.is_void() {
            Statement::Expr(call)
        } else {
            Statement::Return(call)
        };
        wrapper.body.push(statement);
        Ok(wrapper)
    }

    fn declare_wrapper(
        &self,
        method: &MethodDescriptor,
        category: MethodCategory,
    ) -> GenResult<WrapperMethod> {
        let params = method
            .parameters
            .iter()
            .map(|param| {
                let mapped = self.mapper.map_passing(&param.ty);
                let mut decl = ParamDecl::new(param.name.as_str(), mapped.ty);
                decl.by_ref = mapped.by_ref;
                decl
            })
            .collect();

        Ok(WrapperMethod {
            name: method.public_name()?,
            kind: if category.is_constructor() {
                WrapperKind::Constructor
            } else {
                WrapperKind::Method
            },
            is_static: !method.has_receiver(),
            params,
            return_type: self.mapper.map_type(&method.return_type),
            body: Vec::new(),
        })
    }

    /// One argument per parameter, in order; by-reference parameters are
    /// passed explicitly by reference and a copy constructor's source is
    /// passed as its native handle.
    fn argument_expressions(
        &self,
        method: &MethodDescriptor,
        category: MethodCategory,
    ) -> Vec<Expr> {
        method
            .parameters
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let arg = Expr::arg(param.name.as_str());
                if index == 0 && category == MethodCategory::CopyConstructor {
                    self.registry.native_handle_of(arg)
                } else if self.mapper.map_passing(&param.ty).by_ref {
                    Expr::by_ref(arg)
                } else {
                    arg
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TypeRef;
    use crate::mapper::CSharpTypeMapper;
    use crate::registry::ImplRegistry;
    use cxxi_model::{CppModifier, CppType, CppTypeKind, MethodFlags};

    fn int() -> CppType {
        CppType::new(CppTypeKind::Int)
    }

    fn int_ref() -> CppType {
        int().with_modifier(CppModifier::Reference)
    }

    fn ctor_flags() -> MethodFlags {
        MethodFlags {
            is_constructor: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_declaration_has_no_body_or_receiver() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("setValue")
            .with_parameter("value", int())
            .with_parameter("out", int_ref());
        let decl = generator.wrapper_declaration(&method).unwrap();

        assert_eq!(decl.name, "SetValue");
        assert_eq!(decl.kind, WrapperKind::Method);
        assert!(decl.body.is_empty());
        assert_eq!(decl.params.len(), 2);
        assert!(!decl.params[0].by_ref);
        assert!(decl.params[1].by_ref);
        assert!(decl.params.iter().all(|p| p.mangle_as.is_none() && !p.by_value));
    }

    #[test]
    fn test_static_call_has_no_handle() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("tr")
            .with_flags(MethodFlags {
                is_static: true,
                ..Default::default()
            })
            .returning(
                CppType::new(CppTypeKind::Char)
                    .with_modifier(CppModifier::Const)
                    .with_modifier(CppModifier::Pointer),
            )
            .with_parameter("n", int_ref());
        let wrapper = generator.wrapper_method(&method).unwrap();

        assert!(wrapper.is_static);
        assert_eq!(wrapper.return_type, TypeRef::named("string"));
        assert_eq!(wrapper.body.len(), 1);
        assert_eq!(wrapper.body[0].to_string(), "return impl.tr(ref n);");
    }

    #[test]
    fn test_void_instance_call_is_bare() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("update")
            .with_parameter("x", int())
            .with_parameter("y", int_ref());
        let wrapper = generator.wrapper_method(&method).unwrap();
        assert_eq!(wrapper.body, vec![Statement::Expr(Expr::call(
            Expr::field("impl"),
            "update",
            vec![Expr::field("Native"), Expr::arg("x"), Expr::by_ref(Expr::arg("y"))],
        ))]);
    }

    #[test]
    fn test_constructor_allocates_first() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let modifiers = [
            MethodFlags::default(),
            MethodFlags {
                is_inline: true,
                ..Default::default()
            },
            MethodFlags {
                is_artificial: true,
                is_const: true,
                ..Default::default()
            },
            MethodFlags {
                is_copy_constructor: true,
                ..Default::default()
            },
        ];
        for extra in modifiers {
            let flags = MethodFlags {
                is_constructor: true,
                ..extra
            };
            let method = MethodDescriptor::new("QSize")
                .with_flags(flags)
                .with_parameter("other", CppType::named(CppTypeKind::Class, "QSize"));
            let wrapper = generator.wrapper_method(&method).unwrap();

            assert!(wrapper.is_constructor());
            assert_eq!(wrapper.body[0], registry.allocate());
            assert_eq!(wrapper.body.len(), 2);
            assert!(matches!(wrapper.body[1], Statement::Expr(_)));
        }
    }

    #[test]
    fn test_virtual_constructor_allocates_first() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("Widget")
            .with_flags(MethodFlags {
                is_constructor: true,
                is_virtual: true,
                ..Default::default()
            })
            .with_parameter("size", int());
        let wrapper = generator.wrapper_method(&method).unwrap();

        assert!(wrapper.is_constructor());
        assert!(!wrapper.is_static);
        assert_eq!(wrapper.body[0], registry.allocate());
        assert_eq!(wrapper.body[1].to_string(), "impl.Widget(Native, size);");
    }

    #[test]
    fn test_static_virtual_wrapper() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("create")
            .with_flags(MethodFlags {
                is_static: true,
                is_virtual: true,
                ..Default::default()
            })
            .returning(int())
            .with_parameter("count", int());
        let wrapper = generator.wrapper_method(&method).unwrap();

        assert!(wrapper.is_static);
        assert_eq!(wrapper.kind, WrapperKind::Method);
        assert_eq!(wrapper.body.len(), 1);
        assert_eq!(wrapper.body[0].to_string(), "return impl.create(count);");
    }

    #[test]
    fn test_constructor_with_return_type_is_not_returned() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("Widget")
            .with_flags(ctor_flags())
            .returning(int());
        let wrapper = generator.wrapper_method(&method).unwrap();
        assert!(wrapper.body.iter().all(|s| !matches!(s, Statement::Return(_))));
    }

    #[test]
    fn test_copy_constructor_passes_source_handle() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("QSize")
            .with_flags(MethodFlags {
                is_constructor: true,
                is_copy_constructor: true,
                ..Default::default()
            })
            .with_parameter(
                "other",
                CppType::named(CppTypeKind::Class, "QSize")
                    .with_modifier(CppModifier::Const)
                    .with_modifier(CppModifier::Reference),
            );
        let wrapper = generator.wrapper_method(&method).unwrap();
        assert_eq!(wrapper.params[0].ty, TypeRef::named("QSize"));
        assert_eq!(wrapper.body[1].to_string(), "impl.QSize(Native, other.Native);");
    }

    #[test]
    fn test_inherited_forwarding() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let base = ClassDescriptor::new("QPaintDevice");

        let method = MethodDescriptor::new("depth").returning(int());
        let wrapper = generator.inherited_wrapper_method(&method, Some(&base)).unwrap();
        assert_eq!(wrapper.name, "Depth");
        assert_eq!(wrapper.body.len(), 1);
        assert_eq!(wrapper.body[0].to_string(), "return ((QPaintDevice)this).Depth();");

        let method = MethodDescriptor::new("paint").with_parameter("n", int_ref());
        let wrapper = generator.inherited_wrapper_method(&method, Some(&base)).unwrap();
        assert_eq!(wrapper.body.len(), 1);
        assert_eq!(wrapper.body[0].to_string(), "((QPaintDevice)this).Paint(ref n);");
    }

    #[test]
    fn test_inherited_without_base_fails() {
        let registry = ImplRegistry::new();
        let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
        let method = MethodDescriptor::new("depth");

        let err = generator.inherited_wrapper_method(&method, None).unwrap_err();
        assert!(matches!(err, GenerateError::MissingBaseContext { .. }));

        let unnamed = ClassDescriptor::new("");
        let err = generator
            .inherited_wrapper_method(&method, Some(&unnamed))
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingBaseContext { .. }));
    }
}
