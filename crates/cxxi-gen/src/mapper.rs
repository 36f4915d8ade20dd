//! Native-to-target type mapping

use crate::decl::TypeRef;
use cxxi_model::{CppModifier, CppType, CppTypeKind};

/// Result of mapping a native type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub ty: TypeRef,
    /// The target language must pass this value by reference
    pub by_ref: bool,
}

impl MappedType {
    pub fn value(ty: TypeRef) -> Self {
        Self { ty, by_ref: false }
    }

    pub fn by_ref(ty: TypeRef) -> Self {
        Self { ty, by_ref: true }
    }
}

/// Maps native types to target-language types.
///
/// Queries take `&self` only, so one mapper can serve any number of
/// generators at once.
pub trait TypeMapper {
    /// Map a type together with its reference-passing flag
    fn map_passing(&self, ty: &CppType) -> MappedType;

    /// Map a type where the reference-passing flag does not matter
    fn map_type(&self, ty: &CppType) -> TypeRef {
        self.map_passing(ty).ty
    }
}

/// C# interop type mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTypeMapper;

const INT_PTR: &str = "IntPtr";

impl CSharpTypeMapper {
    /// Plain values pass as themselves, a single reference passes by
    /// reference, and anything else is an opaque pointer.
    fn indirect(name: &str, indirections: &[CppModifier]) -> MappedType {
        match indirections {
            [] => MappedType::value(TypeRef::named(name)),
            [CppModifier::Reference] => MappedType::by_ref(TypeRef::named(name)),
            _ => MappedType::value(TypeRef::named(INT_PTR)),
        }
    }

    fn primitive(ty: &CppType) -> &'static str {
        let unsigned = ty.has_modifier(CppModifier::Unsigned);
        match ty.kind {
            CppTypeKind::Bool => "bool",
            CppTypeKind::Char if unsigned => "byte",
            CppTypeKind::Char => "sbyte",
            CppTypeKind::WChar => "char",
            CppTypeKind::Float => "float",
            CppTypeKind::Double => "double",
            _ => {
                let signed = if ty.has_modifier(CppModifier::Short) {
                    ("short", "ushort")
                } else if ty.has_modifier(CppModifier::Long)
                    || ty.has_modifier(CppModifier::LongLong)
                {
                    ("long", "ulong")
                } else {
                    ("int", "uint")
                };
                if unsigned {
                    signed.1
                } else {
                    signed.0
                }
            }
        }
    }
}

impl TypeMapper for CSharpTypeMapper {
    fn map_passing(&self, ty: &CppType) -> MappedType {
        let indirections: Vec<CppModifier> = ty
            .modifiers
            .iter()
            .copied()
            .filter(|m| m.is_indirection())
            .collect();

        match ty.kind {
            CppTypeKind::Void if indirections.is_empty() => MappedType::value(TypeRef::Void),
            CppTypeKind::Void | CppTypeKind::Unknown => {
                MappedType::value(TypeRef::named(INT_PTR))
            }
            _ if ty.kind.is_named() && ty.name.is_none() => {
                MappedType::value(TypeRef::named(INT_PTR))
            }
            // Instances cross as handles whatever the indirection
            CppTypeKind::Class | CppTypeKind::Struct | CppTypeKind::Typename => {
                MappedType::value(TypeRef::named(ty.element_name()))
            }
            CppTypeKind::Enum | CppTypeKind::Union => {
                Self::indirect(ty.element_name(), &indirections)
            }
            _ => match indirections.as_slice() {
                [CppModifier::Pointer]
                    if ty.kind == CppTypeKind::Char && ty.has_modifier(CppModifier::Const) =>
                {
                    MappedType::value(TypeRef::named("string"))
                }
                _ => Self::indirect(Self::primitive(ty), &indirections),
            },
        }
    }
}
