//! Native method descriptors
//!
//! A [`MethodDescriptor`] is built once per discovered native method by the
//! header-parsing stage and is read-only afterwards. The raw flag set is kept
//! as parsed; [`MethodDescriptor::category`] folds it into a single
//! [`MethodCategory`] and rejects the few flag combinations that name two
//! exclusive roles. Every other combination is accepted: the category decides
//! the shape of the wrapper body, while `static` alone decides whether the
//! method takes a receiver and `virtual` alone decides mangling.

use crate::error::DescriptorError;
use crate::ty::CppType;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Name of the synthetic receiver parameter; no descriptor parameter may use it
pub const RECEIVER_NAME: &str = "this";

/// A named, typed method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, unique within its method
    pub name: String,
    /// Native parameter type
    #[serde(rename = "type")]
    pub ty: CppType,
}

impl Parameter {
    /// Create a parameter
    pub fn new(name: impl Into<String>, ty: CppType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Raw method flags as reported by the header parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodFlags {
    /// Dispatched through the vtable
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    /// No implicit `this`
    #[serde(rename = "static")]
    pub is_static: bool,
    /// `const`-qualified receiver
    #[serde(rename = "const")]
    pub is_const: bool,
    /// Defined inline in the header
    #[serde(rename = "inline")]
    pub is_inline: bool,
    /// Compiler-generated
    #[serde(rename = "artificial")]
    pub is_artificial: bool,
    /// Constructor
    #[serde(rename = "constructor")]
    pub is_constructor: bool,
    /// Destructor
    #[serde(rename = "destructor")]
    pub is_destructor: bool,
    /// Copy constructor (implies `is_constructor`)
    #[serde(rename = "copy_constructor")]
    pub is_copy_constructor: bool,
}

/// The single role a method plays, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    /// Ordinary constructor
    Constructor,
    /// Copy constructor; the first parameter is the source object
    CopyConstructor,
    /// Destructor, possibly virtual
    Destructor {
        /// Whether the destructor is dispatched through the vtable
        is_virtual: bool,
    },
    /// Static member function
    Static,
    /// Virtual member function
    Virtual,
    /// Non-virtual member function
    Instance,
}

impl MethodCategory {
    /// Check if this category constructs a new instance
    pub fn is_constructor(self) -> bool {
        matches!(
            self,
            MethodCategory::Constructor | MethodCategory::CopyConstructor
        )
    }
}

fn default_generate_wrapper() -> bool {
    true
}

/// Canonical description of one native method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Native spelling of the method name
    pub name: String,

    /// Raw flags
    #[serde(flatten)]
    pub flags: MethodFlags,

    /// Native return type (`void` when omitted)
    #[serde(rename = "returns", default = "CppType::void")]
    pub return_type: CppType,

    /// Parameters in native call order
    #[serde(rename = "params", default)]
    pub parameters: Vec<Parameter>,

    /// When false only the ABI-facing declaration is produced
    #[serde(default = "default_generate_wrapper")]
    pub generate_wrapper: bool,
}

impl MethodDescriptor {
    /// Create a descriptor with no flags, no parameters and a `void` return
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: MethodFlags::default(),
            return_type: CppType::void(),
            parameters: Vec::new(),
            generate_wrapper: true,
        }
    }

    /// Replace the flag set
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the return type
    pub fn returning(mut self, ty: CppType) -> Self {
        self.return_type = ty;
        self
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, ty: CppType) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Caller-facing name: the native name with its first character upper-cased
    pub fn public_name(&self) -> Result<String, DescriptorError> {
        derived_public_name(&self.name)
    }

    /// Whether calls pass the instance handle first (every non-static method)
    pub fn has_receiver(&self) -> bool {
        !self.flags.is_static
    }

    /// Fold the raw flags into a single category.
    ///
    /// Only the constructor/destructor roles are exclusive. Otherwise the
    /// constructor roles win, then destructor, then static, then virtual.
    pub fn category(&self) -> Result<MethodCategory, DescriptorError> {
        let flags = &self.flags;
        let conflict = |reason: &str| {
            Err(DescriptorError::ConflictingFlags {
                method: self.name.clone(),
                reason: reason.to_string(),
            })
        };

        if flags.is_copy_constructor && flags.is_destructor {
            return conflict("copy constructor and destructor are exclusive");
        }
        if flags.is_copy_constructor && !flags.is_constructor {
            return conflict("copy constructor is not marked as a constructor");
        }
        if flags.is_constructor && flags.is_destructor {
            return conflict("constructor and destructor are exclusive");
        }

        let category = if flags.is_copy_constructor {
            MethodCategory::CopyConstructor
        } else if flags.is_constructor {
            MethodCategory::Constructor
        } else if flags.is_destructor {
            MethodCategory::Destructor {
                is_virtual: flags.is_virtual,
            }
        } else if flags.is_static {
            MethodCategory::Static
        } else if flags.is_virtual {
            MethodCategory::Virtual
        } else {
            MethodCategory::Instance
        };
        Ok(category)
    }

    /// Check the full input contract and return the method category.
    ///
    /// Rejects an empty name, conflicting flags, parameters that are unnamed,
    /// named like the receiver or named twice, and a copy constructor without
    /// a source parameter.
    pub fn validate(&self) -> Result<MethodCategory, DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        let category = self.category()?;

        let mut seen = FxHashSet::default();
        for param in &self.parameters {
            if param.name.is_empty() || param.name == RECEIVER_NAME {
                return Err(DescriptorError::InvalidParameterName {
                    method: self.name.clone(),
                    parameter: param.name.clone(),
                });
            }
            if !seen.insert(param.name.as_str()) {
                return Err(DescriptorError::DuplicateParameter {
                    method: self.name.clone(),
                    parameter: param.name.clone(),
                });
            }
        }

        if category == MethodCategory::CopyConstructor && self.parameters.is_empty() {
            return Err(DescriptorError::MalformedCopyConstructor {
                method: self.name.clone(),
            });
        }

        Ok(category)
    }
}

/// Derive the caller-facing name: first character upper-cased, rest unchanged.
///
/// The first character maps to exactly one character; when its upper case
/// spans several (`ß` → `SS`) it is kept as is.
pub fn derived_public_name(name: &str) -> Result<String, DescriptorError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(DescriptorError::EmptyName)?;
    let mut upper = first.to_uppercase();
    let head = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    Ok(std::iter::once(head).chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::CppTypeKind;

    fn with_flags(flags: MethodFlags) -> MethodDescriptor {
        MethodDescriptor::new("method").with_flags(flags)
    }

    #[test]
    fn test_public_name() {
        assert_eq!(derived_public_name("foo").unwrap(), "Foo");
        assert_eq!(derived_public_name("Foo").unwrap(), "Foo");
        assert_eq!(derived_public_name("x").unwrap(), "X");
        assert_eq!(derived_public_name("_private").unwrap(), "_private");
        assert_eq!(derived_public_name("élan").unwrap(), "Élan");
    }

    #[test]
    fn test_public_name_keeps_one_char() {
        assert_eq!(derived_public_name("ßize").unwrap(), "ßize");
        assert_eq!(derived_public_name("ﬁnd").unwrap(), "ﬁnd");
        assert_eq!(derived_public_name("ßize").unwrap().chars().count(), 4);
    }

    #[test]
    fn test_public_name_empty() {
        assert_eq!(derived_public_name(""), Err(DescriptorError::EmptyName));
        assert_eq!(
            MethodDescriptor::new("").public_name(),
            Err(DescriptorError::EmptyName)
        );
    }

    #[test]
    fn test_category_plain() {
        assert_eq!(
            with_flags(MethodFlags::default()).category(),
            Ok(MethodCategory::Instance)
        );
        let flags = MethodFlags {
            is_const: true,
            is_inline: true,
            is_artificial: true,
            ..Default::default()
        };
        assert_eq!(with_flags(flags).category(), Ok(MethodCategory::Instance));
    }

    #[test]
    fn test_category_roles() {
        let ctor = MethodFlags {
            is_constructor: true,
            ..Default::default()
        };
        assert_eq!(with_flags(ctor).category(), Ok(MethodCategory::Constructor));

        let copy = MethodFlags {
            is_constructor: true,
            is_copy_constructor: true,
            ..Default::default()
        };
        assert_eq!(
            with_flags(copy).category(),
            Ok(MethodCategory::CopyConstructor)
        );

        let dtor = MethodFlags {
            is_destructor: true,
            is_virtual: true,
            ..Default::default()
        };
        assert_eq!(
            with_flags(dtor).category(),
            Ok(MethodCategory::Destructor { is_virtual: true })
        );

        let stat = MethodFlags {
            is_static: true,
            ..Default::default()
        };
        assert_eq!(with_flags(stat).category(), Ok(MethodCategory::Static));

        let virt = MethodFlags {
            is_virtual: true,
            is_const: true,
            ..Default::default()
        };
        assert_eq!(with_flags(virt).category(), Ok(MethodCategory::Virtual));
    }

    #[test]
    fn test_conflicting_flags() {
        let invalid = [
            MethodFlags {
                is_constructor: true,
                is_destructor: true,
                ..Default::default()
            },
            MethodFlags {
                is_copy_constructor: true,
                ..Default::default()
            },
            MethodFlags {
                is_copy_constructor: true,
                is_destructor: true,
                ..Default::default()
            },
            MethodFlags {
                is_constructor: true,
                is_copy_constructor: true,
                is_destructor: true,
                ..Default::default()
            },
        ];
        for flags in invalid {
            let result = with_flags(flags).category();
            assert!(
                matches!(result, Err(DescriptorError::ConflictingFlags { .. })),
                "{:?} should be rejected, got {:?}",
                flags,
                result
            );
        }
    }

    #[test]
    fn test_mixed_flags_have_a_category() {
        let cases = [
            (
                MethodFlags {
                    is_static: true,
                    is_virtual: true,
                    ..Default::default()
                },
                MethodCategory::Static,
            ),
            (
                MethodFlags {
                    is_static: true,
                    is_constructor: true,
                    ..Default::default()
                },
                MethodCategory::Constructor,
            ),
            (
                MethodFlags {
                    is_virtual: true,
                    is_constructor: true,
                    ..Default::default()
                },
                MethodCategory::Constructor,
            ),
            (
                MethodFlags {
                    is_virtual: true,
                    is_constructor: true,
                    is_copy_constructor: true,
                    ..Default::default()
                },
                MethodCategory::CopyConstructor,
            ),
            (
                MethodFlags {
                    is_static: true,
                    is_destructor: true,
                    ..Default::default()
                },
                MethodCategory::Destructor { is_virtual: false },
            ),
        ];
        for (flags, expected) in cases {
            assert_eq!(with_flags(flags).category(), Ok(expected), "{:?}", flags);
        }
    }

    #[test]
    fn test_static_decides_receiver() {
        let ctor = with_flags(MethodFlags {
            is_static: true,
            is_constructor: true,
            ..Default::default()
        });
        assert!(!ctor.has_receiver());
        assert!(with_flags(MethodFlags::default()).has_receiver());
        assert!(with_flags(MethodFlags {
            is_virtual: true,
            ..Default::default()
        })
        .has_receiver());
    }

    #[test]
    fn test_validate_duplicate_parameter() {
        let method = MethodDescriptor::new("resize")
            .with_parameter("w", CppType::new(CppTypeKind::Int))
            .with_parameter("w", CppType::new(CppTypeKind::Int));
        assert_eq!(
            method.validate(),
            Err(DescriptorError::DuplicateParameter {
                method: "resize".to_string(),
                parameter: "w".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_parameter_names() {
        for name in ["this", ""] {
            let method = MethodDescriptor::new("setParent")
                .with_parameter("parent", CppType::new(CppTypeKind::Int))
                .with_parameter(name, CppType::new(CppTypeKind::Int));
            assert_eq!(
                method.validate(),
                Err(DescriptorError::InvalidParameterName {
                    method: "setParent".to_string(),
                    parameter: name.to_string(),
                })
            );
        }

        let method = MethodDescriptor::new("thisOrThat")
            .with_parameter("thisOne", CppType::new(CppTypeKind::Int));
        assert_eq!(method.validate(), Ok(MethodCategory::Instance));
    }

    #[test]
    fn test_validate_copy_constructor_needs_source() {
        let flags = MethodFlags {
            is_constructor: true,
            is_copy_constructor: true,
            ..Default::default()
        };
        let method = MethodDescriptor::new("QSize").with_flags(flags);
        assert!(matches!(
            method.validate(),
            Err(DescriptorError::MalformedCopyConstructor { .. })
        ));
    }

    #[test]
    fn test_validate_empty_name() {
        assert_eq!(
            MethodDescriptor::new("").validate(),
            Err(DescriptorError::EmptyName)
        );
    }
}
