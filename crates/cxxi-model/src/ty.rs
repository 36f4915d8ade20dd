//! Native C++ type descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element kind of a native type, before modifiers are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CppTypeKind {
    /// Type the parser could not classify
    Unknown,
    /// `void`
    Void,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `wchar_t`
    WChar,
    /// `int` (size and sign come from modifiers)
    Int,
    /// `float`
    Float,
    /// `double`
    Double,
    /// Named enumeration
    Enum,
    /// Named union
    Union,
    /// Named class
    Class,
    /// Named struct
    Struct,
    /// Template type parameter
    Typename,
}

impl CppTypeKind {
    /// Whether this kind is a class or struct aggregate
    pub fn is_aggregate(self) -> bool {
        matches!(self, CppTypeKind::Class | CppTypeKind::Struct)
    }

    /// Whether values of this kind are identified by a name rather than a keyword
    pub fn is_named(self) -> bool {
        matches!(
            self,
            CppTypeKind::Enum
                | CppTypeKind::Union
                | CppTypeKind::Class
                | CppTypeKind::Struct
                | CppTypeKind::Typename
        )
    }

    /// C++ keyword for builtin kinds, empty for named or unknown kinds
    pub fn keyword(self) -> &'static str {
        match self {
            CppTypeKind::Void => "void",
            CppTypeKind::Bool => "bool",
            CppTypeKind::Char => "char",
            CppTypeKind::WChar => "wchar_t",
            CppTypeKind::Int => "int",
            CppTypeKind::Float => "float",
            CppTypeKind::Double => "double",
            _ => "",
        }
    }
}

/// Modifier applied to a native element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CppModifier {
    /// `const`
    Const,
    /// `volatile`
    Volatile,
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,
    /// `short`
    Short,
    /// `long`
    Long,
    /// `long long`
    LongLong,
    /// `*`
    Pointer,
    /// `&`
    Reference,
    /// `[]`
    Array,
}

impl CppModifier {
    /// Whether this modifier indirects the element (pointer, reference or array)
    pub fn is_indirection(self) -> bool {
        matches!(
            self,
            CppModifier::Pointer | CppModifier::Reference | CppModifier::Array
        )
    }
}

impl fmt::Display for CppModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CppModifier::Const => "const",
            CppModifier::Volatile => "volatile",
            CppModifier::Signed => "signed",
            CppModifier::Unsigned => "unsigned",
            CppModifier::Short => "short",
            CppModifier::Long => "long",
            CppModifier::LongLong => "long long",
            CppModifier::Pointer => "*",
            CppModifier::Reference => "&",
            CppModifier::Array => "[]",
        };
        f.write_str(text)
    }
}

/// A native type: element kind, optional element name and ordered modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CppType {
    /// Element kind
    pub kind: CppTypeKind,
    /// Element name for named kinds (`QString`, `Qt::Alignment`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Modifiers in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<CppModifier>,
}

impl CppType {
    /// Create an unmodified builtin type
    pub fn new(kind: CppTypeKind) -> Self {
        Self {
            kind,
            name: None,
            modifiers: Vec::new(),
        }
    }

    /// Create an unmodified named type
    pub fn named(kind: CppTypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            modifiers: Vec::new(),
        }
    }

    /// `void`
    pub fn void() -> Self {
        Self::new(CppTypeKind::Void)
    }

    /// Append a modifier
    pub fn with_modifier(mut self, modifier: CppModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Check if the given modifier is present
    pub fn has_modifier(&self, modifier: CppModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Check if this is plain `void` (no value)
    pub fn is_void(&self) -> bool {
        self.kind == CppTypeKind::Void && !self.modifiers.iter().any(|m| m.is_indirection())
    }

    /// Check if this type is an aggregate copied across the ABI boundary.
    ///
    /// True for class and struct kinds that carry no pointer, reference or
    /// array modifier. Qualifiers such as `const` do not affect the result.
    pub fn is_passed_by_value(&self) -> bool {
        self.kind.is_aggregate() && !self.modifiers.iter().any(|m| m.is_indirection())
    }

    /// The element name as written in C++ (name for named kinds, keyword otherwise)
    pub fn element_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.kind.keyword(),
        }
    }

    /// Textual signature used for symbol mangling; empty when the type is unknown
    pub fn signature_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for modifier in self.modifiers.iter().filter(|m| !m.is_indirection()) {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "{}", modifier)?;
            wrote = true;
        }

        let element = self.element_name();
        if !element.is_empty() {
            if wrote {
                f.write_str(" ")?;
            }
            f.write_str(element)?;
        }

        for modifier in self.modifiers.iter().filter(|m| m.is_indirection()) {
            write!(f, "{}", modifier)?;
        }
        Ok(())
    }
}
