//! Generated declaration tree
//!
//! Two declarations come out of every method descriptor: an [`AbiMethod`]
//! matching the native calling convention and a [`WrapperMethod`] forming the
//! public surface. Both are opaque to the generator's callers until an
//! emitter renders them.

use serde::Serialize;
use std::fmt;

pub use cxxi_model::RECEIVER_NAME;

/// Target-language type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// No value
    Void,
    /// Opaque handle to a native instance
    InstanceHandle,
    /// Any other target type, by name
    Named(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Void => f.write_str("void"),
            TypeRef::InstanceHandle => f.write_str("CppInstancePtr"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    /// Passed by reference in the target language
    pub by_ref: bool,
    /// Aggregate copied inline across the ABI boundary
    pub by_value: bool,
    /// Native type signature used to pick the mangled symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mangle_as: Option<String>,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            by_ref: false,
            by_value: false,
            mangle_as: None,
        }
    }

    /// The leading `this` handle of non-static ABI declarations
    pub fn receiver() -> Self {
        Self::new(RECEIVER_NAME, TypeRef::InstanceHandle)
    }

    pub fn is_receiver(&self) -> bool {
        self.name == RECEIVER_NAME && self.ty == TypeRef::InstanceHandle
    }
}

/// Dispatch and category tags on an ABI declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MethodTag {
    Virtual,
    Constructor,
    Destructor,
    Const,
    Inline,
    Artificial,
    CopyConstructor,
    Static,
}

impl fmt::Display for MethodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MethodTag::Virtual => "Virtual",
            MethodTag::Constructor => "Constructor",
            MethodTag::Destructor => "Destructor",
            MethodTag::Const => "Const",
            MethodTag::Inline => "Inline",
            MethodTag::Artificial => "Artificial",
            MethodTag::CopyConstructor => "CopyConstructor",
            MethodTag::Static => "Static",
        };
        f.write_str(name)
    }
}

/// ABI-facing declaration: native name, explicit receiver, marshaling tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbiMethod {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub return_type: TypeRef,
    /// Return value is an aggregate copied inline
    pub return_by_value: bool,
    pub tags: Vec<MethodTag>,
}

impl AbiMethod {
    pub fn has_tag(&self, tag: MethodTag) -> bool {
        self.tags.contains(&tag)
    }

    /// The synthetic receiver, if this declaration has one
    pub fn receiver(&self) -> Option<&ParamDecl> {
        self.params.first().filter(|p| p.is_receiver())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapperKind {
    Method,
    /// The wrapper is the constructor of the generated class
    Constructor,
}

/// Caller-facing declaration with a generated body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapperMethod {
    pub name: String,
    pub kind: WrapperKind,
    pub is_static: bool,
    pub params: Vec<ParamDecl>,
    pub return_type: TypeRef,
    pub body: Vec<Statement>,
}

impl WrapperMethod {
    pub fn is_constructor(&self) -> bool {
        self.kind == WrapperKind::Constructor
    }
}

/// Statement in a wrapper body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Expression evaluated for its effect
    Expr(Expr),
    Return(Expr),
    Assign { target: Expr, value: Expr },
}

/// Expression in a wrapper body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    This,
    /// Reference to a declared parameter
    Arg(String),
    /// Field or property; `None` target means the current instance
    Field {
        target: Option<Box<Expr>>,
        name: String,
    },
    /// Argument passed by reference
    ByRef(Box<Expr>),
    /// Expression re-typed as another class
    Cast { ty: String, value: Box<Expr> },
    Call {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn arg(name: impl Into<String>) -> Self {
        Expr::Arg(name.into())
    }

    /// Field of the current instance
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field {
            target: None,
            name: name.into(),
        }
    }

    pub fn field_of(target: Expr, name: impl Into<String>) -> Self {
        Expr::Field {
            target: Some(Box::new(target)),
            name: name.into(),
        }
    }

    pub fn by_ref(value: Expr) -> Self {
        Expr::ByRef(Box::new(value))
    }

    pub fn cast(ty: impl Into<String>, value: Expr) -> Self {
        Expr::Cast {
            ty: ty.into(),
            value: Box::new(value),
        }
    }

    pub fn call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::This => f.write_str("this"),
            Expr::Arg(name) => f.write_str(name),
            Expr::Field { target: None, name } => f.write_str(name),
            Expr::Field {
                target: Some(target),
                name,
            } => write!(f, "{}.{}", target, name),
            Expr::ByRef(value) => write!(f, "ref {}", value),
            Expr::Cast { ty, value } => write!(f, "(({}){})", ty, value),
            Expr::Call {
                target,
                method,
                args,
            } => {
                write!(f, "{}.{}(", target, method)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expr(expr) => write!(f, "{};", expr),
            Statement::Return(expr) => write!(f, "return {};", expr),
            Statement::Assign { target, value } => write!(f, "{} = {};", target, value),
        }
    }
}
