//! Pretty-printing for generated declarations
//!
//! Renders declarations as C#-flavoured text for debugging and for the
//! `cxxi generate` text output.

use crate::decl::{AbiMethod, ParamDecl, WrapperKind, WrapperMethod};
use crate::generator::ClassBinding;
use std::fmt::Write;

/// Trait for pretty-printing generated declarations
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

fn format_param(param: &ParamDecl) -> String {
    let mut out = String::new();
    let mut attrs = Vec::new();
    if let Some(signature) = &param.mangle_as {
        attrs.push(format!("MangleAs(\"{}\")", signature));
    }
    if param.by_value {
        attrs.push("ByVal".to_string());
    }
    if !attrs.is_empty() {
        write!(out, "[{}] ", attrs.join(", ")).unwrap();
    }
    if param.by_ref {
        out.push_str("ref ");
    }
    write!(out, "{} {}", param.ty, param.name).unwrap();
    out
}

fn format_params(params: &[ParamDecl]) -> String {
    params.iter().map(format_param).collect::<Vec<_>>().join(", ")
}

impl PrettyPrint for AbiMethod {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| t.to_string()).collect();
            writeln!(output, "[{}]", tags.join(", ")).unwrap();
        }
        if self.return_by_value {
            writeln!(output, "[return: ByVal]").unwrap();
        }
        writeln!(
            output,
            "{} {}({});",
            self.return_type,
            self.name,
            format_params(&self.params)
        )
        .unwrap();
        output
    }
}

impl PrettyPrint for WrapperMethod {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        let modifiers = if self.is_static { "public static" } else { "public" };
        match self.kind {
            WrapperKind::Constructor => {
                writeln!(output, "{} {}({})", modifiers, self.name, format_params(&self.params))
                    .unwrap();
            }
            WrapperKind::Method => {
                writeln!(
                    output,
                    "{} {} {}({})",
                    modifiers,
                    self.return_type,
                    self.name,
                    format_params(&self.params)
                )
                .unwrap();
            }
        }
        writeln!(output, "{{").unwrap();
        for stmt in &self.body {
            writeln!(output, "    {}", stmt).unwrap();
        }
        writeln!(output, "}}").unwrap();
        output
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl PrettyPrint for ClassBinding {
    fn pretty_print(&self) -> String {
        let mut output = String::new();

        writeln!(output, "public interface I{} {{", self.name).unwrap();
        for method in &self.interface {
            writeln!(output, "{}", indent(&method.pretty_print(), "    ")).unwrap();
        }
        writeln!(output, "}}").unwrap();
        writeln!(output).unwrap();

        match &self.primary_base {
            Some(base) => {
                writeln!(output, "public partial class {} : {} {{", self.name, base).unwrap()
            }
            None => writeln!(output, "public partial class {} {{", self.name).unwrap(),
        }
        for (i, wrapper) in self.wrappers.iter().enumerate() {
            if i > 0 {
                writeln!(output).unwrap();
            }
            writeln!(output, "{}", indent(&wrapper.pretty_print(), "    ")).unwrap();
        }
        writeln!(output, "}}").unwrap();

        output
    }
}
