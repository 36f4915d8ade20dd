//! `cxxi generate` — Generate bindings for a library description.

use crate::config::LibraryConfig;
use anyhow::Context;
use cxxi_gen::{BindingGenerator, CSharpTypeMapper, ClassBinding, PrettyPrint};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// C#-flavoured declarations
    Text,
    /// Declaration tree as JSON
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    library: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    classes: &'a [ClassBinding],
}

pub fn execute(file: &Path, format: OutputFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let config = LibraryConfig::from_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let rendered = render(&config, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote bindings to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Generate every class and render the result in the requested format
pub fn render(config: &LibraryConfig, format: OutputFormat) -> anyhow::Result<String> {
    let library = config.to_library();
    let registry = config.generator.registry();
    let generator = BindingGenerator::new(&CSharpTypeMapper, &registry);
    let bindings = generator
        .generate_library(&library)
        .with_context(|| format!("Failed to generate bindings for '{}'", library.name))?;

    match format {
        OutputFormat::Json => {
            let out = JsonOutput {
                library: &library.name,
                namespace: library.namespace.as_deref(),
                classes: &bindings,
            };
            let mut json = serde_json::to_string_pretty(&out)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(
            &library.name,
            library.namespace.as_deref(),
            &bindings,
        )),
    }
}

fn render_text(library: &str, namespace: Option<&str>, bindings: &[ClassBinding]) -> String {
    let mut output = String::new();
    writeln!(output, "// Bindings for native library '{}'", library).unwrap();
    writeln!(output).unwrap();

    let indent = if namespace.is_some() { "    " } else { "" };
    if let Some(ns) = namespace {
        writeln!(output, "namespace {} {{", ns).unwrap();
    }
    for (i, binding) in bindings.iter().enumerate() {
        if i > 0 {
            writeln!(output).unwrap();
        }
        for line in binding.pretty_print().lines() {
            if line.is_empty() {
                writeln!(output).unwrap();
            } else {
                writeln!(output, "{}{}", indent, line).unwrap();
            }
        }
    }
    if namespace.is_some() {
        writeln!(output, "}}").unwrap();
    }
    output
}
