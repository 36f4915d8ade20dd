//! `cxxi check` — Validate a library description without generating.

use crate::config::LibraryConfig;
use anyhow::Context;
use cxxi_gen::ClassIndex;
use cxxi_model::Library;
use std::fmt;
use std::path::Path;

/// One invalid class or method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub class: String,
    pub method: Option<String>,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{}::{}: {}", self.class, method, self.message),
            None => write!(f, "{}: {}", self.class, self.message),
        }
    }
}

/// Collect every problem in the library instead of stopping at the first
pub fn check_library(library: &Library) -> Vec<Problem> {
    let index = ClassIndex::new(library);
    let mut problems = Vec::new();

    for class in &library.classes {
        for base in class.non_primary_bases() {
            if index.get(base).is_none() {
                problems.push(Problem {
                    class: class.name.clone(),
                    method: None,
                    message: format!("non-primary base '{}' is not described", base),
                });
            }
        }

        for method in &class.methods {
            if let Err(err) = method.validate() {
                problems.push(Problem {
                    class: class.name.clone(),
                    method: Some(method.name.clone()),
                    message: err.to_string(),
                });
            }
        }
    }

    problems
}

pub fn execute(file: &Path) -> anyhow::Result<()> {
    let config = LibraryConfig::from_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let library = config.to_library();
    let problems = check_library(&library);

    if problems.is_empty() {
        let methods: usize = library.classes.iter().map(|c| c.methods.len()).sum();
        println!(
            "{}: {} classes, {} methods, no problems",
            library.name,
            library.classes.len(),
            methods
        );
        return Ok(());
    }

    for problem in &problems {
        eprintln!("error: {}", problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), file.display())
}
