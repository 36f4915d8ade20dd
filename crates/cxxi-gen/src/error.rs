//! Generation errors

use cxxi_model::DescriptorError;
use thiserror::Error;

pub type GenResult<T> = Result<T, GenerateError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Invalid method descriptor: {0}")]
    InvalidMethodDescriptor(#[from] DescriptorError),

    #[error("Missing base class context for '{target}'{}", describe_base(.base))]
    MissingBaseContext {
        target: String,
        base: Option<String>,
    },
}

fn describe_base(base: &Option<String>) -> String {
    match base {
        Some(name) => format!(": base class '{}' is not known", name),
        None => String::new(),
    }
}
