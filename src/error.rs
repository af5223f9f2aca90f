// Error handling for resource-path

use std::fmt;

/// Error raised while expanding a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The template used a placeholder name that is reserved because it
    /// collides with object-prototype property names in the dictionary types
    /// client code commonly feeds into templates.
    InvalidParameterName(String),
}

impl ExpandError {
    /// Fixed identifying code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ExpandError::InvalidParameterName(_) => "badname",
        }
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::InvalidParameterName(name) => {
                write!(f, "badname: {} is not a valid parameter name", name)
            }
        }
    }
}

impl std::error::Error for ExpandError {}
