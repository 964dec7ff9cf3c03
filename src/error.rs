use thiserror::Error;

/// Reasons a whole source file yields no records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("filename {0:?} does not match prefix_CATEGORY_NUMBER_YYYY-MM-DD")]
    Filename(String),

    #[error("content is not decodable as text")]
    Undecodable,

    #[error("failed to read file: {0}")]
    Unreadable(String),
}

/// Reasons a single company block is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("missing element {0}")]
    MissingElement(&'static str),

    #[error("empty field {0}")]
    EmptyField(&'static str),

    #[error("no date separator in {0:?}")]
    MissingSeparator(String),

    #[error("invalid {field} date {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

impl PageError {
    pub fn kind(&self) -> &'static str {
        match self {
            PageError::Filename(_) => "filename",
            PageError::Undecodable => "undecodable",
            PageError::Unreadable(_) => "unreadable",
        }
    }
}

impl FragmentError {
    /// Stable key used when counting skips in the run report.
    pub fn kind(&self) -> String {
        match self {
            FragmentError::MissingElement(what) => format!("missing_element:{}", what),
            FragmentError::EmptyField(what) => format!("empty_field:{}", what),
            FragmentError::MissingSeparator(_) => "missing_separator".to_string(),
            FragmentError::InvalidDate { field, .. } => format!("invalid_date:{}", field),
        }
    }
}
