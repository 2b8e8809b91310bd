//! Error types for catalog lookups.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown pipe material: {key}")]
    UnknownMaterial { key: String },

    #[error("Unknown fixture type: {key}")]
    UnknownFixture { key: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::UnknownMaterial { key: "lead".into() };
        assert!(err.to_string().contains("lead"));
    }
}
