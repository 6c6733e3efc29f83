use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("Missing column {column:?} in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Could not parse selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    TimeFormat(#[from] time::error::Format),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AggregatorError::Selector {
            selector: "span..money".to_owned(),
            message: "unexpected token".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Could not parse selector \"span..money\": unexpected token"
        );

        let err = AggregatorError::MissingColumn {
            column: "genres".to_owned(),
            path: PathBuf::from("movies.csv"),
        };
        assert!(err.to_string().contains("\"genres\""));
    }
}
