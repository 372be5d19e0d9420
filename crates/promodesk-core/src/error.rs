use thiserror::Error;

use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read fixtures file {path}: {source}")]
    FixturesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixtures file: {0}")]
    FixturesFileParse(#[source] serde_yaml::Error),

    #[error("fixtures validation failed: {0}")]
    Validation(String),

    #[error("invalid record in fixtures ({kind} {id}): {errors}")]
    InvalidFixture {
        kind: &'static str,
        id: String,
        errors: FieldErrors,
    },
}
