use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing incoming JSON context {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error parsing incoming YAML context {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("I/O error when reading {0}")]
    IoError(#[from] std::io::Error),
    #[error("Required property `{0}` is missing or empty in the metadata")]
    MissingProperty(String),
    #[error("Could not derive a resource name from ARN `{0}`")]
    InvalidArn(String),
    #[error("The path `{0}` does not exist")]
    FileNotFoundError(String),
    #[error("{0}")]
    IllegalArguments(String),
}

pub type Result<T> = std::result::Result<T, Error>;
