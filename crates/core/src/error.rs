use patchgate_plugin::{BoxError, PluginError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchgateError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Plugin(#[from] PluginError),
    #[error("validation engine failed: {0}")]
    Engine(BoxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PatchgateError>;
