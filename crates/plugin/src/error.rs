use crate::BoxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("patch generation plugin {name} could not be constructed: {source}")]
    Construction {
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("no patch generation plugin matching {criteria} is registered; this is perhaps a packaging issue")]
    NotFound { criteria: String },
    #[error("patch generation plugin {0} is already registered")]
    Duplicate(String),
}
