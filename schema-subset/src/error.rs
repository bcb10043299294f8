use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubsetError {
    #[error("io error: `{0}`")]
    IoError(#[from] std::io::Error),

    #[error("Error reading schema dump '{path}': `{source}`")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing output file '{path}': `{source}`")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T = ()> = std::result::Result<T, SubsetError>;
