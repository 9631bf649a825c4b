use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Could not read file [{path}]: {source}")]
    Io {
        path: String,
        source: std::io::Error
    },
    #[error("Could not decode file [{path}] with any supported encoding")]
    Undecodable {
        path: String
    },
    #[error("File [{path}] contains no lines")]
    Empty {
        path: String
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Could not write file [{path}]: {source}")]
    Io {
        path: String,
        source: std::io::Error
    },
    #[error("Could not write table [{path}]: {source}")]
    Csv {
        path: String,
        source: csv::Error
    }
}
