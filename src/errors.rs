use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a dataset document. All of these are
/// terminal for the attempt that triggered the load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse dataset JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Dataset is empty or not an array of records")]
    EmptyDataset,
}

/// Non-fatal analysis outcomes. Callers surface these as status messages
/// rather than aborting.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No rows found for city '{city}'")]
    CityNotFound { city: String },
    #[error("Missing data for {}", .cities.join(", "))]
    MissingCities { cities: Vec<String> },
}
