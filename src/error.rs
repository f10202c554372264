use thiserror::Error;

/// Startup errors for smartnotes
///
/// Everything here is raised before the terminal is taken over, so `main`
/// can report it plainly and exit.
#[derive(Debug, Error)]
pub enum NotesError {
    #[error(
        "No API key configured.\n\nSet OPENAI_API_KEY or add `api_key` under [ai] in {0}"
    )]
    MissingApiKey(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NotesError {
    fn from(err: toml::de::Error) -> Self {
        NotesError::Config(err.message().to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
