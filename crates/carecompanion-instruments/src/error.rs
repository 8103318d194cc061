use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("screener config not found: {0}")]
    ConfigNotFound(String),

    #[error("failed to parse screener config '{screener_id}': {message}")]
    ConfigParse { screener_id: String, message: String },

    #[error("invalid screener config '{screener_id}': {reason}")]
    InvalidConfig { screener_id: String, reason: String },

    #[error("failed to read screener config '{screener_id}': {source}")]
    ConfigRead {
        screener_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("incomplete response for '{screener_id}': unanswered items {}", .missing.join(", "))]
    IncompleteResponse {
        screener_id: String,
        missing: Vec<String>,
    },

    #[error("unknown option '{option_id}' selected for item '{item_id}'")]
    UnknownOption { item_id: String, option_id: String },
}

impl InstrumentError {
    /// True for errors caused by the definition rather than by the responses.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            InstrumentError::ConfigNotFound(_)
                | InstrumentError::ConfigParse { .. }
                | InstrumentError::InvalidConfig { .. }
                | InstrumentError::ConfigRead { .. }
        )
    }
}
