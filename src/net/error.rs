//! Load error classification
//!
//! A failed load cycle surfaces to the user as one of two states. The
//! distinction only depends on whether the HTTP transport ever reached the
//! host.

/// Observable classification of a failed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The host could not be reached (connect failure or timeout)
    NoNetwork,
    /// Anything else: bad status, malformed content, template errors
    Generic,
}

impl LoadErrorKind {
    /// Message shown when the initial download fails
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoNetwork => {
                "Could not download data. Check your network connection."
            }
            Self::Generic => "Could not download data. The content could not be loaded.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoNetwork => "NO_NETWORK",
            Self::Generic => "GENERIC",
        }
    }
}

/// Classify a load failure by walking its cause chain
pub fn classify(error: &anyhow::Error) -> LoadErrorKind {
    let unreachable = error.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_connect() || e.is_timeout())
    });

    if unreachable {
        LoadErrorKind::NoNetwork
    } else {
        LoadErrorKind::Generic
    }
}

/// Format a load error for display
pub fn format_load_error(error: &anyhow::Error) -> String {
    classify(error).user_message().to_string()
}
