use thiserror::Error;

/// Errors surfaced by the archive API client.
///
/// Auth failures get their own variant because the sync client reacts
/// to them structurally (degrading the session to unauthenticated)
/// rather than just reporting them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token rejected or authentication required")]
    Unauthorized,

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message suitable for a user-facing notice. Transport details
    /// stay in the logs; the server's own error text is shown as-is.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "network error".to_string(),
            ApiError::Unauthorized => "session expired, please log in again".to_string(),
            ApiError::Server { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unauthorized_is_auth() {
        assert!(ApiError::Unauthorized.is_auth());
        let server = ApiError::Server {
            status: 500,
            message: "database unavailable".to_string(),
        };
        assert!(!server.is_auth());
    }

    #[test]
    fn test_user_message_passes_server_text_through() {
        let server = ApiError::Server {
            status: 400,
            message: "username already taken".to_string(),
        };
        assert_eq!(server.user_message(), "username already taken");
    }
}
