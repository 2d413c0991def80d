use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A failure reported by the upstream model provider. `status` is the
    /// provider's HTTP status when one was received.
    #[error("Upstream error: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// HTTP status reported by the provider, if this error carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// The bare failure text, without the variant prefix added by `Display`.
    pub fn raw_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            Self::Transport(m) | Self::InvalidInput(m) => m.clone(),
        }
    }
}
