use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShioriError {
    #[error("an account with this email already exists")]
    DuplicateIdentity,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("unknown account")]
    UnknownAccount,

    #[error("invalid status label: {0:?}")]
    InvalidLabel(String),

    #[error("login required")]
    NotAuthenticated,

    #[error("catalog unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShioriError {
    /// Wrap any catalog gateway failure.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }

    /// Stable machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateIdentity => "duplicate_identity",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownAccount => "unknown_account",
            Self::InvalidLabel(_) => "invalid_label",
            Self::NotAuthenticated => "not_authenticated",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}
