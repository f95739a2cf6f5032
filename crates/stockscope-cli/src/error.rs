use stockscope_core::GatewayErrorKind;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockscope_core::ValidationError),

    #[error("unknown preference '{0}', expected language, theme, or chartPeriod")]
    UnknownPreference(String),

    #[error(transparent)]
    Preferences(#[from] stockscope_core::PreferenceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::UnknownPreference(_) => 2,
            Self::Preferences(_) => 6,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

/// Exit code for a gateway failure reported in the command output.
pub const fn gateway_exit_code(kind: GatewayErrorKind) -> u8 {
    match kind {
        GatewayErrorKind::Invalid => 2,
        GatewayErrorKind::NotFound | GatewayErrorKind::ProviderRejected => 3,
        GatewayErrorKind::RateLimited => 5,
        GatewayErrorKind::UpstreamUnavailable | GatewayErrorKind::Malformed => 7,
    }
}
