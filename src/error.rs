use crate::AddressKind;

/// All possible errors thrown by `ipanon` functions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not a valid IPv4, IPv6, or IPv4-embedded IPv6 address literal ({length} bytes)")]
    InvalidAddress { length: usize },
    #[error("A {width}-bit string cannot be decoded as {kind:?}")]
    KindMismatch { kind: AddressKind, width: u32 },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Builds an [`Error::InvalidAddress`] without retaining the rejected text
    pub(crate) fn invalid_address(input: &str) -> Self {
        Self::InvalidAddress {
            length: input.len(),
        }
    }
}

/// Result type for `ipanon`
pub type Result<T> = std::result::Result<T, Error>;
