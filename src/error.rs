use solana_sdk::transaction::TransactionError;
use thiserror::Error;

/// Errors surfaced by wallet, confirmation and position operations
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("No suitable wallet for transactions")]
    NoTransactSource,

    #[error("Transaction failed: {0}")]
    TransactionFailed(TransactionError),

    #[error("Transaction confirmation timeout after {attempts} attempts")]
    ConfirmationTimeout { attempts: u32 },

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("No fees to claim")]
    NoFeesToClaim,

    #[error("This pair does not contain SOL")]
    NotSolPair,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Failed to initialize DLMM pool: {0:#}")]
    PoolUnavailable(anyhow::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Classification of a failed position discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryErrorKind {
    /// RPC provider refuses heavy calls (HTTP 403)
    Forbidden,
    Timeout,
    /// Endpoint unreachable or misconfigured
    Connectivity,
    Generic,
}

impl DiscoveryErrorKind {
    /// Classify a raw error message the way RPC providers report them
    pub fn classify(message: &str) -> Self {
        if message.contains("403") || message.contains("forbidden") {
            Self::Forbidden
        } else if message.contains("timeout") {
            Self::Timeout
        } else if message.contains("connection") {
            Self::Connectivity
        } else {
            Self::Generic
        }
    }

    /// Permission and connectivity failures will not resolve by retrying
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Forbidden | Self::Connectivity)
    }

    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            Self::Forbidden => &[
                "Your RPC is blocking heavy operations (getProgramAccounts)",
                "Set SOLANA_RPC_URL to a dedicated endpoint",
                "Use a paid RPC provider like Alchemy, QuickNode, or Helius",
            ],
            Self::Timeout => &[
                "Position discovery took longer than expected",
                "Try again in a few minutes",
                "Consider using a faster RPC provider",
            ],
            Self::Connectivity => &[
                "Check your internet connection",
                "Verify your RPC URL is correct",
                "Try switching to a different RPC endpoint",
            ],
            Self::Generic => &["This might be a temporary issue", "Try again shortly"],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("LP position discovery failed ({kind:?}): {message}")]
pub struct DiscoveryError {
    pub kind: DiscoveryErrorKind,
    pub message: String,
}

impl DiscoveryError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: DiscoveryErrorKind::classify(&message),
            message,
        }
    }
}

impl From<anyhow::Error> for DiscoveryError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{err:#}"))
    }
}
