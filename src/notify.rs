use solana_sdk::signature::Signature;

use crate::{
    error::{DiscoveryError, DiscoveryErrorKind, SdkError},
    utils::{abbreviate_signature, explorer_tx_url, message_contains_any},
    wallet::WalletSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionAction {
    ClosePosition,
    ClaimFees,
    AddPosition,
}

impl PositionAction {
    fn success_title(&self) -> &'static str {
        match self {
            Self::ClosePosition => "Position Closed Successfully!",
            Self::ClaimFees => "Fees Claimed Successfully!",
            Self::AddPosition => "LP Position Created Successfully!",
        }
    }

    fn failure_title(&self) -> &'static str {
        match self {
            Self::ClosePosition => "Failed to close position",
            Self::ClaimFees => "Failed to claim fees",
            Self::AddPosition => "Failed to create LP position",
        }
    }
}

/// User-facing message produced at the action boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

impl Notification {
    fn new(level: NoticeLevel, title: &str, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            description: description.into(),
            link: None,
        }
    }

    pub fn success(action: PositionAction, source: WalletSource, signature: Option<&Signature>) -> Self {
        let detail = match (action, signature) {
            (PositionAction::AddPosition, Some(signature)) => abbreviate_signature(signature),
            (PositionAction::ClosePosition, _) => "Your funds have been withdrawn".to_string(),
            (PositionAction::ClaimFees, _) => "Your fees have been claimed".to_string(),
            (PositionAction::AddPosition, None) => "Your position is live".to_string(),
        };

        let mut notification = Self::new(
            NoticeLevel::Success,
            action.success_title(),
            format!("{} • {}", source.label(), detail),
        );
        notification.link = signature.map(explorer_tx_url);
        notification
    }

    pub fn from_error(action: PositionAction, err: &SdkError, source: WalletSource) -> Self {
        let message = err.to_string();

        match err {
            SdkError::NotConnected => {
                return Self::new(
                    NoticeLevel::Error,
                    "Please connect your wallet",
                    "Connect either a traditional Solana wallet or use social login",
                );
            }
            SdkError::NoFeesToClaim => {
                return Self::new(
                    NoticeLevel::Error,
                    "No fees to claim",
                    "You don't have any unclaimed fees for this position.",
                );
            }
            SdkError::InvalidAmount(reason) => {
                return Self::new(NoticeLevel::Error, "Invalid amount", reason.as_str());
            }
            SdkError::PoolUnavailable(_) => {
                return Self::new(
                    NoticeLevel::Error,
                    "Pool Connection Failed",
                    "Unable to connect to the liquidity pool. Please try refreshing.",
                );
            }
            SdkError::Discovery(e) => return Self::from_discovery(e),
            _ => {}
        }

        if source == WalletSource::Social
            && message_contains_any(&message, &["user rejected", "user denied"])
        {
            return Self::new(
                NoticeLevel::Warning,
                "Transaction Cancelled",
                "You cancelled the transaction in your social wallet.",
            );
        }

        if message_contains_any(&message, &["insufficient funds", "insufficient lamports"]) {
            return Self::new(
                NoticeLevel::Error,
                "Insufficient Funds",
                "You need more SOL to complete this transaction.",
            );
        }

        Self::new(NoticeLevel::Error, action.failure_title(), message)
    }

    pub fn from_discovery(err: &DiscoveryError) -> Self {
        let title = match err.kind {
            DiscoveryErrorKind::Forbidden => "RPC blocked position discovery",
            DiscoveryErrorKind::Timeout => "Position discovery timed out",
            DiscoveryErrorKind::Connectivity => "Could not reach the RPC endpoint",
            DiscoveryErrorKind::Generic => "Could not load positions",
        };
        Self::new(NoticeLevel::Warning, title, err.kind.guidance().join(". "))
    }
}
