use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WalletSource {
    #[default]
    None,
    Extension,
    Social,
}

impl WalletSource {
    /// Label shown to users next to action results
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No Wallet",
            Self::Extension => "Traditional Wallet",
            Self::Social => "Social Login",
        }
    }
}

/// Snapshot of the extension wallet's reactive state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionView {
    pub connected: bool,
    pub public_key: Option<Pubkey>,
}

/// Snapshot of the social-login wallet's reactive state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialView {
    pub connected: bool,
    pub accounts: Vec<String>,
}

/// The single active wallet session, derived from both sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub connected: bool,
    pub source: WalletSource,
    pub address: Option<Pubkey>,
}

impl WalletSession {
    pub fn none() -> Self {
        Self::default()
    }

    /// Extension first, then social, then no session.
    ///
    /// A social account that does not parse as a public key does not count as
    /// connected.
    pub fn resolve(extension: &ExtensionView, social: &SocialView) -> Self {
        if extension.connected
            && let Some(public_key) = extension.public_key
        {
            return Self {
                connected: true,
                source: WalletSource::Extension,
                address: Some(public_key),
            };
        }

        if social.connected
            && let Some(account) = social.accounts.first()
        {
            match Pubkey::from_str(account) {
                Ok(public_key) => {
                    return Self {
                        connected: true,
                        source: WalletSource::Social,
                        address: Some(public_key),
                    };
                }
                Err(e) => log::warn!("Invalid social-login address {}: {}", account, e),
            }
        }

        Self::none()
    }

    pub fn is_active(&self) -> bool {
        self.connected && self.address.is_some()
    }
}
