//! Unified wallet: one session and one signing call over an extension-style
//! wallet and a social-login wallet.

mod keypair;
mod session;

pub use keypair::KeypairWallet;
pub use session::{ExtensionView, SocialView, WalletSession, WalletSource};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    error::{SdkError, SdkResult},
    rpc::RpcGateway,
    transaction::{SocialTransaction, WalletTransaction},
};

/// Browser-extension style wallet adapter
#[async_trait]
pub trait ExtensionWallet: Send + Sync {
    fn connected(&self) -> bool;

    fn public_key(&self) -> Option<Pubkey>;

    /// Whether a concrete wallet has been chosen to connect with
    fn is_selected(&self) -> bool;

    /// Whether the adapter exposes a send primitive
    fn supports_send(&self) -> bool;

    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;

    /// Sign with the wallet and submit through `rpc`
    async fn send_transaction(
        &self,
        transaction: WalletTransaction,
        rpc: &dyn RpcGateway,
    ) -> Result<Signature>;
}

/// Custodial social-login wallet with its own managed connection
#[async_trait]
pub trait SocialWallet: Send + Sync {
    fn connected(&self) -> bool;

    /// Account addresses as base58 strings
    fn accounts(&self) -> Vec<String>;

    /// Whether the managed network connection has been initialized
    fn has_connection(&self) -> bool;

    fn supports_sign_and_send(&self) -> bool;

    fn user_info(&self) -> Option<Map<String, Value>> {
        None
    }

    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;

    async fn sign_and_send_transaction(&self, transaction: SocialTransaction) -> Result<Signature>;
}

pub struct EnhancedWallet {
    extension: Arc<dyn ExtensionWallet>,
    social: Arc<dyn SocialWallet>,
    default_rpc: Arc<dyn RpcGateway>,
}

impl EnhancedWallet {
    /// `default_rpc` is used by the extension path when no connection is passed
    pub fn new(
        extension: Arc<dyn ExtensionWallet>,
        social: Arc<dyn SocialWallet>,
        default_rpc: Arc<dyn RpcGateway>,
    ) -> Self {
        Self {
            extension,
            social,
            default_rpc,
        }
    }

    /// Recomputed from both sources on every call
    pub fn session(&self) -> WalletSession {
        let extension = ExtensionView {
            connected: self.extension.connected(),
            public_key: self.extension.public_key(),
        };
        let social = SocialView {
            connected: self.social.connected(),
            accounts: self.social.accounts(),
        };
        WalletSession::resolve(&extension, &social)
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_active()
    }

    pub fn public_key(&self) -> Option<Pubkey> {
        self.session().address
    }

    pub fn source(&self) -> WalletSource {
        self.session().source
    }

    pub fn user_info(&self) -> Option<Map<String, Value>> {
        self.social.user_info()
    }

    pub fn can_transact(&self) -> bool {
        let session = self.session();
        if !session.is_active() {
            return false;
        }

        match session.source {
            WalletSource::Extension => self.extension.supports_send(),
            WalletSource::Social => {
                self.social.supports_sign_and_send() && self.social.has_connection()
            }
            WalletSource::None => false,
        }
    }

    pub async fn connect(&self) -> SdkResult<()> {
        if self.extension.is_selected() {
            log::info!("Connecting extension wallet");
            self.extension.connect().await?;
        } else {
            log::info!("Starting social login");
            self.social.connect().await?;
        }
        Ok(())
    }

    pub async fn disconnect(&self) -> SdkResult<()> {
        match self.session().source {
            WalletSource::Extension => self.extension.disconnect().await?,
            WalletSource::Social => self.social.disconnect().await?,
            WalletSource::None => log::debug!("Disconnect requested with no active session"),
        }
        Ok(())
    }

    /// Sign and submit through whichever source is active right now
    pub async fn sign_and_send_transaction(
        &self,
        transaction: WalletTransaction,
        connection: Option<&dyn RpcGateway>,
    ) -> SdkResult<Signature> {
        let session = self.session();
        if !session.is_active() {
            return Err(SdkError::NotConnected);
        }

        match session.source {
            WalletSource::Extension => {
                if !self.extension.supports_send() {
                    return Err(SdkError::NoTransactSource);
                }
                let rpc = connection.unwrap_or(self.default_rpc.as_ref());
                let signature = self
                    .extension
                    .send_transaction(transaction.into_extension(), rpc)
                    .await?;
                log::info!("Extension wallet sent {}", signature);
                Ok(signature)
            }
            WalletSource::Social => {
                if !self.social.supports_sign_and_send() || !self.social.has_connection() {
                    return Err(SdkError::NoTransactSource);
                }
                let signature = self
                    .social
                    .sign_and_send_transaction(transaction.into_social()?)
                    .await?;
                log::info!("Social wallet sent {}", signature);
                Ok(signature)
            }
            WalletSource::None => Err(SdkError::NoTransactSource),
        }
    }
}
