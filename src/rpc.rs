use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    signature::Signature,
    transaction::TransactionError,
};

use crate::transaction::WalletTransaction;

/// Recent blockhash and the last block height at which it is still valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfirmationLevel {
    Processed,
    Confirmed,
    Finalized,
}

/// Network view of a submitted signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    pub confirmation: Option<ConfirmationLevel>,
    pub err: Option<TransactionError>,
}

impl SignatureStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.confirmation,
            Some(ConfirmationLevel::Confirmed | ConfirmationLevel::Finalized)
        )
    }
}

/// The network calls this crate makes against a Solana cluster
#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Endpoint url, used to scope cached query results
    fn endpoint(&self) -> String;

    /// Cheap round-trip used as a health check
    async fn get_version(&self) -> Result<String>;

    async fn get_latest_blockhash(&self) -> Result<BlockInfo>;

    async fn send_transaction(&self, transaction: &WalletTransaction) -> Result<Signature>;

    /// Status of a signature, searching transaction history. `None` when the
    /// cluster has not seen it yet
    async fn get_signature_status(&self, signature: &Signature) -> Result<Option<SignatureStatus>>;
}

#[async_trait]
impl RpcGateway for RpcClient {
    fn endpoint(&self) -> String {
        self.url()
    }

    async fn get_version(&self) -> Result<String> {
        let version = RpcClient::get_version(self)
            .await
            .context("Failed to get RPC version")?;
        Ok(version.solana_core)
    }

    async fn get_latest_blockhash(&self) -> Result<BlockInfo> {
        let (blockhash, last_valid_block_height) = self
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await
            .context("Failed to get latest blockhash")?;

        Ok(BlockInfo {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn send_transaction(&self, transaction: &WalletTransaction) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(self.commitment().commitment),
            ..RpcSendTransactionConfig::default()
        };

        let signature = match transaction {
            WalletTransaction::Legacy(tx) => {
                self.send_transaction_with_config(tx, config).await
            }
            WalletTransaction::Versioned(tx) => {
                self.send_transaction_with_config(tx, config).await
            }
        }
        .context("Failed to send transaction")?;

        Ok(signature)
    }

    async fn get_signature_status(&self, signature: &Signature) -> Result<Option<SignatureStatus>> {
        let statuses = self
            .get_signature_statuses_with_history(&[*signature])
            .await
            .context("Failed to get signature status")?
            .value;

        let Some(status) = statuses.into_iter().next().flatten() else {
            return Ok(None);
        };

        let confirmation = if status.satisfies_commitment(CommitmentConfig::finalized()) {
            ConfirmationLevel::Finalized
        } else if status.satisfies_commitment(CommitmentConfig::confirmed()) {
            ConfirmationLevel::Confirmed
        } else {
            ConfirmationLevel::Processed
        };

        Ok(Some(SignatureStatus {
            confirmation: Some(confirmation),
            err: status.err,
        }))
    }
}
