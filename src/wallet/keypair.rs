use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use super::ExtensionWallet;
use crate::{rpc::RpcGateway, transaction::WalletTransaction};

/// Extension backend backed by a local keypair, for headless signing
pub struct KeypairWallet {
    keypair: Keypair,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            connected: AtomicBool::new(false),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl ExtensionWallet for KeypairWallet {
    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.connected().then(|| self.keypair.pubkey())
    }

    fn is_selected(&self) -> bool {
        true
    }

    fn supports_send(&self) -> bool {
        true
    }

    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn send_transaction(
        &self,
        mut transaction: WalletTransaction,
        rpc: &dyn RpcGateway,
    ) -> Result<Signature> {
        if !self.connected() {
            anyhow::bail!("Keypair wallet is not connected");
        }
        transaction.partial_sign(&self.keypair)?;
        rpc.send_transaction(&transaction).await
    }
}
