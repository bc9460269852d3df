// Legacy and versioned transactions behind one type, with an adapter per signing backend

use anyhow::{Context, Result, bail};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Signature, Signer},
    transaction::{Transaction, VersionedTransaction},
};

use crate::rpc::BlockInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletTransaction {
    Legacy(Transaction),
    Versioned(VersionedTransaction),
}

impl From<Transaction> for WalletTransaction {
    fn from(tx: Transaction) -> Self {
        Self::Legacy(tx)
    }
}

impl From<VersionedTransaction> for WalletTransaction {
    fn from(tx: VersionedTransaction) -> Self {
        Self::Versioned(tx)
    }
}

/// Wire-serialized transaction handed to the social-login backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialTransaction {
    pub bytes: Vec<u8>,
    pub versioned: bool,
}

impl SocialTransaction {
    pub fn decode(&self) -> Result<WalletTransaction> {
        let tx = if self.versioned {
            WalletTransaction::Versioned(
                bincode::deserialize(&self.bytes).context("Invalid versioned transaction bytes")?,
            )
        } else {
            WalletTransaction::Legacy(
                bincode::deserialize(&self.bytes).context("Invalid legacy transaction bytes")?,
            )
        };
        Ok(tx)
    }
}

impl WalletTransaction {
    pub fn fee_payer(&self) -> Option<Pubkey> {
        match self {
            Self::Legacy(tx) => tx.message.account_keys.first().copied(),
            Self::Versioned(tx) => tx.message.static_account_keys().first().copied(),
        }
    }

    pub fn recent_blockhash(&self) -> Hash {
        match self {
            Self::Legacy(tx) => tx.message.recent_blockhash,
            Self::Versioned(tx) => *tx.message.recent_blockhash(),
        }
    }

    pub fn signatures(&self) -> &[Signature] {
        match self {
            Self::Legacy(tx) => &tx.signatures,
            Self::Versioned(tx) => &tx.signatures,
        }
    }

    /// Prepare a built transaction for signing.
    ///
    /// Legacy transactions always take the fresh blockhash; versioned ones only
    /// when they were compiled without one. Existing signatures are cleared
    /// whenever the blockhash changes since they no longer cover the message.
    pub fn ensure_fields(&mut self, block: &BlockInfo, fee_payer: &Pubkey) -> Result<()> {
        match self.fee_payer() {
            None => bail!("Transaction has no fee payer"),
            Some(payer) if payer != *fee_payer => {
                bail!("Transaction fee payer {} does not match wallet {}", payer, fee_payer)
            }
            Some(_) => {}
        }

        match self {
            Self::Legacy(tx) => {
                if tx.message.recent_blockhash != block.blockhash {
                    tx.message.recent_blockhash = block.blockhash;
                    reset_signatures(&mut tx.signatures, tx.message.header.num_required_signatures);
                }
            }
            Self::Versioned(tx) => {
                if *tx.message.recent_blockhash() == Hash::default() {
                    tx.message.set_recent_blockhash(block.blockhash);
                    let required = tx.message.header().num_required_signatures;
                    reset_signatures(&mut tx.signatures, required);
                }
            }
        }

        Ok(())
    }

    /// Add one signer's signature, keeping the signatures already present
    pub fn partial_sign(&mut self, signer: &dyn Signer) -> Result<()> {
        match self {
            Self::Legacy(tx) => {
                let required = tx.message.header.num_required_signatures as usize;
                if tx.signatures.len() < required {
                    tx.signatures.resize(required, Signature::default());
                }
                let blockhash = tx.message.recent_blockhash;
                tx.try_partial_sign(&[signer], blockhash)
                    .context("Failed to sign legacy transaction")?;
            }
            Self::Versioned(tx) => {
                let required = tx.message.header().num_required_signatures as usize;
                let signer_key = signer.pubkey();
                let index = tx
                    .message
                    .static_account_keys()
                    .iter()
                    .take(required)
                    .position(|key| *key == signer_key)
                    .with_context(|| format!("{} is not a required signer", signer_key))?;

                if tx.signatures.len() < required {
                    tx.signatures.resize(required, Signature::default());
                }

                tx.signatures[index] = signer
                    .try_sign_message(&tx.message.serialize())
                    .context("Failed to sign versioned transaction")?;
            }
        }
        Ok(())
    }

    /// Adapter for the extension backend, which accepts both forms natively
    pub fn into_extension(self) -> WalletTransaction {
        self
    }

    /// Adapter for the social-login backend, which takes serialized bytes
    pub fn into_social(self) -> Result<SocialTransaction> {
        let (bytes, versioned) = match &self {
            Self::Legacy(tx) => (bincode::serialize(tx), false),
            Self::Versioned(tx) => (bincode::serialize(tx), true),
        };
        Ok(SocialTransaction {
            bytes: bytes.context("Failed to serialize transaction")?,
            versioned,
        })
    }
}

fn reset_signatures(signatures: &mut Vec<Signature>, required: u8) {
    signatures.clear();
    signatures.resize(required as usize, Signature::default());
}
