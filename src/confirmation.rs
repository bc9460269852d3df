use solana_sdk::signature::Signature;
use tokio::time::{Instant, sleep};

use crate::{
    config::ConfirmationConfig,
    error::{SdkError, SdkResult},
    rpc::{ConfirmationLevel, RpcGateway},
};

/// A submitted transaction awaiting a terminal status
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    pub signature: Signature,
    pub submitted_at: Instant,
    pub attempts: u32,
}

impl PendingTransaction {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            submitted_at: Instant::now(),
            attempts: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    pub signature: Signature,
    /// Number of status queries it took
    pub attempts: u32,
    pub level: ConfirmationLevel,
}

/// Poll `signature` at a fixed interval until it is confirmed, fails on chain,
/// or `config.max_attempts` queries have been spent.
///
/// Errors from the status query itself count as an attempt and polling
/// continues. Dropping the returned future stops polling.
pub async fn confirm_transaction(
    rpc: &dyn RpcGateway,
    signature: &Signature,
    config: &ConfirmationConfig,
) -> SdkResult<ConfirmedTransaction> {
    let mut pending = PendingTransaction::new(*signature);

    while pending.attempts < config.max_attempts {
        pending.attempts += 1;

        match rpc.get_signature_status(&pending.signature).await {
            Ok(Some(status)) => {
                log::debug!(
                    "Attempt {}: {} status {:?}",
                    pending.attempts,
                    pending.signature,
                    status
                );

                if let Some(err) = status.err {
                    log::warn!("Transaction {} failed: {}", pending.signature, err);
                    return Err(SdkError::TransactionFailed(err));
                }

                if let Some(level) = status.confirmation.filter(|_| status.is_confirmed()) {
                    log::info!(
                        "Transaction {} {:?} after {} attempts ({:?})",
                        pending.signature,
                        level,
                        pending.attempts,
                        pending.submitted_at.elapsed()
                    );
                    return Ok(ConfirmedTransaction {
                        signature: pending.signature,
                        attempts: pending.attempts,
                        level,
                    });
                }
            }
            Ok(None) => {
                log::debug!("Attempt {}: {} not found yet", pending.attempts, pending.signature);
            }
            Err(e) => {
                log::warn!(
                    "Confirmation attempt {} for {} failed: {:#}",
                    pending.attempts,
                    pending.signature,
                    e
                );
            }
        }

        if pending.attempts < config.max_attempts {
            sleep(config.interval).await;
        }
    }

    log::warn!(
        "Transaction {} not confirmed after {} attempts",
        pending.signature,
        pending.attempts
    );
    Err(SdkError::ConfirmationTimeout {
        attempts: pending.attempts,
    })
}
