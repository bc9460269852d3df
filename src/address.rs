use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::wallet::WalletSession;

/// Resolve which account to show: an explicit address parameter if it parses,
/// otherwise the active session's address.
pub fn resolve_account_address(param: Option<&str>, session: &WalletSession) -> Option<Pubkey> {
    if let Some(raw) = param.map(str::trim).filter(|raw| !raw.is_empty()) {
        match Pubkey::from_str(raw) {
            Ok(address) => return Some(address),
            Err(e) => log::info!("Invalid public key in params: {} ({})", raw, e),
        }
    }

    if session.is_active() {
        session.address
    } else {
        None
    }
}
