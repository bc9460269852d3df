use solana_sdk::signature::Signature;

use crate::constants::EXPLORER_TX_URL;

/// `5VERv8NM...pGx4aVzJ` style short form used in notifications
pub fn abbreviate_signature(signature: &Signature) -> String {
    let text = signature.to_string();
    if text.len() <= 16 {
        return text;
    }
    format!("{}...{}", &text[..8], &text[text.len() - 8..])
}

pub fn explorer_tx_url(signature: &Signature) -> String {
    format!("{}/{}", EXPLORER_TX_URL, signature)
}

/// Case-insensitive check for any of `needles` in an error message
pub(crate) fn message_contains_any(message: &str, needles: &[&str]) -> bool {
    let message = message.to_lowercase();
    needles
        .iter()
        .any(|needle| message.contains(&needle.to_lowercase()))
}
