use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey, pubkey::Pubkey};

pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const EXPLORER_TX_URL: &str = "https://explorer.solana.com/tx";

// ENV
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";
pub const CUSTOM_RPC_URL_ENV: &str = "CUSTOM_RPC_URL";
pub const HEAVY_RPC_URL_ENV: &str = "HEAVY_RPC_URL";

// Confirmation polling
pub const CONFIRMATION_MAX_ATTEMPTS: u32 = 30;
pub const CONFIRMATION_INTERVAL_MS: u64 = 2_000;

// Position discovery
pub const DISCOVERY_MAX_RETRIES: u32 = 2;
pub const DISCOVERY_RETRY_BASE_DELAY_MS: u64 = 1_000;
pub const DISCOVERY_RETRY_MAX_DELAY_MS: u64 = 30_000;
pub const DISCOVERY_STALE_TIME_SECS: u64 = 5 * 60;

// Position actions
pub const FULL_REMOVAL_BPS: u16 = 10_000;
pub const ONE_SIDED_BIN_COUNT: i32 = 69;
pub const MIN_POSITION_LAMPORTS: u64 = LAMPORTS_PER_SOL / 50; // 0.02 SOL
pub const FEE_RESERVE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100; // 0.01 SOL
