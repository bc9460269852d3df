//! # DLMM Position SDK
//!
//! A standalone SDK for managing liquidity positions on Solana DLMM pools from a client. It glues
//! three pieces together:
//!
//! 1. **Unified wallet**: one session and one `sign_and_send_transaction` call over an
//!    extension-style wallet and a social-login wallet
//! 2. **Confirmation polling**: fixed-interval signature status polling with a bounded attempt budget
//! 3. **Position discovery**: a cached, retried lookup of every position an address owns
//!
//! Bin math and transaction construction stay in the DLMM SDK, reached through the
//! [`PositionSource`] and [`PoolProvider`] traits. Network access goes through [`RpcGateway`],
//! which is implemented for the nonblocking `RpcClient`.
//!
//! ## 🚀 Quick Start
//!
//! ### Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dlmm-position-sdk = "0.1.0"
//! ```
//!
//! ### Basic Setup
//!
//! ```rust,ignore
//! use dlmm_position_sdk::{DlmmSdk, KeypairWallet, SdkConfig};
//! use std::sync::Arc;
//!
//! // Endpoints come from SOLANA_RPC_URL / CUSTOM_RPC_URL / HEAVY_RPC_URL
//! let config = SdkConfig::from_env()?;
//!
//! let extension = Arc::new(KeypairWallet::new(user_keypair));
//! let mut sdk = DlmmSdk::new(config, extension, social_wallet, dlmm_positions, dlmm_pools)?;
//!
//! sdk.wallet().connect().await?;
//! ```
//!
//! ## ⚠️ Important: Wallet Precedence
//!
//! When both wallets report a connection the **extension wallet wins**. The session is never
//! cached: every call re-derives it from both backends, so signing always goes through the
//! wallet that is active at call time.
//!
//! ## 📖 Usage Patterns
//!
//! ### Listing Positions
//!
//! ```rust,ignore
//! let owner = sdk.wallet().public_key().unwrap();
//!
//! // Never fails: permission and connectivity errors are not retried, other errors are
//! // retried twice (1s, 2s), and a final failure yields an empty map
//! let positions = sdk.positions(&owner).await;
//!
//! // The reason behind an empty fallback, if any
//! if let Some(err) = sdk.discovery().last_error() {
//!     let notice = Notification::from_discovery(err);
//! }
//! ```
//!
//! ### Closing a Position
//!
//! ```rust,ignore
//! match sdk.close_position(&pair, &position).await {
//!     Ok(confirmed) => Notification::success(PositionAction::ClosePosition, sdk.wallet().source(), None),
//!     Err(e) => Notification::from_error(PositionAction::ClosePosition, &e, sdk.wallet().source()),
//! };
//! ```
//!
//! ### Opening a One-Sided Position
//!
//! ```rust,ignore
//! // 69 bins on the SOL side of the active bin, BidAsk strategy
//! let opened = sdk.add_one_sided_position(&pair, "0.5").await?;
//! println!("Position {} spans {}..={}", opened.position, opened.min_bin_id, opened.max_bin_id);
//! ```
//!
//! ### Signing Manually
//!
//! ```rust,ignore
//! let signature = sdk.wallet().sign_and_send_transaction(tx.into(), None).await?;
//! let confirmed = sdk.confirm(&signature).await?; // 30 attempts, 2s apart
//! ```
//!
//! ## 🌐 Network Configuration
//!
//! - **`SOLANA_RPC_URL`**: used for sending and confirming transactions, and preferred for discovery
//! - **`CUSTOM_RPC_URL`**, **`HEAVY_RPC_URL`**: discovery fallbacks for providers that allow
//!   `getProgramAccounts`
//! - Default: `https://api.mainnet-beta.solana.com`
//!
//! ## 📄 License
//!
//! MIT License - see LICENSE file for details.

mod address;
mod config;
mod confirmation;
mod constants;
mod discovery;
mod error;
mod notify;
mod planning;
mod position;
mod rpc;
mod sdk;
mod transaction;
mod utils;
mod wallet;

pub use sdk::{DlmmSdk, OpenedPosition};

pub use address::resolve_account_address;
pub use config::{ConfirmationConfig, DiscoveryConfig, SdkConfig};
pub use confirmation::{ConfirmedTransaction, PendingTransaction, confirm_transaction};
pub use discovery::PositionDiscovery;
pub use error::{DiscoveryError, DiscoveryErrorKind, SdkError, SdkResult};
pub use notify::{NoticeLevel, Notification, PositionAction};
pub use planning::{
    BinRange, OneSidedPlan, SolSide, StrategyType, one_sided_range, parse_sol_amount,
    percentage_of_balance, plan_one_sided, validate_min_amount,
};
pub use position::{
    ActiveBin, AddLiquidityByStrategyParams, ClaimFeeParams, LiquidityPool, PairPositions,
    PoolProvider, Position, PositionMap, PositionSource, RemoveLiquidityParams,
};
pub use rpc::{BlockInfo, ConfirmationLevel, RpcGateway, SignatureStatus};
pub use transaction::{SocialTransaction, WalletTransaction};
pub use utils::{abbreviate_signature, explorer_tx_url};
pub use wallet::{
    EnhancedWallet, ExtensionView, ExtensionWallet, KeypairWallet, SocialView, SocialWallet,
    WalletSession, WalletSource,
};

pub use constants::{
    DEFAULT_RPC_URL, FULL_REMOVAL_BPS, MIN_POSITION_LAMPORTS, ONE_SIDED_BIN_COUNT, WSOL_MINT,
};
