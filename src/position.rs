use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::{planning::StrategyType, transaction::WalletTransaction};

/// A user's liquidity across a bin range of one pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub address: Pubkey,
    pub pair_address: Pubkey,
    pub lower_bin_id: i32,
    pub upper_bin_id: i32,
    pub total_x_amount: u64,
    pub total_y_amount: u64,
    pub fee_x: u64,
    pub fee_y: u64,
}

/// All of a user's positions in one pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPositions {
    pub pair_address: Pubkey,
    pub token_x_mint: Pubkey,
    pub token_y_mint: Pubkey,
    pub positions: Vec<Position>,
}

/// Positions keyed by pair address
pub type PositionMap = BTreeMap<Pubkey, PairPositions>;

/// Active bin of a pool
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBin {
    pub bin_id: i32,
    pub price: String,
}

/// Remove liquidity parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidityParams {
    pub user: Pubkey,
    pub position: Pubkey,
    pub from_bin_id: i32,
    pub to_bin_id: i32,
    pub bps: u16, // 10_000 = 100%
    pub should_claim_and_close: bool,
}

/// Claim swap fee parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimFeeParams {
    pub owner: Pubkey,
    pub position: Pubkey,
}

/// Initialize position and add liquidity by strategy parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityByStrategyParams {
    pub position: Pubkey,
    pub user: Pubkey,
    pub total_x_amount: u64,
    pub total_y_amount: u64,
    pub min_bin_id: i32,
    pub max_bin_id: i32,
    pub strategy: StrategyType,
}

/// Position discovery by owner, provided by the DLMM SDK
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn positions_by_owner(&self, owner: &Pubkey) -> Result<PositionMap>;
}

/// Opens pool instances by pair address
#[async_trait]
pub trait PoolProvider: Send + Sync {
    async fn open_pool(&self, pair_address: &Pubkey) -> Result<Box<dyn LiquidityPool>>;
}

/// Transaction builders of one DLMM pool
#[async_trait]
pub trait LiquidityPool: Send + Sync {
    fn pair_address(&self) -> Pubkey;

    fn token_x_mint(&self) -> Pubkey;

    fn token_y_mint(&self) -> Pubkey;

    async fn active_bin(&self) -> Result<ActiveBin>;

    async fn remove_liquidity(
        &self,
        params: &RemoveLiquidityParams,
    ) -> Result<Vec<WalletTransaction>>;

    /// Empty when the position has nothing to claim
    async fn claim_swap_fee(&self, params: &ClaimFeeParams) -> Result<Vec<WalletTransaction>>;

    async fn initialize_position_and_add_liquidity_by_strategy(
        &self,
        params: &AddLiquidityByStrategyParams,
    ) -> Result<WalletTransaction>;
}
