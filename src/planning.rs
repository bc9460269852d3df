use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};

use crate::{
    constants::{FEE_RESERVE_LAMPORTS, MIN_POSITION_LAMPORTS, ONE_SIDED_BIN_COUNT, WSOL_MINT},
    error::{SdkError, SdkResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    Spot,
    Curve,
    BidAsk,
}

/// Which side of the pair holds wrapped SOL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolSide {
    X,
    Y,
}

impl SolSide {
    pub fn detect(token_x_mint: &Pubkey, token_y_mint: &Pubkey) -> Option<Self> {
        if *token_x_mint == WSOL_MINT {
            Some(Self::X)
        } else if *token_y_mint == WSOL_MINT {
            Some(Self::Y)
        } else {
            None
        }
    }
}

/// Inclusive bin range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub min_bin_id: i32,
    pub max_bin_id: i32,
}

impl BinRange {
    pub fn len(&self) -> i32 {
        self.max_bin_id - self.min_bin_id + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn contains(&self, bin_id: i32) -> bool {
        (self.min_bin_id..=self.max_bin_id).contains(&bin_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneSidedPlan {
    pub range: BinRange,
    pub amount_x: u64,
    pub amount_y: u64,
    pub strategy: StrategyType,
}

/// SOL as token X sits above the active price, SOL as token Y below it.
/// The active bin itself is never included.
pub fn one_sided_range(active_bin_id: i32, side: SolSide) -> BinRange {
    match side {
        SolSide::X => {
            let min_bin_id = active_bin_id + 1;
            BinRange {
                min_bin_id,
                max_bin_id: min_bin_id + (ONE_SIDED_BIN_COUNT - 1),
            }
        }
        SolSide::Y => {
            let max_bin_id = active_bin_id - 1;
            BinRange {
                min_bin_id: max_bin_id - (ONE_SIDED_BIN_COUNT - 1),
                max_bin_id,
            }
        }
    }
}

pub fn plan_one_sided(active_bin_id: i32, side: SolSide, lamports: u64) -> OneSidedPlan {
    let (amount_x, amount_y) = match side {
        SolSide::X => (lamports, 0),
        SolSide::Y => (0, lamports),
    };

    OneSidedPlan {
        range: one_sided_range(active_bin_id, side),
        amount_x,
        amount_y,
        strategy: StrategyType::BidAsk,
    }
}

/// Parse a decimal SOL amount ("0.5") into lamports without float rounding
pub fn parse_sol_amount(input: &str) -> SdkResult<u64> {
    let trimmed = input.trim();
    let sol: Decimal = trimmed
        .parse()
        .map_err(|_| SdkError::InvalidAmount(format!("'{}' is not a number", trimmed)))?;

    if sol.is_sign_negative() {
        return Err(SdkError::InvalidAmount("amount must be positive".to_string()));
    }

    let lamports = sol
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| SdkError::InvalidAmount(format!("{} SOL is too large", trimmed)))?;
    if !lamports.fract().is_zero() {
        return Err(SdkError::InvalidAmount(format!(
            "{} SOL has more than 9 decimals",
            trimmed
        )));
    }

    lamports
        .to_u64()
        .ok_or_else(|| SdkError::InvalidAmount(format!("{} SOL is too large", trimmed)))
}

pub fn validate_min_amount(lamports: u64) -> SdkResult<()> {
    if lamports < MIN_POSITION_LAMPORTS {
        return Err(SdkError::InvalidAmount(
            "Minimum SOL amount is 0.02 SOL".to_string(),
        ));
    }
    Ok(())
}

/// `percentage` of the balance in SOL, leaving 0.01 SOL for fees, truncated to 3 decimals
pub fn percentage_of_balance(balance_lamports: u64, percentage: u8) -> Decimal {
    let lamports_per_sol = Decimal::from(LAMPORTS_PER_SOL);
    let balance = Decimal::from(balance_lamports) / lamports_per_sol;
    if balance.is_zero() {
        return Decimal::ZERO;
    }

    let amount = balance * Decimal::from(percentage.min(100)) / Decimal::ONE_HUNDRED;
    let max_usable =
        Decimal::from(balance_lamports.saturating_sub(FEE_RESERVE_LAMPORTS)) / lamports_per_sol;

    amount
        .min(max_usable)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(3, RoundingStrategy::ToZero)
}
