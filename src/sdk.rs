use std::sync::Arc;

use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    config::SdkConfig,
    confirmation::{ConfirmedTransaction, confirm_transaction},
    constants::FULL_REMOVAL_BPS,
    discovery::PositionDiscovery,
    error::{SdkError, SdkResult},
    planning::{SolSide, parse_sol_amount, plan_one_sided, validate_min_amount},
    position::{
        AddLiquidityByStrategyParams, ClaimFeeParams, LiquidityPool, PoolProvider, Position,
        PositionMap, PositionSource, RemoveLiquidityParams,
    },
    rpc::RpcGateway,
    transaction::WalletTransaction,
    wallet::{EnhancedWallet, ExtensionWallet, SocialWallet},
};

/// A freshly opened one-sided position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedPosition {
    pub position: Pubkey,
    pub min_bin_id: i32,
    pub max_bin_id: i32,
    pub confirmed: ConfirmedTransaction,
}

pub struct DlmmSdk {
    config: SdkConfig,
    rpc: Arc<dyn RpcGateway>,
    wallet: EnhancedWallet,
    discovery: PositionDiscovery,
    pools: Arc<dyn PoolProvider>,
}

impl DlmmSdk {
    /// Create a new SDK instance talking to the endpoints in `config`
    ///
    /// # Arguments
    /// * `config` - Endpoints, commitment and polling settings
    /// * `extension` - Extension wallet backend
    /// * `social` - Social-login wallet backend
    /// * `positions` - DLMM position discovery backend
    /// * `pools` - DLMM pool backend building liquidity transactions
    pub fn new(
        config: SdkConfig,
        extension: Arc<dyn ExtensionWallet>,
        social: Arc<dyn SocialWallet>,
        positions: Arc<dyn PositionSource>,
        pools: Arc<dyn PoolProvider>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let commitment_config = CommitmentConfig {
            commitment: config.commitment,
        };
        let rpc: Arc<dyn RpcGateway> = Arc::new(RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            commitment_config,
        ));
        let discovery_rpc: Arc<dyn RpcGateway> = if config.discovery_rpc_url == config.rpc_url {
            rpc.clone()
        } else {
            Arc::new(RpcClient::new_with_commitment(
                config.discovery_rpc_url.clone(),
                commitment_config,
            ))
        };

        Ok(Self::with_gateways(
            config,
            rpc,
            discovery_rpc,
            extension,
            social,
            positions,
            pools,
        ))
    }

    /// Create an SDK over already constructed RPC gateways
    pub fn with_gateways(
        config: SdkConfig,
        rpc: Arc<dyn RpcGateway>,
        discovery_rpc: Arc<dyn RpcGateway>,
        extension: Arc<dyn ExtensionWallet>,
        social: Arc<dyn SocialWallet>,
        positions: Arc<dyn PositionSource>,
        pools: Arc<dyn PoolProvider>,
    ) -> Self {
        let wallet = EnhancedWallet::new(extension, social, rpc.clone());
        let discovery = PositionDiscovery::new(discovery_rpc, positions, config.discovery.clone());

        Self {
            config,
            rpc,
            wallet,
            discovery,
            pools,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn wallet(&self) -> &EnhancedWallet {
        &self.wallet
    }

    pub fn discovery(&self) -> &PositionDiscovery {
        &self.discovery
    }

    /// All positions owned by `owner`, empty if discovery fails
    pub async fn positions(&mut self, owner: &Pubkey) -> PositionMap {
        self.discovery.get_positions(owner).await
    }

    /// Force the next `positions` call for the connected wallet to refetch
    pub fn refresh_positions(&mut self) {
        if let Some(owner) = self.wallet.public_key() {
            self.discovery.invalidate(&owner);
        }
    }

    /// Wait for `signature` to be confirmed using the configured polling settings
    pub async fn confirm(&self, signature: &Signature) -> SdkResult<ConfirmedTransaction> {
        confirm_transaction(self.rpc.as_ref(), signature, &self.config.confirmation).await
    }

    /// Withdraw all liquidity from a position, claim its fees and close it
    ///
    /// # Arguments
    /// * `pair_address` - The DLMM pair the position belongs to
    /// * `position` - The position to close
    ///
    /// # Returns
    /// Returns the confirmation of every transaction the pool built, in order
    pub async fn close_position(
        &mut self,
        pair_address: &Pubkey,
        position: &Position,
    ) -> SdkResult<Vec<ConfirmedTransaction>> {
        let user = self.connected_user()?;
        let pool = self.open_pool(pair_address).await?;

        let transactions = pool
            .remove_liquidity(&RemoveLiquidityParams {
                user,
                position: position.address,
                from_bin_id: position.lower_bin_id,
                to_bin_id: position.upper_bin_id,
                bps: FULL_REMOVAL_BPS,
                should_claim_and_close: true,
            })
            .await?;

        let confirmed = self.submit_all(transactions, &user).await?;
        self.discovery.invalidate(&user);
        Ok(confirmed)
    }

    /// Claim accrued swap fees of a position
    ///
    /// # Returns
    /// Returns `SdkError::NoFeesToClaim` if the pool has nothing to claim
    pub async fn claim_fees(
        &mut self,
        pair_address: &Pubkey,
        position: &Position,
    ) -> SdkResult<Vec<ConfirmedTransaction>> {
        let user = self.connected_user()?;
        let pool = self.open_pool(pair_address).await?;

        let transactions = pool
            .claim_swap_fee(&ClaimFeeParams {
                owner: user,
                position: position.address,
            })
            .await?;

        if transactions.is_empty() {
            return Err(SdkError::NoFeesToClaim);
        }

        let confirmed = self.submit_all(transactions, &user).await?;
        self.discovery.invalidate(&user);
        Ok(confirmed)
    }

    /// Open a one-sided BidAsk position funded only with SOL
    ///
    /// # Arguments
    /// * `pair_address` - A DLMM pair with wrapped SOL on one side
    /// * `sol_amount` - Decimal SOL amount, at least 0.02
    ///
    /// # Returns
    /// Returns the new position address, its bin range and the confirmation
    pub async fn add_one_sided_position(
        &mut self,
        pair_address: &Pubkey,
        sol_amount: &str,
    ) -> SdkResult<OpenedPosition> {
        let user = self.connected_user()?;
        if !self.wallet.can_transact() {
            return Err(SdkError::NoTransactSource);
        }

        let lamports = parse_sol_amount(sol_amount)?;
        validate_min_amount(lamports)?;

        let pool = self.open_pool(pair_address).await?;
        let active_bin = pool.active_bin().await?;
        let side = SolSide::detect(&pool.token_x_mint(), &pool.token_y_mint())
            .ok_or(SdkError::NotSolPair)?;

        let plan = plan_one_sided(active_bin.bin_id, side, lamports);
        log::info!(
            "One-sided {:?} range {}..={} around active bin {} ({:?} holds SOL)",
            plan.strategy,
            plan.range.min_bin_id,
            plan.range.max_bin_id,
            active_bin.bin_id,
            side
        );

        let position_keypair = Keypair::new();
        let transaction = pool
            .initialize_position_and_add_liquidity_by_strategy(&AddLiquidityByStrategyParams {
                position: position_keypair.pubkey(),
                user,
                total_x_amount: plan.amount_x,
                total_y_amount: plan.amount_y,
                min_bin_id: plan.range.min_bin_id,
                max_bin_id: plan.range.max_bin_id,
                strategy: plan.strategy,
            })
            .await?;

        let confirmed = self
            .submit(transaction, &user, &[&position_keypair])
            .await?;
        self.discovery.invalidate(&user);

        Ok(OpenedPosition {
            position: position_keypair.pubkey(),
            min_bin_id: plan.range.min_bin_id,
            max_bin_id: plan.range.max_bin_id,
            confirmed,
        })
    }

    fn connected_user(&self) -> SdkResult<Pubkey> {
        let session = self.wallet.session();
        match session.address {
            Some(address) if session.is_active() => Ok(address),
            _ => Err(SdkError::NotConnected),
        }
    }

    async fn open_pool(&self, pair_address: &Pubkey) -> SdkResult<Box<dyn LiquidityPool>> {
        self.pools
            .open_pool(pair_address)
            .await
            .map_err(SdkError::PoolUnavailable)
    }

    async fn submit_all(
        &self,
        transactions: Vec<WalletTransaction>,
        user: &Pubkey,
    ) -> SdkResult<Vec<ConfirmedTransaction>> {
        let mut confirmed = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            confirmed.push(self.submit(transaction, user, &[]).await?);
        }
        Ok(confirmed)
    }

    /// Refresh the blockhash, add `extra_signers`, sign and send through the
    /// active wallet, then poll until confirmed
    async fn submit(
        &self,
        mut transaction: WalletTransaction,
        user: &Pubkey,
        extra_signers: &[&Keypair],
    ) -> SdkResult<ConfirmedTransaction> {
        let block = self.rpc.get_latest_blockhash().await?;
        transaction.ensure_fields(&block, user)?;

        for signer in extra_signers {
            transaction.partial_sign(*signer)?;
        }

        let signature = self
            .wallet
            .sign_and_send_transaction(transaction, Some(self.rpc.as_ref()))
            .await?;
        log::info!(
            "Sent {} (valid until block height {})",
            signature,
            block.last_valid_block_height
        );

        self.confirm(&signature).await
    }
}
