#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dlmm_position_sdk::{
    ActiveBin, AddLiquidityByStrategyParams, BlockInfo, ClaimFeeParams, ConfirmationLevel,
    ExtensionWallet, LiquidityPool, PairPositions, PoolProvider, Position, PositionMap,
    PositionSource, RemoveLiquidityParams, RpcGateway, SignatureStatus, SocialTransaction,
    SocialWallet, WSOL_MINT, WalletTransaction,
};
use serde_json::{Map, Value};
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{VersionedMessage, v0},
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError, VersionedTransaction},
};
use tokio::time::Instant;

pub const TEST_ENDPOINT: &str = "https://rpc.test.local";

pub fn test_program() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn legacy_tx(payer: &Pubkey) -> Transaction {
    let ix = Instruction::new_with_bytes(test_program(), &[1, 2, 3], vec![AccountMeta::new(*payer, true)]);
    Transaction::new_with_payer(&[ix], Some(payer))
}

/// Versioned transaction paid by `payer` that also needs `co_signer`'s signature
pub fn versioned_tx(payer: &Pubkey, co_signer: &Pubkey, blockhash: Hash) -> VersionedTransaction {
    let ix = Instruction::new_with_bytes(
        test_program(),
        &[4, 5, 6],
        vec![AccountMeta::new(*payer, true), AccountMeta::new(*co_signer, true)],
    );
    let message = v0::Message::try_compile(payer, &[ix], &[], blockhash).expect("compile v0 message");
    VersionedTransaction {
        signatures: vec![],
        message: VersionedMessage::V0(message),
    }
}

#[derive(Debug, Clone)]
pub enum StatusReply {
    Missing,
    Processed,
    Confirmed,
    Finalized,
    Failed(TransactionError),
    RpcError(String),
}

/// Scripted RPC endpoint. The last scripted reply repeats once the script runs out.
pub struct MockRpc {
    pub endpoint: String,
    pub blockhash: Hash,
    statuses: Mutex<Vec<StatusReply>>,
    version_error: Mutex<Option<String>>,
    pub status_calls: AtomicU32,
    pub status_call_times: Mutex<Vec<Instant>>,
    pub version_calls: AtomicU32,
    pub sent: Mutex<Vec<WalletTransaction>>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::with_endpoint(TEST_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            blockhash: Hash::new_unique(),
            statuses: Mutex::new(vec![StatusReply::Confirmed]),
            version_error: Mutex::new(None),
            status_calls: AtomicU32::new(0),
            status_call_times: Mutex::new(vec![]),
            version_calls: AtomicU32::new(0),
            sent: Mutex::new(vec![]),
        }
    }

    pub fn with_statuses(self, statuses: Vec<StatusReply>) -> Self {
        *self.statuses.lock().unwrap() = statuses;
        self
    }

    pub fn fail_version(&self, message: &str) {
        *self.version_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl RpcGateway for MockRpc {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    async fn get_version(&self) -> Result<String> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        match self.version_error.lock().unwrap().clone() {
            Some(message) => Err(anyhow!(message)),
            None => Ok("2.1.0".to_string()),
        }
    }

    async fn get_latest_blockhash(&self) -> Result<BlockInfo> {
        Ok(BlockInfo {
            blockhash: self.blockhash,
            last_valid_block_height: 1_000,
        })
    }

    async fn send_transaction(&self, transaction: &WalletTransaction) -> Result<Signature> {
        let signature = transaction
            .signatures()
            .first()
            .copied()
            .unwrap_or_else(Signature::new_unique);
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(signature)
    }

    async fn get_signature_status(&self, _signature: &Signature) -> Result<Option<SignatureStatus>> {
        let call = self.status_calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.status_call_times.lock().unwrap().push(Instant::now());

        let reply = {
            let statuses = self.statuses.lock().unwrap();
            statuses[call.min(statuses.len() - 1)].clone()
        };

        let status = |confirmation: ConfirmationLevel,
                      err: Option<TransactionError>|
         -> Result<Option<SignatureStatus>> {
            Ok(Some(SignatureStatus {
                confirmation: Some(confirmation),
                err,
            }))
        };

        match reply {
            StatusReply::Missing => Ok(None),
            StatusReply::Processed => status(ConfirmationLevel::Processed, None),
            StatusReply::Confirmed => status(ConfirmationLevel::Confirmed, None),
            StatusReply::Finalized => status(ConfirmationLevel::Finalized, None),
            StatusReply::Failed(err) => status(ConfirmationLevel::Confirmed, Some(err)),
            StatusReply::RpcError(message) => Err(anyhow!(message)),
        }
    }
}

/// Extension adapter that "signs" by passing the transaction straight to the rpc
pub struct MockExtension {
    pub connected: AtomicBool,
    pub public_key: Mutex<Option<Pubkey>>,
    pub selected: bool,
    pub supports_send: bool,
    pub connect_calls: AtomicU32,
    pub disconnect_calls: AtomicU32,
    pub send_calls: AtomicU32,
    pub last_rpc_endpoint: Mutex<Option<String>>,
}

impl MockExtension {
    pub fn offline() -> Self {
        Self {
            connected: AtomicBool::new(false),
            public_key: Mutex::new(None),
            selected: false,
            supports_send: true,
            connect_calls: AtomicU32::new(0),
            disconnect_calls: AtomicU32::new(0),
            send_calls: AtomicU32::new(0),
            last_rpc_endpoint: Mutex::new(None),
        }
    }

    pub fn online(public_key: Pubkey) -> Self {
        let wallet = Self {
            selected: true,
            ..Self::offline()
        };
        wallet.set_connected(Some(public_key));
        wallet
    }

    pub fn set_connected(&self, public_key: Option<Pubkey>) {
        self.connected.store(public_key.is_some(), Ordering::SeqCst);
        *self.public_key.lock().unwrap() = public_key;
    }

    pub fn send_calls(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtensionWallet for MockExtension {
    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<Pubkey> {
        *self.public_key.lock().unwrap()
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn supports_send(&self) -> bool {
        self.supports_send
    }

    async fn connect(&self) -> Result<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        self.set_connected(None);
        Ok(())
    }

    async fn send_transaction(
        &self,
        transaction: WalletTransaction,
        rpc: &dyn RpcGateway,
    ) -> Result<Signature> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_rpc_endpoint.lock().unwrap() = Some(rpc.endpoint());
        rpc.send_transaction(&transaction).await
    }
}

pub struct MockSocial {
    pub connected: AtomicBool,
    pub accounts: Mutex<Vec<String>>,
    pub has_connection: bool,
    pub supports_sign: bool,
    pub reject_with: Option<String>,
    pub profile: Option<Map<String, Value>>,
    pub connect_calls: AtomicU32,
    pub disconnect_calls: AtomicU32,
    pub received: Mutex<Vec<SocialTransaction>>,
}

impl MockSocial {
    pub fn offline() -> Self {
        Self {
            connected: AtomicBool::new(false),
            accounts: Mutex::new(vec![]),
            has_connection: true,
            supports_sign: true,
            reject_with: None,
            profile: None,
            connect_calls: AtomicU32::new(0),
            disconnect_calls: AtomicU32::new(0),
            received: Mutex::new(vec![]),
        }
    }

    pub fn online(account: &str) -> Self {
        let wallet = Self::offline();
        wallet.connected.store(true, Ordering::SeqCst);
        *wallet.accounts.lock().unwrap() = vec![account.to_string()];
        wallet
    }

    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl SocialWallet for MockSocial {
    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn accounts(&self) -> Vec<String> {
        self.accounts.lock().unwrap().clone()
    }

    fn has_connection(&self) -> bool {
        self.has_connection
    }

    fn supports_sign_and_send(&self) -> bool {
        self.supports_sign
    }

    fn user_info(&self) -> Option<Map<String, Value>> {
        self.profile.clone()
    }

    async fn connect(&self) -> Result<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_and_send_transaction(&self, transaction: SocialTransaction) -> Result<Signature> {
        if let Some(reason) = &self.reject_with {
            return Err(anyhow!(reason.clone()));
        }
        self.received.lock().unwrap().push(transaction);
        Ok(Signature::new_unique())
    }
}

pub fn sample_position(owner_seed: u8, pair: Pubkey) -> Position {
    Position {
        address: Pubkey::new_from_array([owner_seed; 32]),
        pair_address: pair,
        lower_bin_id: -10,
        upper_bin_id: 10,
        total_x_amount: 1_000,
        total_y_amount: 2_000,
        fee_x: 5,
        fee_y: 0,
    }
}

pub fn sample_positions(pair: Pubkey) -> PositionMap {
    let mut map = BTreeMap::new();
    map.insert(
        pair,
        PairPositions {
            pair_address: pair,
            token_x_mint: WSOL_MINT,
            token_y_mint: Pubkey::new_unique(),
            positions: vec![sample_position(9, pair)],
        },
    );
    map
}

/// Position source replaying scripted results; the last one repeats
pub struct MockPositionSource {
    script: Mutex<Vec<std::result::Result<PositionMap, String>>>,
    pub calls: AtomicU32,
    pub call_times: Mutex<Vec<Instant>>,
}

impl MockPositionSource {
    pub fn new(script: Vec<std::result::Result<PositionMap, String>>) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicU32::new(0),
            call_times: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionSource for MockPositionSource {
    async fn positions_by_owner(&self, _owner: &Pubkey) -> Result<PositionMap> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.call_times.lock().unwrap().push(Instant::now());
        let script = self.script.lock().unwrap();
        match &script[call.min(script.len() - 1)] {
            Ok(positions) => Ok(positions.clone()),
            Err(message) => Err(anyhow!(message.clone())),
        }
    }
}

#[derive(Default)]
pub struct PoolRequests {
    pub removals: Vec<RemoveLiquidityParams>,
    pub claims: Vec<ClaimFeeParams>,
    pub additions: Vec<AddLiquidityByStrategyParams>,
}

pub struct MockPools {
    pub token_x_mint: Pubkey,
    pub token_y_mint: Pubkey,
    pub active_bin_id: i32,
    pub has_fees: bool,
    pub removal_tx_count: usize,
    pub unavailable: bool,
    pub requests: Arc<Mutex<PoolRequests>>,
}

impl MockPools {
    pub fn sol_x() -> Self {
        Self {
            token_x_mint: WSOL_MINT,
            token_y_mint: Pubkey::new_unique(),
            active_bin_id: 100,
            has_fees: true,
            removal_tx_count: 2,
            unavailable: false,
            requests: Arc::new(Mutex::new(PoolRequests::default())),
        }
    }
}

#[async_trait]
impl PoolProvider for MockPools {
    async fn open_pool(&self, pair_address: &Pubkey) -> Result<Box<dyn LiquidityPool>> {
        if self.unavailable {
            return Err(anyhow!("Pool account {} not found", pair_address));
        }
        Ok(Box::new(MockPool {
            pair_address: *pair_address,
            token_x_mint: self.token_x_mint,
            token_y_mint: self.token_y_mint,
            active_bin_id: self.active_bin_id,
            has_fees: self.has_fees,
            removal_tx_count: self.removal_tx_count,
            requests: self.requests.clone(),
        }))
    }
}

struct MockPool {
    pair_address: Pubkey,
    token_x_mint: Pubkey,
    token_y_mint: Pubkey,
    active_bin_id: i32,
    has_fees: bool,
    removal_tx_count: usize,
    requests: Arc<Mutex<PoolRequests>>,
}

#[async_trait]
impl LiquidityPool for MockPool {
    fn pair_address(&self) -> Pubkey {
        self.pair_address
    }

    fn token_x_mint(&self) -> Pubkey {
        self.token_x_mint
    }

    fn token_y_mint(&self) -> Pubkey {
        self.token_y_mint
    }

    async fn active_bin(&self) -> Result<ActiveBin> {
        Ok(ActiveBin {
            bin_id: self.active_bin_id,
            price: "1.0".to_string(),
        })
    }

    async fn remove_liquidity(
        &self,
        params: &RemoveLiquidityParams,
    ) -> Result<Vec<WalletTransaction>> {
        self.requests.lock().unwrap().removals.push(params.clone());
        Ok((0..self.removal_tx_count)
            .map(|_| WalletTransaction::Legacy(legacy_tx(&params.user)))
            .collect())
    }

    async fn claim_swap_fee(&self, params: &ClaimFeeParams) -> Result<Vec<WalletTransaction>> {
        self.requests.lock().unwrap().claims.push(params.clone());
        if !self.has_fees {
            return Ok(vec![]);
        }
        Ok(vec![WalletTransaction::Legacy(legacy_tx(&params.owner))])
    }

    async fn initialize_position_and_add_liquidity_by_strategy(
        &self,
        params: &AddLiquidityByStrategyParams,
    ) -> Result<WalletTransaction> {
        self.requests.lock().unwrap().additions.push(params.clone());
        Ok(WalletTransaction::Versioned(versioned_tx(
            &params.user,
            &params.position,
            Hash::default(),
        )))
    }
}
