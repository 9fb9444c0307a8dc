//! Nullable ledger: scripted answers, recorded publications.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use znn_transactions::{Ledger, LedgerError};
use znn_types::{
    AccountBlock, Address, Hash, HashHeight, PlasmaInfo, RequiredPow, RequiredPowParams,
};

use crate::lock;

struct Script {
    frontiers: HashMap<Address, HashHeight>,
    frontier_error: Option<LedgerError>,
    momentum: Result<HashHeight, LedgerError>,
    plasma: HashMap<Address, u64>,
    plasma_error: Option<LedgerError>,
    required_pow: Result<RequiredPow, LedgerError>,
    publish_error: Option<LedgerError>,
    /// Publications that succeed before `publish_error` starts applying.
    publish_error_after: usize,
    published: Vec<AccountBlock>,
}

#[derive(Default)]
struct Calls {
    frontier: AtomicUsize,
    momentum: AtomicUsize,
    plasma: AtomicUsize,
    required_pow: AtomicUsize,
    publish: AtomicUsize,
}

/// A test ledger with scripted responses.
///
/// Published blocks advance the publishing account's frontier, so consecutive
/// submissions chain the way they would on a real node.
pub struct NullLedger {
    script: Mutex<Script>,
    calls: Calls,
    latency: Option<Duration>,
}

impl NullLedger {
    /// Momentum at height 1000, no accounts, no plasma, node asks for no extra work.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                frontiers: HashMap::new(),
                frontier_error: None,
                momentum: Ok(HashHeight::new(Hash::new([0x4D; 32]), 1000)),
                plasma: HashMap::new(),
                plasma_error: None,
                required_pow: Ok(RequiredPow::default()),
                publish_error: None,
                publish_error_after: 0,
                published: Vec::new(),
            }),
            calls: Calls::default(),
            latency: None,
        }
    }

    pub fn with_frontier(self, address: Address, frontier: HashHeight) -> Self {
        lock(&self.script).frontiers.insert(address, frontier);
        self
    }

    pub fn with_momentum(self, momentum: HashHeight) -> Self {
        lock(&self.script).momentum = Ok(momentum);
        self
    }

    pub fn with_plasma(self, address: Address, current_plasma: u64) -> Self {
        lock(&self.script).plasma.insert(address, current_plasma);
        self
    }

    pub fn with_required_difficulty(self, difficulty: u64) -> Self {
        lock(&self.script).required_pow = Ok(RequiredPow {
            available_plasma: 0,
            base_plasma: znn_types::params::MIN_PLASMA,
            required_difficulty: difficulty,
        });
        self
    }

    /// Every call yields to the runtime for `latency` first.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn failing_frontier(self, error: LedgerError) -> Self {
        lock(&self.script).frontier_error = Some(error);
        self
    }

    pub fn failing_momentum(self, error: LedgerError) -> Self {
        lock(&self.script).momentum = Err(error);
        self
    }

    pub fn failing_plasma(self, error: LedgerError) -> Self {
        lock(&self.script).plasma_error = Some(error);
        self
    }

    pub fn failing_required_pow(self, error: LedgerError) -> Self {
        lock(&self.script).required_pow = Err(error);
        self
    }

    pub fn failing_publish(self, error: LedgerError) -> Self {
        self.failing_publish_after(0, error)
    }

    /// Accept `successes` publications, then fail every later one with `error`.
    pub fn failing_publish_after(self, successes: usize, error: LedgerError) -> Self {
        {
            let mut script = lock(&self.script);
            script.publish_error = Some(error);
            script.publish_error_after = successes;
        }
        self
    }

    /// Blocks accepted so far, in order.
    pub fn published(&self) -> Vec<AccountBlock> {
        lock(&self.script).published.clone()
    }

    pub fn frontier_calls(&self) -> usize {
        self.calls.frontier.load(Ordering::SeqCst)
    }

    pub fn momentum_calls(&self) -> usize {
        self.calls.momentum.load(Ordering::SeqCst)
    }

    pub fn plasma_calls(&self) -> usize {
        self.calls.plasma.load(Ordering::SeqCst)
    }

    pub fn required_pow_calls(&self) -> usize {
        self.calls.required_pow.load(Ordering::SeqCst)
    }

    pub fn publish_calls(&self) -> usize {
        self.calls.publish.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for NullLedger {
    async fn frontier_block(&self, address: &Address) -> Result<Option<HashHeight>, LedgerError> {
        self.calls.frontier.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        let script = lock(&self.script);
        match &script.frontier_error {
            Some(e) => Err(e.clone()),
            None => Ok(script.frontiers.get(address).copied()),
        }
    }

    async fn frontier_momentum(&self) -> Result<HashHeight, LedgerError> {
        self.calls.momentum.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        lock(&self.script).momentum.clone()
    }

    async fn plasma(&self, address: &Address) -> Result<PlasmaInfo, LedgerError> {
        self.calls.plasma.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        let script = lock(&self.script);
        if let Some(e) = &script.plasma_error {
            return Err(e.clone());
        }
        let current = script.plasma.get(address).copied().unwrap_or(0);
        Ok(PlasmaInfo {
            current_plasma: current,
            max_plasma: current,
            qsr_amount: Default::default(),
        })
    }

    async fn required_pow(&self, _params: &RequiredPowParams) -> Result<RequiredPow, LedgerError> {
        self.calls.required_pow.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        lock(&self.script).required_pow.clone()
    }

    async fn publish(&self, block: &AccountBlock) -> Result<(), LedgerError> {
        let call = self.calls.publish.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        let mut script = lock(&self.script);
        if let Some(e) = &script.publish_error {
            if call >= script.publish_error_after {
                return Err(e.clone());
            }
        }
        script
            .frontiers
            .insert(block.address, HashHeight::new(block.hash, block.height));
        script.published.push(block.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_account_has_no_frontier() {
        let ledger = NullLedger::new();
        assert_eq!(ledger.frontier_block(&Address::ZERO).await, Ok(None));
        assert_eq!(ledger.frontier_calls(), 1);
    }

    #[tokio::test]
    async fn scripted_failures_are_returned() {
        let ledger = NullLedger::new().failing_plasma(LedgerError::Transport("down".into()));
        assert!(ledger.plasma(&Address::ZERO).await.is_err());
        assert_eq!(ledger.plasma_calls(), 1);
    }

    #[tokio::test]
    async fn publish_failure_after_successes() {
        let ledger =
            NullLedger::new().failing_publish_after(1, LedgerError::Transport("gone".into()));
        let block = AccountBlock {
            version: 1,
            chain_identifier: 1,
            block_type: znn_types::BlockType::UserReceive,
            hash: Hash::new([1; 32]),
            previous_hash: Hash::ZERO,
            height: 1,
            momentum_acknowledged: HashHeight::default(),
            address: Address::ZERO,
            to_address: Address::ZERO,
            amount: Default::default(),
            token_standard: Default::default(),
            from_block_hash: Hash::ZERO,
            descendant_blocks: Vec::new(),
            data: Vec::new(),
            fused_plasma: 0,
            difficulty: 0,
            nonce: Default::default(),
            public_key: Default::default(),
            signature: Default::default(),
        };
        assert!(ledger.publish(&block).await.is_ok());
        assert!(ledger.publish(&block).await.is_err());
        assert_eq!(ledger.published().len(), 1);
        assert_eq!(
            ledger.frontier_block(&Address::ZERO).await.unwrap(),
            Some(HashHeight::new(Hash::new([1; 32]), 1))
        );
    }
}
