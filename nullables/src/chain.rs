//! Nullable chain: an in-memory fullnode.
//!
//! Serves objects and coins that tests register, records every executed
//! transaction, and answers executions from a queue of canned results (or a
//! plain success when the queue is empty).

use paystream_transactions::TransactionData;
use paystream_types::{Digest, ObjectId, SuiAddress};
use paystream_wallet_core::{
    ChainClient, ChainError, Coin, CoinPage, ExecuteOptions, ExecutionStatus, ObjectChange,
    ObjectContent, ObjectData, ObjectOptions, Owner, TransactionEffects, TransactionResult,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

/// A transaction as it reached the chain.
#[derive(Clone, Debug)]
pub struct ExecutedTransaction {
    pub tx_bytes: Vec<u8>,
    pub signatures: Vec<String>,
    /// `tx_bytes` decoded, if they were valid BCS.
    pub data: Option<TransactionData>,
}

pub struct NullChain {
    objects: RefCell<HashMap<ObjectId, ObjectData>>,
    coins: RefCell<Vec<Coin>>,
    gas_price: Cell<u64>,
    coin_page_size: Cell<usize>,
    results: RefCell<VecDeque<Result<TransactionResult, ChainError>>>,
    executed: RefCell<Vec<ExecutedTransaction>>,
    lookups: RefCell<Vec<ObjectId>>,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            objects: RefCell::new(HashMap::new()),
            coins: RefCell::new(Vec::new()),
            gas_price: Cell::new(1_000),
            coin_page_size: Cell::new(50),
            results: RefCell::new(VecDeque::new()),
            executed: RefCell::new(Vec::new()),
            lookups: RefCell::new(Vec::new()),
        }
    }

    /// Register an object as-is.
    pub fn add_object(&self, object: ObjectData) {
        self.objects.borrow_mut().insert(object.object_id, object);
    }

    /// Register a shared Move object with the given content fields.
    pub fn add_shared_object(
        &self,
        id: ObjectId,
        initial_shared_version: u64,
        object_type: &str,
        fields: serde_json::Value,
    ) {
        self.add_object(ObjectData {
            object_id: id,
            version: initial_shared_version,
            digest: Digest::new([initial_shared_version as u8; 32]),
            object_type: Some(object_type.to_string()),
            owner: Some(Owner::Shared {
                initial_shared_version,
            }),
            content: Some(ObjectContent {
                data_type: "moveObject".into(),
                type_: Some(object_type.to_string()),
                fields,
            }),
        });
    }

    /// Register an object owned by `owner`.
    pub fn add_owned_object(&self, id: ObjectId, version: u64, owner: SuiAddress, object_type: &str) {
        self.add_object(ObjectData {
            object_id: id,
            version,
            digest: Digest::new([version as u8; 32]),
            object_type: Some(object_type.to_string()),
            owner: Some(Owner::AddressOwner(owner)),
            content: None,
        });
    }

    /// Give `owner` a SUI coin. All coins are returned for any owner.
    pub fn add_coin(&self, id: ObjectId, balance: u64) {
        self.coins.borrow_mut().push(Coin {
            coin_object_id: id,
            version: 1,
            digest: Digest::new([0xc0; 32]),
            balance,
        });
    }

    pub fn set_gas_price(&self, price: u64) {
        self.gas_price.set(price);
    }

    /// Coins returned per `get_coins` page.
    pub fn set_coin_page_size(&self, size: usize) {
        self.coin_page_size.set(size.max(1));
    }

    /// Answer the next execution with `result`.
    pub fn queue_result(&self, result: TransactionResult) {
        self.results.borrow_mut().push_back(Ok(result));
    }

    /// Fail the next execution with `error`.
    pub fn queue_error(&self, error: ChainError) {
        self.results.borrow_mut().push_back(Err(error));
    }

    /// A successful result whose changes include one created object.
    pub fn success_creating(digest_byte: u8, object_id: ObjectId, object_type: &str) -> TransactionResult {
        let mut result = Self::success(digest_byte);
        result.object_changes.push(ObjectChange::Created {
            object_id,
            object_type: object_type.to_string(),
            owner: None,
        });
        result
    }

    pub fn success(digest_byte: u8) -> TransactionResult {
        TransactionResult {
            digest: Digest::new([digest_byte; 32]),
            effects: Some(TransactionEffects {
                status: ExecutionStatus::success(),
                gas_used: None,
            }),
            object_changes: Vec::new(),
            raw_effects: vec![1, 2, 3],
        }
    }

    pub fn failure(digest_byte: u8, error: &str) -> TransactionResult {
        TransactionResult {
            effects: Some(TransactionEffects {
                status: ExecutionStatus::failure(error),
                gas_used: None,
            }),
            ..Self::success(digest_byte)
        }
    }

    /// Every transaction submitted so far (for assertions).
    pub fn executed(&self) -> Vec<ExecutedTransaction> {
        self.executed.borrow().clone()
    }

    pub fn execute_count(&self) -> usize {
        self.executed.borrow().len()
    }

    /// Ids passed to `get_object`, in call order.
    pub fn lookups(&self) -> Vec<ObjectId> {
        self.lookups.borrow().clone()
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainClient for NullChain {
    async fn get_object(
        &self,
        id: ObjectId,
        options: ObjectOptions,
    ) -> Result<Option<ObjectData>, ChainError> {
        self.lookups.borrow_mut().push(id);
        let mut object = self.objects.borrow().get(&id).cloned();
        if let Some(object) = object.as_mut() {
            if !options.show_content {
                object.content = None;
            }
            if !options.show_owner {
                object.owner = None;
            }
        }
        Ok(object)
    }

    async fn get_coins(
        &self,
        _owner: SuiAddress,
        _coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, ChainError> {
        let start: usize = match cursor {
            Some(c) => c
                .parse()
                .map_err(|_| ChainError::InvalidResponse(format!("bad cursor {c}")))?,
            None => 0,
        };
        let coins = self.coins.borrow();
        let end = (start + self.coin_page_size.get()).min(coins.len());
        let data = coins.get(start..end).map(<[Coin]>::to_vec).unwrap_or_default();
        let has_next_page = end < coins.len();
        Ok(CoinPage {
            data,
            next_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }

    async fn reference_gas_price(&self) -> Result<u64, ChainError> {
        Ok(self.gas_price.get())
    }

    async fn execute_transaction_block(
        &self,
        tx_bytes: &[u8],
        signatures: &[String],
        _options: ExecuteOptions,
    ) -> Result<TransactionResult, ChainError> {
        let count = {
            let mut executed = self.executed.borrow_mut();
            executed.push(ExecutedTransaction {
                tx_bytes: tx_bytes.to_vec(),
                signatures: signatures.to_vec(),
                data: TransactionData::from_bcs_bytes(tx_bytes).ok(),
            });
            executed.len()
        };
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::success(count as u8)))
    }
}
