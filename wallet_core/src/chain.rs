//! Read and execute access to a Sui fullnode, plus the response shapes the
//! client consumes.

use paystream_transactions::ObjectRef;
use paystream_types::{ObjectDigest, ObjectId, SuiAddress, TransactionDigest};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChainError;

/// Which parts of an object `get_object` should return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectOptions {
    pub show_owner: bool,
    pub show_content: bool,
}

impl ObjectOptions {
    pub fn owner() -> Self {
        Self {
            show_owner: true,
            show_content: false,
        }
    }

    pub fn content() -> Self {
        Self {
            show_owner: true,
            show_content: true,
        }
    }
}

/// Which parts of the result `execute_transaction_block` should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteOptions {
    pub show_effects: bool,
    pub show_object_changes: bool,
    pub show_raw_effects: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            show_effects: true,
            show_object_changes: true,
            show_raw_effects: true,
        }
    }
}

/// Access to the chain.
///
/// Implemented over JSON-RPC by [`crate::SuiRpcClient`] and in memory by the
/// nullables crate.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// `Ok(None)` when the object does not exist or was deleted.
    async fn get_object(
        &self,
        id: ObjectId,
        options: ObjectOptions,
    ) -> Result<Option<ObjectData>, ChainError>;

    async fn get_coins(
        &self,
        owner: SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, ChainError>;

    async fn reference_gas_price(&self) -> Result<u64, ChainError>;

    /// Submit signed BCS transaction bytes and wait for local execution.
    async fn execute_transaction_block(
        &self,
        tx_bytes: &[u8],
        signatures: &[String],
        options: ExecuteOptions,
    ) -> Result<TransactionResult, ChainError>;
}

/// Who owns an object.
///
/// Ownership kinds this client does not model parse as `Unknown`, so a new owner
/// variant on the fullnode never turns an executed transaction into a read error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Owner {
    AddressOwner(SuiAddress),
    ObjectOwner(SuiAddress),
    Shared {
        initial_shared_version: u64,
    },
    Immutable,
    Unknown,
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        enum Known {
            AddressOwner(SuiAddress),
            ObjectOwner(SuiAddress),
            Shared {
                #[serde(deserialize_with = "u64_from_str_or_num")]
                initial_shared_version: u64,
            },
            Immutable,
        }

        let value = serde_json::Value::deserialize(d)?;
        Ok(match Known::deserialize(&value) {
            Ok(Known::AddressOwner(a)) => Self::AddressOwner(a),
            Ok(Known::ObjectOwner(a)) => Self::ObjectOwner(a),
            Ok(Known::Shared {
                initial_shared_version,
            }) => Self::Shared {
                initial_shared_version,
            },
            Ok(Known::Immutable) => Self::Immutable,
            Err(e) => {
                tracing::debug!(owner = %value, error = %e, "unrecognised object owner");
                Self::Unknown
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    #[serde(default)]
    pub data_type: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub fields: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: ObjectDigest,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

impl ObjectData {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: self.object_id,
            version: self.version,
            digest: self.digest,
        }
    }

    /// A top-level string field of the Move struct, if content was requested.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.content.as_ref()?.fields.get(name)?.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: ObjectDigest,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub balance: u64,
}

impl Coin {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: self.coin_object_id,
            version: self.version,
            digest: self.digest,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Object mutations reported by an executed transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: ObjectId,
        object_type: String,
        #[serde(default)]
        owner: Option<Owner>,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Deleted {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Wrapped {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Transferred {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Published { package_id: ObjectId },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn success() -> Self {
        Self {
            status: "success".into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "failure".into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub computation_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_rebate: u64,
}

impl GasCostSummary {
    /// Net MIST charged: computation plus storage minus rebate.
    pub fn net(&self) -> i128 {
        self.computation_cost as i128 + self.storage_cost as i128 - self.storage_rebate as i128
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub gas_used: Option<GasCostSummary>,
}

/// What the fullnode reports after executing a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub digest: TransactionDigest,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
    #[serde(default)]
    pub raw_effects: Vec<u8>,
}

impl TransactionResult {
    /// The failure reason, if execution did not succeed. Results without effects are
    /// treated as successful.
    pub fn failure_reason(&self) -> Option<String> {
        let status = &self.effects.as_ref()?.status;
        if status.is_success() {
            None
        } else {
            Some(
                status
                    .error
                    .clone()
                    .unwrap_or_else(|| status.status.clone()),
            )
        }
    }
}

/// Sui's JSON-RPC encodes u64 values as strings in most places and as numbers in a few.
pub(crate) fn u64_from_str_or_num<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }
    match Raw::deserialize(d)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
