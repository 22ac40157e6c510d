//! Wire form of a transaction: `TransactionData` in BCS.
//!
//! Enum variant order mirrors the on-chain definitions; BCS encodes the variant
//! index, so reordering any enum here changes the bytes that get signed.

use paystream_types::{Mist, ObjectDigest, ObjectId, SuiAddress};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::ptb::{Command, UnresolvedInput, UnresolvedTransaction};

/// A specific version of an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
    Receiving(ObjectRef),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    /// Assemble transaction data from a built transaction and its resolved parts.
    ///
    /// `object_args` must hold one entry per `UnresolvedInput::Object`, in input order.
    pub fn from_unresolved(
        tx: UnresolvedTransaction,
        object_args: Vec<ObjectArg>,
        sender: SuiAddress,
        gas: GasData,
    ) -> Result<Self, TransactionError> {
        if gas.payment.is_empty() {
            return Err(TransactionError::NoGasPayment);
        }
        let expected = tx.object_ids().len();
        if object_args.len() != expected {
            return Err(TransactionError::InputCountMismatch {
                expected,
                actual: object_args.len(),
            });
        }

        let mut resolved = object_args.into_iter();
        let mut inputs = Vec::with_capacity(tx.inputs.len());
        for (index, input) in tx.inputs.into_iter().enumerate() {
            let arg = match input {
                UnresolvedInput::Pure(bytes) => CallArg::Pure(bytes),
                UnresolvedInput::Shared {
                    id,
                    initial_shared_version,
                    mutable,
                } => CallArg::Object(ObjectArg::SharedObject {
                    id,
                    initial_shared_version,
                    mutable,
                }),
                UnresolvedInput::Object { .. } => CallArg::Object(
                    resolved
                        .next()
                        .ok_or(TransactionError::UnresolvedInput { index })?,
                ),
            };
            inputs.push(arg);
        }

        Ok(Self::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
                inputs,
                commands: tx.commands,
            }),
            sender,
            gas_data: gas,
            expiration: TransactionExpiration::None,
        }))
    }

    pub fn sender(&self) -> SuiAddress {
        match self {
            Self::V1(v1) => v1.sender,
        }
    }

    pub fn gas_data(&self) -> &GasData {
        match self {
            Self::V1(v1) => &v1.gas_data,
        }
    }

    pub fn programmable(&self) -> &ProgrammableTransaction {
        match self {
            Self::V1(v1) => match &v1.kind {
                TransactionKind::ProgrammableTransaction(pt) => pt,
            },
        }
    }

    /// Upper bound on MIST this transaction can draw from the gas coins.
    pub fn max_gas_spend(&self, split: Mist) -> Mist {
        split.saturating_add(Mist::new(self.gas_data().budget))
    }

    /// BCS bytes, the payload that gets signed and submitted.
    pub fn to_bcs_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bcs::to_bytes(self).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    pub fn from_bcs_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        bcs::from_bytes(bytes).map_err(|e| TransactionError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ptb::{Argument, PtbBuilder};
    use paystream_types::Digest;

    fn gas(owner: SuiAddress) -> GasData {
        GasData {
            payment: vec![ObjectRef {
                object_id: "0x99".parse().unwrap(),
                version: 7,
                digest: Digest::new([1u8; 32]),
            }],
            owner,
            price: 1000,
            budget: 20_000_000,
        }
    }

    fn sample() -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let obj = b.object("0xabc".parse().unwrap(), true);
        let clock = b.clock();
        b.move_call(
            &crate::type_tag::MoveTarget::new("0x1234".parse().unwrap(), "m", "f"),
            vec![],
            vec![obj, clock],
        );
        b.finish()
    }

    fn owned_ref() -> ObjectArg {
        ObjectArg::ImmOrOwnedObject(ObjectRef {
            object_id: "0xabc".parse().unwrap(),
            version: 3,
            digest: Digest::new([2u8; 32]),
        })
    }

    #[test]
    fn resolves_inputs_in_order() {
        let sender: SuiAddress = "0x5".parse().unwrap();
        let data =
            TransactionData::from_unresolved(sample(), vec![owned_ref()], sender, gas(sender)).unwrap();
        let pt = data.programmable();
        assert_eq!(pt.inputs[0], CallArg::Object(owned_ref()));
        assert!(matches!(
            pt.inputs[1],
            CallArg::Object(ObjectArg::SharedObject { initial_shared_version: 1, mutable: false, .. })
        ));
        assert_eq!(data.sender(), sender);
    }

    #[test]
    fn missing_object_resolution_rejected() {
        let sender: SuiAddress = "0x5".parse().unwrap();
        assert_eq!(
            TransactionData::from_unresolved(sample(), vec![], sender, gas(sender)),
            Err(TransactionError::InputCountMismatch { expected: 1, actual: 0 })
        );
    }

    #[test]
    fn empty_gas_payment_rejected() {
        let sender: SuiAddress = "0x5".parse().unwrap();
        let mut g = gas(sender);
        g.payment.clear();
        assert_eq!(
            TransactionData::from_unresolved(sample(), vec![owned_ref()], sender, g),
            Err(TransactionError::NoGasPayment)
        );
    }

    #[test]
    fn bcs_layout_prefix_and_roundtrip() {
        let sender: SuiAddress = "0x5".parse().unwrap();
        let data =
            TransactionData::from_unresolved(sample(), vec![owned_ref()], sender, gas(sender)).unwrap();
        let bytes = data.to_bcs_bytes().unwrap();
        // V1, ProgrammableTransaction, two inputs, first is an Object/ImmOrOwned.
        assert_eq!(&bytes[..5], &[0, 0, 2, 1, 0]);
        // Expiration::None is the final byte.
        assert_eq!(*bytes.last().unwrap(), 0);
        assert_eq!(TransactionData::from_bcs_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn move_call_arguments_survive_encoding() {
        let sender: SuiAddress = "0x5".parse().unwrap();
        let data =
            TransactionData::from_unresolved(sample(), vec![owned_ref()], sender, gas(sender)).unwrap();
        let Command::MoveCall(call) = &data.programmable().commands[0] else {
            panic!("expected move call");
        };
        assert_eq!(call.arguments, vec![Argument::Input(0), Argument::Input(1)]);
    }
}
