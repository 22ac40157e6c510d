//! Programmable transaction blocks.
//!
//! A block is an ordered list of inputs and commands. Commands refer to inputs and to
//! earlier command results through [`Argument`]. The builder produces an
//! [`UnresolvedTransaction`]: object inputs are named by id only and must be resolved
//! against the chain (version, digest, sharing) before the transaction can be encoded.

use paystream_types::{Mist, ObjectId, SuiAddress, CLOCK_OBJECT_ID};
use serde::{Deserialize, Serialize};

use crate::type_tag::{MoveTarget, TypeTag};

/// Initial shared version of the system clock object.
pub const CLOCK_INITIAL_SHARED_VERSION: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The coin paying for gas.
    GasCoin,
    /// An input by index.
    Input(u16),
    /// The result of an earlier command.
    Result(u16),
    /// One value out of an earlier command that returned several.
    NestedResult(u16, u16),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

/// Command variants in on-chain enum order. Only a prefix of the full command set is
/// modelled, which keeps the indices of the variants used here correct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
    MergeCoins(Argument, Vec<Argument>),
}

/// An input before chain resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnresolvedInput {
    /// BCS bytes of a pure value.
    Pure(Vec<u8>),
    /// An object known only by id; ownership and version come from the chain.
    Object { id: ObjectId, mutable: bool },
    /// A shared object whose initial version is already known.
    Shared {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

/// A built transaction awaiting input and gas resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedTransaction {
    pub inputs: Vec<UnresolvedInput>,
    pub commands: Vec<Command>,
    /// Total MIST split off the gas coin; gas selection must cover this plus the budget.
    pub gas_spend: Mist,
}

impl UnresolvedTransaction {
    /// Ids of inputs that need an object lookup.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                UnresolvedInput::Object { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// The Move calls in command order.
    pub fn move_calls(&self) -> impl Iterator<Item = &ProgrammableMoveCall> {
        self.commands.iter().filter_map(|c| match c {
            Command::MoveCall(call) => Some(call.as_ref()),
            _ => None,
        })
    }
}

/// Incrementally assembles a programmable transaction.
#[derive(Debug, Default)]
pub struct PtbBuilder {
    inputs: Vec<UnresolvedInput>,
    commands: Vec<Command>,
    gas_spend: u64,
}

impl PtbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_input(&mut self, input: UnresolvedInput) -> Argument {
        self.inputs.push(input);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    fn push_command(&mut self, command: Command) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }

    /// A `u64` pure input (BCS: 8 bytes little-endian).
    pub fn pure_u64(&mut self, value: u64) -> Argument {
        self.push_input(UnresolvedInput::Pure(value.to_le_bytes().to_vec()))
    }

    /// An `address` pure input (BCS: 32 raw bytes).
    pub fn pure_address(&mut self, address: SuiAddress) -> Argument {
        self.push_input(UnresolvedInput::Pure(address.to_vec()))
    }

    /// An object input by id. Repeated ids share one input slot.
    pub fn object(&mut self, id: ObjectId, mutable: bool) -> Argument {
        let existing = self.inputs.iter().position(|input| match input {
            UnresolvedInput::Object { id: other, .. } | UnresolvedInput::Shared { id: other, .. } => {
                *other == id
            }
            UnresolvedInput::Pure(_) => false,
        });
        if let Some(index) = existing {
            if let UnresolvedInput::Object { mutable: m, .. } = &mut self.inputs[index] {
                *m |= mutable;
            }
            return Argument::Input(index as u16);
        }
        self.push_input(UnresolvedInput::Object { id, mutable })
    }

    /// The shared clock object, read-only.
    pub fn clock(&mut self) -> Argument {
        let existing = self.inputs.iter().position(|input| {
            matches!(input, UnresolvedInput::Shared { id, .. } if *id == CLOCK_OBJECT_ID)
        });
        if let Some(index) = existing {
            return Argument::Input(index as u16);
        }
        self.push_input(UnresolvedInput::Shared {
            id: CLOCK_OBJECT_ID,
            initial_shared_version: CLOCK_INITIAL_SHARED_VERSION,
            mutable: false,
        })
    }

    /// Split an exact amount off the gas coin, returning the new coin.
    pub fn split_gas(&mut self, amount: Mist) -> Argument {
        let amount_arg = self.pure_u64(amount.raw());
        let index = self.push_command(Command::SplitCoins(Argument::GasCoin, vec![amount_arg]));
        self.gas_spend = self.gas_spend.saturating_add(amount.raw());
        Argument::NestedResult(index, 0)
    }

    /// Call a Move function.
    pub fn move_call(
        &mut self,
        target: &MoveTarget,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Argument {
        let index = self.push_command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package: target.package,
            module: target.module.to_string(),
            function: target.function.to_string(),
            type_arguments,
            arguments,
        })));
        Argument::Result(index)
    }

    pub fn finish(self) -> UnresolvedTransaction {
        UnresolvedTransaction {
            inputs: self.inputs,
            commands: self.commands,
            gas_spend: Mist::new(self.gas_spend),
        }
    }
}
