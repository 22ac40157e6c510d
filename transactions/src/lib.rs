//! Transaction construction for the streaming, vesting and payroll contracts.
//!
//! Operations:
//! - **CreateStream**: split the top-up off the gas coin and open a stream to a recipient
//! - **WithdrawStream**: recipient withdraws the amount streamed so far
//! - **CreateVesting**: split the amount off the gas coin and lock it in a linear vesting wallet
//! - **ClaimVesting**: beneficiary claims the unlocked part of a vesting wallet
//! - **CreatePayroll**: create a payroll object with a bootstrap deposit
//! - **AddEmployee**: register one employee and salary on a payroll
//! - **ProcessPayment**: pay one employee
//! - **ProcessAllPayments**: pay every employee of a payroll
//!
//! Each operation builds an [`UnresolvedTransaction`]; the wallet layer resolves object
//! inputs and gas, then encodes a [`TransactionData`] for signing.

pub mod contracts;
pub mod data;
pub mod error;
pub mod payroll;
pub mod ptb;
pub mod stream;
pub mod type_tag;
pub mod validation;
pub mod vesting;

pub use contracts::Contracts;
pub use data::{CallArg, GasData, ObjectArg, ObjectRef, TransactionData};
pub use error::TransactionError;
pub use ptb::{Argument, Command, PtbBuilder, UnresolvedInput, UnresolvedTransaction};
pub use type_tag::{MoveTarget, StructTag, TypeTag};

use payroll::{AddEmployeeTx, CreatePayrollTx, ProcessAllPaymentsTx, ProcessPaymentTx};
use stream::{CreateStreamTx, WithdrawStreamTx};
use vesting::{ClaimVestingTx, CreateVestingTx};

/// Every on-chain action the client can submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateStream(CreateStreamTx),
    WithdrawStream(WithdrawStreamTx),
    CreateVesting(CreateVestingTx),
    ClaimVesting(ClaimVestingTx),
    CreatePayroll(CreatePayrollTx),
    AddEmployee(AddEmployeeTx),
    ProcessPayment(ProcessPaymentTx),
    ProcessAllPayments(ProcessAllPaymentsTx),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateStream(_) => "create_stream",
            Self::WithdrawStream(_) => "withdraw_stream",
            Self::CreateVesting(_) => "create_vesting",
            Self::ClaimVesting(_) => "claim_vesting",
            Self::CreatePayroll(_) => "create_payroll",
            Self::AddEmployee(_) => "add_employee",
            Self::ProcessPayment(_) => "process_payment",
            Self::ProcessAllPayments(_) => "process_all_payments",
        }
    }

    /// The `module::Type` of the object this operation creates, if any.
    pub fn created_object_type(&self) -> Option<&'static str> {
        match self {
            Self::CreateStream(_) => Some(contracts::STREAM_OBJECT_TYPE),
            Self::CreateVesting(_) => Some(contracts::VESTING_WALLET_OBJECT_TYPE),
            Self::CreatePayroll(_) => Some(contracts::PAYROLL_OBJECT_TYPE),
            _ => None,
        }
    }

    /// Validate parameters, build the commands and validate the result.
    pub fn build(&self, contracts: &Contracts) -> Result<UnresolvedTransaction, TransactionError> {
        validation::validate_contracts(contracts)?;
        validation::validate_operation(self)?;
        let tx = match self {
            Self::CreateStream(tx) => tx.build(contracts),
            Self::WithdrawStream(tx) => tx.build(contracts),
            Self::CreateVesting(tx) => tx.build(contracts),
            Self::ClaimVesting(tx) => tx.build(contracts),
            Self::CreatePayroll(tx) => tx.build(contracts),
            Self::AddEmployee(tx) => tx.build(contracts),
            Self::ProcessPayment(tx) => tx.build(contracts),
            Self::ProcessAllPayments(tx) => tx.build(contracts),
        };
        validation::validate_structure(&tx)?;
        tracing::debug!(
            operation = self.name(),
            inputs = tx.inputs.len(),
            commands = tx.commands.len(),
            gas_spend = tx.gas_spend.raw(),
            "built transaction"
        );
        Ok(tx)
    }
}
