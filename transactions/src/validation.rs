//! Pre-submission checks.
//!
//! Every numeric argument is already an integer by construction; these checks catch
//! the remaining ways a transaction would be rejected on chain with an opaque error:
//! zero amounts, empty time windows and dangling argument references.

use crate::contracts::Contracts;
use crate::error::TransactionError;
use crate::ptb::{Argument, Command, UnresolvedTransaction};
use crate::type_tag::TypeTag;
use crate::Operation;

/// Every builder splits its payment off the gas coin, so the contracts must be
/// instantiated with SUI.
pub fn validate_contracts(contracts: &Contracts) -> Result<(), TransactionError> {
    if contracts.coin_type != TypeTag::sui() {
        return Err(TransactionError::UnsupportedCoinType(
            contracts.coin_type.to_string(),
        ));
    }
    Ok(())
}

/// Validate the parameters of an operation.
pub fn validate_operation(op: &Operation) -> Result<(), TransactionError> {
    match op {
        Operation::CreateStream(tx) => {
            if tx.topup.is_zero() {
                return Err(TransactionError::ZeroAmount { field: "topup" });
            }
            if tx.amount_per_second.is_zero() {
                return Err(TransactionError::ZeroAmount {
                    field: "amount_per_second",
                });
            }
            if tx.end <= tx.start {
                return Err(TransactionError::InvalidTimeWindow {
                    reason: format!("end {} is not after start {}", tx.end, tx.start),
                });
            }
        }
        Operation::CreateVesting(tx) => {
            if tx.amount.is_zero() {
                return Err(TransactionError::ZeroAmount { field: "amount" });
            }
            if tx.period_secs == 0 {
                return Err(TransactionError::InvalidTimeWindow {
                    reason: "vesting period is zero".into(),
                });
            }
        }
        Operation::CreatePayroll(tx) => {
            if tx.funding.is_zero() {
                return Err(TransactionError::ZeroAmount { field: "funding" });
            }
            if tx.duration == 0 {
                return Err(TransactionError::InvalidTimeWindow {
                    reason: "payroll duration is zero".into(),
                });
            }
        }
        Operation::AddEmployee(tx) => {
            if tx.amount.is_zero() {
                return Err(TransactionError::ZeroAmount { field: "amount" });
            }
        }
        Operation::WithdrawStream(_)
        | Operation::ClaimVesting(_)
        | Operation::ProcessPayment(_)
        | Operation::ProcessAllPayments(_) => {}
    }
    Ok(())
}

/// Validate the structure of a built transaction.
pub fn validate_structure(tx: &UnresolvedTransaction) -> Result<(), TransactionError> {
    if tx.commands.is_empty() {
        return Err(TransactionError::Empty);
    }
    if tx.inputs.len() > u16::MAX as usize {
        return Err(TransactionError::TooManyInputs(tx.inputs.len()));
    }

    for (index, command) in tx.commands.iter().enumerate() {
        let args: Vec<&Argument> = match command {
            Command::MoveCall(call) => call.arguments.iter().collect(),
            Command::TransferObjects(objects, to) => objects.iter().chain([to]).collect(),
            Command::SplitCoins(coin, amounts) => {
                if amounts.is_empty() {
                    return Err(TransactionError::InvalidArgument {
                        command: index,
                        reason: "split without amounts".into(),
                    });
                }
                [coin].into_iter().chain(amounts.iter()).collect()
            }
            Command::MergeCoins(target, sources) => [target].into_iter().chain(sources.iter()).collect(),
        };
        for arg in args {
            check_argument(tx, index, arg)?;
        }
        if let Command::SplitCoins(_, amounts) = command {
            for amount in amounts {
                if let Argument::Input(i) = amount {
                    check_positive_u64(tx, index, *i)?;
                }
            }
        }
    }
    Ok(())
}

fn check_argument(
    tx: &UnresolvedTransaction,
    command: usize,
    arg: &Argument,
) -> Result<(), TransactionError> {
    let invalid = |reason: String| TransactionError::InvalidArgument { command, reason };
    match *arg {
        Argument::GasCoin => Ok(()),
        Argument::Input(i) if (i as usize) < tx.inputs.len() => Ok(()),
        Argument::Input(i) => Err(invalid(format!("input {i} out of range"))),
        Argument::Result(r) if (r as usize) < command => Ok(()),
        Argument::Result(r) => Err(invalid(format!("result {r} is not from an earlier command"))),
        Argument::NestedResult(r, k) => {
            if r as usize >= command {
                return Err(invalid(format!("result {r} is not from an earlier command")));
            }
            match &tx.commands[r as usize] {
                Command::SplitCoins(_, amounts) if (k as usize) < amounts.len() => Ok(()),
                Command::SplitCoins(_, _) => Err(invalid(format!("split {r} has no output {k}"))),
                // Move calls may return tuples; their arity is not known client-side.
                _ => Ok(()),
            }
        }
    }
}

fn check_positive_u64(
    tx: &UnresolvedTransaction,
    command: usize,
    input: u16,
) -> Result<(), TransactionError> {
    use crate::ptb::UnresolvedInput;
    match tx.inputs.get(input as usize) {
        Some(UnresolvedInput::Pure(bytes)) if bytes.len() == 8 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            if u64::from_le_bytes(raw) == 0 {
                return Err(TransactionError::ZeroAmount { field: "split amount" });
            }
            Ok(())
        }
        _ => Err(TransactionError::InvalidArgument {
            command,
            reason: format!("split amount input {input} is not a u64"),
        }),
    }
}
