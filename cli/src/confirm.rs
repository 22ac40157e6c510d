//! Terminal approval in front of the keystore wallet.

use paystream_transactions::{Argument, CallArg, Command, TransactionData};
use paystream_types::{Mist, SuiAddress};
use paystream_wallet_core::{KeystoreWallet, SignedTransaction, WalletError, WalletSigner};
use std::io::{self, BufRead, Write};

/// Shows each transaction on stderr and asks before signing it.
///
/// Declining returns [`WalletError::Rejected`], which the actions report as a
/// rejected signature. With `assume_yes` every transaction is signed directly.
pub struct ConfirmingWallet {
    inner: KeystoreWallet,
    assume_yes: bool,
}

impl ConfirmingWallet {
    pub fn new(inner: KeystoreWallet, assume_yes: bool) -> Self {
        Self { inner, assume_yes }
    }
}

impl WalletSigner for ConfirmingWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.inner.current_account()
    }

    async fn sign_transaction(&self, data: &TransactionData) -> Result<SignedTransaction, WalletError> {
        if !self.assume_yes {
            let stdin = io::stdin();
            let approved = confirm(&describe(data), &mut stdin.lock(), &mut io::stderr())?;
            if !approved {
                tracing::info!(sender = %data.sender(), "signature declined");
                return Err(WalletError::Rejected);
            }
        }
        self.inner.sign_transaction(data).await
    }

    async fn report_effects(&self, raw_effects: &[u8]) -> Result<(), WalletError> {
        self.inner.report_effects(raw_effects).await
    }
}

/// One line per command, plus sender and gas.
pub fn describe(data: &TransactionData) -> Vec<String> {
    let pt = data.programmable();
    let mut lines = vec![format!("sender      {}", data.sender())];
    for command in &pt.commands {
        let line = match command {
            Command::SplitCoins(Argument::GasCoin, amounts) => {
                let total = amounts
                    .iter()
                    .filter_map(|a| pure_u64(&pt.inputs, *a))
                    .fold(Mist::ZERO, |acc, raw| acc.saturating_add(Mist::new(raw)));
                format!("withdraw    {} SUI from the gas coin", total.to_sui_string())
            }
            Command::MoveCall(call) => {
                format!("call        {}::{}::{}", call.package, call.module, call.function)
            }
            other => format!("command     {other:?}"),
        };
        lines.push(line);
    }
    let gas = data.gas_data();
    lines.push(format!(
        "gas budget  {} SUI at {} MIST per unit",
        Mist::new(gas.budget).to_sui_string(),
        gas.price
    ));
    lines
}

fn pure_u64(inputs: &[CallArg], arg: Argument) -> Option<u64> {
    let Argument::Input(index) = arg else {
        return None;
    };
    match inputs.get(index as usize)? {
        CallArg::Pure(bytes) => Some(u64::from_le_bytes(bytes.as_slice().try_into().ok()?)),
        CallArg::Object(_) => None,
    }
}

/// Print `summary` and read a yes/no answer. Anything but "y" or "yes" declines.
pub fn confirm(summary: &[String], input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    writeln!(out, "Transaction to sign:")?;
    for line in summary {
        writeln!(out, "  {line}")?;
    }
    write!(out, "Sign and submit? [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paystream_transactions::stream::CreateStreamTx;
    use paystream_transactions::{Contracts, GasData, ObjectRef, Operation};
    use paystream_types::{Digest, ObjectId, Timestamp};
    use std::io::Cursor;

    fn stream_data() -> TransactionData {
        let sender: SuiAddress = "0x5e".parse().unwrap();
        let plan = CreateStreamTx::plan(
            "0x42".parse().unwrap(),
            Mist::from_sui(1),
            Mist::from_sui(10),
            Timestamp::new(1_700_000_000),
        )
        .unwrap();
        let tx = Operation::CreateStream(plan)
            .build(&Contracts::default())
            .unwrap();
        TransactionData::from_unresolved(
            tx,
            vec![],
            sender,
            GasData {
                payment: vec![ObjectRef {
                    object_id: ObjectId::new([1; 32]),
                    version: 1,
                    digest: Digest::new([2; 32]),
                }],
                owner: sender,
                price: 1_000,
                budget: 20_000_000,
            },
        )
        .unwrap()
    }

    #[test]
    fn describes_split_and_call() {
        let lines = describe(&stream_data());
        assert!(lines[0].ends_with(&"0x5e".parse::<SuiAddress>().unwrap().to_string()));
        assert_eq!(lines[1], "withdraw    10 SUI from the gas coin");
        assert!(lines[2].ends_with("::streaming::create_stream_entry"));
        assert_eq!(lines[3], "gas budget  0.02 SUI at 1000 MIST per unit");
    }

    #[test]
    fn only_yes_approves() {
        let summary = vec!["call 0x1::m::f".to_string()];
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("\n", false), ("no\n", false), ("", false)] {
            let mut out = Vec::new();
            let approved = confirm(&summary, &mut Cursor::new(answer), &mut out).unwrap();
            assert_eq!(approved, expected, "{answer:?}");
            let shown = String::from_utf8(out).unwrap();
            assert!(shown.contains("call 0x1::m::f"));
            assert!(shown.ends_with("[y/N] "));
        }
    }
}
