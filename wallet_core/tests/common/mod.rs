#![allow(dead_code)]

use paystream_crypto::SerializedSignature;
use paystream_nullables::{ExecutedTransaction, NullChain, NullClock, NullWallet};
use paystream_transactions::data::ProgrammableTransaction;
use paystream_transactions::ptb::ProgrammableMoveCall;
use paystream_transactions::{Argument, CallArg, Command, ObjectArg, TransactionData};
use paystream_types::{Mist, ObjectId, SuiAddress};
use paystream_wallet_core::{ClientSettings, PaystreamClient};

pub const NOW: u64 = 1_700_000_000;
pub const SEED: [u8; 32] = [7; 32];

pub type TestClient = PaystreamClient<NullChain, NullWallet, NullClock>;

/// A chain holding one large gas coin.
pub fn funded_chain() -> NullChain {
    let chain = NullChain::new();
    chain.add_coin(ObjectId::new([0xc1; 32]), Mist::from_sui(100_000).raw());
    chain
}

pub fn client_with(chain: NullChain, wallet: NullWallet) -> TestClient {
    PaystreamClient::new(chain, wallet, ClientSettings::default()).with_clock(NullClock::new(NOW))
}

pub fn client() -> TestClient {
    client_with(funded_chain(), NullWallet::new(SEED))
}

pub fn address(byte: u8) -> SuiAddress {
    SuiAddress::new([byte; 32])
}

pub fn only_tx(chain: &NullChain) -> ExecutedTransaction {
    let executed = chain.executed();
    assert_eq!(executed.len(), 1, "expected exactly one submission");
    executed.into_iter().next().unwrap()
}

pub fn data(tx: &ExecutedTransaction) -> TransactionData {
    tx.data.clone().expect("submitted bytes decode as TransactionData")
}

pub fn programmable(data: &TransactionData) -> ProgrammableTransaction {
    data.programmable().clone()
}

/// The single Move call of a transaction.
pub fn move_call(pt: &ProgrammableTransaction) -> ProgrammableMoveCall {
    let calls: Vec<_> = pt
        .commands
        .iter()
        .filter_map(|c| match c {
            Command::MoveCall(call) => Some(call.as_ref().clone()),
            _ => None,
        })
        .collect();
    assert_eq!(calls.len(), 1);
    calls.into_iter().next().unwrap()
}

pub fn input(pt: &ProgrammableTransaction, arg: Argument) -> &CallArg {
    match arg {
        Argument::Input(i) => &pt.inputs[i as usize],
        other => panic!("expected an input argument, got {other:?}"),
    }
}

pub fn pure_u64(pt: &ProgrammableTransaction, arg: Argument) -> u64 {
    match input(pt, arg) {
        CallArg::Pure(bytes) => u64::from_le_bytes(bytes.as_slice().try_into().unwrap()),
        other => panic!("expected pure u64, got {other:?}"),
    }
}

pub fn pure_address(pt: &ProgrammableTransaction, arg: Argument) -> SuiAddress {
    match input(pt, arg) {
        CallArg::Pure(bytes) => {
            let raw: [u8; 32] = bytes.as_slice().try_into().unwrap();
            SuiAddress::new(raw)
        }
        other => panic!("expected pure address, got {other:?}"),
    }
}

pub fn object_arg(pt: &ProgrammableTransaction, arg: Argument) -> ObjectArg {
    match input(pt, arg) {
        CallArg::Object(obj) => obj.clone(),
        other => panic!("expected object, got {other:?}"),
    }
}

/// The MIST split off the gas coin by the first command.
pub fn split_amount(pt: &ProgrammableTransaction) -> u64 {
    match &pt.commands[0] {
        Command::SplitCoins(Argument::GasCoin, amounts) => pure_u64(pt, amounts[0]),
        other => panic!("expected split of the gas coin, got {other:?}"),
    }
}

pub fn assert_signed_by_sender(tx: &ExecutedTransaction) {
    assert_eq!(tx.signatures.len(), 1);
    let sig = SerializedSignature::from_base64(&tx.signatures[0]).unwrap();
    assert!(sig.verify_transaction(&tx.tx_bytes));
    assert_eq!(paystream_crypto::derive_address(&sig.public_key), data(tx).sender());
}
