mod common;

use common::*;
use paystream_nullables::NullChain;
use paystream_transactions::{Argument, ObjectArg};
use paystream_types::{ObjectId, CLOCK_OBJECT_ID};
use paystream_wallet_core::{ActionError, VestingPreview, VestingRequest};
use serde_json::json;

fn request(amount: &str, cliff: &str, rate: &str, period: &str) -> VestingRequest {
    VestingRequest {
        beneficiary_address: address(0x33).to_string(),
        amount: amount.into(),
        cliff_seconds: cliff.into(),
        release_rate: rate.into(),
        period_seconds: period.into(),
    }
}

#[tokio::test]
async fn create_vesting_worked_example() {
    let client = client();
    let wallet_id = ObjectId::new([0x77; 32]);
    client.chain().queue_result(NullChain::success_creating(
        1,
        wallet_id,
        "0x3ef6::linear_vesting::Wallet<0x2::sui::SUI>",
    ));

    let req = request("1000", "86400", "0.01", "2592000");
    let preview = VestingPreview::from_inputs(&req.amount, &req.cliff_seconds, &req.release_rate, &req.period_seconds)
        .unwrap();
    assert_eq!(preview.formatted_cliff.as_deref(), Some("1 day"));
    assert_eq!(preview.formatted_period, "30 days");

    let created = client.create_vesting(&req).await.unwrap();
    assert_eq!(created.vesting_id, Some(wallet_id));
    assert_eq!(created.plan.start.as_secs(), NOW + 86_400);

    let tx = only_tx(client.chain());
    assert_signed_by_sender(&tx);
    let pt = programmable(&data(&tx));
    assert_eq!(split_amount(&pt), 1_000_000_000_000);
    let call = move_call(&pt);
    assert_eq!(call.module, "linear_vesting");
    assert_eq!(call.function, "entry_new");
    assert_eq!(call.arguments[0], Argument::NestedResult(0, 0));
    assert!(matches!(
        object_arg(&pt, call.arguments[1]),
        ObjectArg::SharedObject { id, mutable: false, .. } if id == CLOCK_OBJECT_ID
    ));
    assert_eq!(pure_u64(&pt, call.arguments[2]), NOW + 86_400);
    assert_eq!(pure_u64(&pt, call.arguments[3]), 2_592_000);
    assert_eq!(pure_address(&pt, call.arguments[4]), address(0x33));
}

#[tokio::test]
async fn zero_cliff_starts_now_and_fractions_truncate() {
    let client = client();
    let created = client
        .create_vesting(&request("1", "0", "1", "59.9"))
        .await
        .unwrap();
    assert_eq!(created.plan.start.as_secs(), NOW);
    assert_eq!(created.plan.period_secs, 59);
}

#[tokio::test]
async fn sub_mist_release_rate_is_still_positive() {
    let client = client();
    client
        .create_vesting(&request("1", "0", "0.0000000001", "60"))
        .await
        .unwrap();
    assert_eq!(client.chain().execute_count(), 1);
}

#[tokio::test]
async fn vesting_input_errors() {
    let client = client();
    let cases = [
        (request("1", "", "1", "1"), "Please fill all fields"),
        (request("0", "0", "1", "1"), "Amounts must be greater than 0"),
        (request("1", "0", "0", "1"), "Amounts must be greater than 0"),
        (request("1", "0", "1", "0"), "Amounts must be greater than 0"),
        (request("1", "-5", "1", "1"), "Amounts must be greater than 0"),
        (request("1", "x", "1", "1"), "Invalid number values"),
    ];
    for (req, message) in cases {
        let err = client.create_vesting(&req).await.unwrap_err();
        assert_eq!(err.user_message(), message, "{req:?}");
    }

    let mut bad_address = request("1", "0", "1", "1");
    bad_address.beneficiary_address = "33".into();
    let err = client.create_vesting(&bad_address).await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid beneficiary address format");
    assert_eq!(client.chain().execute_count(), 0);
}

#[tokio::test]
async fn claim_resolves_owned_wallet() {
    let client = client();
    let me = client.wallet().address().unwrap();
    let wallet_id = ObjectId::new([0x77; 32]);
    client
        .chain()
        .add_owned_object(wallet_id, 12, me, "0x1::linear_vesting::Wallet<0x2::sui::SUI>");

    client.claim_vesting(&wallet_id.to_string()).await.unwrap();

    let tx = only_tx(client.chain());
    let pt = programmable(&data(&tx));
    let call = move_call(&pt);
    assert_eq!(call.function, "entry_claim");
    match object_arg(&pt, call.arguments[0]) {
        ObjectArg::ImmOrOwnedObject(r) => {
            assert_eq!(r.object_id, wallet_id);
            assert_eq!(r.version, 12);
        }
        other => panic!("expected owned object, got {other:?}"),
    }
}

#[tokio::test]
async fn claim_input_errors() {
    let client = client();
    assert_eq!(
        client.claim_vesting("").await.unwrap_err().user_message(),
        "Please provide a vesting ID"
    );
    assert_eq!(
        client.claim_vesting("77").await.unwrap_err().user_message(),
        "Invalid vesting ID format"
    );
    assert!(matches!(
        client.claim_vesting("0x77").await.unwrap_err(),
        ActionError::ObjectNotFound { .. }
    ));
}

#[tokio::test]
async fn shared_wallet_resolves_as_shared() {
    let client = client();
    let wallet_id = ObjectId::new([0x78; 32]);
    client
        .chain()
        .add_shared_object(wallet_id, 9, "0x1::linear_vesting::Wallet", json!({}));
    client.claim_vesting("0x7878787878787878787878787878787878787878787878787878787878787878").await.unwrap();
    let pt = programmable(&data(&only_tx(client.chain())));
    assert_eq!(
        object_arg(&pt, move_call(&pt).arguments[0]),
        ObjectArg::SharedObject {
            id: wallet_id,
            initial_shared_version: 9,
            mutable: true,
        }
    );
}
