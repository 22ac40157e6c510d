mod common;

use common::*;
use paystream_nullables::{NullChain, NullWallet};
use paystream_transactions::contracts::DEFAULT_STREAMING_PACKAGE;
use paystream_transactions::{Argument, ObjectArg, TypeTag};
use paystream_types::{Mist, ObjectId, UnitError, CLOCK_OBJECT_ID};
use paystream_wallet_core::{ActionError, ActionSlot, StreamRequest};
use serde_json::json;

fn request(recipient: &str, rate: &str, topup: &str) -> StreamRequest {
    StreamRequest {
        recipient_address: recipient.into(),
        amount_per_second: rate.into(),
        topup_balance: topup.into(),
    }
}

#[tokio::test]
async fn create_stream_worked_example() {
    let client = client();
    let recipient = address(0x42);
    let stream_id = ObjectId::new([0x51; 32]);
    client.chain().queue_result(NullChain::success_creating(
        1,
        stream_id,
        &format!("{DEFAULT_STREAMING_PACKAGE}::streaming::Stream<0x2::sui::SUI>"),
    ));

    let created = client
        .create_stream(&request(&recipient.to_string(), "0.001", "1000"))
        .await
        .unwrap();
    assert_eq!(created.stream_id, Some(stream_id));
    assert_eq!(created.plan.duration_secs(), 1_000_000);
    assert_eq!(created.plan.start.as_secs(), NOW);
    assert_eq!(created.plan.end.as_secs(), NOW + 1_000_000);

    let tx = only_tx(client.chain());
    assert_signed_by_sender(&tx);
    let data = data(&tx);
    assert_eq!(data.sender(), client.wallet().address().unwrap());
    assert_eq!(data.gas_data().budget, 20_000_000);
    assert_eq!(data.gas_data().price, 1_000);

    let pt = programmable(&data);
    assert_eq!(split_amount(&pt), 1_000_000_000_000);
    let call = move_call(&pt);
    assert_eq!(call.package.to_string(), DEFAULT_STREAMING_PACKAGE);
    assert_eq!(call.module, "streaming");
    assert_eq!(call.function, "create_stream_entry");
    assert_eq!(call.type_arguments, vec![TypeTag::sui()]);
    assert_eq!(call.arguments[0], Argument::NestedResult(0, 0));
    assert_eq!(pure_address(&pt, call.arguments[1]), recipient);
    assert_eq!(pure_u64(&pt, call.arguments[2]), NOW);
    assert_eq!(pure_u64(&pt, call.arguments[3]), NOW + 1_000_000);
    assert_eq!(
        object_arg(&pt, call.arguments[4]),
        ObjectArg::SharedObject {
            id: CLOCK_OBJECT_ID,
            initial_shared_version: 1,
            mutable: false,
        }
    );
}

#[tokio::test]
async fn missing_created_object_is_not_fatal() {
    let client = client();
    let created = client
        .create_stream(&request("0x42", "1", "10"))
        .await
        .unwrap();
    assert_eq!(created.stream_id, None);
    assert_eq!(created.plan.duration_secs(), 10);
}

#[tokio::test]
async fn rate_above_balance_is_rejected_before_signing() {
    let client = client();
    let err = client
        .create_stream(&request("0x42", "2", "1"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ActionError::Unit(UnitError::RateExceedsBalance { .. })
    ));
    assert_eq!(client.chain().execute_count(), 0);
    assert!(client.wallet().signed().is_empty());
}

#[tokio::test]
async fn input_errors() {
    let client = client();
    let cases = [
        (request("", "1", "1"), "Please fill all fields"),
        (request("42", "1", "1"), "Invalid recipient address format"),
        (request("0x42", "abc", "1"), "Invalid number values"),
        (request("0x42", "0", "1"), "Amounts must be greater than 0"),
        (
            request("0x42", "0.0000000001", "1"),
            "Amounts are too small - use larger values",
        ),
    ];
    for (req, message) in cases {
        let err = client.create_stream(&req).await.unwrap_err();
        assert_eq!(err.user_message(), message, "{req:?}");
    }
    assert_eq!(client.chain().execute_count(), 0);
}

#[tokio::test]
async fn disconnected_wallet_fails_first() {
    let client = client_with(funded_chain(), NullWallet::disconnected());
    let err = client.create_stream(&request("", "", "")).await.unwrap_err();
    assert!(matches!(err, ActionError::WalletNotConnected));
}

#[tokio::test]
async fn withdraw_by_recipient() {
    let client = client();
    let me = client.wallet().address().unwrap();
    let stream_id = ObjectId::new([0x51; 32]);
    client.chain().add_shared_object(
        stream_id,
        5,
        "0x1::streaming::Stream<0x2::sui::SUI>",
        json!({ "recipient": me.to_string(), "amount_per_second": "1000000" }),
    );

    client
        .withdraw_from_stream(&stream_id.to_string())
        .await
        .unwrap();

    let tx = only_tx(client.chain());
    let pt = programmable(&data(&tx));
    let call = move_call(&pt);
    assert_eq!(call.function, "withdraw_entry");
    assert_eq!(
        object_arg(&pt, call.arguments[0]),
        ObjectArg::SharedObject {
            id: stream_id,
            initial_shared_version: 5,
            mutable: true,
        }
    );
    assert_eq!(client.wallet().reported(), vec![vec![1, 2, 3]]);
}

#[tokio::test]
async fn withdraw_by_someone_else_never_submits() {
    let client = client();
    let stream_id = ObjectId::new([0x51; 32]);
    client.chain().add_shared_object(
        stream_id,
        5,
        "0x1::streaming::Stream<0x2::sui::SUI>",
        json!({ "recipient": address(0x99).to_string() }),
    );

    let err = client
        .withdraw_from_stream(&stream_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::NotRecipient { .. }));
    assert_eq!(err.user_message(), "You are not the recipient of this stream");
    assert_eq!(client.chain().execute_count(), 0);
    assert!(client.wallet().signed().is_empty());
}

#[tokio::test]
async fn withdraw_from_object_without_recipient_is_refused() {
    let client = client();
    let stream_id = ObjectId::new([0x52; 32]);
    client.chain().add_shared_object(
        stream_id,
        5,
        "0x1::streaming::Stream<0x2::sui::SUI>",
        json!({ "amount_per_second": "1000000" }),
    );

    let err = client
        .withdraw_from_stream(&stream_id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::NotRecipient { .. }));
    assert_eq!(err.user_message(), "You are not the recipient of this stream");
    assert_eq!(client.chain().execute_count(), 0);
}

#[tokio::test]
async fn withdraw_unknown_stream() {
    let client = client();
    let err = client.withdraw_from_stream("0x51").await.unwrap_err();
    assert_eq!(err.user_message(), "Stream not found");
    assert_eq!(client.chain().execute_count(), 0);

    let err = client.withdraw_from_stream("51").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid stream ID format");
    let err = client.withdraw_from_stream("").await.unwrap_err();
    assert_eq!(err.user_message(), "Stream ID is required");
}

#[tokio::test]
async fn action_slot_tracks_a_real_submission() {
    let client = client();
    let mut slot = ActionSlot::new();
    let state = slot
        .run(client.create_stream(&request("0x42", "0.5", "1")))
        .await;
    let created = state.success().unwrap();
    assert_eq!(created.plan.duration_secs(), 2);
    assert_eq!(created.plan.topup, Mist::from_sui(1));

    slot.run(client.create_stream(&request("0x42", "2", "1")))
        .await;
    assert_eq!(
        slot.state().error(),
        Some("Amount per second cannot be greater than total balance")
    );
}
