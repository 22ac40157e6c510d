mod common;

use common::*;
use paystream_nullables::NullChain;
use paystream_transactions::{Argument, ObjectArg};
use paystream_types::{Mist, ObjectId};
use paystream_wallet_core::{
    ActionError, DistributionList, DistributionMode, ItemOutcome, PayrollDistribution,
};
use serde_json::json;

const PAYROLL_TYPE: &str = "0x52b1::payroll::Payroll<0x2::sui::SUI>";

fn payroll_id() -> ObjectId {
    ObjectId::new([0x9a; 32])
}

/// A client whose chain already knows the payroll object.
fn client_with_payroll() -> TestClient {
    let client = client();
    client
        .chain()
        .add_shared_object(payroll_id(), 3, PAYROLL_TYPE, json!({}));
    client
}

#[tokio::test]
async fn create_payroll_splits_bootstrap_and_extracts_id() {
    let client = client();
    client
        .chain()
        .queue_result(NullChain::success_creating(1, payroll_id(), PAYROLL_TYPE));

    let created = client.create_payroll().await.unwrap();
    assert_eq!(created.payroll_id, Some(payroll_id()));

    let pt = programmable(&data(&only_tx(client.chain())));
    assert_eq!(split_amount(&pt), 5_000_000_000);
    let call = move_call(&pt);
    assert_eq!(call.function, "create_payroll");
    assert_eq!(call.arguments[0], Argument::NestedResult(0, 0));
    assert_eq!(pure_u64(&pt, call.arguments[1]), 2_592_000_000);
}

#[tokio::test]
async fn add_employee_converts_amount_to_mist() {
    let client = client_with_payroll();
    client
        .add_employee(&payroll_id().to_string(), &address(0xe1).to_string(), "2.5")
        .await
        .unwrap();

    let pt = programmable(&data(&only_tx(client.chain())));
    let call = move_call(&pt);
    assert_eq!(call.function, "add_employee_entry");
    assert_eq!(
        object_arg(&pt, call.arguments[0]),
        ObjectArg::SharedObject {
            id: payroll_id(),
            initial_shared_version: 3,
            mutable: true,
        }
    );
    assert_eq!(pure_u64(&pt, call.arguments[1]), 2_500_000_000);
    assert_eq!(pure_address(&pt, call.arguments[2]), address(0xe1));
}

#[tokio::test]
async fn process_payment_and_pay_all() {
    let client = client_with_payroll();
    client
        .process_payment(&payroll_id().to_string(), &address(0xe1).to_string())
        .await
        .unwrap();
    client
        .process_all_payments(&payroll_id().to_string())
        .await
        .unwrap();

    let executed = client.chain().executed();
    assert_eq!(executed.len(), 2);
    let pay_one = programmable(&data(&executed[0]));
    let call = move_call(&pay_one);
    assert_eq!(call.function, "process_payment_entry");
    assert_eq!(pure_address(&pay_one, call.arguments[1]), address(0xe1));
    assert_eq!(call.arguments.len(), 3);

    let pay_all = programmable(&data(&executed[1]));
    let call = move_call(&pay_all);
    assert_eq!(call.function, "process_all_payments");
    assert_eq!(call.arguments.len(), 2);
}

#[tokio::test]
async fn payroll_input_errors() {
    let client = client_with_payroll();
    let err = client
        .add_employee("9a", &address(1).to_string(), "1")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid payroll ID format");
    let err = client
        .add_employee(&payroll_id().to_string(), &address(1).to_string(), "0")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Amounts must be greater than 0");
    assert_eq!(
        client.process_all_payments("").await.unwrap_err().user_message(),
        "Please provide a payroll ID"
    );
    assert_eq!(client.chain().execute_count(), 0);
}

#[tokio::test]
async fn distribute_creates_adds_and_pays() {
    let client = client_with_payroll();
    client
        .chain()
        .queue_result(NullChain::success_creating(1, payroll_id(), PAYROLL_TYPE));
    let list = DistributionList::from_rows(vec![
        (address(0xe1).to_string(), "300".to_string()),
        (address(0xe2).to_string(), "1".to_string()),
    ]);
    assert_eq!(list.total_display(), "301.00");

    let report = client.distribute(None, &list).await.unwrap();
    assert_eq!(report.payroll_id, payroll_id());
    assert_eq!(report.created, Some(paystream_types::Digest::new([1; 32])));
    assert!(report.is_complete());
    assert_eq!(report.summary(), None);

    let functions: Vec<String> = client
        .chain()
        .executed()
        .iter()
        .map(|tx| move_call(&programmable(&data(tx))).function)
        .collect();
    assert_eq!(
        functions,
        [
            "create_payroll",
            "add_employee_entry",
            "add_employee_entry",
            "process_payment_entry",
            "process_payment_entry"
        ]
    );

    let executed = client.chain().executed();
    let first_add = programmable(&data(&executed[1]));
    assert_eq!(
        pure_u64(&first_add, move_call(&first_add).arguments[1]),
        Mist::from_sui(300).raw()
    );
}

#[tokio::test]
async fn distribute_reports_partial_failures() {
    let client = client_with_payroll();
    // add e1 ok, add e3 fails on chain, pay e1 ok
    client.chain().queue_result(NullChain::success(2));
    client
        .chain()
        .queue_result(NullChain::failure(3, "MoveAbort(payroll, 4)"));
    client.chain().queue_result(NullChain::success(4));

    let list = DistributionList::from_rows(vec![
        (address(0xe1).to_string(), "10".to_string()),
        ("not-an-address".to_string(), "1".to_string()),
        (address(0xe3).to_string(), "0.5".to_string()),
    ]);

    let report = client
        .distribute(Some(&payroll_id().to_string()), &list)
        .await
        .unwrap();
    assert_eq!(report.created, None);
    assert!(!report.is_complete());
    assert_eq!(client.chain().execute_count(), 3);

    let e = &report.employees;
    assert_eq!(
        e[0].added,
        ItemOutcome::Succeeded {
            digest: paystream_types::Digest::new([2; 32])
        }
    );
    assert_eq!(
        e[0].paid,
        ItemOutcome::Succeeded {
            digest: paystream_types::Digest::new([4; 32])
        }
    );
    assert_eq!(
        e[1].added,
        ItemOutcome::Failed {
            message: "Invalid employee address format".into()
        }
    );
    assert_eq!(e[1].paid, ItemOutcome::Skipped);
    assert!(matches!(&e[2].added, ItemOutcome::Failed { message } if message.contains("MoveAbort")));
    assert_eq!(e[2].paid, ItemOutcome::Skipped);
    assert_eq!(report.failed().count(), 2);
    assert!(report
        .summary()
        .unwrap()
        .starts_with("Some employees were not added/paid"));
}

#[tokio::test]
async fn distribute_stops_when_payroll_id_is_missing() {
    let client = client_with_payroll();
    let list = DistributionList::new();
    let err = client.distribute(None, &list).await.unwrap_err();
    assert!(matches!(err, ActionError::MissingCreatedObject { .. }));
    assert_eq!(client.chain().execute_count(), 1);
}

#[test]
fn single_mode_list_is_one_row() {
    let mut list = DistributionList::new();
    list.update(1, Some("0xe1"), Some("300"));
    assert_eq!(list.mode(), DistributionMode::Single);
    list.set_mode(DistributionMode::Multiple);
    list.add();
    list.update(2, Some("0xe2"), Some("1"));
    assert_eq!(list.total_display(), "301.00");
    list.set_mode(DistributionMode::Single);
    assert_eq!(list.entries(), &[PayrollDistribution::empty(1)]);
}
