//! Turning a built transaction into signable `TransactionData`: object inputs are
//! looked up on chain and gas coins are selected from the sender's balance.

use paystream_transactions::{
    GasData, ObjectArg, ObjectRef, TransactionData, UnresolvedInput, UnresolvedTransaction,
};
use paystream_types::{Mist, ObjectId, SuiAddress};

use crate::chain::{ChainClient, ObjectOptions, Owner};
use crate::error::ActionError;

/// Coin type paying for gas.
pub const GAS_COIN_TYPE: &str = "0x2::sui::SUI";

/// Most coins a transaction may use as gas payment.
pub const MAX_GAS_COINS: usize = 256;

/// Resolve object inputs and gas for `tx`.
pub async fn resolve_transaction<C: ChainClient>(
    chain: &C,
    tx: UnresolvedTransaction,
    sender: SuiAddress,
    gas_budget: u64,
) -> Result<TransactionData, ActionError> {
    let mut object_args = Vec::new();
    for (id, mutable) in object_inputs(&tx) {
        object_args.push(resolve_object(chain, id, mutable).await?);
    }

    let price = chain.reference_gas_price().await?;
    let needed = tx.gas_spend.saturating_add(Mist::new(gas_budget));
    let input_ids = tx.object_ids();
    let payment = select_gas(chain, sender, needed, &input_ids).await?;

    tracing::debug!(
        sender = %sender,
        objects = object_args.len(),
        gas_coins = payment.len(),
        price,
        budget = gas_budget,
        "resolved transaction"
    );

    let data = TransactionData::from_unresolved(
        tx,
        object_args,
        sender,
        GasData {
            payment,
            owner: sender,
            price,
            budget: gas_budget,
        },
    )?;
    Ok(data)
}

fn object_inputs(tx: &UnresolvedTransaction) -> Vec<(ObjectId, bool)> {
    tx.inputs
        .iter()
        .filter_map(|input| match input {
            UnresolvedInput::Object { id, mutable } => Some((*id, *mutable)),
            _ => None,
        })
        .collect()
}

async fn resolve_object<C: ChainClient>(
    chain: &C,
    id: ObjectId,
    mutable: bool,
) -> Result<ObjectArg, ActionError> {
    let object = chain
        .get_object(id, ObjectOptions::owner())
        .await?
        .ok_or(ActionError::ObjectNotFound { kind: "Object", id })?;
    Ok(match object.owner {
        Some(Owner::Shared {
            initial_shared_version,
        }) => ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        },
        _ => ObjectArg::ImmOrOwnedObject(object.object_ref()),
    })
}

/// Pick coins, largest first within each page, until their balance covers `needed`.
async fn select_gas<C: ChainClient>(
    chain: &C,
    owner: SuiAddress,
    needed: Mist,
    exclude: &[ObjectId],
) -> Result<Vec<ObjectRef>, ActionError> {
    let mut selected = Vec::new();
    let mut total = Mist::ZERO;
    let mut cursor = None;

    loop {
        let page = chain.get_coins(owner, GAS_COIN_TYPE, cursor).await?;
        let mut coins: Vec<_> = page
            .data
            .into_iter()
            .filter(|c| c.balance > 0 && !exclude.contains(&c.coin_object_id))
            .collect();
        coins.sort_by(|a, b| b.balance.cmp(&a.balance));

        for coin in coins {
            if selected.len() == MAX_GAS_COINS {
                break;
            }
            total = total.saturating_add(Mist::new(coin.balance));
            selected.push(coin.object_ref());
            if total >= needed {
                return Ok(selected);
            }
        }

        if !page.has_next_page || selected.len() == MAX_GAS_COINS {
            break;
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Err(ActionError::InsufficientFunds {
        needed,
        available: total,
    })
}
