pub mod execution_entry_point;

use std::collections::{HashMap, HashSet};

use crate::definitions::constants::CONSTRUCTOR_ENTRY_POINT_SELECTOR;
use crate::definitions::transaction_type::TransactionType;
use crate::services::contract_class::EntryPointType;
use crate::transaction::error::TransactionError;
use crate::utils::{Address, ClassHash};
use crate::Felt252;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallType {
    Call,
    Delegate,
}

// --------------------
// CallInfo structure
// --------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallInfo {
    pub caller_address: Address,
    pub call_type: Option<CallType>,
    pub contract_address: Address,
    pub class_hash: Option<ClassHash>,
    pub entry_point_selector: Option<Felt252>,
    pub entry_point_type: Option<EntryPointType>,
    pub calldata: Vec<Felt252>,
    pub retdata: Vec<Felt252>,
    pub events: Vec<OrderedEvent>,
    pub storage_read_values: Vec<Felt252>,
    pub accessed_storage_keys: HashSet<[u8; 32]>,
    pub internal_calls: Vec<CallInfo>,
}

impl CallInfo {
    pub fn empty_constructor_call(
        contract_address: Address,
        caller_address: Address,
        class_hash: Option<ClassHash>,
    ) -> Self {
        CallInfo {
            caller_address,
            call_type: Some(CallType::Call),
            contract_address,
            class_hash,
            entry_point_selector: Some(*CONSTRUCTOR_ENTRY_POINT_SELECTOR),
            entry_point_type: Some(EntryPointType::Constructor),
            ..Default::default()
        }
    }

    fn collect_events(&self, collected: &mut Vec<(OrderedEvent, Address)>) {
        collected.extend(
            self.events
                .iter()
                .map(|event| (event.clone(), self.contract_address.clone())),
        );
        for call in &self.internal_calls {
            call.collect_events(collected);
        }
    }

    /// Returns the [`Event`]s emitted during this call (internal calls
    /// included), sorted by emission order.
    pub fn get_sorted_events(&self) -> Result<Vec<Event>, TransactionError> {
        let mut collected = Vec::new();
        self.collect_events(&mut collected);
        sorted_events(collected)
    }
}

fn sorted_events(
    mut collected: Vec<(OrderedEvent, Address)>,
) -> Result<Vec<Event>, TransactionError> {
    collected.sort_by_key(|(event, _)| event.order);

    // Already sorted, so continuity is all that is left to check.
    for (position, (event, _)) in collected.iter().enumerate() {
        if event.order != position as u64 {
            return Err(TransactionError::UnexpectedHolesInEventOrder);
        }
    }

    Ok(collected
        .into_iter()
        .map(|(event, emitting_address)| Event::new(event, emitting_address))
        .collect())
}

// -------------------------
//  Events Structures
// -------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedEvent {
    pub order: u64,
    pub keys: Vec<Felt252>,
    pub data: Vec<Felt252>,
}

impl OrderedEvent {
    pub fn new(order: u64, keys: Vec<Felt252>, data: Vec<Felt252>) -> Self {
        OrderedEvent { order, keys, data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub from_address: Address,
    pub keys: Vec<Felt252>,
    pub data: Vec<Felt252>,
}

impl Event {
    pub fn new(event_content: OrderedEvent, emitting_contract_address: Address) -> Self {
        Event {
            from_address: emitting_contract_address,
            keys: event_content.keys,
            data: event_content.data,
        }
    }
}

// -------------------------
//  Transaction Structures
// -------------------------

#[derive(Debug, Clone, Default)]
pub struct TransactionExecutionContext {
    pub(crate) n_emitted_events: u64,
    pub(crate) version: Felt252,
    pub(crate) account_contract_address: Address,
    pub(crate) max_fee: u128,
    pub(crate) transaction_hash: Felt252,
    pub(crate) signature: Vec<Felt252>,
    pub(crate) nonce: Felt252,
}

impl TransactionExecutionContext {
    pub fn new(
        account_contract_address: Address,
        transaction_hash: Felt252,
        signature: Vec<Felt252>,
        max_fee: u128,
        nonce: Felt252,
        version: Felt252,
    ) -> Self {
        TransactionExecutionContext {
            n_emitted_events: 0,
            version,
            account_contract_address,
            max_fee,
            transaction_hash,
            signature,
            nonce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionExecutionInfo {
    pub validate_info: Option<CallInfo>,
    pub call_info: Option<CallInfo>,
    pub actual_fee: u128,
    pub actual_resources: HashMap<String, usize>,
    pub tx_type: Option<TransactionType>,
}

impl TransactionExecutionInfo {
    /// Returns every event emitted by the transaction, validation included,
    /// sorted by emission order.
    pub fn get_sorted_events(&self) -> Result<Vec<Event>, TransactionError> {
        let mut collected = Vec::new();
        for call_info in [&self.validate_info, &self.call_info].into_iter().flatten() {
            call_info.collect_events(&mut collected);
        }
        sorted_events(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_events_flatten_the_call_tree() {
        let inner = CallInfo {
            contract_address: Address(2.into()),
            events: vec![OrderedEvent::new(0, vec![10.into()], vec![])],
            ..Default::default()
        };
        let outer = CallInfo {
            contract_address: Address(1.into()),
            events: vec![OrderedEvent::new(1, vec![20.into()], vec![47.into()])],
            internal_calls: vec![inner],
            ..Default::default()
        };

        let events = outer.get_sorted_events().unwrap();
        assert_eq!(
            events,
            vec![
                Event {
                    from_address: Address(2.into()),
                    keys: vec![10.into()],
                    data: vec![],
                },
                Event {
                    from_address: Address(1.into()),
                    keys: vec![20.into()],
                    data: vec![47.into()],
                },
            ]
        );
    }

    #[test]
    fn holes_in_the_event_order_are_rejected() {
        let call_info = CallInfo {
            events: vec![
                OrderedEvent::new(0, vec![], vec![]),
                OrderedEvent::new(2, vec![], vec![]),
            ],
            ..Default::default()
        };

        assert_matches!(
            call_info.get_sorted_events(),
            Err(TransactionError::UnexpectedHolesInEventOrder)
        );
    }
}
