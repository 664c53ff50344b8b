#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

// Re-exports
pub use starknet_types_core::felt::Felt as Felt252;

pub mod contracts;
pub mod core;
pub mod definitions;
pub mod execution;
pub mod hash_utils;
pub mod services;
pub mod state;
pub mod testing;
pub mod transaction;
pub mod utils;

use definitions::block_context::BlockContext;
use definitions::constants::TRANSACTION_VERSION;
use execution::execution_entry_point::ExecutionEntryPoint;
use execution::{CallType, TransactionExecutionContext, TransactionExecutionInfo};
use services::contract_class::EntryPointType;
use state::state_api::State;
use state::ExecutionResourcesManager;
use transaction::error::TransactionError;
use transaction::Transaction;
use utils::Address;

/// Executes a read-only entry point call against the given state, outside of
/// any transaction: no signature, no nonce consumption.
pub fn call_contract<S: State>(
    contract_address: Felt252,
    entry_point_selector: Felt252,
    calldata: Vec<Felt252>,
    state: &mut S,
    block_context: &BlockContext,
) -> Result<Vec<Felt252>, TransactionError> {
    let contract_address = Address(contract_address);
    state.get_class_hash_at(&contract_address)?;
    let nonce = state.get_nonce_at(&contract_address)?;

    let mut tx_execution_context = TransactionExecutionContext::new(
        contract_address.clone(),
        Felt252::ZERO,
        Vec::new(),
        0,
        nonce,
        *TRANSACTION_VERSION,
    );
    let mut resources_manager = ExecutionResourcesManager::default();

    let call = ExecutionEntryPoint::new(
        contract_address,
        calldata,
        entry_point_selector,
        Address(Felt252::ZERO),
        EntryPointType::External,
        Some(CallType::Call),
        None,
    );
    let call_info = call.execute(
        state,
        block_context,
        &mut resources_manager,
        &mut tx_execution_context,
    )?;
    Ok(call_info.retdata)
}

/// Executes a transaction against the given state.
pub fn execute_transaction<S: State>(
    tx: &Transaction,
    state: &mut S,
    block_context: &BlockContext,
) -> Result<TransactionExecutionInfo, TransactionError> {
    tx.execute(state, block_context)
}
