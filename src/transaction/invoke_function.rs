use getset::Getters;
use tracing::debug;

use crate::core::transaction_hash::{
    calculate_transaction_hash_common, preprocess_invoke_function_fields, TransactionHashPrefix,
};
use crate::definitions::block_context::BlockContext;
use crate::definitions::constants::{EXECUTE_ENTRY_POINT_SELECTOR, VALIDATE_ENTRY_POINT_SELECTOR};
use crate::definitions::transaction_type::TransactionType;
use crate::execution::execution_entry_point::ExecutionEntryPoint;
use crate::execution::{CallInfo, CallType, TransactionExecutionContext, TransactionExecutionInfo};
use crate::services::contract_class::EntryPointType;
use crate::state::state_api::State;
use crate::state::ExecutionResourcesManager;
use crate::transaction::error::TransactionError;
use crate::utils::Address;
use crate::Felt252;

/// An invoke transaction against an account contract: validation runs on the
/// account's `__validate__` entry point before the invoked entry point itself.
#[derive(Debug, Clone, Getters)]
pub struct InvokeFunction {
    #[getset(get = "pub")]
    contract_address: Address,
    entry_point_selector: Felt252,
    calldata: Vec<Felt252>,
    version: Felt252,
    validate_entry_point_selector: Felt252,
    #[getset(get = "pub")]
    hash_value: Felt252,
    #[getset(get = "pub")]
    signature: Vec<Felt252>,
    max_fee: u128,
    nonce: Option<Felt252>,
}

impl InvokeFunction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contract_address: Address,
        entry_point_selector: Felt252,
        max_fee: u128,
        version: Felt252,
        calldata: Vec<Felt252>,
        signature: Vec<Felt252>,
        chain_id: Felt252,
        nonce: Option<Felt252>,
    ) -> Result<Self, TransactionError> {
        let (entry_point_selector_field, additional_data) =
            preprocess_invoke_function_fields(entry_point_selector, nonce, version)?;
        let hash_value = calculate_transaction_hash_common(
            TransactionHashPrefix::Invoke,
            version,
            &contract_address,
            entry_point_selector_field,
            &calldata,
            max_fee,
            chain_id,
            &additional_data,
        );

        InvokeFunction::new_with_tx_hash(
            contract_address,
            entry_point_selector,
            max_fee,
            version,
            calldata,
            signature,
            nonce,
            hash_value,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_with_tx_hash(
        contract_address: Address,
        entry_point_selector: Felt252,
        max_fee: u128,
        version: Felt252,
        calldata: Vec<Felt252>,
        signature: Vec<Felt252>,
        nonce: Option<Felt252>,
        hash_value: Felt252,
    ) -> Result<Self, TransactionError> {
        if version != Felt252::ZERO && nonce.is_none() {
            return Err(TransactionError::MissingNonce);
        }

        Ok(InvokeFunction {
            contract_address,
            entry_point_selector,
            calldata,
            version,
            validate_entry_point_selector: *VALIDATE_ENTRY_POINT_SELECTOR,
            hash_value,
            signature,
            max_fee,
            nonce,
        })
    }

    fn get_execution_context(&self) -> Result<TransactionExecutionContext, TransactionError> {
        let nonce = if self.version == Felt252::ZERO {
            Felt252::ZERO
        } else {
            self.nonce.ok_or(TransactionError::MissingNonce)?
        };
        Ok(TransactionExecutionContext::new(
            self.contract_address.clone(),
            self.hash_value,
            self.signature.clone(),
            self.max_fee,
            nonce,
            self.version,
        ))
    }

    /// Version 1 transactions must carry the account's current nonce, which
    /// is consumed up front.
    fn handle_nonce(&self, state: &mut dyn State) -> Result<(), TransactionError> {
        if self.version == Felt252::ZERO {
            return Ok(());
        }
        let nonce = self.nonce.ok_or(TransactionError::MissingNonce)?;
        let current_nonce = state.get_nonce_at(&self.contract_address)?;
        if current_nonce != nonce {
            return Err(TransactionError::InvalidTransactionNonce(
                current_nonce.to_string(),
                nonce.to_string(),
            ));
        }
        state.increment_nonce(&self.contract_address)?;
        Ok(())
    }

    /// Runs the account's validation entry point. Skipped for calls that do
    /// not go through the account's `__execute__`.
    fn run_validate_entrypoint(
        &self,
        state: &mut dyn State,
        block_context: &BlockContext,
        resources_manager: &mut ExecutionResourcesManager,
        tx_execution_context: &mut TransactionExecutionContext,
    ) -> Result<Option<CallInfo>, TransactionError> {
        if self.entry_point_selector != *EXECUTE_ENTRY_POINT_SELECTOR {
            return Ok(None);
        }
        if self.version == Felt252::ZERO {
            return Ok(None);
        }

        let call = ExecutionEntryPoint::new(
            self.contract_address.clone(),
            self.calldata.clone(),
            self.validate_entry_point_selector,
            Address(Felt252::ZERO),
            EntryPointType::External,
            Some(CallType::Call),
            None,
        );
        let call_info = call.execute(
            state,
            block_context,
            resources_manager,
            tx_execution_context,
        )?;
        Ok(Some(call_info))
    }

    pub fn execute(
        &self,
        state: &mut dyn State,
        block_context: &BlockContext,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        self.handle_nonce(state)?;

        let mut resources_manager = ExecutionResourcesManager::default();
        let mut tx_execution_context = self.get_execution_context()?;
        debug!(
            tx_hash = %self.hash_value,
            contract = %self.contract_address.0,
            nonce = %tx_execution_context.nonce,
            version = %tx_execution_context.version,
            max_fee = %tx_execution_context.max_fee,
            "executing invoke transaction"
        );

        let validate_info = self.run_validate_entrypoint(
            state,
            block_context,
            &mut resources_manager,
            &mut tx_execution_context,
        )?;

        let call = ExecutionEntryPoint::new(
            self.contract_address.clone(),
            self.calldata.clone(),
            self.entry_point_selector,
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

        Ok(TransactionExecutionInfo {
            validate_info,
            call_info: Some(call_info),
            actual_fee: 0,
            actual_resources: resources_manager.actual_resources(),
            tx_type: Some(TransactionType::InvokeFunction),
        })
    }
}
