use getset::Getters;
use tracing::info;

use crate::core::transaction_hash::calculate_deploy_transaction_hash;
use crate::definitions::block_context::BlockContext;
use crate::definitions::constants::{CONSTRUCTOR_ENTRY_POINT_SELECTOR, TRANSACTION_VERSION};
use crate::definitions::transaction_type::TransactionType;
use crate::execution::execution_entry_point::ExecutionEntryPoint;
use crate::execution::{CallInfo, TransactionExecutionContext, TransactionExecutionInfo};
use crate::hash_utils::calculate_contract_address;
use crate::services::contract_class::{compute_class_hash, ContractClass, EntryPointType};
use crate::state::state_api::State;
use crate::state::ExecutionResourcesManager;
use crate::transaction::error::TransactionError;
use crate::utils::{felt_to_hash, Address, ClassHash};
use crate::Felt252;

/// Deploys a contract at its deterministic address and runs its constructor.
#[derive(Debug, Clone, Getters)]
pub struct Deploy {
    #[getset(get = "pub")]
    contract_address: Address,
    #[getset(get = "pub")]
    contract_hash: ClassHash,
    pub(crate) contract_class: ContractClass,
    constructor_calldata: Vec<Felt252>,
    #[getset(get = "pub")]
    hash_value: Felt252,
}

impl Deploy {
    pub fn new(
        contract_class: ContractClass,
        constructor_calldata: Vec<Felt252>,
        contract_address_salt: Address,
        chain_id: Felt252,
    ) -> Self {
        let class_felt = compute_class_hash(&contract_class);
        let contract_address = Address(calculate_contract_address(
            &contract_address_salt,
            &class_felt,
            &constructor_calldata,
            Address(Felt252::ZERO),
        ));
        let hash_value = calculate_deploy_transaction_hash(
            *TRANSACTION_VERSION,
            &contract_address,
            &constructor_calldata,
            chain_id,
        );

        Deploy {
            contract_address,
            contract_hash: felt_to_hash(&class_felt),
            contract_class,
            constructor_calldata,
            hash_value,
        }
    }

    pub fn execute(
        &self,
        state: &mut dyn State,
        block_context: &BlockContext,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        state.set_contract_class(&self.contract_hash, &self.contract_class)?;
        state.deploy_contract(self.contract_address.clone(), self.contract_hash)?;
        info!(
            class = %self.contract_class.name,
            address = %self.contract_address.0,
            "deployed contract"
        );

        let call_info = if self.contract_class.has_constructor() {
            let mut resources_manager = ExecutionResourcesManager::default();
            let mut tx_execution_context = TransactionExecutionContext::default();
            let call = ExecutionEntryPoint::new(
                self.contract_address.clone(),
                self.constructor_calldata.clone(),
                *CONSTRUCTOR_ENTRY_POINT_SELECTOR,
                Address(Felt252::ZERO),
                EntryPointType::Constructor,
                None,
                None,
            );
            call.execute(
                state,
                block_context,
                &mut resources_manager,
                &mut tx_execution_context,
            )?
        } else {
            if !self.constructor_calldata.is_empty() {
                return Err(TransactionError::EmptyConstructorCalldata);
            }
            CallInfo::empty_constructor_call(
                self.contract_address.clone(),
                Address(Felt252::ZERO),
                Some(self.contract_hash),
            )
        };

        Ok(TransactionExecutionInfo {
            call_info: Some(call_info),
            tx_type: Some(TransactionType::Deploy),
            ..Default::default()
        })
    }
}
