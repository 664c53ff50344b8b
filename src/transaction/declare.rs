use getset::Getters;
use tracing::info;

use crate::core::transaction_hash::calculate_declare_transaction_hash;
use crate::definitions::block_context::BlockContext;
use crate::definitions::constants::TRANSACTION_VERSION;
use crate::definitions::transaction_type::TransactionType;
use crate::execution::TransactionExecutionInfo;
use crate::services::contract_class::{compute_class_hash, ContractClass};
use crate::state::state_api::State;
use crate::transaction::error::TransactionError;
use crate::utils::{felt_to_hash, Address, ClassHash};
use crate::Felt252;

/// Registers a contract class in the state under its content-derived hash.
/// Declaring the same artifact twice is idempotent and yields the same hash.
#[derive(Debug, Clone, Getters)]
pub struct Declare {
    pub(crate) contract_class: ContractClass,
    #[getset(get = "pub")]
    class_hash: ClassHash,
    #[getset(get = "pub")]
    hash_value: Felt252,
}

impl Declare {
    pub fn new(contract_class: ContractClass, chain_id: Felt252) -> Self {
        let class_felt = compute_class_hash(&contract_class);
        let hash_value = calculate_declare_transaction_hash(
            class_felt,
            chain_id,
            &Address(Felt252::ONE),
            *TRANSACTION_VERSION,
            Felt252::ZERO,
        );

        Declare {
            contract_class,
            class_hash: felt_to_hash(&class_felt),
            hash_value,
        }
    }

    pub fn execute(
        &self,
        state: &mut dyn State,
        _block_context: &BlockContext,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        state.set_contract_class(&self.class_hash, &self.contract_class)?;
        info!(
            class = %self.contract_class.name,
            version = %self.contract_class.version,
            class_hash = %Felt252::from_bytes_be(&self.class_hash),
            "declared contract class"
        );

        Ok(TransactionExecutionInfo {
            tx_type: Some(TransactionType::Declare),
            ..Default::default()
        })
    }
}
