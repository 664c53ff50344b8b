use std::collections::HashMap;

use crate::core::errors::state_errors::StateError;
use crate::services::contract_class::ContractClass;
use crate::state::state_api::StateReader;
use crate::state::state_cache::StorageEntry;
use crate::utils::{Address, ClassHash};
use crate::Felt252;

/// Committed sandbox state, held fully in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryStateReader {
    pub(crate) address_to_class_hash: HashMap<Address, ClassHash>,
    pub(crate) address_to_nonce: HashMap<Address, Felt252>,
    pub(crate) address_to_storage: HashMap<StorageEntry, Felt252>,
    pub(crate) class_hash_to_contract_class: HashMap<ClassHash, ContractClass>,
}

impl InMemoryStateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address_to_class_hash_mut(&mut self) -> &mut HashMap<Address, ClassHash> {
        &mut self.address_to_class_hash
    }

    pub fn address_to_nonce_mut(&mut self) -> &mut HashMap<Address, Felt252> {
        &mut self.address_to_nonce
    }

    pub fn address_to_storage_mut(&mut self) -> &mut HashMap<StorageEntry, Felt252> {
        &mut self.address_to_storage
    }

    pub fn class_hash_to_contract_class_mut(&mut self) -> &mut HashMap<ClassHash, ContractClass> {
        &mut self.class_hash_to_contract_class
    }
}

impl StateReader for InMemoryStateReader {
    fn get_class_hash_at(&self, contract_address: &Address) -> Result<ClassHash, StateError> {
        self.address_to_class_hash
            .get(contract_address)
            .copied()
            .ok_or_else(|| StateError::NoneContractState(contract_address.clone()))
    }

    fn get_nonce_at(&self, contract_address: &Address) -> Result<Felt252, StateError> {
        self.address_to_nonce
            .get(contract_address)
            .copied()
            .ok_or_else(|| StateError::NoneNonce(contract_address.clone()))
    }

    fn get_storage_at(&self, storage_entry: &StorageEntry) -> Result<Felt252, StateError> {
        Ok(self
            .address_to_storage
            .get(storage_entry)
            .copied()
            .unwrap_or(Felt252::ZERO))
    }

    fn get_contract_class(&self, class_hash: &ClassHash) -> Result<ContractClass, StateError> {
        self.class_hash_to_contract_class
            .get(class_hash)
            .cloned()
            .ok_or(StateError::NoneContractClass(*class_hash))
    }
}
