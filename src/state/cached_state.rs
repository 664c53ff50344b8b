use std::collections::HashMap;

use crate::core::errors::state_errors::StateError;
use crate::services::contract_class::ContractClass;
use crate::state::state_api::{State, StateReader};
use crate::state::state_cache::{StateCache, StorageEntry};
use crate::utils::{Address, ClassHash};
use crate::Felt252;

/// Write cache layered over a committed state reader. Cloning a cached state
/// snapshots the whole sandbox, which is how test cases fork a shared
/// baseline without leaking mutations into each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedState<T: StateReader> {
    pub state_reader: T,
    pub(crate) cache: StateCache,
    pub(crate) contract_classes: HashMap<ClassHash, ContractClass>,
}

impl<T: StateReader> CachedState<T> {
    pub fn new(state_reader: T) -> Self {
        CachedState {
            state_reader,
            cache: StateCache::default(),
            contract_classes: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &StateCache {
        &self.cache
    }
}

impl<T: StateReader> StateReader for CachedState<T> {
    fn get_class_hash_at(&self, contract_address: &Address) -> Result<ClassHash, StateError> {
        match self.cache.get_class_hash(contract_address) {
            Some(class_hash) => Ok(*class_hash),
            None => self.state_reader.get_class_hash_at(contract_address),
        }
    }

    fn get_nonce_at(&self, contract_address: &Address) -> Result<Felt252, StateError> {
        match self.cache.get_nonce(contract_address) {
            Some(nonce) => Ok(*nonce),
            None => self.state_reader.get_nonce_at(contract_address),
        }
    }

    fn get_storage_at(&self, storage_entry: &StorageEntry) -> Result<Felt252, StateError> {
        match self.cache.get_storage(storage_entry) {
            Some(value) => Ok(*value),
            None => self.state_reader.get_storage_at(storage_entry),
        }
    }

    fn get_contract_class(&self, class_hash: &ClassHash) -> Result<ContractClass, StateError> {
        match self.contract_classes.get(class_hash) {
            Some(contract_class) => Ok(contract_class.clone()),
            None => self.state_reader.get_contract_class(class_hash),
        }
    }
}

impl<T: StateReader> State for CachedState<T> {
    fn set_contract_class(
        &mut self,
        class_hash: &ClassHash,
        contract_class: &ContractClass,
    ) -> Result<(), StateError> {
        self.contract_classes
            .insert(*class_hash, contract_class.clone());
        Ok(())
    }

    fn deploy_contract(
        &mut self,
        contract_address: Address,
        class_hash: ClassHash,
    ) -> Result<(), StateError> {
        if self.get_class_hash_at(&contract_address).is_ok() {
            return Err(StateError::ContractAddressUnavailable(contract_address));
        }
        self.cache
            .class_hash_writes
            .insert(contract_address.clone(), class_hash);
        self.cache.nonce_writes.insert(contract_address, Felt252::ZERO);
        Ok(())
    }

    fn set_storage_at(&mut self, storage_entry: &StorageEntry, value: Felt252) {
        self.cache.storage_writes.insert(storage_entry.clone(), value);
    }

    fn increment_nonce(&mut self, contract_address: &Address) -> Result<(), StateError> {
        let nonce = self.get_nonce_at(contract_address)?;
        self.cache
            .nonce_writes
            .insert(contract_address.clone(), nonce + Felt252::ONE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::in_memory_state_reader::InMemoryStateReader;

    fn storage_entry(address: u64) -> StorageEntry {
        (Address(address.into()), [1; 32])
    }

    #[test]
    fn uninitialized_storage_reads_as_zero() {
        let state = CachedState::new(InMemoryStateReader::default());
        assert_eq!(
            state.get_storage_at(&storage_entry(1)).unwrap(),
            Felt252::ZERO
        );
    }

    #[test]
    fn storage_writes_shadow_the_reader() {
        let mut reader = InMemoryStateReader::default();
        reader
            .address_to_storage_mut()
            .insert(storage_entry(1), 10.into());

        let mut state = CachedState::new(reader);
        assert_eq!(
            state.get_storage_at(&storage_entry(1)).unwrap(),
            Felt252::from(10u64)
        );

        state.set_storage_at(&storage_entry(1), 47.into());
        assert_eq!(
            state.get_storage_at(&storage_entry(1)).unwrap(),
            Felt252::from(47u64)
        );
    }

    #[test]
    fn cloned_state_does_not_leak_writes_back() {
        let mut base = CachedState::new(InMemoryStateReader::default());
        base.deploy_contract(Address(1.into()), [2; 32]).unwrap();

        let mut fork = base.clone();
        fork.set_storage_at(&storage_entry(1), 47.into());
        fork.increment_nonce(&Address(1.into())).unwrap();

        assert_eq!(
            base.get_storage_at(&storage_entry(1)).unwrap(),
            Felt252::ZERO
        );
        assert_eq!(base.get_nonce_at(&Address(1.into())).unwrap(), Felt252::ZERO);
        assert_eq!(fork.get_nonce_at(&Address(1.into())).unwrap(), Felt252::ONE);
    }

    #[test]
    fn deploying_twice_to_the_same_address_fails() {
        let mut state = CachedState::new(InMemoryStateReader::default());
        state.deploy_contract(Address(1.into()), [2; 32]).unwrap();

        assert_matches!(
            state.deploy_contract(Address(1.into()), [3; 32]),
            Err(StateError::ContractAddressUnavailable(_))
        );
    }

    #[test]
    fn nonce_of_an_unknown_contract_is_an_error() {
        let state = CachedState::new(InMemoryStateReader::default());
        assert_matches!(
            state.get_nonce_at(&Address(1.into())),
            Err(StateError::NoneNonce(_))
        );
    }
}
