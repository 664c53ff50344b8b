use crate::core::errors::state_errors::StateError;
use crate::services::contract_class::ContractClass;
use crate::state::state_cache::StorageEntry;
use crate::utils::{Address, ClassHash};
use crate::Felt252;

pub trait StateReader {
    /// Returns the class hash of the contract deployed at `contract_address`.
    fn get_class_hash_at(&self, contract_address: &Address) -> Result<ClassHash, StateError>;
    /// Returns the current nonce of the contract deployed at `contract_address`.
    fn get_nonce_at(&self, contract_address: &Address) -> Result<Felt252, StateError>;
    /// Returns the value of a storage cell. Uninitialized cells read as zero.
    fn get_storage_at(&self, storage_entry: &StorageEntry) -> Result<Felt252, StateError>;
    /// Returns the contract class declared under `class_hash`.
    fn get_contract_class(&self, class_hash: &ClassHash) -> Result<ContractClass, StateError>;
}

pub trait State: StateReader {
    fn set_contract_class(
        &mut self,
        class_hash: &ClassHash,
        contract_class: &ContractClass,
    ) -> Result<(), StateError>;

    /// Binds `contract_address` to `class_hash` and initializes its nonce.
    /// Fails if the address is already taken.
    fn deploy_contract(
        &mut self,
        contract_address: Address,
        class_hash: ClassHash,
    ) -> Result<(), StateError>;

    fn set_storage_at(&mut self, storage_entry: &StorageEntry, value: Felt252);

    fn increment_nonce(&mut self, contract_address: &Address) -> Result<(), StateError>;
}
