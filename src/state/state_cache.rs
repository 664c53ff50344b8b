use std::collections::HashMap;

use crate::utils::{Address, ClassHash};
use crate::Felt252;

/// A contract storage cell: the owning contract plus the variable address
/// inside its storage space.
pub type StorageEntry = (Address, [u8; 32]);

/// Pending writes layered on top of a committed state reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateCache {
    pub(crate) class_hash_writes: HashMap<Address, ClassHash>,
    pub(crate) nonce_writes: HashMap<Address, Felt252>,
    pub(crate) storage_writes: HashMap<StorageEntry, Felt252>,
}

impl StateCache {
    pub fn get_class_hash(&self, contract_address: &Address) -> Option<&ClassHash> {
        self.class_hash_writes.get(contract_address)
    }

    pub fn get_nonce(&self, contract_address: &Address) -> Option<&Felt252> {
        self.nonce_writes.get(contract_address)
    }

    pub fn get_storage(&self, storage_entry: &StorageEntry) -> Option<&Felt252> {
        self.storage_writes.get(storage_entry)
    }
}
