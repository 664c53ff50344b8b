pub mod cached_state;
pub mod in_memory_state_reader;
pub mod state_api;
pub mod state_api_objects;
pub mod state_cache;

use std::collections::HashMap;

/// Counts the syscall-style operations performed while executing a
/// transaction. The counts end up in the execution info's resource map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResourcesManager {
    syscall_counter: HashMap<String, u64>,
}

impl ExecutionResourcesManager {
    pub fn increment_syscall_counter(&mut self, syscall_name: &str) {
        *self
            .syscall_counter
            .entry(syscall_name.to_string())
            .or_insert(0) += 1;
    }

    pub fn get_syscall_counter(&self, syscall_name: &str) -> Option<u64> {
        self.syscall_counter.get(syscall_name).copied()
    }

    pub fn actual_resources(&self) -> HashMap<String, usize> {
        self.syscall_counter
            .iter()
            .map(|(name, count)| (name.clone(), *count as usize))
            .collect()
    }
}
