use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash_utils::compute_hash_on_elements;
use crate::utils::{calculate_sn_keccak, selector_from_name};
use crate::Felt252;

/// Catch-all entry point a forwarding contract may declare to accept any
/// selector.
pub const DEFAULT_ENTRY_POINT_NAME: &str = "__default__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryPointType {
    External,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntryPoint {
    pub name: String,
}

impl ContractEntryPoint {
    pub fn selector(&self) -> Felt252 {
        selector_from_name(&self.name)
    }
}

/// A declared contract class: the entry points a contract artifact exposes
/// plus the native program implementing its behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractClass {
    pub name: String,
    pub version: String,
    pub program: String,
    pub entry_points_by_type: HashMap<EntryPointType, Vec<ContractEntryPoint>>,
}

impl ContractClass {
    pub fn entry_points_of_type(&self, entry_point_type: EntryPointType) -> &[ContractEntryPoint] {
        self.entry_points_by_type
            .get(&entry_point_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entry_point(
        &self,
        selector: &Felt252,
        entry_point_type: EntryPointType,
    ) -> Option<&ContractEntryPoint> {
        self.entry_points_of_type(entry_point_type)
            .iter()
            .find(|entry_point| entry_point.selector() == *selector)
    }

    pub fn declares_external(&self, selector: &Felt252) -> bool {
        self.entry_point(selector, EntryPointType::External).is_some()
    }

    pub fn has_default_entry_point(&self) -> bool {
        self.entry_points_of_type(EntryPointType::External)
            .iter()
            .any(|entry_point| entry_point.name == DEFAULT_ENTRY_POINT_NAME)
    }

    pub fn has_constructor(&self) -> bool {
        !self.entry_points_of_type(EntryPointType::Constructor).is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ContractClassError {
    #[error("could not read the contract artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse the contract artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TryFrom<PathBuf> for ContractClass {
    type Error = ContractClassError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Content-derived class hash: a pedersen chain over the class identity and
/// its declared entry points, grouped by type in a fixed order. Two builds of
/// the same contract with different versions hash to different classes.
pub fn compute_class_hash(contract_class: &ContractClass) -> Felt252 {
    let mut data = vec![
        Felt252::from_bytes_be(&calculate_sn_keccak(contract_class.name.as_bytes())),
        Felt252::from_bytes_be(&calculate_sn_keccak(contract_class.version.as_bytes())),
        Felt252::from_bytes_be(&calculate_sn_keccak(contract_class.program.as_bytes())),
    ];
    for entry_point_type in [EntryPointType::Constructor, EntryPointType::External] {
        let selectors: Vec<Felt252> = contract_class
            .entry_points_of_type(entry_point_type)
            .iter()
            .map(ContractEntryPoint::selector)
            .collect();
        data.push(compute_hash_on_elements(&selectors));
    }
    compute_hash_on_elements(&data)
}
