pub mod argent_account;
pub mod proxy;
pub mod test_dapp;

use starknet_crypto::pedersen_hash;

use crate::definitions::constants::{EXECUTE_ENTRY_POINT_SELECTOR, VALIDATE_ENTRY_POINT_SELECTOR};
use crate::execution::execution_entry_point::CallEnvironment;
use crate::services::contract_class::ContractClass;
use crate::transaction::error::TransactionError;
use crate::utils::{calculate_sn_keccak, felt_to_hash};
use crate::Felt252;

/// Native implementation of a declared contract class. Stands in for the
/// compiled program a real network would execute.
pub trait ContractHandler: Send + Sync {
    /// Program name contract artifacts bind to this handler.
    fn program(&self) -> &'static str;

    fn invoke(
        &self,
        environment: &mut CallEnvironment<'_>,
        selector: &Felt252,
        calldata: &[Felt252],
    ) -> Result<Vec<Felt252>, TransactionError>;
}

impl core::fmt::Debug for dyn ContractHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContractHandler")
            .field("program", &self.program())
            .finish()
    }
}

pub fn handler_for_program(program: &str) -> Result<&'static dyn ContractHandler, TransactionError> {
    match program {
        "proxy" => Ok(&proxy::Proxy),
        "argent_account" => Ok(&argent_account::ArgentAccount),
        "test_dapp" => Ok(&test_dapp::TestDapp),
        _ => Err(TransactionError::UnknownProgram(program.to_string())),
    }
}

/// `sn_keccak` address of a plain storage variable.
pub(crate) fn storage_var_address(name: &str) -> [u8; 32] {
    calculate_sn_keccak(name.as_bytes())
}

/// Address of one cell of a storage mapping.
pub(crate) fn storage_var_mapping_address(name: &str, key: &Felt252) -> [u8; 32] {
    let base = Felt252::from_bytes_be(&storage_var_address(name));
    felt_to_hash(&pedersen_hash(&base, key))
}

/// Outcome of probing a class for the entry points an account implementation
/// must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplementationProbe {
    Valid,
    MissingInterface,
}

/// A class can stand behind an account proxy only if it declares the
/// validation and execution entry points.
pub fn probe_account_interface(contract_class: &ContractClass) -> ImplementationProbe {
    if contract_class.declares_external(&VALIDATE_ENTRY_POINT_SELECTOR)
        && contract_class.declares_external(&EXECUTE_ENTRY_POINT_SELECTOR)
    {
        ImplementationProbe::Valid
    } else {
        ImplementationProbe::MissingInterface
    }
}
