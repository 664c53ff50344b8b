use starknet_crypto::SignError;
use thiserror::Error;

use crate::core::errors::state_errors::StateError;
use crate::definitions::error_codes::StarknetErrorCode;
use crate::Felt252;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid transaction nonce. Expected: {0} got {1}")]
    InvalidTransactionNonce(String, String),
    #[error("a version 1 invoke transaction requires a nonce")]
    MissingNonce,
    #[error("a version 0 invoke transaction does not carry a nonce")]
    UnexpectedNonce,
    #[error("entry point with selector {0} was not found in the contract")]
    EntryPointNotFound(Felt252),
    #[error("no native program registered under the name {0}")]
    UnknownProgram(String),
    #[error("transaction reverted: {0}")]
    Revert(String),
    #[error("argent: invalid implementation (class {0} does not declare the account interface)")]
    MissingAccountInterface(Felt252),
    #[error("constructor calldata provided for a contract with no constructor")]
    EmptyConstructorCalldata,
    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),
    #[error("felt value does not fit in the requested integer type")]
    InvalidFeltConversion,
    #[error("unexpected holes in the event order")]
    UnexpectedHolesInEventOrder,
    #[error("signing error: {0}")]
    Signature(#[from] SignError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl TransactionError {
    /// Error code surfaced to clients. A missing entry point or implementation
    /// interface is reported under its own code, never conflated with a plain
    /// execution failure.
    pub fn error_code(&self) -> StarknetErrorCode {
        match self {
            TransactionError::EntryPointNotFound(_)
            | TransactionError::MissingAccountInterface(_) => {
                StarknetErrorCode::EntryPointNotFoundInContract
            }
            TransactionError::State(StateError::NoneContractState(_)) => {
                StarknetErrorCode::UninitializedContract
            }
            _ => StarknetErrorCode::TransactionFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Address;

    #[test]
    fn error_codes_distinguish_interface_problems() {
        assert_eq!(
            TransactionError::Revert("argent: signer signature invalid".to_string()).error_code(),
            StarknetErrorCode::TransactionFailed
        );
        assert_eq!(
            TransactionError::MissingAccountInterface(1.into()).error_code(),
            StarknetErrorCode::EntryPointNotFoundInContract
        );
        assert_eq!(
            TransactionError::EntryPointNotFound(2.into()).error_code(),
            StarknetErrorCode::EntryPointNotFoundInContract
        );
        assert_eq!(
            TransactionError::State(StateError::NoneContractState(Address(3.into()))).error_code(),
            StarknetErrorCode::UninitializedContract
        );
    }
}
