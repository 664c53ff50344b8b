use thiserror::Error;

use crate::utils::{Address, ClassHash};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no contract deployed at address {0:?}")]
    NoneContractState(Address),
    #[error("no contract class declared under class hash {0:?}")]
    NoneContractClass(ClassHash),
    #[error("no nonce initialized for contract address {0:?}")]
    NoneNonce(Address),
    #[error("contract address {0:?} is unavailable for deployment")]
    ContractAddressUnavailable(Address),
}
