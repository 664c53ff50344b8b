pub mod assertions;
pub mod sandbox_state;
pub mod signer;
pub mod transaction_sender;

pub use assertions::{assert_event_emitted, assert_revert};
pub use sandbox_state::SandboxState;
pub use signer::Signer;
pub use transaction_sender::{encode_multicall, Call, DualKeySigners, TransactionSender};

use std::path::PathBuf;

use crate::services::contract_class::{ContractClass, ContractClassError};

/// Loads a contract artifact from disk. In a real network this is where the
/// contract source would be compiled; the sandbox resolves the artifact's
/// `program` field to a native handler instead.
pub fn compile<P: Into<PathBuf>>(path: P) -> Result<ContractClass, ContractClassError> {
    ContractClass::try_from(path.into())
}
