pub mod declare;
pub mod deploy;
pub mod error;
pub mod invoke_function;

pub use declare::Declare;
pub use deploy::Deploy;
pub use invoke_function::InvokeFunction;

use crate::definitions::block_context::BlockContext;
use crate::execution::TransactionExecutionInfo;
use crate::state::state_api::State;
use crate::transaction::error::TransactionError;

/// A transaction executable against the sandbox state.
#[derive(Debug, Clone)]
pub enum Transaction {
    Declare(Declare),
    Deploy(Deploy),
    InvokeFunction(InvokeFunction),
}

impl Transaction {
    pub fn execute(
        &self,
        state: &mut dyn State,
        block_context: &BlockContext,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        match self {
            Transaction::Declare(tx) => tx.execute(state, block_context),
            Transaction::Deploy(tx) => tx.execute(state, block_context),
            Transaction::InvokeFunction(tx) => tx.execute(state, block_context),
        }
    }
}
