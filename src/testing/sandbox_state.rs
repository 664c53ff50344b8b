use getset::Getters;

use crate::definitions::block_context::BlockContext;
use crate::execution::{Event, TransactionExecutionInfo};
use crate::services::contract_class::ContractClass;
use crate::state::cached_state::CachedState;
use crate::state::in_memory_state_reader::InMemoryStateReader;
use crate::state::state_api::StateReader;
use crate::transaction::error::TransactionError;
use crate::transaction::{Declare, Deploy, Transaction};
use crate::utils::{selector_from_name, Address, ClassHash};
use crate::Felt252;

/// Fixed block timestamp the sandbox resets to, so time-dependent behavior
/// stays reproducible across runs.
pub const DEFAULT_BLOCK_TIMESTAMP: u64 = 1640991600;

/// An in-memory sandbox network. Owns the state every transaction executes
/// against; `Clone` is the cheap per-test snapshot, so a module can deploy a
/// baseline once and fork it for each test case.
#[derive(Debug, Clone, Getters)]
pub struct SandboxState {
    pub state: CachedState<InMemoryStateReader>,
    #[getset(get = "pub")]
    block_context: BlockContext,
    events: Vec<Event>,
}

impl SandboxState {
    pub fn new(block_context: Option<BlockContext>) -> Self {
        SandboxState {
            state: CachedState::new(InMemoryStateReader::default()),
            block_context: block_context.unwrap_or_default(),
            events: Vec::new(),
        }
    }

    /// Declares a contract class. Returns the class hash and the execution
    /// info.
    pub fn declare(
        &mut self,
        contract_class: ContractClass,
    ) -> Result<(ClassHash, TransactionExecutionInfo), TransactionError> {
        let tx = Declare::new(contract_class, self.chain_id());
        let class_hash = *tx.class_hash();
        let exec_info = self.execute_tx(Transaction::Declare(tx))?;
        Ok((class_hash, exec_info))
    }

    /// Deploys a contract. Returns the contract address and the execution
    /// info.
    pub fn deploy(
        &mut self,
        contract_class: ContractClass,
        constructor_calldata: Vec<Felt252>,
        contract_address_salt: Address,
    ) -> Result<(Address, TransactionExecutionInfo), TransactionError> {
        let tx = Deploy::new(
            contract_class,
            constructor_calldata,
            contract_address_salt,
            self.chain_id(),
        );
        let contract_address = tx.contract_address().clone();
        let exec_info = self.execute_tx(Transaction::Deploy(tx))?;
        Ok((contract_address, exec_info))
    }

    /// Read-only entry point call, executed against a scratch copy of the
    /// state so repeated queries always agree absent an intervening
    /// transaction.
    pub fn call(
        &self,
        contract_address: &Address,
        entry_point: &str,
        calldata: Vec<Felt252>,
    ) -> Result<Vec<Felt252>, TransactionError> {
        let mut scratch = self.state.clone();
        crate::call_contract(
            contract_address.0,
            selector_from_name(entry_point),
            calldata,
            &mut scratch,
            &self.block_context,
        )
    }

    /// Executes a transaction atomically: state changes and collected events
    /// are committed only when the whole transaction succeeds.
    pub fn execute_tx(
        &mut self,
        tx: Transaction,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        let mut working_state = self.state.clone();
        let exec_info = crate::execute_transaction(&tx, &mut working_state, &self.block_context)?;
        self.state = working_state;
        self.events.extend(exec_info.get_sorted_events()?);
        Ok(exec_info)
    }

    pub fn nonce_at(&self, contract_address: &Address) -> Result<Felt252, TransactionError> {
        Ok(self.state.get_nonce_at(contract_address)?)
    }

    /// Every event committed so far, in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn chain_id(&self) -> Felt252 {
        *self.block_context.starknet_os_config().chain_id()
    }

    pub fn update_block(&mut self, block_number: u64, block_timestamp: u64) {
        let block_info = self.block_context.block_info_mut();
        block_info.block_number = block_number;
        block_info.block_timestamp = block_timestamp;
    }

    pub fn reset_block(&mut self) {
        self.update_block(1, DEFAULT_BLOCK_TIMESTAMP);
    }
}

impl Default for SandboxState {
    fn default() -> Self {
        SandboxState::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::state_errors::StateError;
    use crate::testing::compile;

    #[test]
    fn declare_is_idempotent_for_identical_artifacts() {
        let mut sandbox = SandboxState::new(None);
        let class = compile("contract_abis/test_dapp.json").unwrap();

        let (first, _) = sandbox.declare(class.clone()).unwrap();
        let (second, _) = sandbox.declare(class).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn deploy_initializes_the_nonce() {
        let mut sandbox = SandboxState::new(None);
        let class = compile("contract_abis/test_dapp.json").unwrap();

        let (address, _) = sandbox.deploy(class, vec![], Address(1.into())).unwrap();
        assert_eq!(sandbox.nonce_at(&address).unwrap(), Felt252::ZERO);
    }

    #[test]
    fn deploy_rejects_calldata_for_a_constructorless_class() {
        let mut sandbox = SandboxState::new(None);
        let class = compile("contract_abis/test_dapp.json").unwrap();

        let result = sandbox.deploy(class, vec![1.into()], Address(1.into()));
        assert_matches!(result, Err(TransactionError::EmptyConstructorCalldata));
    }

    #[test]
    fn calling_an_undeclared_entry_point_fails() {
        let mut sandbox = SandboxState::new(None);
        let class = compile("contract_abis/test_dapp.json").unwrap();
        let (address, _) = sandbox.deploy(class, vec![], Address(1.into())).unwrap();

        let result = sandbox.call(&address, "increase_balance", vec![1.into()]);
        assert_matches!(result, Err(TransactionError::EntryPointNotFound(_)));
    }

    #[test]
    fn calls_against_undeployed_contracts_fail() {
        let sandbox = SandboxState::new(None);
        let result = sandbox.call(&Address(999.into()), "get_number", vec![1.into()]);
        assert_matches!(
            result,
            Err(TransactionError::State(StateError::NoneContractState(_)))
        );
    }

    #[test]
    fn block_manipulation_helpers_update_the_context() {
        let mut sandbox = SandboxState::new(None);
        sandbox.update_block(7, 1000);
        assert_eq!(sandbox.block_context().block_info().block_number, 7);

        sandbox.reset_block();
        assert_eq!(sandbox.block_context().block_info().block_number, 1);
        assert_eq!(
            sandbox.block_context().block_info().block_timestamp,
            DEFAULT_BLOCK_TIMESTAMP
        );
    }
}
