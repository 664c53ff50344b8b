use tracing::{debug, trace};

use crate::contracts::handler_for_program;
use crate::definitions::block_context::BlockContext;
use crate::execution::{CallInfo, CallType, OrderedEvent, TransactionExecutionContext};
use crate::services::contract_class::{ContractClass, EntryPointType};
use crate::state::state_api::State;
use crate::state::ExecutionResourcesManager;
use crate::transaction::error::TransactionError;
use crate::utils::{Address, ClassHash};
use crate::Felt252;

/// A single entry point invocation: resolves the target class, checks the
/// selector against the class's declared entry points and hands control to
/// the class's native program.
#[derive(Debug, Clone)]
pub struct ExecutionEntryPoint {
    contract_address: Address,
    calldata: Vec<Felt252>,
    entry_point_selector: Felt252,
    caller_address: Address,
    entry_point_type: EntryPointType,
    call_type: CallType,
    class_hash: Option<ClassHash>,
}

impl ExecutionEntryPoint {
    pub fn new(
        contract_address: Address,
        calldata: Vec<Felt252>,
        entry_point_selector: Felt252,
        caller_address: Address,
        entry_point_type: EntryPointType,
        call_type: Option<CallType>,
        class_hash: Option<ClassHash>,
    ) -> Self {
        ExecutionEntryPoint {
            contract_address,
            calldata,
            entry_point_selector,
            caller_address,
            entry_point_type,
            call_type: call_type.unwrap_or(CallType::Call),
            class_hash,
        }
    }

    pub fn execute(
        &self,
        state: &mut dyn State,
        block_context: &BlockContext,
        resources_manager: &mut ExecutionResourcesManager,
        tx_execution_context: &mut TransactionExecutionContext,
    ) -> Result<CallInfo, TransactionError> {
        // A delegate call executes a caller-chosen class in the storage
        // context of the called contract.
        let class_hash = match self.class_hash {
            Some(class_hash) => class_hash,
            None => state.get_class_hash_at(&self.contract_address)?,
        };
        let contract_class = state.get_contract_class(&class_hash)?;

        let declared = contract_class
            .entry_point(&self.entry_point_selector, self.entry_point_type)
            .is_some();
        let falls_through_to_default = self.entry_point_type == EntryPointType::External
            && contract_class.has_default_entry_point();
        if !declared && !falls_through_to_default {
            return Err(TransactionError::EntryPointNotFound(
                self.entry_point_selector,
            ));
        }

        debug!(
            contract = %self.contract_address.0,
            class = %contract_class.name,
            selector = %self.entry_point_selector,
            call_type = ?self.call_type,
            "dispatching entry point"
        );

        let handler = handler_for_program(&contract_class.program)?;
        let call_info = CallInfo {
            caller_address: self.caller_address.clone(),
            call_type: Some(self.call_type.clone()),
            contract_address: self.contract_address.clone(),
            class_hash: Some(class_hash),
            entry_point_selector: Some(self.entry_point_selector),
            entry_point_type: Some(self.entry_point_type),
            calldata: self.calldata.clone(),
            ..Default::default()
        };

        let mut environment = CallEnvironment {
            state,
            block_context,
            resources_manager,
            tx_execution_context,
            call_info,
        };
        let retdata = handler.invoke(&mut environment, &self.entry_point_selector, &self.calldata)?;

        let mut call_info = environment.call_info;
        call_info.retdata = retdata;
        Ok(call_info)
    }
}

/// Execution surface handed to a native contract program: storage access at
/// the executing address, event emission and nested calls, all recorded into
/// the [`CallInfo`] being built.
pub struct CallEnvironment<'a> {
    state: &'a mut dyn State,
    block_context: &'a BlockContext,
    resources_manager: &'a mut ExecutionResourcesManager,
    tx_execution_context: &'a mut TransactionExecutionContext,
    call_info: CallInfo,
}

impl CallEnvironment<'_> {
    pub fn contract_address(&self) -> Address {
        self.call_info.contract_address.clone()
    }

    pub fn caller_address(&self) -> Address {
        self.call_info.caller_address.clone()
    }

    pub fn transaction_hash(&self) -> Felt252 {
        self.tx_execution_context.transaction_hash
    }

    /// Address of the account the enclosing transaction was submitted to.
    pub fn account_contract_address(&self) -> Address {
        self.tx_execution_context.account_contract_address.clone()
    }

    pub fn signature(&self) -> Vec<Felt252> {
        self.tx_execution_context.signature.clone()
    }

    pub fn storage_read(&mut self, key: [u8; 32]) -> Result<Felt252, TransactionError> {
        self.resources_manager.increment_syscall_counter("storage_read");
        let entry = (self.call_info.contract_address.clone(), key);
        let value = self.state.get_storage_at(&entry)?;
        trace!(contract = %entry.0 .0, value = %value, "storage read");
        self.call_info.accessed_storage_keys.insert(key);
        self.call_info.storage_read_values.push(value);
        Ok(value)
    }

    pub fn storage_write(&mut self, key: [u8; 32], value: Felt252) {
        self.resources_manager.increment_syscall_counter("storage_write");
        let entry = (self.call_info.contract_address.clone(), key);
        trace!(contract = %entry.0 .0, value = %value, "storage write");
        self.call_info.accessed_storage_keys.insert(key);
        self.state.set_storage_at(&entry, value);
    }

    pub fn emit_event(&mut self, keys: Vec<Felt252>, data: Vec<Felt252>) {
        self.resources_manager.increment_syscall_counter("emit_event");
        let order = self.tx_execution_context.n_emitted_events;
        self.call_info.events.push(OrderedEvent::new(order, keys, data));
        self.tx_execution_context.n_emitted_events += 1;
    }

    pub fn contract_class(&self, class_hash: &ClassHash) -> Result<ContractClass, TransactionError> {
        Ok(self.state.get_contract_class(class_hash)?)
    }

    /// Calls another contract; the executing contract becomes the caller.
    pub fn call_contract(
        &mut self,
        contract_address: Address,
        entry_point_selector: Felt252,
        calldata: Vec<Felt252>,
    ) -> Result<Vec<Felt252>, TransactionError> {
        self.resources_manager.increment_syscall_counter("call_contract");
        let call = ExecutionEntryPoint::new(
            contract_address,
            calldata,
            entry_point_selector,
            self.call_info.contract_address.clone(),
            EntryPointType::External,
            Some(CallType::Call),
            None,
        );
        self.run_nested(call)
    }

    /// Runs another class's entry point in this contract's storage context,
    /// keeping the original caller.
    pub fn library_call(
        &mut self,
        class_hash: ClassHash,
        entry_point_selector: Felt252,
        calldata: Vec<Felt252>,
    ) -> Result<Vec<Felt252>, TransactionError> {
        self.resources_manager.increment_syscall_counter("library_call");
        let call = ExecutionEntryPoint::new(
            self.call_info.contract_address.clone(),
            calldata,
            entry_point_selector,
            self.call_info.caller_address.clone(),
            EntryPointType::External,
            Some(CallType::Delegate),
            Some(class_hash),
        );
        self.run_nested(call)
    }

    fn run_nested(&mut self, call: ExecutionEntryPoint) -> Result<Vec<Felt252>, TransactionError> {
        let call_info = call.execute(
            &mut *self.state,
            self.block_context,
            &mut *self.resources_manager,
            &mut *self.tx_execution_context,
        )?;
        let retdata = call_info.retdata.clone();
        self.call_info.internal_calls.push(call_info);
        Ok(retdata)
    }
}
