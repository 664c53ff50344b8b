use lazy_static::lazy_static;
use tracing::debug;

use crate::contracts::{storage_var_address, ContractHandler};
use crate::definitions::constants::CONSTRUCTOR_ENTRY_POINT_SELECTOR;
use crate::execution::execution_entry_point::CallEnvironment;
use crate::transaction::error::TransactionError;
use crate::utils::{felt_to_hash, felt_to_usize, selector_from_name};
use crate::Felt252;

/// Storage slot holding the class hash calls are forwarded to. The account
/// implementation rewrites the same slot on upgrade, since it executes in the
/// proxy's storage context.
pub(crate) const IMPLEMENTATION_STORAGE_VAR: &str = "Proxy_implementation";

lazy_static! {
    static ref GET_IMPLEMENTATION_SELECTOR: Felt252 = selector_from_name("get_implementation");
}

/// Upgradeable proxy: stores an implementation pointer and forwards every
/// unknown selector to it through its `__default__` entry point.
pub struct Proxy;

impl ContractHandler for Proxy {
    fn program(&self) -> &'static str {
        "proxy"
    }

    fn invoke(
        &self,
        environment: &mut CallEnvironment<'_>,
        selector: &Felt252,
        calldata: &[Felt252],
    ) -> Result<Vec<Felt252>, TransactionError> {
        if *selector == *CONSTRUCTOR_ENTRY_POINT_SELECTOR {
            constructor(environment, calldata)
        } else if *selector == *GET_IMPLEMENTATION_SELECTOR {
            let implementation =
                environment.storage_read(storage_var_address(IMPLEMENTATION_STORAGE_VAR))?;
            Ok(vec![implementation])
        } else {
            forward(environment, selector, calldata)
        }
    }
}

/// `constructor(implementation, initializer_selector, calldata_len, calldata...)`:
/// stores the implementation pointer, then runs the initializer on it in the
/// proxy's own storage context.
fn constructor(
    environment: &mut CallEnvironment<'_>,
    calldata: &[Felt252],
) -> Result<Vec<Felt252>, TransactionError> {
    if calldata.len() < 3 {
        return Err(TransactionError::MalformedCalldata(
            "proxy constructor expects an implementation, an initializer selector and \
             length-prefixed initializer calldata"
                .to_string(),
        ));
    }
    let implementation = calldata[0];
    let initializer_selector = calldata[1];
    let initializer_calldata = &calldata[3..];
    if initializer_calldata.len() != felt_to_usize(&calldata[2])? {
        return Err(TransactionError::MalformedCalldata(
            "initializer calldata does not match its length prefix".to_string(),
        ));
    }

    environment.storage_write(
        storage_var_address(IMPLEMENTATION_STORAGE_VAR),
        implementation,
    );
    environment.library_call(
        felt_to_hash(&implementation),
        initializer_selector,
        initializer_calldata.to_vec(),
    )?;
    Ok(vec![])
}

fn forward(
    environment: &mut CallEnvironment<'_>,
    selector: &Felt252,
    calldata: &[Felt252],
) -> Result<Vec<Felt252>, TransactionError> {
    let implementation =
        environment.storage_read(storage_var_address(IMPLEMENTATION_STORAGE_VAR))?;
    if implementation == Felt252::ZERO {
        return Err(TransactionError::Revert(
            "proxy: no implementation set".to_string(),
        ));
    }
    debug!(implementation = %implementation, "forwarding call through proxy");
    environment.library_call(felt_to_hash(&implementation), *selector, calldata.to_vec())
}
