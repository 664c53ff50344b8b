use lazy_static::lazy_static;

use crate::contracts::{storage_var_mapping_address, ContractHandler};
use crate::execution::execution_entry_point::CallEnvironment;
use crate::transaction::error::TransactionError;
use crate::utils::selector_from_name;
use crate::Felt252;

const STORED_NUMBER_VAR: &str = "stored_number";

lazy_static! {
    static ref SET_NUMBER_SELECTOR: Felt252 = selector_from_name("set_number");
    static ref GET_NUMBER_SELECTOR: Felt252 = selector_from_name("get_number");
}

/// Minimal target contract: stores one number per caller.
pub struct TestDapp;

impl ContractHandler for TestDapp {
    fn program(&self) -> &'static str {
        "test_dapp"
    }

    fn invoke(
        &self,
        environment: &mut CallEnvironment<'_>,
        selector: &Felt252,
        calldata: &[Felt252],
    ) -> Result<Vec<Felt252>, TransactionError> {
        if *selector == *SET_NUMBER_SELECTOR {
            if calldata.len() != 1 {
                return Err(TransactionError::MalformedCalldata(
                    "set_number expects a single value".to_string(),
                ));
            }
            let key = storage_var_mapping_address(STORED_NUMBER_VAR, &environment.caller_address().0);
            environment.storage_write(key, calldata[0]);
            Ok(vec![])
        } else if *selector == *GET_NUMBER_SELECTOR {
            if calldata.len() != 1 {
                return Err(TransactionError::MalformedCalldata(
                    "get_number expects a user address".to_string(),
                ));
            }
            let key = storage_var_mapping_address(STORED_NUMBER_VAR, &calldata[0]);
            Ok(vec![environment.storage_read(key)?])
        } else {
            Err(TransactionError::EntryPointNotFound(*selector))
        }
    }
}
