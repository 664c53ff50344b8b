use lazy_static::lazy_static;
use starknet_crypto::verify;
use tracing::debug;

use crate::contracts::proxy::IMPLEMENTATION_STORAGE_VAR;
use crate::contracts::{
    probe_account_interface, storage_var_address, ContractHandler, ImplementationProbe,
};
use crate::definitions::constants::{EXECUTE_ENTRY_POINT_SELECTOR, VALIDATE_ENTRY_POINT_SELECTOR};
use crate::execution::execution_entry_point::CallEnvironment;
use crate::transaction::error::TransactionError;
use crate::utils::{felt_to_hash, felt_to_usize, selector_from_name, Address};
use crate::Felt252;

const SIGNER_STORAGE_VAR: &str = "_signer";
const GUARDIAN_STORAGE_VAR: &str = "_guardian";

lazy_static! {
    static ref INITIALIZE_SELECTOR: Felt252 = selector_from_name("initialize");
    static ref GET_SIGNER_SELECTOR: Felt252 = selector_from_name("get_signer");
    static ref GET_GUARDIAN_SELECTOR: Felt252 = selector_from_name("get_guardian");
    static ref UPGRADE_SELECTOR: Felt252 = selector_from_name("upgrade");
    static ref ACCOUNT_UPGRADED_EVENT_KEY: Felt252 = selector_from_name("account_upgraded");
}

/// Account implementation requiring two independent signatures over the
/// transaction hash: the owner's, then the guardian's. Runs behind [`Proxy`],
/// so its storage lives at the proxy's address.
///
/// [`Proxy`]: crate::contracts::proxy::Proxy
pub struct ArgentAccount;

impl ContractHandler for ArgentAccount {
    fn program(&self) -> &'static str {
        "argent_account"
    }

    fn invoke(
        &self,
        environment: &mut CallEnvironment<'_>,
        selector: &Felt252,
        calldata: &[Felt252],
    ) -> Result<Vec<Felt252>, TransactionError> {
        if *selector == *VALIDATE_ENTRY_POINT_SELECTOR {
            validate(environment)
        } else if *selector == *EXECUTE_ENTRY_POINT_SELECTOR {
            execute_multicall(environment, calldata)
        } else if *selector == *INITIALIZE_SELECTOR {
            initialize(environment, calldata)
        } else if *selector == *GET_SIGNER_SELECTOR {
            let signer = environment.storage_read(storage_var_address(SIGNER_STORAGE_VAR))?;
            Ok(vec![signer])
        } else if *selector == *GET_GUARDIAN_SELECTOR {
            let guardian = environment.storage_read(storage_var_address(GUARDIAN_STORAGE_VAR))?;
            Ok(vec![guardian])
        } else if *selector == *UPGRADE_SELECTOR {
            upgrade(environment, calldata)
        } else {
            Err(TransactionError::EntryPointNotFound(*selector))
        }
    }
}

fn initialize(
    environment: &mut CallEnvironment<'_>,
    calldata: &[Felt252],
) -> Result<Vec<Felt252>, TransactionError> {
    if calldata.len() != 2 {
        return Err(TransactionError::MalformedCalldata(
            "initialize expects a signer key and a guardian key".to_string(),
        ));
    }
    let current_signer = environment.storage_read(storage_var_address(SIGNER_STORAGE_VAR))?;
    if current_signer != Felt252::ZERO {
        return Err(TransactionError::Revert(
            "argent: already initialized".to_string(),
        ));
    }

    environment.storage_write(storage_var_address(SIGNER_STORAGE_VAR), calldata[0]);
    environment.storage_write(storage_var_address(GUARDIAN_STORAGE_VAR), calldata[1]);
    debug!(account = %environment.contract_address().0, "account initialized");
    Ok(vec![])
}

/// Checks the dual signature `[owner_r, owner_s, guardian_r, guardian_s]`
/// against the keys in storage. The owner signs first; a guardian signature
/// is required whenever a guardian key is set.
fn validate(environment: &mut CallEnvironment<'_>) -> Result<Vec<Felt252>, TransactionError> {
    let signer = environment.storage_read(storage_var_address(SIGNER_STORAGE_VAR))?;
    if signer == Felt252::ZERO {
        return Err(TransactionError::Revert(
            "argent: account not initialized".to_string(),
        ));
    }

    let transaction_hash = environment.transaction_hash();
    let signature = environment.signature();

    if signature.len() < 2
        || !signature_is_valid(&signer, &transaction_hash, &signature[0], &signature[1])
    {
        return Err(TransactionError::Revert(
            "argent: signer signature invalid".to_string(),
        ));
    }

    let guardian = environment.storage_read(storage_var_address(GUARDIAN_STORAGE_VAR))?;
    if guardian != Felt252::ZERO {
        if signature.len() != 4
            || !signature_is_valid(&guardian, &transaction_hash, &signature[2], &signature[3])
        {
            return Err(TransactionError::Revert(
                "argent: guardian signature invalid".to_string(),
            ));
        }
    } else if signature.len() != 2 {
        return Err(TransactionError::Revert(
            "argent: signature format invalid".to_string(),
        ));
    }

    Ok(vec![])
}

fn signature_is_valid(
    public_key: &Felt252,
    message_hash: &Felt252,
    r: &Felt252,
    s: &Felt252,
) -> bool {
    // An out-of-range r or s is an invalid signature, not an internal error.
    matches!(verify(public_key, message_hash, r, s), Ok(true))
}

/// Decodes and runs the multicall payload
/// `[n, (to, selector, data_offset, data_len) * n, total_len, data...]`,
/// concatenating the retdata of every call.
fn execute_multicall(
    environment: &mut CallEnvironment<'_>,
    calldata: &[Felt252],
) -> Result<Vec<Felt252>, TransactionError> {
    let calls = decode_call_array(calldata)?;
    let mut retdata = Vec::new();
    for (to, selector, call_data) in calls {
        retdata.extend(environment.call_contract(Address(to), selector, call_data)?);
    }
    Ok(retdata)
}

pub(crate) fn decode_call_array(
    calldata: &[Felt252],
) -> Result<Vec<(Felt252, Felt252, Vec<Felt252>)>, TransactionError> {
    let malformed = |reason: &str| TransactionError::MalformedCalldata(reason.to_string());

    let call_count = felt_to_usize(calldata.first().ok_or_else(|| malformed("empty payload"))?)?;
    let data_start = 2 + call_count * 4;
    if calldata.len() < data_start {
        return Err(malformed("truncated call array"));
    }
    let data = &calldata[data_start..];
    if data.len() != felt_to_usize(&calldata[data_start - 1])? {
        return Err(malformed("calldata does not match its length prefix"));
    }

    let mut calls = Vec::with_capacity(call_count);
    for index in 0..call_count {
        let entry = &calldata[1 + index * 4..1 + (index + 1) * 4];
        let offset = felt_to_usize(&entry[2])?;
        let length = felt_to_usize(&entry[3])?;
        let call_data = data
            .get(offset..offset + length)
            .ok_or_else(|| malformed("call data range out of bounds"))?;
        calls.push((entry[0], entry[1], call_data.to_vec()));
    }
    Ok(calls)
}

/// Replaces the implementation the proxy forwards to. Only callable by the
/// account itself, and only with a class that passes the account interface
/// probe.
fn upgrade(
    environment: &mut CallEnvironment<'_>,
    calldata: &[Felt252],
) -> Result<Vec<Felt252>, TransactionError> {
    if calldata.len() != 1 {
        return Err(TransactionError::MalformedCalldata(
            "upgrade expects the new implementation class".to_string(),
        ));
    }
    if environment.caller_address() != environment.contract_address() {
        return Err(TransactionError::Revert("argent: only self".to_string()));
    }

    let new_implementation = calldata[0];
    let new_class = environment.contract_class(&felt_to_hash(&new_implementation))?;
    match probe_account_interface(&new_class) {
        ImplementationProbe::MissingInterface => {
            Err(TransactionError::MissingAccountInterface(new_implementation))
        }
        ImplementationProbe::Valid => {
            environment.storage_write(
                storage_var_address(IMPLEMENTATION_STORAGE_VAR),
                new_implementation,
            );
            environment.emit_event(vec![*ACCOUNT_UPGRADED_EVENT_KEY], vec![new_implementation]);
            debug!(new_implementation = %new_implementation, "account upgraded");
            Ok(vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_call_array_handles_two_calls() {
        let calldata: Vec<Felt252> = vec![
            2.into(),
            // call 0: set_number(47) on contract 100
            100.into(),
            10.into(),
            0.into(),
            1.into(),
            // call 1: transfer(5, 6) on contract 200
            200.into(),
            20.into(),
            1.into(),
            2.into(),
            // flattened data
            3.into(),
            47.into(),
            5.into(),
            6.into(),
        ];

        let calls = decode_call_array(&calldata).unwrap();
        assert_eq!(
            calls,
            vec![
                (100.into(), 10.into(), vec![47.into()]),
                (200.into(), 20.into(), vec![5.into(), 6.into()]),
            ]
        );
    }

    #[test]
    fn decode_call_array_rejects_malformed_payloads() {
        assert_matches!(
            decode_call_array(&[]),
            Err(TransactionError::MalformedCalldata(_))
        );
        // One call announced, no call array entries.
        assert_matches!(
            decode_call_array(&[1.into()]),
            Err(TransactionError::MalformedCalldata(_))
        );
        // Data length prefix disagrees with the payload.
        assert_matches!(
            decode_call_array(&[1.into(), 100.into(), 10.into(), 0.into(), 1.into(), 2.into(), 47.into()]),
            Err(TransactionError::MalformedCalldata(_))
        );
        // Call data range reaches past the flattened data.
        assert_matches!(
            decode_call_array(&[1.into(), 100.into(), 10.into(), 1.into(), 1.into(), 1.into(), 47.into()]),
            Err(TransactionError::MalformedCalldata(_))
        );
    }
}
