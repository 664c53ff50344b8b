use crate::definitions::constants::CONSTRUCTOR_ENTRY_POINT_SELECTOR;
use crate::hash_utils::compute_hash_on_elements;
use crate::transaction::error::TransactionError;
use crate::utils::{short_string_to_felt, Address};
use crate::Felt252;

#[derive(Debug, Clone, Copy)]
pub enum TransactionHashPrefix {
    Declare,
    Deploy,
    Invoke,
}

impl TransactionHashPrefix {
    fn get_prefix(&self) -> Felt252 {
        short_string_to_felt(match self {
            TransactionHashPrefix::Declare => "declare",
            TransactionHashPrefix::Deploy => "deploy",
            TransactionHashPrefix::Invoke => "invoke",
        })
    }
}

/// Calculates the transaction hash in the StarkNet network - a unique identifier of the
/// transaction.
/// The transaction hash is a hash chain of the following information:
///    1. A prefix that depends on the transaction type.
///    2. The transaction's version.
///    3. Contract address.
///    4. Entry point selector.
///    5. A hash chain of the calldata.
///    6. The transaction's maximum fee.
///    7. The network's chain ID.
/// Each hash chain computation begins with 0 as initialization and ends with its length appended.
/// The length is appended in order to avoid collisions of the following kind:
/// ```txt
///     H([x,y,z]) = h(h(x,y),z) = H([w, z]) where w = h(x,y)
/// ```
#[allow(clippy::too_many_arguments)]
pub fn calculate_transaction_hash_common(
    tx_hash_prefix: TransactionHashPrefix,
    version: Felt252,
    contract_address: &Address,
    entry_point_selector: Felt252,
    calldata: &[Felt252],
    max_fee: u128,
    chain_id: Felt252,
    additional_data: &[Felt252],
) -> Felt252 {
    let calldata_hash = compute_hash_on_elements(calldata);

    let mut data_to_hash: Vec<Felt252> = vec![
        tx_hash_prefix.get_prefix(),
        version,
        contract_address.0,
        entry_point_selector,
        calldata_hash,
        Felt252::from(max_fee),
        chain_id,
    ];
    data_to_hash.extend_from_slice(additional_data);

    compute_hash_on_elements(&data_to_hash)
}

pub fn calculate_deploy_transaction_hash(
    version: Felt252,
    contract_address: &Address,
    constructor_calldata: &[Felt252],
    chain_id: Felt252,
) -> Felt252 {
    calculate_transaction_hash_common(
        TransactionHashPrefix::Deploy,
        version,
        contract_address,
        *CONSTRUCTOR_ENTRY_POINT_SELECTOR,
        constructor_calldata,
        // Considered 0 for Deploy transaction hash calculation purposes.
        0,
        chain_id,
        &[],
    )
}

pub fn calculate_declare_transaction_hash(
    class_hash: Felt252,
    chain_id: Felt252,
    sender_address: &Address,
    version: Felt252,
    nonce: Felt252,
) -> Felt252 {
    calculate_transaction_hash_common(
        TransactionHashPrefix::Declare,
        version,
        sender_address,
        Felt252::ZERO,
        &[class_hash],
        0,
        chain_id,
        &[nonce],
    )
}

/// For a version 1 invoke the selector is fixed to zero and the nonce joins
/// the hash through the additional data; version 0 hashes the selector itself
/// and carries no nonce.
pub fn preprocess_invoke_function_fields(
    entry_point_selector: Felt252,
    nonce: Option<Felt252>,
    version: Felt252,
) -> Result<(Felt252, Vec<Felt252>), TransactionError> {
    if version == Felt252::ZERO {
        match nonce {
            None => Ok((entry_point_selector, Vec::new())),
            Some(_) => Err(TransactionError::UnexpectedNonce),
        }
    } else {
        let nonce = nonce.ok_or(TransactionError::MissingNonce)?;
        Ok((Felt252::ZERO, vec![nonce]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_match_the_network_constants() {
        assert_eq!(
            TransactionHashPrefix::Invoke.get_prefix(),
            Felt252::from_dec_str("115923154332517").unwrap()
        );
        assert_eq!(
            TransactionHashPrefix::Deploy.get_prefix(),
            Felt252::from_dec_str("110386840629113").unwrap()
        );
        assert_eq!(
            TransactionHashPrefix::Declare.get_prefix(),
            Felt252::from_dec_str("28258975365558885").unwrap()
        );
    }

    #[test]
    fn hash_is_deterministic_and_binds_every_field() {
        let address = Address(1111.into());
        let calldata = vec![3.into(), 4.into()];
        let hash = |nonce: u64, calldata: &[Felt252]| {
            calculate_transaction_hash_common(
                TransactionHashPrefix::Invoke,
                1.into(),
                &address,
                Felt252::ZERO,
                calldata,
                0,
                Felt252::from_bytes_be_slice(b"SN_GOERLI"),
                &[nonce.into()],
            )
        };

        assert_eq!(hash(0, &calldata), hash(0, &calldata));
        assert_ne!(hash(0, &calldata), hash(1, &calldata));
        assert_ne!(hash(0, &calldata), hash(0, &[3.into()]));
    }

    #[test]
    fn invoke_fields_require_a_nonce_for_version_1() {
        let selector = Felt252::from(99u64);

        let (field, data) =
            preprocess_invoke_function_fields(selector, Some(7.into()), 1.into()).unwrap();
        assert_eq!(field, Felt252::ZERO);
        assert_eq!(data, vec![Felt252::from(7u64)]);

        assert_matches!(
            preprocess_invoke_function_fields(selector, None, 1.into()),
            Err(TransactionError::MissingNonce)
        );
        assert_matches!(
            preprocess_invoke_function_fields(selector, Some(7.into()), Felt252::ZERO),
            Err(TransactionError::UnexpectedNonce)
        );
    }
}
