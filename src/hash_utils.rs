use lazy_static::lazy_static;
use starknet_crypto::pedersen_hash;

use crate::utils::{short_string_to_felt, Address};
use crate::Felt252;

lazy_static! {
    // 2**251 - 256: contract addresses are bounded away from the top of the field.
    static ref L2_ADDRESS_UPPER_BOUND: Felt252 = Felt252::from_hex(
        "0x7ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff00"
    )
    .unwrap();
    static ref CONTRACT_ADDRESS_PREFIX: Felt252 = short_string_to_felt("STARKNET_CONTRACT_ADDRESS");
}

/// Deterministic deployment address: a pedersen chain over the deployment
/// parameters, reduced into the L2 address range.
pub fn calculate_contract_address(
    salt: &Address,
    class_hash: &Felt252,
    constructor_calldata: &[Felt252],
    deployer_address: Address,
) -> Felt252 {
    let constructor_calldata_hash = compute_hash_on_elements(constructor_calldata);
    let raw_address = compute_hash_on_elements(&[
        *CONTRACT_ADDRESS_PREFIX,
        deployer_address.0,
        salt.0,
        *class_hash,
        constructor_calldata_hash,
    ]);

    // raw_address < 2 * bound, so a single conditional subtraction is a full
    // reduction.
    if raw_address >= *L2_ADDRESS_UPPER_BOUND {
        raw_address - *L2_ADDRESS_UPPER_BOUND
    } else {
        raw_address
    }
}

/// Pedersen hash chain: starts at 0 and ends with the element count appended,
/// so `H([x, y, z])` can never collide with `H([h(x, y), z])`.
pub fn compute_hash_on_elements(elements: &[Felt252]) -> Felt252 {
    let mut result = Felt252::ZERO;
    for element in elements {
        result = pedersen_hash(&result, element);
    }
    pedersen_hash(&result, &Felt252::from(elements.len() as u64))
}
