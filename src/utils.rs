use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::transaction::error::TransactionError;
use crate::Felt252;

/// Content-derived identifier of a declared contract class.
pub type ClassHash = [u8; 32];

//* -------------------
//*      Address
//* -------------------

#[derive(Debug, Clone, PartialEq, Hash, Eq, Default, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Address(pub Felt252);

//* -------------------
//*  Helper Functions
//* -------------------

/// Keccak-256 truncated to the 250 bits StarkNet uses for selectors and
/// storage variable addresses.
pub fn calculate_sn_keccak(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::default();
    hasher.update(data);
    let mut result: [u8; 32] = hasher.finalize().into();
    // Only the first 250 bits from the hash are used.
    result[0] &= 0b0000_0011;
    result
}

/// Entry point selector for a function name, `sn_keccak(name)` as a felt.
pub fn selector_from_name(name: &str) -> Felt252 {
    Felt252::from_bytes_be(&calculate_sn_keccak(name.as_bytes()))
}

/// Encodes an ASCII string of at most 31 characters as a felt, big endian.
/// Used for chain ids and hash prefixes.
pub fn short_string_to_felt(text: &str) -> Felt252 {
    Felt252::from_bytes_be_slice(text.as_bytes())
}

pub fn felt_to_hash(value: &Felt252) -> ClassHash {
    value.to_bytes_be()
}

pub fn felt_to_u64(value: &Felt252) -> Result<u64, TransactionError> {
    let bytes = value.to_bytes_be();
    if bytes[..24].iter().any(|b| *b != 0) {
        return Err(TransactionError::InvalidFeltConversion);
    }
    let mut buf = [0; 8];
    buf.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(buf))
}

pub fn felt_to_usize(value: &Felt252) -> Result<usize, TransactionError> {
    felt_to_u64(value)?
        .try_into()
        .map_err(|_| TransactionError::InvalidFeltConversion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_from_name_matches_known_values() {
        // Values generated from `get_selector_from_name` in cairo-lang.
        assert_eq!(
            selector_from_name("__execute__"),
            Felt252::from_dec_str(
                "617075754465154585683856897856256838130216341506379215893724690153393808813"
            )
            .unwrap()
        );
        assert_eq!(
            selector_from_name("constructor"),
            Felt252::from_dec_str(
                "1159040026212278395030414237414753050475174923702621880048416706425641521556"
            )
            .unwrap()
        );
    }

    #[test]
    fn short_string_encoding_matches_known_prefixes() {
        assert_eq!(
            short_string_to_felt("invoke"),
            Felt252::from_dec_str("115923154332517").unwrap()
        );
        assert_eq!(
            short_string_to_felt("deploy"),
            Felt252::from_dec_str("110386840629113").unwrap()
        );
        assert_eq!(
            short_string_to_felt("declare"),
            Felt252::from_dec_str("28258975365558885").unwrap()
        );
    }

    #[test]
    fn felt_to_u64_roundtrip_and_overflow() {
        assert_eq!(felt_to_u64(&Felt252::from(47u64)).unwrap(), 47);
        assert_eq!(felt_to_u64(&Felt252::from(u64::MAX)).unwrap(), u64::MAX);

        let too_big = Felt252::from(u64::MAX) + Felt252::ONE;
        assert_matches!(
            felt_to_u64(&too_big),
            Err(TransactionError::InvalidFeltConversion)
        );
    }

    #[test]
    fn hash_of_felt_restores_through_bytes() {
        let value = Felt252::from_dec_str("123456789").unwrap();
        assert_eq!(Felt252::from_bytes_be(&felt_to_hash(&value)), value);
    }
}
