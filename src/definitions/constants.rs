use lazy_static::lazy_static;

use crate::utils::{selector_from_name, Address};
use crate::Felt252;

lazy_static! {
    /// Value generated from `get_selector_from_name('constructor')`.
    pub static ref CONSTRUCTOR_ENTRY_POINT_SELECTOR: Felt252 = selector_from_name("constructor");
    /// Value generated from `get_selector_from_name('__execute__')`.
    pub static ref EXECUTE_ENTRY_POINT_SELECTOR: Felt252 = selector_from_name("__execute__");
    /// Value generated from `get_selector_from_name('__validate__')`.
    pub static ref VALIDATE_ENTRY_POINT_SELECTOR: Felt252 = selector_from_name("__validate__");

    pub static ref TRANSACTION_VERSION: Felt252 = 1.into();

    pub static ref DEFAULT_SEQUENCER_ADDRESS: Address = Address(
        Felt252::from_hex("0x3711666a3506c99c9d78c4d4013409a87a962b7a0880a1c24af9fe193dafc01")
            .unwrap()
    );
}
