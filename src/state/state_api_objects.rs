use serde::{Deserialize, Serialize};

use crate::utils::Address;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockInfo {
    /// The sequence number of the last created block.
    pub block_number: u64,
    /// The timestamp of the last created block.
    pub block_timestamp: u64,
    /// The gas price at the time of the last created block.
    pub gas_price: u128,
    /// The sequencer address of this block.
    pub sequencer_address: Address,
}

impl BlockInfo {
    pub fn empty(sequencer_address: Address) -> Self {
        BlockInfo {
            block_number: 0,
            block_timestamp: 0,
            gas_price: 0,
            sequencer_address,
        }
    }
}
