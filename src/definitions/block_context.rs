use getset::{Getters, MutGetters};

use crate::definitions::constants::DEFAULT_SEQUENCER_ADDRESS;
use crate::state::state_api_objects::BlockInfo;
use crate::utils::short_string_to_felt;
use crate::Felt252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarknetChainId {
    MainNet,
    TestNet,
    TestNet2,
}

impl StarknetChainId {
    pub fn to_felt(self) -> Felt252 {
        short_string_to_felt(match self {
            StarknetChainId::MainNet => "SN_MAIN",
            StarknetChainId::TestNet => "SN_GOERLI",
            StarknetChainId::TestNet2 => "SN_GOERLI2",
        })
    }
}

#[derive(Debug, Clone, Getters)]
pub struct StarknetOsConfig {
    #[getset(get = "pub")]
    chain_id: Felt252,
}

impl StarknetOsConfig {
    pub fn new(chain_id: Felt252) -> Self {
        StarknetOsConfig { chain_id }
    }
}

impl Default for StarknetOsConfig {
    fn default() -> Self {
        StarknetOsConfig::new(StarknetChainId::TestNet.to_felt())
    }
}

/// Execution context shared by every transaction in the sandbox.
#[derive(Debug, Clone, Getters, MutGetters)]
pub struct BlockContext {
    #[getset(get = "pub")]
    starknet_os_config: StarknetOsConfig,
    #[getset(get = "pub", get_mut = "pub")]
    block_info: BlockInfo,
}

impl BlockContext {
    pub fn new(starknet_os_config: StarknetOsConfig, block_info: BlockInfo) -> Self {
        BlockContext {
            starknet_os_config,
            block_info,
        }
    }
}

impl Default for BlockContext {
    fn default() -> Self {
        BlockContext::new(
            StarknetOsConfig::default(),
            BlockInfo::empty(DEFAULT_SEQUENCER_ADDRESS.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_encodes_as_short_string() {
        assert_eq!(
            StarknetChainId::TestNet.to_felt(),
            Felt252::from_bytes_be_slice(b"SN_GOERLI")
        );
        assert_ne!(
            StarknetChainId::MainNet.to_felt(),
            StarknetChainId::TestNet.to_felt()
        );
    }
}
