#![allow(dead_code)]

use lazy_static::lazy_static;
use stark_sandbox::testing::{compile, SandboxState, Signer};
use stark_sandbox::utils::{selector_from_name, Address};
use stark_sandbox::Felt252;

pub const PROXY_ARTIFACT: &str = "contract_abis/proxy.json";
pub const ACCOUNT_ARTIFACT: &str = "contract_abis/argent_account.json";
pub const ACCOUNT_V2_ARTIFACT: &str = "contract_abis/argent_account_v2.json";
pub const DAPP_ARTIFACT: &str = "contract_abis/test_dapp.json";

lazy_static! {
    pub static ref SIGNER: Signer = Signer::new(1);
    pub static ref GUARDIAN: Signer = Signer::new(2);
    pub static ref WRONG_SIGNER: Signer = Signer::new(3);
    pub static ref WRONG_GUARDIAN: Signer = Signer::new(4);

    /// Baseline deployment shared by the whole test module. Each test case
    /// forks it, so mutations never leak between cases.
    pub static ref BASE: Fixture = Fixture::deploy();
}

#[derive(Clone)]
pub struct Fixture {
    pub sandbox: SandboxState,
    pub proxy: Address,
    pub dapp: Address,
    pub account_class: Felt252,
    pub account_2_class: Felt252,
    pub non_account_class: Felt252,
}

impl Fixture {
    fn deploy() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut sandbox = SandboxState::new(None);

        let proxy_cls = compile(PROXY_ARTIFACT).unwrap();
        let account_cls = compile(ACCOUNT_ARTIFACT).unwrap();
        let account_2_cls = compile(ACCOUNT_V2_ARTIFACT).unwrap();
        let dapp_cls = compile(DAPP_ARTIFACT).unwrap();

        let (account_class_hash, _) = sandbox.declare(account_cls).unwrap();
        let (account_2_class_hash, _) = sandbox.declare(account_2_cls).unwrap();
        let (non_account_class_hash, _) = sandbox.declare(dapp_cls.clone()).unwrap();

        let account_class = Felt252::from_bytes_be(&account_class_hash);
        let account_2_class = Felt252::from_bytes_be(&account_2_class_hash);
        let non_account_class = Felt252::from_bytes_be(&non_account_class_hash);

        let (proxy, _) = sandbox
            .deploy(
                proxy_cls,
                vec![
                    account_class,
                    selector_from_name("initialize"),
                    2.into(),
                    SIGNER.public_key(),
                    GUARDIAN.public_key(),
                ],
                Address(1.into()),
            )
            .unwrap();
        let (dapp, _) = sandbox.deploy(dapp_cls, vec![], Address(2.into())).unwrap();

        Fixture {
            sandbox,
            proxy,
            dapp,
            account_class,
            account_2_class,
            non_account_class,
        }
    }

    pub fn fork(&self) -> Fixture {
        self.clone()
    }

    pub fn get_implementation(&self) -> Felt252 {
        self.sandbox
            .call(&self.proxy, "get_implementation", vec![])
            .unwrap()[0]
    }
}
