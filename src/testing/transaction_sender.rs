use crate::core::transaction_hash::{calculate_transaction_hash_common, TransactionHashPrefix};
use crate::definitions::constants::{EXECUTE_ENTRY_POINT_SELECTOR, TRANSACTION_VERSION};
use crate::execution::TransactionExecutionInfo;
use crate::testing::sandbox_state::SandboxState;
use crate::testing::signer::Signer;
use crate::transaction::error::TransactionError;
use crate::transaction::{InvokeFunction, Transaction};
use crate::utils::{selector_from_name, Address};
use crate::Felt252;

/// One entry of a multicall: target contract, entry point and arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub to: Address,
    pub selector: Felt252,
    pub calldata: Vec<Felt252>,
}

impl Call {
    pub fn new(to: Address, entry_point: &str, calldata: Vec<Felt252>) -> Self {
        Call {
            to,
            selector: selector_from_name(entry_point),
            calldata,
        }
    }
}

/// The two signers a dual-key account expects, bound to their roles by field
/// name so the owner and guardian cannot be transposed silently. The owner
/// signature always comes first in the submitted transaction.
#[derive(Debug, Clone, Copy)]
pub struct DualKeySigners<'a> {
    pub owner: &'a Signer,
    pub guardian: &'a Signer,
}

/// Builds, signs and submits dual-signed multicall transactions for one
/// account contract.
pub struct TransactionSender {
    account: Address,
}

impl TransactionSender {
    pub fn new(account: Address) -> Self {
        TransactionSender { account }
    }

    /// Fetches the account's current nonce, encodes the calls, signs the
    /// canonical transaction hash with both keys and submits the result.
    /// A failed execution is reported through the returned `Result`, leaving
    /// the sandbox state untouched.
    pub fn send_transaction(
        &self,
        sandbox: &mut SandboxState,
        calls: &[Call],
        signers: &DualKeySigners<'_>,
    ) -> Result<TransactionExecutionInfo, TransactionError> {
        let nonce = sandbox.nonce_at(&self.account)?;
        let calldata = encode_multicall(calls);
        let hash_value = calculate_transaction_hash_common(
            TransactionHashPrefix::Invoke,
            *TRANSACTION_VERSION,
            &self.account,
            Felt252::ZERO,
            &calldata,
            0,
            sandbox.chain_id(),
            &[nonce],
        );

        let mut signature = Vec::with_capacity(4);
        signature.extend(signers.owner.sign(&hash_value)?);
        signature.extend(signers.guardian.sign(&hash_value)?);

        let tx = InvokeFunction::new_with_tx_hash(
            self.account.clone(),
            *EXECUTE_ENTRY_POINT_SELECTOR,
            0,
            *TRANSACTION_VERSION,
            calldata,
            signature,
            Some(nonce),
            hash_value,
        )?;
        sandbox.execute_tx(Transaction::InvokeFunction(tx))
    }
}

/// Flattens calls into the account's `__execute__` payload:
/// `[n, (to, selector, data_offset, data_len) * n, total_len, data...]`.
pub fn encode_multicall(calls: &[Call]) -> Vec<Felt252> {
    let mut encoded = Vec::with_capacity(2 + calls.len() * 4);
    let mut data = Vec::new();

    encoded.push(Felt252::from(calls.len() as u64));
    for call in calls {
        encoded.push(call.to.0);
        encoded.push(call.selector);
        encoded.push(Felt252::from(data.len() as u64));
        encoded.push(Felt252::from(call.calldata.len() as u64));
        data.extend_from_slice(&call.calldata);
    }
    encoded.push(Felt252::from(data.len() as u64));
    encoded.extend(data);
    encoded
}
