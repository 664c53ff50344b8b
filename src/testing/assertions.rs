use std::fmt::Debug;

use crate::definitions::error_codes::StarknetErrorCode;
use crate::execution::{Event, TransactionExecutionInfo};
use crate::transaction::error::TransactionError;
use crate::utils::{selector_from_name, Address};
use crate::Felt252;

/// Asserts that a submitted transaction reverted with the expected error code
/// (defaulting to the generic transaction failure) and, when given, that the
/// error message contains `expected_message`. An unexpected success, a wrong
/// code or a missing substring all fail the test immediately.
///
/// Returns the error so callers can inspect it further.
#[track_caller]
pub fn assert_revert<T: Debug>(
    result: Result<T, TransactionError>,
    expected_message: Option<&str>,
    expected_code: Option<StarknetErrorCode>,
) -> TransactionError {
    let expected_code = expected_code.unwrap_or(StarknetErrorCode::TransactionFailed);
    let error = match result {
        Ok(exec_info) => panic!(
            "expected the transaction to revert with {expected_code:?}, but it succeeded: \
             {exec_info:?}"
        ),
        Err(error) => error,
    };

    let code = error.error_code();
    assert_eq!(
        code, expected_code,
        "transaction reverted with code {code:?} ({error}), expected {expected_code:?}"
    );
    if let Some(expected_message) = expected_message {
        let message = error.to_string();
        assert!(
            message.contains(expected_message),
            "revert message {message:?} does not contain {expected_message:?}"
        );
    }
    error
}

/// Asserts that the transaction emitted an event from `from_address` whose
/// key is the selector of `name`. With a non-empty `data` the event data must
/// match structurally; an empty `data` matches regardless of the actual
/// payload.
#[track_caller]
pub fn assert_event_emitted(
    tx_exec_info: &TransactionExecutionInfo,
    from_address: &Address,
    name: &str,
    data: &[Felt252],
) {
    let events = tx_exec_info
        .get_sorted_events()
        .unwrap_or_else(|error| panic!("could not collect the emitted events: {error}"));
    let raw_events: Vec<Event> = if data.is_empty() {
        events
            .into_iter()
            .map(|event| Event {
                data: vec![],
                ..event
            })
            .collect()
    } else {
        events
    };

    let expected = Event {
        from_address: from_address.clone(),
        keys: vec![selector_from_name(name)],
        data: data.to_vec(),
    };
    assert!(
        raw_events.contains(&expected),
        "no {name:?} event from {from_address:?} with data {data:?}; emitted events: \
         {raw_events:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{CallInfo, OrderedEvent};

    fn exec_info_with_event(keys: Vec<Felt252>, data: Vec<Felt252>) -> TransactionExecutionInfo {
        TransactionExecutionInfo {
            call_info: Some(CallInfo {
                contract_address: Address(1.into()),
                events: vec![OrderedEvent::new(0, keys, data)],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn assert_revert_returns_the_matched_error() {
        let result: Result<(), TransactionError> =
            Err(TransactionError::Revert("argent: only self".to_string()));
        let error = assert_revert(result, Some("argent: only self"), None);
        assert_matches!(error, TransactionError::Revert(_));
    }

    #[test]
    #[should_panic(expected = "expected the transaction to revert")]
    fn assert_revert_panics_on_success() {
        assert_revert(Ok(()), None, None);
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn assert_revert_panics_on_a_missing_substring() {
        let result: Result<(), TransactionError> =
            Err(TransactionError::Revert("argent: only self".to_string()));
        assert_revert(result, Some("guardian signature invalid"), None);
    }

    #[test]
    #[should_panic(expected = "transaction reverted with code")]
    fn assert_revert_panics_on_a_wrong_code() {
        let result: Result<(), TransactionError> =
            Err(TransactionError::Revert("argent: only self".to_string()));
        assert_revert(
            result,
            None,
            Some(StarknetErrorCode::EntryPointNotFoundInContract),
        );
    }

    #[test]
    fn assert_event_emitted_matches_structurally() {
        let exec_info =
            exec_info_with_event(vec![selector_from_name("account_upgraded")], vec![47.into()]);
        assert_event_emitted(
            &exec_info,
            &Address(1.into()),
            "account_upgraded",
            &[47.into()],
        );
        // Empty expected data matches any payload.
        assert_event_emitted(&exec_info, &Address(1.into()), "account_upgraded", &[]);
    }

    #[test]
    #[should_panic(expected = "no \"account_upgraded\" event")]
    fn assert_event_emitted_panics_when_absent() {
        let exec_info = exec_info_with_event(vec![selector_from_name("other_event")], vec![]);
        assert_event_emitted(&exec_info, &Address(1.into()), "account_upgraded", &[]);
    }
}
