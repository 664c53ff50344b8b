/// Structured error code attached to a rejected transaction, following the
/// StarkNet gateway convention. A missing entry point is reported under its
/// own code so callers can tell an interface problem apart from a plain
/// execution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarknetErrorCode {
    TransactionFailed,
    EntryPointNotFoundInContract,
    UninitializedContract,
}
