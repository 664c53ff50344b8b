#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Declare,
    Deploy,
    InvokeFunction,
}
