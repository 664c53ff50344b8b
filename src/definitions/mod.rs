pub mod block_context;
pub mod constants;
pub mod error_codes;
pub mod transaction_type;
