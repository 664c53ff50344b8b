pub mod state_errors;
