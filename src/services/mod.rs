pub mod contract_class;
