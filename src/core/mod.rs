pub mod script;
pub mod types;
