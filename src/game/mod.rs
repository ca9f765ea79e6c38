pub mod types;
pub mod engine;
pub mod state;
pub mod tests;
