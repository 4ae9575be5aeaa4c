//! Error types produced by the reconciliation engine.

mod conversions;
mod types;

pub use types::ReconcileError;

#[cfg(test)]
mod tests;
