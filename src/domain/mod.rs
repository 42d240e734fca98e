// Coin id lookup
pub mod catalog;

// Market table: normalization, slicing, statistics
pub mod market;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
