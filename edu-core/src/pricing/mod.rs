//! Cart pricing: price parsing, won rounding and the cart aggregator.

pub mod cart;
pub mod common;

pub use cart::{CartAggregator, CartSummary, DataError, SelectionSet};
