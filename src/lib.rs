//! Multi-hop swap route discovery over constant-product pools.
//!
//! Build a [`LiquidityGraph`] once from a pool snapshot, then enumerate
//! simple paths between two tokens, quote them in exact-in
//! ([`SwapMode::Spend`]) or exact-out ([`SwapMode::Receive`]) mode, and pick
//! the best one:
//!
//! ```
//! use alloy_primitives::U256;
//! use hopscout::{LiquidityGraph, PoolRecord, RawAmount, SwapMode, TokenId, best_route};
//!
//! let record = |id, a: &str, b: &str, ra, rb| PoolRecord {
//!     id,
//!     token_a: a.into(),
//!     token_b: b.into(),
//!     reserve_a: RawAmount::Int(ra),
//!     reserve_b: RawAmount::Int(rb),
//!     fee_bps: 30,
//! };
//! let graph = LiquidityGraph::from_records(vec![
//!     record(1, "HTS-ABC", "HBAR", 100_000, 500),
//!     record(2, "HTS-ABC", "USDC", 10_000, 25_000),
//!     record(3, "HBAR", "USDC", 20_000, 10_000),
//! ])
//! .expect("valid pools");
//!
//! let quote = best_route(
//!     &graph,
//!     &TokenId::from("HTS-ABC"),
//!     &TokenId::from("HBAR"),
//!     U256::from(1_000u32),
//!     3,
//!     SwapMode::Spend,
//! )
//! .expect("a route exists");
//! assert_eq!(quote.amount_out(), U256::from(3_685u32));
//! assert_eq!(quote.hop_count(), 2);
//! ```
//!
//! The graph is immutable; share it behind an `Arc` (or a [`SharedGraph`])
//! and call into it from as many threads as needed.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ids;
pub mod math;
pub mod path;
pub mod pool;
pub mod router;
pub mod snapshot;

#[cfg(test)]
mod proptest_properties;

pub use config::RouterConfig;
pub use engine::{HopQuote, Quote, Quoter, SwapMode, compute_quote};
pub use error::{Result, RouteError};
pub use graph::{EdgeView, LiquidityGraph, SwapDirection};
pub use ids::{PoolId, TokenId};
pub use path::{Path, PathEnumerator, PathSummary, Step, find_paths};
pub use pool::{Pool, PoolRecord, RawAmount};
pub use router::{RejectedPath, RouteReport, RouteSelector, best_route};
pub use snapshot::SharedGraph;

/// Validates `records` and builds the graph they describe.
///
/// # Errors
///
/// [`RouteError::PoolDataInconsistent`] on the first malformed record.
pub fn build_graph(records: impl IntoIterator<Item = PoolRecord>) -> Result<LiquidityGraph> {
    LiquidityGraph::from_records(records)
}
