//! Error type shared by every routing operation.
//!
//! All failures are plain values: nothing in the crate panics on bad input
//! and nothing is retried internally.

use crate::ids::{PoolId, TokenId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// A pool record was malformed; the graph under construction is discarded.
    #[error("pool data inconsistent: {0}")]
    PoolDataInconsistent(String),

    /// Non-positive amount, or a degenerate `from == to` query.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The pool cannot carry the requested size.
    #[error("insufficient liquidity in {pool}")]
    InsufficientLiquidity { pool: PoolId },

    /// No enumerated path could be quoted.
    #[error("no route from {from} to {to}")]
    NoRoute { from: TokenId, to: TokenId },

    /// A path does not match the graph it is evaluated against.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid router config: {0}")]
    InvalidConfig(&'static str),

    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}

impl RouteError {
    /// Whether the failure is specific to one candidate path, so a route
    /// search can drop that path and keep going.
    pub fn is_path_local(&self) -> bool {
        matches!(
            self,
            RouteError::InsufficientLiquidity { .. } | RouteError::Overflow(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_local_kinds() {
        assert!(RouteError::InsufficientLiquidity { pool: PoolId(1) }.is_path_local());
        assert!(RouteError::Overflow("mul").is_path_local());
        assert!(!RouteError::InvalidAmount("zero").is_path_local());
        assert!(!RouteError::PoolDataInconsistent("x".into()).is_path_local());
    }

    #[test]
    fn display_messages() {
        let err = RouteError::NoRoute {
            from: TokenId::from("HBAR"),
            to: TokenId::from("USDC"),
        };
        assert_eq!(err.to_string(), "no route from HBAR to USDC");
        assert_eq!(
            RouteError::InsufficientLiquidity { pool: PoolId(3) }.to_string(),
            "insufficient liquidity in pool#3"
        );
    }
}
