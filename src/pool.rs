//! Pool records.
//!
//! [`PoolRecord`] is the loose shape pool data arrives in (JSON, an indexer,
//! a contract read). [`Pool`] is the validated form the graph is built from;
//! the only way to get one is through [`Pool::new`] or `TryFrom<PoolRecord>`.

use crate::error::{Result, RouteError};
use crate::ids::{PoolId, TokenId};
use crate::math::{BPS_DENOMINATOR, HopReserves};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A constant-product pool over an unordered token pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    id: PoolId,
    token_a: TokenId,
    token_b: TokenId,
    reserve_a: U256,
    reserve_b: U256,
    fee_bps: u32,
}

impl Pool {
    /// # Errors
    ///
    /// [`RouteError::PoolDataInconsistent`] if the tokens are equal, either
    /// reserve is zero, or `fee_bps` exceeds 10 000.
    pub fn new(
        id: PoolId,
        token_a: TokenId,
        token_b: TokenId,
        reserve_a: U256,
        reserve_b: U256,
        fee_bps: u32,
    ) -> Result<Self> {
        if token_a == token_b {
            return Err(RouteError::PoolDataInconsistent(format!(
                "{id} pairs {token_a} with itself"
            )));
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(RouteError::PoolDataInconsistent(format!(
                "{id} has a zero reserve"
            )));
        }
        if fee_bps > BPS_DENOMINATOR {
            return Err(RouteError::PoolDataInconsistent(format!(
                "{id} fee {fee_bps}bp exceeds 100%"
            )));
        }
        Ok(Self {
            id,
            token_a,
            token_b,
            reserve_a,
            reserve_b,
            fee_bps,
        })
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn token_a(&self) -> &TokenId {
        &self.token_a
    }

    pub fn token_b(&self) -> &TokenId {
        &self.token_b
    }

    pub fn reserve_a(&self) -> U256 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> U256 {
        self.reserve_b
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    pub fn supports(&self, from: &TokenId, to: &TokenId) -> bool {
        (from == &self.token_a && to == &self.token_b)
            || (from == &self.token_b && to == &self.token_a)
    }

    /// Reserves oriented so that `reserve_in` belongs to `token_in`.
    pub fn oriented(&self, token_in: &TokenId) -> Option<HopReserves> {
        let (reserve_in, reserve_out) = if token_in == &self.token_a {
            (self.reserve_a, self.reserve_b)
        } else if token_in == &self.token_b {
            (self.reserve_b, self.reserve_a)
        } else {
            return None;
        };
        Some(HopReserves {
            pool: self.id,
            reserve_in,
            reserve_out,
            fee_bps: self.fee_bps,
        })
    }
}

/// An integer amount as it shows up in loosely typed sources: a JSON number
/// or a decimal / `0x`-prefixed string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Int(u64),
    Text(String),
}

impl RawAmount {
    fn parse(&self) -> std::result::Result<U256, String> {
        match self {
            RawAmount::Int(v) => Ok(U256::from(*v)),
            RawAmount::Text(s) => U256::from_str(s.trim()).map_err(|e| format!("{s:?}: {e}")),
        }
    }
}

/// Unvalidated pool data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub id: u32,
    pub token_a: String,
    pub token_b: String,
    pub reserve_a: RawAmount,
    pub reserve_b: RawAmount,
    pub fee_bps: u32,
}

impl TryFrom<PoolRecord> for Pool {
    type Error = RouteError;

    fn try_from(record: PoolRecord) -> Result<Self> {
        let id = PoolId(record.id);
        let reserve = |raw: &RawAmount| {
            raw.parse().map_err(|e| {
                RouteError::PoolDataInconsistent(format!("{id} has an unreadable reserve {e}"))
            })
        };
        let reserve_a = reserve(&record.reserve_a)?;
        let reserve_b = reserve(&record.reserve_b)?;
        Pool::new(
            id,
            TokenId::from(record.token_a),
            TokenId::from(record.token_b),
            reserve_a,
            reserve_b,
            record.fee_bps,
        )
    }
}
