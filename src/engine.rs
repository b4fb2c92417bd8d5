//! Quote simulation along a path.
//!
//! A quote is a read-only projection over the graph snapshot: every hop is
//! priced against its pool's stored reserves and nothing is written back.

use crate::error::{Result, RouteError};
use crate::graph::LiquidityGraph;
use crate::ids::{PoolId, TokenId};
use crate::math::{HopReserves, shortfall_bps};
use crate::path::{Path, Step};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which side of the trade the caller fixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapMode {
    /// Exact input: spend `amount`, maximize output.
    Spend,
    /// Exact output: receive `amount`, minimize input.
    Receive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HopQuote {
    pub pool: PoolId,
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// The result of evaluating a [`Path`] against an amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    path: Path,
    mode: SwapMode,
    amount_in: U256,
    amount_out: U256,
    hops: Vec<HopQuote>,
    price_impact_bps: u32,
}

impl Quote {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> SwapMode {
        self.mode
    }

    pub fn amount_in(&self) -> U256 {
        self.amount_in
    }

    pub fn amount_out(&self) -> U256 {
        self.amount_out
    }

    pub fn hops(&self) -> &[HopQuote] {
        &self.hops
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Shortfall of the realized price against the zero-size spot price of
    /// the whole path, in basis points. Includes the fee skim.
    pub fn price_impact_bps(&self) -> u32 {
        self.price_impact_bps
    }

    /// Pool identifiers in trade order, as the transaction builder wants them.
    pub fn pool_ids(&self) -> &[PoolId] {
        self.path.pools()
    }
}

/// Prices paths against one graph snapshot.
#[derive(Clone, Copy, Debug)]
pub struct Quoter<'g> {
    graph: &'g LiquidityGraph,
}

impl<'g> Quoter<'g> {
    pub fn new(graph: &'g LiquidityGraph) -> Self {
        Self { graph }
    }

    /// # Errors
    ///
    /// - [`RouteError::InvalidAmount`] if `amount` is zero.
    /// - [`RouteError::InvalidPath`] if a hop's pool is unknown or does not
    ///   join the hop's tokens.
    /// - [`RouteError::InsufficientLiquidity`] if any hop cannot carry the size.
    /// - [`RouteError::Overflow`] if an intermediate product exceeds 256 bits.
    pub fn quote(&self, path: &Path, amount: U256, mode: SwapMode) -> Result<Quote> {
        if amount.is_zero() {
            return Err(RouteError::InvalidAmount("amount must be positive"));
        }
        let reserves = path
            .steps()
            .map(|step| self.hop_reserves(&step))
            .collect::<Result<Vec<_>>>()?;
        let quote = match mode {
            SwapMode::Spend => exact_in(path, &reserves, amount),
            SwapMode::Receive => exact_out(path, &reserves, amount),
        }?;
        trace!(
            tokens = ?path.tokens(),
            amount_in = %quote.amount_in,
            amount_out = %quote.amount_out,
            impact_bps = quote.price_impact_bps,
            "quoted path"
        );
        Ok(quote)
    }

    fn hop_reserves(&self, step: &Step<'_>) -> Result<HopReserves> {
        let pool = self
            .graph
            .pool(step.pool)
            .ok_or_else(|| RouteError::InvalidPath(format!("{} is not in the graph", step.pool)))?;
        if !pool.supports(step.token_in, step.token_out) {
            return Err(RouteError::InvalidPath(format!(
                "{} does not trade {} for {}",
                step.pool, step.token_in, step.token_out
            )));
        }
        pool.oriented(step.token_in).ok_or_else(|| {
            RouteError::InvalidPath(format!("{} does not hold {}", step.pool, step.token_in))
        })
    }
}

fn hop_quote(step: Step<'_>, amount_in: U256, amount_out: U256) -> HopQuote {
    HopQuote {
        pool: step.pool,
        token_in: step.token_in.clone(),
        token_out: step.token_out.clone(),
        amount_in,
        amount_out,
    }
}

fn spot_through(reserves: &[HopReserves], amount_in: U256) -> Result<U256> {
    reserves
        .iter()
        .try_fold(amount_in, |amount, hop| hop.spot_out(amount))
}

fn exact_in(path: &Path, reserves: &[HopReserves], amount_in: U256) -> Result<Quote> {
    let mut hops = Vec::with_capacity(reserves.len());
    let mut amount = amount_in;
    for (step, hop) in path.steps().zip(reserves) {
        let out = hop.amount_out(amount)?;
        hops.push(hop_quote(step, amount, out));
        amount = out;
    }
    let spot = spot_through(reserves, amount_in)?;
    Ok(Quote {
        path: path.clone(),
        mode: SwapMode::Spend,
        amount_in,
        amount_out: amount,
        hops,
        price_impact_bps: shortfall_bps(spot, amount)?,
    })
}

fn exact_out(path: &Path, reserves: &[HopReserves], amount_out: U256) -> Result<Quote> {
    let mut hops = Vec::with_capacity(reserves.len());
    let mut wanted = amount_out;
    for (step, hop) in path.steps().rev().zip(reserves.iter().rev()) {
        let needed = hop.amount_in(wanted)?;
        hops.push(hop_quote(step, needed, wanted));
        wanted = needed;
    }
    hops.reverse();
    let spot = spot_through(reserves, wanted)?;
    Ok(Quote {
        path: path.clone(),
        mode: SwapMode::Receive,
        amount_in: wanted,
        amount_out,
        hops,
        price_impact_bps: shortfall_bps(spot, amount_out)?,
    })
}

pub fn compute_quote(
    graph: &LiquidityGraph,
    path: &Path,
    amount: U256,
    mode: SwapMode,
) -> Result<Quote> {
    Quoter::new(graph).quote(path, amount, mode)
}
