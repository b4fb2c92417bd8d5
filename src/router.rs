//! Route selection: enumerate, quote, rank.

use crate::config::RouterConfig;
use crate::engine::{Quote, Quoter, SwapMode};
use crate::error::{Result, RouteError};
use crate::graph::LiquidityGraph;
use crate::ids::TokenId;
use crate::path::{PathEnumerator, PathSummary};
use alloy_primitives::U256;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// A candidate path that could not carry the requested size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedPath {
    pub summary: PathSummary,
    pub reason: RouteError,
}

/// Everything a route search saw, for callers that want to show
/// alternatives next to the winner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteReport {
    /// Every enumerated path, in enumeration order.
    pub candidates: Vec<PathSummary>,
    pub rejected: Vec<RejectedPath>,
    pub best: Option<Quote>,
}

/// Orders two quotes for the same request; `Less` means `a` is the better
/// route. Ties on the amount go to fewer hops, then lower price impact.
/// Equal quotes compare `Equal`, so the earlier candidate is kept.
fn rank(a: &Quote, b: &Quote, mode: SwapMode) -> Ordering {
    let amount = match mode {
        SwapMode::Spend => b.amount_out().cmp(&a.amount_out()),
        SwapMode::Receive => a.amount_in().cmp(&b.amount_in()),
    };
    amount
        .then_with(|| a.hop_count().cmp(&b.hop_count()))
        .then_with(|| a.price_impact_bps().cmp(&b.price_impact_bps()))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RouteSelector {
    config: RouterConfig,
}

impl RouteSelector {
    /// # Errors
    ///
    /// [`RouteError::InvalidConfig`] if the config fails validation.
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Enumerates every path, quotes each one, and keeps the best.
    ///
    /// Paths that fail with a path-local error are recorded in
    /// [`RouteReport::rejected`] and skipped.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidAmount`] for a zero amount or `from == to`.
    pub fn explore(
        &self,
        graph: &LiquidityGraph,
        from: &TokenId,
        to: &TokenId,
        amount: U256,
        mode: SwapMode,
    ) -> Result<RouteReport> {
        if amount.is_zero() {
            return Err(RouteError::InvalidAmount("amount must be positive"));
        }
        let paths = PathEnumerator::new(graph, self.config.max_hops)
            .with_max_paths(self.config.max_paths)
            .enumerate(from, to)?;

        let quoter = Quoter::new(graph);
        let mut report = RouteReport {
            candidates: Vec::with_capacity(paths.len()),
            rejected: Vec::new(),
            best: None,
        };
        for path in &paths {
            report.candidates.push(path.summary());
            let quote = match quoter.quote(path, amount, mode) {
                Ok(q) => q,
                Err(reason) if reason.is_path_local() => {
                    trace!(tokens = ?path.tokens(), %reason, "path rejected");
                    report.rejected.push(RejectedPath {
                        summary: path.summary(),
                        reason,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };
            let replace = report
                .best
                .as_ref()
                .is_none_or(|best| rank(&quote, best, mode) == Ordering::Less);
            if replace {
                report.best = Some(quote);
            }
        }
        debug!(
            %from,
            %to,
            candidates = report.candidates.len(),
            rejected = report.rejected.len(),
            winner = ?report.best.as_ref().map(|q| q.path().tokens()),
            "route search finished"
        );
        Ok(report)
    }

    /// # Errors
    ///
    /// [`RouteError::NoRoute`] when no path exists or none can carry the
    /// size; otherwise as [`explore`](Self::explore).
    pub fn best_route(
        &self,
        graph: &LiquidityGraph,
        from: &TokenId,
        to: &TokenId,
        amount: U256,
        mode: SwapMode,
    ) -> Result<Quote> {
        self.explore(graph, from, to, amount, mode)?
            .best
            .ok_or_else(|| RouteError::NoRoute {
                from: from.clone(),
                to: to.clone(),
            })
    }
}

pub fn best_route(
    graph: &LiquidityGraph,
    from: &TokenId,
    to: &TokenId,
    amount: U256,
    max_hops: usize,
    mode: SwapMode,
) -> Result<Quote> {
    let selector = RouteSelector {
        config: RouterConfig {
            max_hops,
            max_paths: None,
        },
    };
    selector.best_route(graph, from, to, amount, mode)
}
