//! Property-based tests over random pool graphs.
//!
//! 1. **Bidirectionality** — every pool is reachable from both of its tokens.
//! 2. **Simplicity** — enumerated paths never repeat a token and respect the hop bound.
//! 3. **Monotonicity** — more input never yields less output along a path.
//! 4. **Invertibility** — exact-out of an exact-in output never asks for more input.
//! 5. **No phantom liquidity** — no hop pays out its whole reserve.

use crate::engine::{SwapMode, compute_quote};
use crate::graph::LiquidityGraph;
use crate::ids::{PoolId, TokenId};
use crate::path::{Path, find_paths};
use crate::pool::Pool;
use alloy_primitives::U256;
use proptest::prelude::*;
use std::collections::HashSet;

const TOKENS: u8 = 6;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn tok(i: u8) -> TokenId {
    TokenId::new(format!("T{i}"))
}

type PoolSpec = (u8, u8, u64, u64, u32);

fn pool_specs() -> impl Strategy<Value = Vec<PoolSpec>> {
    prop::collection::vec(
        (
            0..TOKENS,
            0..TOKENS,
            1_000u64..1_000_000_000,
            1_000u64..1_000_000_000,
            0u32..=1_000,
        ),
        1..12,
    )
}

fn build(specs: &[PoolSpec]) -> LiquidityGraph {
    let pools = specs
        .iter()
        .enumerate()
        .filter(|(_, (a, b, ..))| a != b)
        .map(|(i, &(a, b, ra, rb, fee))| {
            let Ok(p) = Pool::new(
                PoolId(i as u32),
                tok(a),
                tok(b),
                U256::from(ra),
                U256::from(rb),
                fee,
            ) else {
                panic!("generated pool is valid");
            };
            p
        });
    let Ok(g) = LiquidityGraph::build(pools) else {
        panic!("generated ids are unique");
    };
    g
}

/// A fixed three-token path with reserves drawn at random.
fn chain(r: [u64; 4], fee: u32) -> (LiquidityGraph, Path) {
    let g = build(&[(0, 1, r[0], r[1], fee), (1, 2, r[2], r[3], fee)]);
    let Ok(path) = g.resolve_path(&[tok(0), tok(1), tok(2)]) else {
        panic!("chain path resolves");
    };
    (g, path)
}

fn reserves() -> impl Strategy<Value = [u64; 4]> {
    prop::array::uniform4(10_000u64..10_000_000_000)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn every_pool_is_bidirectional(specs in pool_specs()) {
        let g = build(&specs);
        prop_assert_eq!(g.edge_count(), 2 * g.pool_count());
        for pool in g.pools() {
            let forward = g
                .neighbors(pool.token_a())
                .any(|e| e.counterparty == pool.token_b() && e.pool.id() == pool.id());
            let backward = g
                .neighbors(pool.token_b())
                .any(|e| e.counterparty == pool.token_a() && e.pool.id() == pool.id());
            prop_assert!(forward && backward, "{} is one-directional", pool.id());
        }
    }

    #[test]
    fn enumerated_paths_are_simple(
        specs in pool_specs(),
        from in 0..TOKENS,
        to in 0..TOKENS,
        max_hops in 1usize..=4,
    ) {
        prop_assume!(from != to);
        let g = build(&specs);
        let Ok(paths) = find_paths(&g, &tok(from), &tok(to), max_hops) else {
            panic!("distinct endpoints never fail");
        };
        for path in &paths {
            let tokens = path.tokens();
            prop_assert!(tokens.len() >= 2 && tokens.len() <= max_hops + 1);
            prop_assert_eq!(path.source(), &tok(from));
            prop_assert_eq!(path.destination(), &tok(to));
            let unique: HashSet<_> = tokens.iter().collect();
            prop_assert_eq!(unique.len(), tokens.len());
            for step in path.steps() {
                let Some(pool) = g.pool(step.pool) else {
                    panic!("enumerated pool exists");
                };
                prop_assert!(pool.supports(step.token_in, step.token_out));
            }
        }
        let again = find_paths(&g, &tok(from), &tok(to), max_hops);
        prop_assert_eq!(Ok(paths), again);
    }

    #[test]
    fn output_is_monotonic_in_input(
        r in reserves(),
        fee in 0u32..=1_000,
        a in 1u64..1_000_000,
        b in 1u64..1_000_000,
    ) {
        let (g, path) = chain(r, fee);
        let (small, large) = (a.min(b), a.max(b));
        let lo = compute_quote(&g, &path, U256::from(small), SwapMode::Spend);
        let hi = compute_quote(&g, &path, U256::from(large), SwapMode::Spend);
        if let (Ok(lo), Ok(hi)) = (lo, hi) {
            prop_assert!(lo.amount_out() <= hi.amount_out());
        }
    }

    #[test]
    fn reverse_quote_never_overshoots(
        r in reserves(),
        fee in 0u32..=1_000,
        amount in 1u64..10_000_000,
    ) {
        let (g, path) = chain(r, fee);
        let amount_in = U256::from(amount);
        let Ok(forward) = compute_quote(&g, &path, amount_in, SwapMode::Spend) else {
            return Ok(());
        };
        let Ok(back) = compute_quote(&g, &path, forward.amount_out(), SwapMode::Receive) else {
            panic!("an output the forward pass produced must be reachable");
        };
        prop_assert!(back.amount_in() <= amount_in);
        prop_assert_eq!(back.amount_out(), forward.amount_out());
    }

    #[test]
    fn no_hop_drains_its_pool(
        specs in pool_specs(),
        from in 0..TOKENS,
        to in 0..TOKENS,
        amount in 1u64..2_000_000_000,
    ) {
        prop_assume!(from != to);
        let g = build(&specs);
        let Ok(paths) = find_paths(&g, &tok(from), &tok(to), 3) else {
            panic!("distinct endpoints never fail");
        };
        for path in &paths {
            for mode in [SwapMode::Spend, SwapMode::Receive] {
                let Ok(quote) = compute_quote(&g, path, U256::from(amount), mode) else {
                    continue;
                };
                for hop in quote.hops() {
                    let Some(pool) = g.pool(hop.pool) else {
                        panic!("quoted pool exists");
                    };
                    let Some(reserves) = pool.oriented(&hop.token_in) else {
                        panic!("hop token is in its pool");
                    };
                    prop_assert!(hop.amount_out < reserves.reserve_out);
                    prop_assert!(!hop.amount_out.is_zero());
                }
            }
        }
    }
}
