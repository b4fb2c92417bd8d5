//! Paths through the liquidity graph and the depth-bounded search that
//! finds them.

use crate::error::{Result, RouteError};
use crate::graph::{EdgeView, LiquidityGraph, VisitedSet};
use crate::ids::{PoolId, TokenId};
use petgraph::graph::NodeIndex;
use petgraph::visit::VisitMap;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, trace};

/// A loop-free token sequence together with the pool used for each hop.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    tokens: Vec<TokenId>,
    pools: Vec<PoolId>,
}

/// One hop of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step<'p> {
    pub pool: PoolId,
    pub token_in: &'p TokenId,
    pub token_out: &'p TokenId,
}

/// What the presentation layer lists for each enumerated path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathSummary {
    pub tokens: Vec<TokenId>,
    pub hop_count: usize,
}

impl Path {
    /// # Errors
    ///
    /// [`RouteError::InvalidPath`] if there are fewer than two tokens, the
    /// pool count is not one per hop, or a token repeats.
    pub fn new(tokens: Vec<TokenId>, pools: Vec<PoolId>) -> Result<Self> {
        if tokens.len() < 2 {
            return Err(RouteError::InvalidPath(
                "a path needs at least two tokens".into(),
            ));
        }
        if pools.len() + 1 != tokens.len() {
            return Err(RouteError::InvalidPath(format!(
                "{} tokens need {} pools, got {}",
                tokens.len(),
                tokens.len() - 1,
                pools.len()
            )));
        }
        {
            let mut seen = HashSet::with_capacity(tokens.len());
            if let Some(dup) = tokens.iter().find(|t| !seen.insert(*t)) {
                return Err(RouteError::InvalidPath(format!("{dup} appears twice")));
            }
        }
        Ok(Self { tokens, pools })
    }

    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    pub fn pools(&self) -> &[PoolId] {
        &self.pools
    }

    pub fn hop_count(&self) -> usize {
        self.pools.len()
    }

    pub fn source(&self) -> &TokenId {
        &self.tokens[0]
    }

    pub fn destination(&self) -> &TokenId {
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn steps(&self) -> impl DoubleEndedIterator<Item = Step<'_>> + ExactSizeIterator + '_ {
        self.tokens
            .windows(2)
            .zip(self.pools.iter())
            .map(|(pair, &pool)| Step {
                pool,
                token_in: &pair[0],
                token_out: &pair[1],
            })
    }

    pub fn summary(&self) -> PathSummary {
        PathSummary {
            tokens: self.tokens.clone(),
            hop_count: self.hop_count(),
        }
    }
}

/// A partial path on the search stack. Each frame owns its own copy of the
/// path so far and of the tokens it has visited.
struct Frame {
    node: NodeIndex,
    nodes: Vec<NodeIndex>,
    pools: Vec<PoolId>,
    visited: VisitedSet,
}

impl Frame {
    fn root(graph: &LiquidityGraph, start: NodeIndex) -> Self {
        let mut visited = graph.visited_set();
        visited.visit(start);
        Self {
            node: start,
            nodes: vec![start],
            pools: Vec::new(),
            visited,
        }
    }

    fn extend(&self, edge: &EdgeView<'_>) -> Self {
        let mut next = Self {
            node: edge.target,
            nodes: self.nodes.clone(),
            pools: self.pools.clone(),
            visited: self.visited.clone(),
        };
        next.nodes.push(edge.target);
        next.pools.push(edge.pool.id());
        next.visited.visit(edge.target);
        next
    }

    fn into_path(self, graph: &LiquidityGraph) -> Path {
        Path {
            tokens: self
                .nodes
                .iter()
                .map(|&ix| graph.token_at(ix).clone())
                .collect(),
            pools: self.pools,
        }
    }
}

/// Depth-first search for simple paths between two tokens.
///
/// Neighbors are explored in the graph's stored edge order and a path is
/// emitted the moment it reaches the destination, which is never passed
/// through. Two runs over the same graph return the same paths in the same
/// order.
#[derive(Clone, Copy, Debug)]
pub struct PathEnumerator<'g> {
    graph: &'g LiquidityGraph,
    max_hops: usize,
    max_paths: Option<usize>,
}

impl<'g> PathEnumerator<'g> {
    pub fn new(graph: &'g LiquidityGraph, max_hops: usize) -> Self {
        Self {
            graph,
            max_hops,
            max_paths: None,
        }
    }

    /// Stops the search after `cap` paths.
    pub fn with_max_paths(mut self, cap: Option<usize>) -> Self {
        self.max_paths = cap;
        self
    }

    /// # Errors
    ///
    /// [`RouteError::InvalidAmount`] when `from == to`.
    pub fn enumerate(&self, from: &TokenId, to: &TokenId) -> Result<Vec<Path>> {
        if from == to {
            return Err(RouteError::InvalidAmount(
                "source and destination are the same token",
            ));
        }
        let mut paths = Vec::new();
        let (Some(start), Some(goal)) = (self.graph.node(from), self.graph.node(to)) else {
            return Ok(paths);
        };
        if self.max_hops == 0 || self.max_paths == Some(0) {
            return Ok(paths);
        }

        let mut stack = vec![Frame::root(self.graph, start)];
        while let Some(frame) = stack.pop() {
            if frame.node == goal {
                let path = frame.into_path(self.graph);
                trace!(tokens = ?path.tokens(), "path found");
                paths.push(path);
                if self.max_paths.is_some_and(|cap| paths.len() >= cap) {
                    debug!(cap = paths.len(), %from, %to, "path cap reached");
                    break;
                }
                continue;
            }
            if frame.pools.len() >= self.max_hops {
                continue;
            }
            let children: Vec<Frame> = self
                .graph
                .edges_from(frame.node)
                .filter(|e| !frame.visited.is_visited(&e.target))
                .map(|e| frame.extend(&e))
                .collect();
            // Reversed so the first neighbor is popped first.
            stack.extend(children.into_iter().rev());
        }
        Ok(paths)
    }
}

/// All simple paths from `from` to `to` with at most `max_hops` hops.
pub fn find_paths(
    graph: &LiquidityGraph,
    from: &TokenId,
    to: &TokenId,
    max_hops: usize,
) -> Result<Vec<Path>> {
    PathEnumerator::new(graph, max_hops).enumerate(from, to)
}
