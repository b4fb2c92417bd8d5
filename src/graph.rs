use crate::error::{Result, RouteError};
use crate::ids::{PoolId, TokenId};
use crate::path::Path;
use crate::pool::{Pool, PoolRecord};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::Visitable;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Which way an edge trades through its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    AToB,
    BToA,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PoolEdge {
    slot: usize,
    direction: SwapDirection,
}

pub(crate) type TokenGraph = DiGraph<TokenId, PoolEdge>;
pub(crate) type VisitedSet = <TokenGraph as Visitable>::Map;

/// One directed edge leaving a token.
#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'g> {
    pub counterparty: &'g TokenId,
    pub pool: &'g Pool,
    pub direction: SwapDirection,
    pub(crate) target: NodeIndex,
}

/// Immutable snapshot of the pool set, indexed for neighbor lookup.
///
/// Every pool contributes two directed edges (A→B and B→A). Neighbors of a
/// token come back in pool insertion order, so anything searching the graph
/// is reproducible. A topology change means building a new graph.
#[derive(Clone, Debug)]
pub struct LiquidityGraph {
    g: TokenGraph,
    token_idx: HashMap<TokenId, NodeIndex>,
    pool_idx: HashMap<PoolId, usize>,
    pools: Vec<Pool>,
    // petgraph walks a node's edges newest-first; keep insertion order here.
    adjacency: Vec<Vec<EdgeIndex>>,
}

impl LiquidityGraph {
    /// # Errors
    ///
    /// [`RouteError::PoolDataInconsistent`] if two pools share an id.
    pub fn build(pools: impl IntoIterator<Item = Pool>) -> Result<Self> {
        let mut graph = Self {
            g: DiGraph::new(),
            token_idx: HashMap::new(),
            pool_idx: HashMap::new(),
            pools: Vec::new(),
            adjacency: Vec::new(),
        };
        for pool in pools {
            graph.insert_pool(pool)?;
        }
        debug!(
            tokens = graph.token_count(),
            pools = graph.pool_count(),
            edges = graph.edge_count(),
            "liquidity graph built"
        );
        Ok(graph)
    }

    /// Validates each record and builds the graph; the first bad record
    /// aborts the whole build.
    pub fn from_records(records: impl IntoIterator<Item = PoolRecord>) -> Result<Self> {
        let pools = records
            .into_iter()
            .map(Pool::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::build(pools)
    }

    fn add_token(&mut self, id: &TokenId) -> NodeIndex {
        if let Some(&ix) = self.token_idx.get(id) {
            return ix;
        }
        let ix = self.g.add_node(id.clone());
        self.token_idx.insert(id.clone(), ix);
        self.adjacency.push(Vec::new());
        ix
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: PoolEdge) {
        let e = self.g.add_edge(from, to, edge);
        self.adjacency[from.index()].push(e);
    }

    fn insert_pool(&mut self, pool: Pool) -> Result<()> {
        let slot = self.pools.len();
        match self.pool_idx.entry(pool.id()) {
            Entry::Occupied(_) => {
                return Err(RouteError::PoolDataInconsistent(format!(
                    "{} appears more than once",
                    pool.id()
                )));
            }
            Entry::Vacant(v) => {
                v.insert(slot);
            }
        }
        let aix = self.add_token(pool.token_a());
        let bix = self.add_token(pool.token_b());
        self.add_edge(
            aix,
            bix,
            PoolEdge {
                slot,
                direction: SwapDirection::AToB,
            },
        );
        self.add_edge(
            bix,
            aix,
            PoolEdge {
                slot,
                direction: SwapDirection::BToA,
            },
        );
        self.pools.push(pool);
        Ok(())
    }

    /// Outgoing edges of `token` in pool insertion order. Unknown tokens
    /// simply have no neighbors.
    pub fn neighbors(&self, token: &TokenId) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.token_idx
            .get(token)
            .into_iter()
            .flat_map(|&ix| self.edges_from(ix))
    }

    pub(crate) fn edges_from(&self, ix: NodeIndex) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.adjacency[ix.index()].iter().filter_map(move |&e| {
            let (_, target) = self.g.edge_endpoints(e)?;
            let edge = self.g.edge_weight(e)?;
            Some(EdgeView {
                counterparty: &self.g[target],
                pool: &self.pools[edge.slot],
                direction: edge.direction,
                target,
            })
        })
    }

    pub(crate) fn node(&self, token: &TokenId) -> Option<NodeIndex> {
        self.token_idx.get(token).copied()
    }

    pub(crate) fn token_at(&self, ix: NodeIndex) -> &TokenId {
        &self.g[ix]
    }

    pub(crate) fn visited_set(&self) -> VisitedSet {
        self.g.visit_map()
    }

    pub fn pool(&self, id: PoolId) -> Option<&Pool> {
        self.pool_idx.get(&id).map(|&slot| &self.pools[slot])
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Tokens in first-seen order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenId> + '_ {
        self.g.node_weights()
    }

    pub fn contains_token(&self, token: &TokenId) -> bool {
        self.token_idx.contains_key(token)
    }

    pub fn token_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    /// Turns a bare token sequence into a [`Path`], taking for each hop the
    /// first pool (in insertion order) that joins the pair.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidPath`] if the sequence is shorter than two
    /// tokens, repeats a token, or has a hop no pool joins.
    pub fn resolve_path(&self, tokens: &[TokenId]) -> Result<Path> {
        let mut pools = Vec::with_capacity(tokens.len().saturating_sub(1));
        for pair in tokens.windows(2) {
            let pool = self
                .neighbors(&pair[0])
                .find(|e| e.counterparty == &pair[1])
                .map(|e| e.pool.id())
                .ok_or_else(|| {
                    RouteError::InvalidPath(format!("no pool joins {} and {}", pair[0], pair[1]))
                })?;
            pools.push(pool);
        }
        Path::new(tokens.to_vec(), pools)
    }
}
