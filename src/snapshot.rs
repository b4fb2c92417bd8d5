use crate::error::Result;
use crate::graph::LiquidityGraph;
use crate::pool::PoolRecord;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// The current [`LiquidityGraph`], swappable as a whole.
///
/// Readers take an `Arc` snapshot and keep using it for as long as their
/// computation runs; a later [`replace`](Self::replace) only affects callers
/// that load after it.
#[derive(Debug)]
pub struct SharedGraph {
    current: RwLock<Arc<LiquidityGraph>>,
}

impl SharedGraph {
    pub fn new(graph: LiquidityGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
        }
    }

    pub fn load(&self) -> Arc<LiquidityGraph> {
        Arc::clone(&self.current.read())
    }

    /// Installs `graph` and hands back the one it replaced.
    pub fn replace(&self, graph: LiquidityGraph) -> Arc<LiquidityGraph> {
        let pools = graph.pool_count();
        let prev = std::mem::replace(&mut *self.current.write(), Arc::new(graph));
        debug!(pools, "liquidity graph swapped");
        prev
    }

    /// Builds a graph from `records` and installs it. If any record is bad
    /// the current graph stays in place.
    pub fn rebuild(
        &self,
        records: impl IntoIterator<Item = PoolRecord>,
    ) -> Result<Arc<LiquidityGraph>> {
        let graph = LiquidityGraph::from_records(records)?;
        Ok(self.replace(graph))
    }
}
