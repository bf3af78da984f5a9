//! A gated `DisjointSet` (also known as Union-Find) over the integer universe `[0, n)`.
//!
//! Besides the usual path compression and union by rank, every set carries a
//! [`MergeGate`]: a predicate consulted before two sets are merged. The gate
//! receives the two node indices the caller passed to [`DisjointSet::union`],
//! never their representatives, so it can encode a condition about that exact
//! pair (for instance "there is no wall between these two cells").
use std::{cell::Cell, cmp::Ordering, fmt};

use crate::{did::Did, error::MazeError};

pub type NodeId = usize;

/// Decides whether two nodes may be merged.
///
/// Implemented for every `Fn(NodeId, NodeId) -> bool`, so a closure can be passed
/// straight to [`DisjointSet::with_gate`].
pub trait MergeGate {
    fn may_merge(&self, x: NodeId, y: NodeId) -> bool;
}

impl<F> MergeGate for F
where
    F: Fn(NodeId, NodeId) -> bool,
{
    fn may_merge(&self, x: NodeId, y: NodeId) -> bool {
        self(x, y)
    }
}

/// Gate of a plain union-find: every merge is allowed.
pub type Ungated = fn(NodeId, NodeId) -> bool;

fn always(_: NodeId, _: NodeId) -> bool {
    true
}

/// A disjoint-set forest with path compression and union by rank.
///
/// Parents are stored in `Cell`s so that [`find`](Self::find) can compress paths
/// through a shared reference.
#[derive(Clone)]
pub struct DisjointSet<G = Ungated> {
    parents: Vec<Cell<NodeId>>,
    ranks: Vec<u32>,
    set_count: usize,
    gate: G,
}

impl DisjointSet<Ungated> {
    /// `size` singleton sets, every merge allowed.
    pub fn with_size(size: usize) -> Self {
        Self::with_gate(size, always as Ungated)
    }
}

impl<G: MergeGate> DisjointSet<G> {
    /// `size` singleton sets whose merges are filtered through `gate`.
    pub fn with_gate(size: usize, gate: G) -> Self {
        Self {
            parents: (0..size).map(Cell::new).collect(),
            ranks: vec![0; size],
            set_count: size,
            gate,
        }
    }

    pub fn size(&self) -> usize {
        self.parents.len()
    }

    /// Number of disjoint sets currently in the structure.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    fn check(&self, id: NodeId) -> Result<(), MazeError> {
        if id < self.size() {
            Ok(())
        } else {
            Err(MazeError::IndexOutOfRange {
                index: id,
                size: self.size(),
            })
        }
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.parents[id].get()
    }

    /// Returns the representative of the set containing `id`, without touching the forest.
    pub fn find_no_compress(&self, id: NodeId) -> Result<NodeId, MazeError> {
        self.check(id)?;

        let mut root = id;
        while self.parent(root) != root {
            root = self.parent(root);
        }
        Ok(root)
    }

    /// Returns the representative of the set containing `id`.
    ///
    /// Every node visited on the way up is repointed directly at the root.
    pub fn find(&self, id: NodeId) -> Result<NodeId, MazeError> {
        let root = self.find_no_compress(id)?;

        let mut node = id;
        while node != root {
            let next = self.parent(node);
            self.parents[node].set(root);
            node = next;
        }

        Ok(root)
    }

    /// Merges the sets of `x` and `y` if they differ and the gate allows the pair.
    ///
    /// On equal ranks the set of `y` is attached below the set of `x`.
    pub fn union(&mut self, x: NodeId, y: NodeId) -> Result<Did, MazeError> {
        self.check(x)?;
        self.check(y)?;

        let root_x = self.find(x)?;
        let root_y = self.find(y)?;

        if root_x == root_y || !self.gate.may_merge(x, y) {
            return Ok(Did::Nothing);
        }

        match self.ranks[root_x].cmp(&self.ranks[root_y]) {
            Ordering::Less => self.parents[root_x].set(root_y),
            Ordering::Greater => self.parents[root_y].set(root_x),
            Ordering::Equal => {
                self.parents[root_y].set(root_x);
                self.ranks[root_x] += 1;
            }
        }
        self.set_count -= 1;

        Ok(Did::Something)
    }

    pub fn connected(&self, x: NodeId, y: NodeId) -> Result<bool, MazeError> {
        self.check(y)?;
        Ok(self.find(x)? == self.find(y)?)
    }
}

impl<G> fmt::Debug for DisjointSet<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisjointSet")
            .field("parents", &self.parents)
            .field("ranks", &self.ranks)
            .field("set_count", &self.set_count)
            .finish_non_exhaustive()
    }
}
