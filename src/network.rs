// Copyright (c) 2024 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! A capacitated network together with its residual edges.
//!
//! Nodes are identified by integer keys. Each node owns the list of
//! residual edges leaving it. Initially this list contains only the
//! edges added by [`Network::add_edge`]; the reverse edges needed to
//! cancel flow are created lazily the first time flow is sent along an
//! edge.
//!
//! # Example
//!
//! ```
//! use push_relabel::Network;
//!
//! let mut net = Network::new();
//! net.add_edge(0, 1, 3).unwrap();
//! net.add_edge(1, 2, 2).unwrap();
//!
//! assert_eq!(net.num_nodes(), 3);
//! assert_eq!(net.num_edges(), 2);
//! assert_eq!(net.max_flow(0, 2).unwrap(), 2);
//!
//! // The flow created a reverse edge for each used edge.
//! assert_eq!(net.num_residual_edges(), 4);
//! ```

use crate::error::{Error, Result};
use crate::num::traits::{CheckedAdd, NumAssign, Signed};

use std::collections::BTreeMap;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The key of a node.
pub type Key = i64;

/// Data associated with a node.
#[derive(Clone, Debug)]
pub(crate) struct NodeInfo<F> {
    /// The key of the node.
    pub key: Key,
    /// The current height (label) of the node.
    pub height: usize,
    /// The excess of flow of the node.
    pub excess: F,
}

impl<F> NodeInfo<F>
where
    F: NumAssign,
{
    fn reset(&mut self) {
        self.height = 0;
        self.excess = F::zero();
    }
}

/// A residual edge leaving some node.
#[derive(Clone, Debug)]
pub(crate) struct ResidualEdge<F> {
    /// Index of the sink node of this edge.
    pub to: usize,
    /// The capacity. Synthetic reverse edges have capacity 0.
    pub capacity: F,
    /// The current flow. Negative on reverse edges.
    pub flow: F,
    /// Position of the mirrored edge in the adjacency list of `to`.
    pub mirror: Option<usize>,
    /// Whether this edge has been created by the algorithm.
    pub reverse: bool,
}

impl<F> ResidualEdge<F>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy,
{
    /// Return `true` if no more flow can be sent along this edge.
    pub fn is_saturated(&self) -> bool {
        self.flow >= self.capacity
    }

    /// The amount of flow that can still be sent along this edge.
    pub fn residual(&self) -> F {
        self.capacity - self.flow
    }
}

/// A capacitated digraph with integer node keys.
///
/// The flow type must be signed because reverse edges carry negative
/// flow.
///
/// The network stores the state of the last flow computation, i.e. the
/// height and excess of every node and the flow on every residual edge.
#[derive(Clone, Debug)]
pub struct Network<F> {
    /// The node arena.
    pub(crate) nodes: Vec<NodeInfo<F>>,
    /// Maps keys to node indices, ordered by key.
    pub(crate) keys: BTreeMap<Key, usize>,
    /// The residual edges leaving each node.
    pub(crate) edges: Vec<Vec<ResidualEdge<F>>>,
    /// Number of edges added by the user.
    nforward: usize,
}

impl<F> Default for Network<F> {
    fn default() -> Self {
        Network {
            nodes: vec![],
            keys: BTreeMap::new(),
            edges: vec![],
            nforward: 0,
        }
    }
}

impl<F> Network<F>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy,
{
    /// Create a new, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty network with memory reserved for `nnodes` nodes.
    pub fn with_capacity(nnodes: usize) -> Self {
        Network {
            nodes: Vec::with_capacity(nnodes),
            keys: BTreeMap::new(),
            edges: Vec::with_capacity(nnodes),
            nforward: 0,
        }
    }

    /// Add a new node with the given key.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already in use.
    pub fn add_node(&mut self, key: Key) -> Result<()> {
        if self.keys.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }
        self.insert_node(key);
        Ok(())
    }

    /// Add a new edge from `from` to `to` with the given capacity.
    ///
    /// Missing end nodes are created. Parallel edges are kept as
    /// distinct edges.
    pub fn add_edge(&mut self, from: Key, to: Key, capacity: F) -> Result<()> {
        if capacity < F::zero() {
            return Err(Error::NegativeCapacity { from, to });
        }
        let u = self.node_or_insert(from);
        let v = self.node_or_insert(to);
        self.edges[u].push(ResidualEdge {
            to: v,
            capacity,
            flow: F::zero(),
            mirror: None,
            reverse: false,
        });
        self.nforward += 1;
        Ok(())
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of edges added by [`Network::add_edge`].
    pub fn num_edges(&self) -> usize {
        self.nforward
    }

    /// Return the number of residual edges including reverse edges.
    pub fn num_residual_edges(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Return `true` if a node with the given key exists.
    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains_key(&key)
    }

    /// Return an iterator over all node keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.keys().copied()
    }

    /// Return the height of a node after the last computation.
    pub fn height(&self, key: Key) -> Option<usize> {
        self.keys.get(&key).map(|&u| self.nodes[u].height)
    }

    /// Return the excess of a node after the last computation.
    pub fn excess(&self, key: Key) -> Option<F> {
        self.keys.get(&key).map(|&u| self.nodes[u].excess)
    }

    /// Return an iterator over all edges added by the user.
    ///
    /// Each element is `(from, to, capacity, flow)`. The edges are
    /// ordered by the key of the source node and, for each source
    /// node, by insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Key, Key, F, F)> + '_ {
        self.keys.values().flat_map(move |&u| {
            self.edges[u]
                .iter()
                .filter(|e| !e.reverse)
                .map(move |e| (self.nodes[u].key, self.nodes[e.to].key, e.capacity, e.flow))
        })
    }

    /// Return a read-only copy of the current state of the network.
    pub fn snapshot(&self) -> Snapshot<F> {
        Snapshot {
            nodes: self
                .keys
                .values()
                .map(|&u| NodeSnapshot {
                    key: self.nodes[u].key,
                    height: self.nodes[u].height,
                    excess: self.nodes[u].excess,
                    edges: self.edges[u]
                        .iter()
                        .map(|e| EdgeSnapshot {
                            to: self.nodes[e.to].key,
                            capacity: e.capacity,
                            flow: e.flow,
                            reverse: e.reverse,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Return the index of the node with the given key.
    pub(crate) fn node_id(&self, key: Key) -> Result<usize> {
        self.keys.get(&key).copied().ok_or(Error::UnknownKey(key))
    }

    /// Reset all heights, excesses and flows.
    ///
    /// Reverse edges created by a previous computation are removed.
    pub(crate) fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
        for adj in &mut self.edges {
            adj.retain(|e| !e.reverse);
            for e in adj.iter_mut() {
                e.flow = F::zero();
                e.mirror = None;
            }
        }
    }

    /// Send `df` units of flow along the `i`-th edge leaving `u`.
    ///
    /// The flow on the mirrored edge is decreased by the same amount.
    /// If there is no mirrored edge yet it is created with capacity 0.
    /// Excesses are not touched.
    pub(crate) fn send(&mut self, u: usize, i: usize, df: F) {
        let e = &mut self.edges[u][i];
        e.flow += df;
        let (v, mirror) = (e.to, e.mirror);
        match mirror {
            Some(j) => {
                debug_assert_eq!(self.edges[v][j].to, u);
                self.edges[v][j].flow -= df;
            }
            None => {
                let j = self.edges[v].len();
                self.edges[v].push(ResidualEdge {
                    to: u,
                    capacity: F::zero(),
                    flow: F::zero() - df,
                    mirror: Some(i),
                    reverse: true,
                });
                self.edges[u][i].mirror = Some(j);
            }
        }
    }

    fn insert_node(&mut self, key: Key) -> usize {
        let u = self.nodes.len();
        self.nodes.push(NodeInfo {
            key,
            height: 0,
            excess: F::zero(),
        });
        self.edges.push(vec![]);
        self.keys.insert(key, u);
        u
    }

    fn node_or_insert(&mut self, key: Key) -> usize {
        match self.keys.get(&key) {
            Some(&u) => u,
            None => self.insert_node(key),
        }
    }
}

/// State of a single residual edge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EdgeSnapshot<F> {
    /// The key of the sink node.
    pub to: Key,
    pub capacity: F,
    pub flow: F,
    /// `true` for reverse edges created by the algorithm.
    pub reverse: bool,
}

/// State of a single node and its outgoing residual edges.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct NodeSnapshot<F> {
    pub key: Key,
    pub height: usize,
    pub excess: F,
    pub edges: Vec<EdgeSnapshot<F>>,
}

/// State of a whole network, nodes in ascending key order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Snapshot<F> {
    pub nodes: Vec<NodeSnapshot<F>>,
}

impl<F> Snapshot<F> {
    /// Return the state of the node with the given key.
    pub fn node(&self, key: Key) -> Option<&NodeSnapshot<F>> {
        self.nodes
            .binary_search_by_key(&key, |n| n.key)
            .ok()
            .map(|i| &self.nodes[i])
    }
}
