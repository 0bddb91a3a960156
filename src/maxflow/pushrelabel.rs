// Copyright (c) 2015-2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements the generic push relabel algorithm for
//! solving max flow problems.
//!
//! The active node is always the one with the smallest key. No gap or
//! global relabelling heuristic is used, so the sequence of push and
//! relabel operations only depends on the network and the order in
//! which its edges were added.
//!
//! # Example
//!
//! ```
//! use push_relabel::maxflow::pushrelabel;
//! use push_relabel::Network;
//!
//! let mut net = Network::new();
//! for &(u, v, c) in &[(0, 1, 10), (0, 2, 12), (1, 3, 15), (2, 1, 5),
//!                     (2, 4, 6), (3, 4, 8), (3, 5, 3), (4, 5, 17)] {
//!     net.add_edge(u, v, c).unwrap();
//! }
//!
//! let (value, flow, mincut) = pushrelabel(&mut net, 0, 5).unwrap();
//! assert_eq!(value, 17);
//! assert!(flow.iter().all(|&(_, _, c, f)| f >= 0 && f <= c));
//! assert_eq!(mincut, vec![0, 1, 2, 3]);
//!
//! let cut: i32 = net
//!     .edges()
//!     .filter(|&(u, v, _, _)| mincut.contains(&u) && !mincut.contains(&v))
//!     .map(|(_, _, c, _)| c)
//!     .sum();
//! assert_eq!(cut, value);
//! ```

use crate::error::{Error, Result};
use crate::network::{Key, Network};

use log::{debug, trace, warn};

use std::cmp::min;
use std::collections::VecDeque;

use crate::num::traits::{CheckedAdd, NumAssign, Signed};

/// The rule deciding along which residual edges flow may be pushed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Admissibility {
    /// Push from `u` to `v` whenever `height(u) > height(v)`.
    Relaxed,
    /// Push from `u` to `v` only if `height(u) == height(v) + 1`.
    Exact,
}

impl Default for Admissibility {
    fn default() -> Self {
        Admissibility::Relaxed
    }
}

impl Admissibility {
    fn allows(self, h_u: usize, h_v: usize) -> bool {
        match self {
            Admissibility::Relaxed => h_u > h_v,
            Admissibility::Exact => h_u == h_v + 1,
        }
    }
}

/// A single operation performed by the algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step<F> {
    /// `amount` units have been pushed from `from` to `to`.
    Push { from: Key, to: Key, amount: F },
    /// `node` got the new height `height`.
    Relabel { node: Key, height: usize },
}

/// The push-relabel algorithm.
///
/// This struct contains all algorithmic working data. The heights,
/// excesses and flows themselves are stored in the network, so they
/// remain accessible after the algorithm has been dropped.
pub struct PushRelabel<'a, F> {
    /// The network the flow problem is solved on.
    net: &'a mut Network<F>,
    /// Source node of the last computation.
    src: Option<usize>,
    /// The flow value.
    value: F,
    /// Recorded operations of the last computation.
    steps: Vec<Step<F>>,
    /// The number of push operations performed during the algorithm.
    pub cnt_push: usize,
    /// The number of relabel operations performed during the algorithm.
    pub cnt_relabel: usize,
    /// The admissibility rule used by the push operation.
    pub admissibility: Admissibility,
    /// Maximal number of push and relabel operations.
    ///
    /// If `None`, the worst case bound of the generic algorithm is used.
    pub max_steps: Option<usize>,
    /// Whether each operation should be recorded.
    pub record_steps: bool,
}

impl<'a, F> PushRelabel<'a, F>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy,
{
    /// Return a new push-relabel algorithm data structure for the network `net`.
    pub fn new(net: &'a mut Network<F>) -> Self {
        PushRelabel {
            net,
            src: None,
            value: F::zero(),
            steps: vec![],
            cnt_push: 0,
            cnt_relabel: 0,
            admissibility: Admissibility::default(),
            max_steps: None,
            record_steps: false,
        }
    }

    /// Return a reference to the underlying network.
    pub fn as_network(&self) -> &Network<F> {
        self.net
    }

    /// Return the flow value.
    ///
    /// The function returns 0 if the flow has not been computed, yet.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the operations of the last computation.
    ///
    /// The list is empty unless `record_steps` has been set.
    pub fn steps(&self) -> &[Step<F>] {
        &self.steps
    }

    /// Run the push-relabel algorithm from some source to some sink node.
    ///
    /// All heights, excesses and flows of the network are reset first,
    /// so the method may be called repeatedly, e.g. for different
    /// source and sink nodes.
    pub fn solve(&mut self, src: Key, snk: Key) -> Result<F> {
        let s = self.net.node_id(src)?;
        let t = self.net.node_id(snk)?;
        if s == t {
            return Err(Error::SourceIsSink(src));
        }

        debug!(
            "push-relabel from {} to {} on {} nodes and {} edges",
            src,
            snk,
            self.net.num_nodes(),
            self.net.num_edges()
        );

        self.src = None;
        self.value = F::zero();
        self.steps.clear();
        self.cnt_push = 0;
        self.cnt_relabel = 0;

        self.net.reset();
        self.init_preflow(s)?;

        let limit = self.max_steps.unwrap_or_else(|| self.step_limit());
        let mut nsteps = 0;
        while let Some(u) = self.find_active(s, t) {
            if nsteps >= limit {
                warn!("push-relabel stopped after {} steps", nsteps);
                return Err(Error::NotConverged { steps: nsteps });
            }
            nsteps += 1;
            if !self.push(u)? {
                self.relabel(u);
            }
        }

        self.src = Some(s);
        self.value = self.net.nodes[t].excess;

        debug!(
            "push-relabel done: {} pushes, {} relabels",
            self.cnt_push, self.cnt_relabel
        );

        Ok(self.value)
    }

    /// Return the source side of a minimal cut of the last computation.
    ///
    /// These are the keys of all nodes reachable from the source in the
    /// residual network, in ascending order. The result is empty if no
    /// flow has been computed.
    pub fn mincut(&self) -> Vec<Key> {
        let s = match self.src {
            Some(s) => s,
            None => return vec![],
        };

        let mut seen = vec![false; self.net.num_nodes()];
        let mut queue = VecDeque::new();
        seen[s] = true;
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            for e in &self.net.edges[u] {
                if !e.is_saturated() && !seen[e.to] {
                    seen[e.to] = true;
                    queue.push_back(e.to);
                }
            }
        }

        self.net.keys.values().filter(|&&u| seen[u]).map(|&u| self.net.nodes[u].key).collect()
    }

    /// Initialize preflow algorithm.
    ///
    /// The source's height is set to `n` and all edges leaving the
    /// source are saturated. The excess of a node reached by several
    /// source edges is the sum of their capacities.
    fn init_preflow(&mut self, src: usize) -> Result<()> {
        self.net.nodes[src].height = self.net.num_nodes();

        for i in 0..self.net.edges[src].len() {
            let (v, ub) = {
                let e = &self.net.edges[src][i];
                (e.to, e.capacity)
            };
            if v == src {
                continue;
            }
            let excess = self.net.nodes[v].excess.checked_add(&ub).ok_or(Error::Overflow)?;
            self.net.send(src, i, ub);
            self.net.nodes[v].excess = excess;
        }

        Ok(())
    }

    /// Worst case number of push and relabel operations.
    fn step_limit(&self) -> usize {
        let n = self.net.num_nodes();
        let m = 2 * self.net.num_edges();
        let nn = n.saturating_mul(n);
        nn.saturating_mul(2)
            .saturating_add(n.saturating_mul(m).saturating_mul(2))
            .saturating_add(nn.saturating_mul(m).saturating_mul(4))
            .saturating_add(1)
    }

    /// Return the active node with the smallest key.
    fn find_active(&self, src: usize, snk: usize) -> Option<usize> {
        self.net
            .keys
            .values()
            .copied()
            .find(|&u| u != src && u != snk && self.net.nodes[u].excess > F::zero())
    }

    /// The push operation.
    ///
    /// Sends flow along the first admissible edge leaving `u`. Returns
    /// `false` if there is no such edge.
    fn push(&mut self, u: usize) -> Result<bool> {
        let h_u = self.net.nodes[u].height;
        let excess = self.net.nodes[u].excess;
        debug_assert!(excess > F::zero());

        for i in 0..self.net.edges[u].len() {
            let e = &self.net.edges[u][i];
            if e.is_saturated() || !self.admissibility.allows(h_u, self.net.nodes[e.to].height) {
                continue;
            }

            let v = e.to;
            let df = min(e.residual(), excess);
            let excess_v = self.net.nodes[v].excess.checked_add(&df).ok_or(Error::Overflow)?;
            self.net.send(u, i, df);
            self.net.nodes[u].excess -= df;
            self.net.nodes[v].excess = excess_v;

            self.cnt_push += 1;
            let (from, to) = (self.net.nodes[u].key, self.net.nodes[v].key);
            trace!("push {} -> {}", from, to);
            if self.record_steps {
                self.steps.push(Step::Push { from, to, amount: df });
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// The relabel operation.
    ///
    /// Raises `u` by one and then lowers it to one above its lowest
    /// neighbor along a non-saturated edge.
    fn relabel(&mut self, u: usize) {
        let mut h = self.net.nodes[u].height + 1;
        for e in &self.net.edges[u] {
            if !e.is_saturated() {
                h = h.min(self.net.nodes[e.to].height + 1);
            }
        }
        self.net.nodes[u].height = h;

        self.cnt_relabel += 1;
        let node = self.net.nodes[u].key;
        trace!("relabel {} to {}", node, h);
        if self.record_steps {
            self.steps.push(Step::Relabel { node, height: h });
        }
    }
}

/// Solve the maxflow problem using the push-relabel algorithm.
///
/// The function solves the max flow problem from the source node `src`
/// to the sink node `snk`.
///
/// The function returns the flow value, the flow on each edge as
/// `(from, to, capacity, flow)` and the source side of a minimal cut.
pub fn pushrelabel<F>(net: &mut Network<F>, src: Key, snk: Key) -> Result<(F, Vec<(Key, Key, F, F)>, Vec<Key>)>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy,
{
    let (value, mincut) = {
        let mut maxflow = PushRelabel::new(net);
        let value = maxflow.solve(src, snk)?;
        (value, maxflow.mincut())
    };
    Ok((value, net.edges().collect(), mincut))
}

impl<F> Network<F>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy,
{
    /// Compute the maximal flow value from `src` to `snk`.
    pub fn max_flow(&mut self, src: Key, snk: Key) -> Result<F> {
        PushRelabel::new(self).solve(src, snk)
    }

    /// Compute the maximal flow value from the smallest to the largest key.
    pub fn max_flow_default(&mut self) -> Result<F> {
        let src = self.keys.keys().next().copied().ok_or(Error::EmptyNetwork)?;
        let snk = self.keys.keys().next_back().copied().ok_or(Error::EmptyNetwork)?;
        self.max_flow(src, snk)
    }
}
