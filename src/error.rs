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

//! Errors raised while building a network or computing a flow.

use crate::network::Key;

/// Error of a network operation.
///
/// Errors of `add_node`/`add_edge` and invalid terminals are raised
/// before anything is modified. `Overflow` and `NotConverged` are raised
/// during a computation and leave a partial flow behind, which is
/// discarded by the next computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A node with this key exists already.
    #[error("duplicate node key {0}")]
    DuplicateKey(Key),

    /// No node with this key exists.
    #[error("unknown node key {0}")]
    UnknownKey(Key),

    /// An edge has been given a negative capacity.
    #[error("negative capacity on edge ({from},{to})")]
    NegativeCapacity { from: Key, to: Key },

    /// Source and sink are the same node.
    #[error("source and sink must be different nodes (both are {0})")]
    SourceIsSink(Key),

    /// The network has no nodes, so there is no default source or sink.
    #[error("the network has no nodes")]
    EmptyNetwork,

    /// The excess of some node does not fit into the flow type.
    #[error("flow excess overflows the flow type")]
    Overflow,

    /// The algorithm did not terminate within the step limit.
    #[error("push-relabel did not converge within {steps} steps")]
    NotConverged { steps: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
