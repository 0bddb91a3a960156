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

//! Plain text dump of a (solved) network.
//!
//! Each node is printed with its height and excess followed by all its
//! outgoing residual edges with capacity and flow:
//!
//! ```text
//! ---------------
//! -- 0 --
//! h=2, ef=0
//! 0----->1:
//! C=7, F=7
//! ```

use crate::network::{NodeSnapshot, Snapshot};

use std::fmt;

const RULE: &str = "------------------------------";
const NODE_RULE: &str = "---------------";

/// A flow value together with the network it has been computed on.
pub struct Report<'a, F> {
    pub value: F,
    pub snapshot: &'a Snapshot<F>,
}

/// Return a report for the flow `value` on the network `snapshot`.
pub fn render<F>(value: F, snapshot: &Snapshot<F>) -> Report<'_, F> {
    Report { value, snapshot }
}

fn write_node<F: fmt::Display>(f: &mut fmt::Formatter, node: &NodeSnapshot<F>) -> fmt::Result {
    writeln!(f, "{}", NODE_RULE)?;
    writeln!(f, "-- {} --", node.key)?;
    writeln!(f, "h={}, ef={}", node.height, node.excess)?;
    for e in &node.edges {
        writeln!(f, "{}----->{}:", node.key, e.to)?;
        writeln!(f, "C={}, F={}", e.capacity, e.flow)?;
        writeln!(f)?;
    }
    Ok(())
}

impl<F> fmt::Display for Snapshot<F>
where
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        for node in &self.nodes {
            write_node(f, node)?;
        }
        writeln!(f, "{}", RULE)
    }
}

impl<'a, F> fmt::Display for Report<'a, F>
where
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Max flow: {}", self.value)?;
        for node in &self.snapshot.nodes {
            write_node(f, node)?;
        }
        writeln!(f, "{}", RULE)
    }
}
