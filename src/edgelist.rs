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

//! This module implements read and write functions for a simple edge
//! list format. A file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `#` is a comment line and is ignored
//! 3. every other line is an edge `<u>, <v>, <c>` denoting the source
//!    and sink keys of an edge as well as its capacity `<c>` (>= 0).
//!    Whitespace around the fields is ignored.
//!
//! Nodes are created implicitly by the edges referencing them. Parallel
//! edges and loops are allowed.

use crate::network::{Key, Network};
use crate::num::traits::{CheckedAdd, NumAssign, Signed};

use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str::FromStr;

/// Error when reading an edge list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
    #[error("Data error on line {line}: {source}")]
    Network { line: usize, source: crate::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

fn field<T>(tok: &str, what: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    tok.parse().map_err(|e| Error::Format {
        line,
        msg: format!("invalid {} '{}': {}", what, tok, e),
    })
}

/// Parse a single edge record `<u>, <v>, <c>`.
fn parse_record<F>(record: &str, line: usize) -> Result<(Key, Key, F)>
where
    F: FromStr,
    F::Err: fmt::Display,
{
    let toks: Vec<_> = record.split(',').map(str::trim).collect();
    if toks.len() != 3 {
        return Err(Error::Format {
            line,
            msg: format!("expected 3 fields, got {}", toks.len()),
        });
    }
    Ok((
        field(toks[0], "source node", line)?,
        field(toks[1], "sink node", line)?,
        field(toks[2], "capacity", line)?,
    ))
}

/// Read a network from an edge list.
pub fn read<R: Read, F>(r: R) -> Result<Network<F>>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy + FromStr,
    F::Err: fmt::Display,
{
    let mut net = Network::new();
    for (i, line) in BufReader::new(r).lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }
        let (u, v, c) = parse_record(record, i + 1)?;
        net.add_edge(u, v, c)
            .map_err(|source| Error::Network { line: i + 1, source })?;
    }
    Ok(net)
}

/// Read a network from the edge list in the file `filename`.
pub fn read_from_file<F>(filename: &str) -> Result<Network<F>>
where
    F: NumAssign + Signed + CheckedAdd + Ord + Copy + FromStr,
    F::Err: fmt::Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write the edges of a network.
///
/// The edges are written in the order of [`Network::edges`], i.e.
/// grouped by source node.
pub fn write<W, F>(mut w: W, net: &Network<F>) -> io::Result<()>
where
    W: Write,
    F: NumAssign + Signed + CheckedAdd + Ord + Copy + fmt::Display,
{
    for (u, v, c, _) in net.edges() {
        writeln!(w, "{}, {}, {}", u, v, c)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::edgelist::{self, Error};
    use std::io::{self, Cursor};

    #[test]
    fn parse_file_test() {
        let file = "# default example
0, 1, 16
0, 2, 13
2, 1, 4
1, 2, 10

# there might be empty lines
1, 3, 12
3, 2, 9
2, 4, 14
4, 3, 7
3, 5,20
 4 ,5, 4
";
        let mut net = edgelist::read::<_, i32>(io::Cursor::new(file)).unwrap();

        assert_eq!(net.num_nodes(), 6);
        assert_eq!(net.num_edges(), 10);
        assert_eq!(net.keys().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(net.max_flow_default().unwrap(), 23);
    }

    #[test]
    fn malformed_records() {
        match edgelist::read::<_, i32>(Cursor::new("0, 1, 2\n0, 1\n")) {
            Err(Error::Format { line: 2, .. }) => {}
            r => panic!("unexpected result: {:?}", r),
        }
        match edgelist::read::<_, i32>(Cursor::new("0, x, 2\n")) {
            Err(Error::Format { line: 1, msg }) => assert!(msg.contains("sink node")),
            r => panic!("unexpected result: {:?}", r),
        }
        match edgelist::read::<_, i32>(Cursor::new("\n0, 1, 2.5\n")) {
            Err(Error::Format { line: 2, msg }) => assert!(msg.contains("capacity")),
            r => panic!("unexpected result: {:?}", r),
        }
        match edgelist::read::<_, i32>(Cursor::new("0, 1, -2\n")) {
            Err(Error::Network { line: 1, source }) => {
                assert_eq!(source, crate::Error::NegativeCapacity { from: 0, to: 1 })
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn write_test_file() {
        let net = edgelist::read::<_, i64>(Cursor::new("2,3,5\n0,1,4\n0,2,2\n")).unwrap();

        let mut buf = Cursor::new(Vec::new());
        edgelist::write(&mut buf, &net).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "0, 1, 4
0, 2, 2
2, 3, 5
"
        );
    }
}
