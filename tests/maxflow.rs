/*
 * Copyright (c) 2020-2024 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use push_relabel::edgelist;
use push_relabel::maxflow::{pushrelabel, Admissibility, PushRelabel, Step};
use push_relabel::{Error, Key, Network};

use std::collections::{BTreeSet, HashMap};

const TESTS: &'static [(&'static str, Key, Key, i32)] = &[
    ("tests/maxflow_test1.txt", 0, 5, 23),
    ("tests/maxflow_test2.txt", 0, 5, 17),
    ("tests/maxflow_test3.txt", 0, 1, 7),
    ("tests/maxflow_test4.txt", 0, 4, 0),
];

/// Compute the value of a minimal cut by enumerating all cuts.
fn brute_force_mincut(net: &Network<i32>, src: Key, snk: Key) -> i32 {
    let inner: Vec<Key> = net.keys().filter(|&u| u != src && u != snk).collect();
    (0..1usize << inner.len())
        .map(|mask| {
            let mut side: BTreeSet<Key> = (0..inner.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| inner[i])
                .collect();
            side.insert(src);
            net.edges()
                .filter(|(u, v, _, _)| side.contains(u) && !side.contains(v))
                .map(|(_, _, c, _)| c)
                .sum::<i32>()
        })
        .min()
        .unwrap()
}

/// Check flow conservation, capacity bounds and skew symmetry.
fn check_flow(net: &Network<i32>, src: Key, snk: Key, value: i32) {
    assert!(net.edges().all(|(_, _, c, f)| f >= 0 && f <= c));

    for u in net.keys().filter(|&u| u != src && u != snk) {
        assert_eq!(net.excess(u), Some(0), "node {} has excess", u);
    }
    assert_eq!(net.excess(snk), Some(value));

    let f_out: i32 = net.edges().filter(|&(u, _, _, _)| u == src).map(|(_, _, _, f)| f).sum();
    let f_in: i32 = net.edges().filter(|&(_, v, _, _)| v == src).map(|(_, _, _, f)| f).sum();
    assert_eq!(f_out - f_in, value);

    // the flows on all residual edges between two nodes cancel out
    let mut pairs = HashMap::new();
    for node in &net.snapshot().nodes {
        for e in &node.edges {
            let key = (node.key.min(e.to), node.key.max(e.to));
            *pairs.entry(key).or_insert(0) += e.flow;
        }
    }
    assert!(pairs.values().all(|&f| f == 0), "skew symmetry violated: {:?}", pairs);
}

#[test]
fn test_pushrelabel() -> Result<(), Box<dyn std::error::Error>> {
    for &(file, src, snk, expected) in TESTS {
        let mut net = edgelist::read_from_file::<i32>(file)?;

        let (value, flow, mincut) = pushrelabel(&mut net, src, snk)?;
        assert_eq!(value, expected, "Instance: {}", file);
        assert_eq!(flow.len(), net.num_edges());
        check_flow(&net, src, snk, value);

        assert_eq!(brute_force_mincut(&net, src, snk), value, "Instance: {}", file);
        let mincutval: i32 = net
            .edges()
            .filter(|(u, v, _, _)| mincut.contains(u) && !mincut.contains(v))
            .map(|(_, _, c, _)| c)
            .sum();
        assert_eq!(mincutval, value, "Instance: {}", file);
        assert!(mincut.contains(&src) && !mincut.contains(&snk));
    }

    Ok(())
}

#[test]
fn test_admissibility() -> Result<(), Box<dyn std::error::Error>> {
    for &admissibility in &[Admissibility::Relaxed, Admissibility::Exact] {
        for &(file, src, snk, expected) in TESTS {
            let mut net = edgelist::read_from_file::<i32>(file)?;
            let mut pr = PushRelabel::new(&mut net);
            pr.admissibility = admissibility;
            assert_eq!(
                pr.solve(src, snk)?,
                expected,
                "Instance: {} admissibility: {:?}",
                file,
                admissibility
            );
            check_flow(&net, src, snk, expected);
        }
    }

    Ok(())
}

#[test]
fn test_repeated_solve() -> Result<(), Box<dyn std::error::Error>> {
    for &(file, src, snk, expected) in TESTS {
        let mut net = edgelist::read_from_file::<i32>(file)?;
        let mut pr = PushRelabel::new(&mut net);
        pr.record_steps = true;

        assert_eq!(pr.solve(src, snk)?, expected);
        let steps: Vec<Step<i32>> = pr.steps().to_vec();
        let (cnt_push, cnt_relabel) = (pr.cnt_push, pr.cnt_relabel);
        let snapshot = pr.as_network().snapshot();

        assert_eq!(pr.solve(src, snk)?, expected);
        assert_eq!(pr.steps(), &steps[..]);
        assert_eq!((pr.cnt_push, pr.cnt_relabel), (cnt_push, cnt_relabel));
        assert_eq!(pr.as_network().snapshot(), snapshot);
        assert_eq!(steps.len(), cnt_push + cnt_relabel);
    }

    Ok(())
}

#[test]
fn test_other_terminals() -> Result<(), Box<dyn std::error::Error>> {
    let mut net = edgelist::read_from_file::<i32>("tests/maxflow_test1.txt")?;
    let nresidual = net.num_edges();

    for &(src, snk, expected) in &[(0, 3, 19), (1, 5, 22), (2, 5, 15), (0, 5, 23)] {
        assert_eq!(net.max_flow(src, snk)?, expected);
        check_flow(&net, src, snk, expected);
        assert_eq!(brute_force_mincut(&net, src, snk), expected);
    }

    assert_eq!(net.max_flow_default()?, 23);
    assert!(net.num_residual_edges() > nresidual);
    assert!(net.num_residual_edges() <= 2 * nresidual);

    Ok(())
}

#[test]
fn test_unreachable_sink() {
    let mut net = Network::new();
    net.add_node(0).unwrap();
    net.add_edge(1, 5, 3).unwrap();

    let mut pr = PushRelabel::new(&mut net);
    pr.record_steps = true;
    assert_eq!(pr.solve(0, 5), Ok(0));
    assert!(pr.steps().is_empty());
    assert_eq!(pr.mincut(), vec![0]);
    assert_eq!(net.num_residual_edges(), 1);
}

#[test]
fn test_duplicate_key() {
    let mut net = Network::new();
    net.add_edge(0, 1, 7).unwrap();
    let before = net.snapshot();

    assert_eq!(net.add_node(1), Err(Error::DuplicateKey(1)));
    assert_eq!(net.add_node(0), Err(Error::DuplicateKey(0)));
    assert_eq!(net.snapshot(), before);
    assert_eq!(net.num_nodes(), 2);
    assert_eq!(net.max_flow(0, 1), Ok(7));
}
