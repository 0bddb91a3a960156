/*
 * Copyright (c) 2015-2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

use time::OffsetDateTime;

use rustop::opts;

use push_relabel::edgelist;
use push_relabel::maxflow::{Admissibility, PushRelabel};
use push_relabel::report;
use push_relabel::{Key, Network};

use std::error::Error;

fn run(net: &mut Network<i64>, src: Key, snk: Key, admissibility: Admissibility, niter: usize) -> Result<(), Box<dyn Error>> {
    let mut pr = PushRelabel::new(net);
    pr.admissibility = admissibility;

    let tstart = OffsetDateTime::now_utc();
    for _ in 0..niter {
        pr.solve(src, snk)?;
    }
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Flow: {}", pr.value());
    println!("  number of pushes: {}", pr.cnt_push);
    println!("  number of relabels: {}", pr.cnt_relabel);
    println!("  min cut: {:?}", pr.mincut());

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve max-flow problem with a push-relabel algorithm.";
        opt exact:bool, desc:"Push only along edges with height difference one.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        opt report:bool, desc:"Print the solved network.";
        opt src:Option<Key>, desc:"Source node (default: smallest key).";
        opt snk:Option<Key>, desc:"Sink node (default: largest key).";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let mut net = edgelist::read_from_file::<i64>(&args.file)?;
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of nodes: {}", net.num_nodes());
    println!("  number of arcs: {}", net.num_edges());

    let src = match args.src {
        Some(src) => src,
        None => net.keys().next().ok_or(push_relabel::Error::EmptyNetwork)?,
    };
    let snk = match args.snk {
        Some(snk) => snk,
        None => net.keys().last().ok_or(push_relabel::Error::EmptyNetwork)?,
    };
    let admissibility = if args.exact {
        Admissibility::Exact
    } else {
        Admissibility::Relaxed
    };

    run(&mut net, src, snk, admissibility, args.num)?;

    if args.report {
        let value = net.excess(snk).unwrap_or(0);
        print!("{}", report::render(value, &net.snapshot()));
    }

    Ok(())
}
