//! Binary that takes as standard in a multigraph in .gr format, computes a feedback vertex set with
//! at most `k` nodes and writes it (1-based) to standard out, or `no solution`.

use std::io::{self, Write};
use std::str::FromStr;
use std::time::Instant;

use env_logger::{Builder, Env};

use fvs_engine::{cust_error::ProcessingError, fvs_via_ic, fvs_via_mif, graph::MultiGraph, is_fvs};
use itertools::Itertools;
use log::info;
use structopt::StructOpt;

#[derive(Debug, Clone, Copy)]
enum Algorithm {
    Ic,
    Mif,
}

impl FromStr for Algorithm {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ic" => Ok(Algorithm::Ic),
            "mif" => Ok(Algorithm::Mif),
            other => Err(ProcessingError::InvalidParameter(format!("unknown algorithm '{}', use ic or mif", other))),
        }
    }
}

#[derive(Debug, StructOpt)]
struct Opts {
    /// Maximum number of nodes in the feedback vertex set.
    #[structopt(short = "k", long)]
    budget: usize,

    /// Algorithm to use: ic (iterative compression) or mif (maximum induced forest).
    #[structopt(short, long, default_value = "ic")]
    algorithm: Algorithm,
}

/// Logs to standard error as `c`-comment lines, so the log can be stored next to a solution.
/// The level comes from `RUST_LOG` and defaults to `warn`.
fn init_logger() {
    let start_time = Instant::now();
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(move |buf, record| {
            let elapsed = start_time.elapsed().as_millis();
            writeln!(buf, "c {:>6}.{:<03} [{}] - {}", elapsed / 1000, elapsed % 1000, record.level(), record.args())
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let opts = Opts::from_args();

    let stdin = io::stdin();
    let graph = MultiGraph::read_gr(stdin.lock())?;
    info!("read graph with {} nodes and {} edges", graph.num_nodes(), graph.num_edges());

    let result = match opts.algorithm {
        Algorithm::Ic => fvs_via_ic(&graph, opts.budget)?,
        Algorithm::Mif => fvs_via_mif(&graph, opts.budget)?,
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    match result {
        Some(solution) => {
            // Validate
            if solution.len() > opts.budget || !is_fvs(&graph, &solution) {
                return Err(ProcessingError::InvalidSolution(format!(
                    "{:?} returned an invalid set of {} nodes", opts.algorithm, solution.len()
                )).into())
            }
            info!("found a feedback vertex set with {} nodes", solution.len());
            for node in solution.into_iter().sorted_unstable() {
                writeln!(stdout, "{}", node + 1)?;
            }
        },
        None => {
            info!("no feedback vertex set with at most {} nodes", opts.budget);
            writeln!(stdout, "no solution")?;
        },
    }
    Ok(())
}
