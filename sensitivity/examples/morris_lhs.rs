use clap::Parser;
use env_logger::{Builder, Env};
use morrisbox_doe::{unit_hypercube, Lhs, MorrisExperiment, MorrisLhs, SamplingMethod};
use morrisbox_sensitivity::{Morris, MorrisFunction, VectorFunction, MORRISBOX_LOG};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Morris screening of the 20-d reference function using an LHS initial design
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of trajectories
    #[arg(short, long, default_value_t = 10)]
    r: usize,

    /// Size of the LHS design
    #[arg(short = 'n', long, default_value_t = 50)]
    size: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let env = Env::new().filter_or(MORRISBOX_LOG, "info");
    Builder::from_env(env).target(env_logger::Target::Stdout).init();

    // use the reference 20-d function from the Morris paper
    let f = MorrisFunction::default();
    let xlimits = unit_hypercube::<f64>(f.input_dim());

    // Define an LHS experiment in [0, 1]^20
    let design = Lhs::new(&xlimits)?
        .with_rng(Xoshiro256Plus::seed_from_u64(args.seed))
        .sample(args.size);
    let experiment = MorrisLhs::new(&design, args.r)?
        .with_rng(Xoshiro256Plus::seed_from_u64(args.seed + 1));

    // Evaluate elementary effects
    let morris = Morris::from_experiment(&experiment, &f)?;
    let graph = morris
        .elementary_effects_graph(0, true)?
        .title("Elementary effects using LHS");
    println!("{}", graph);
    for point in graph.ranking().iter().take(5) {
        println!("{} is influent: mu* = {:.3}", point.label, point.mean);
    }
    Ok(())
}
