use clap::Parser;
use env_logger::{Builder, Env};
use morrisbox_doe::{MorrisExperiment, MorrisGrid};
use morrisbox_sensitivity::{Morris, MorrisFunction, VectorFunction, MORRISBOX_LOG};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Morris screening of the 20-d reference function using a p-level grid
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of trajectories
    #[arg(short, long, default_value_t = 10)]
    r: usize,

    /// Number of levels of the grid
    #[arg(short, long, default_value_t = 5)]
    p: usize,

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
    let dim = f.input_dim();

    // Define experiments in [0,1]^20 using p-levels
    let experiment = MorrisGrid::<f64, _>::new(&vec![args.p; dim], args.r)?
        .with_rng(Xoshiro256Plus::seed_from_u64(args.seed));
    let x = experiment.generate()?;
    let y = f.eval_sample(&x)?;

    // Evaluate elementary effects
    let morris = Morris::new(&x, &y, experiment.sampling_space())?;
    println!("mu* = {}", morris.mean_absolute_elementary_effects(0)?);
    println!("sigma = {}", morris.standard_deviation_elementary_effects(0)?);
    println!("{}", morris.elementary_effects_graph(0, true)?);
    Ok(())
}
