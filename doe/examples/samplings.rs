use morrisbox_doe::{Lhs, LhsKind, MorrisExperiment, MorrisGrid, MorrisLhs, SamplingMethod};
use ndarray::arr2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let xlimits = arr2(&[[0., 1.], [-10., 10.], [5., 15.]]);
    let r = 4;

    println!("Take {} trajectories in", r);
    println!("{}\n", xlimits);

    println!("*** using a 5-level grid");
    let x = MorrisGrid::new(&[5, 5, 5], r)?.bounds(&xlimits)?.generate()?;
    println!("{}\n", x);

    println!("*** using a 10-point centered latin hypercube");
    let design = Lhs::new(&xlimits)?.kind(LhsKind::Centered).sample(10);
    let x = MorrisLhs::new(&design, r)?.bounds(&xlimits)?.generate()?;
    println!("{}\n", x);

    println!("*** using a 10-point classic latin hypercube");
    let x = MorrisLhs::sampled(&xlimits, 10, r)?.generate()?;
    println!("{}\n", x);

    Ok(())
}
