//! Example: the ice-cream weather model.
//!
//! Run with:
//! `cargo run --example ice_cream`

use hmm_dp::{presets, Inference, Linear, LogSpace, ProbSpace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two hidden states (HOT, COLD) and a daily ice-cream count of 1, 2 or 3.
    let model = presets::ice_cream()?;
    let obs = ["3", "3", "1", "1", "2", "2", "3", "1", "3"];

    let linear = Inference::<Linear>::new(&model);
    println!("P(O) = {:e}", linear.forward(&obs)?);

    let path = linear.viterbi(&obs)?;
    println!("Best path probability: {:e}", path.score);
    println!("State sequence:");
    for (t, (state, symbol)) in path.states.iter().zip(obs).enumerate() {
        println!("  t = {t:2}, eaten = {symbol}, weather = {state}");
    }

    println!("Forward trellis (rows HOT, COLD):");
    print!("{:.6}", linear.forward_trellis(&obs)?);

    let log = Inference::<LogSpace>::new(&model);
    let lp = log.forward(&obs)?;
    println!("ln P(O) = {lp:.6} (back to linear: {:e})", LogSpace::to_prob(lp));
    Ok(())
}
