// src/bin/circuit_demo.rs

use qprimer::demos::{BitFlipConfig, run_bit_flip};
use qprimer::{Simulator, telemetry};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init_tracing();

    let report = run_bit_flip(&BitFlipConfig::default(), &Simulator::new())?;
    println!("Circuit:");
    println!("{}", report.circuit);
    println!("Results:");
    println!("{}", report.result);
    Ok(())
}
