// src/bin/groundstate_demo.rs

use qprimer::demos::run_groundstate;
use qprimer::optics::{SweepConfig, WignerGrid};
use qprimer::telemetry;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init_tracing();

    let report = run_groundstate(&SweepConfig::default(), &WignerGrid::default(), Path::new("."))?;
    println!("time elapsed = {}", report.sweep.elapsed().as_secs_f64());
    Ok(())
}
