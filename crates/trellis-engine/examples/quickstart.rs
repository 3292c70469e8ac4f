//! Trellis quickstart: steer a small cell-sorting configuration.
//!
//! Demonstrates:
//!   1. Building a configuration document
//!   2. Implementing a steppable that ramps the Potts temperature
//!   3. Running the steering loop with an updater that logs each
//!      re-initialised module
//!
//! Run with:
//!   cargo run --example quickstart

use trellis_core::{AssignmentError, DocumentRead, ModuleUpdater, NodeId, StepError};
use trellis_doc::DocumentBuilder;
use trellis_engine::{SteerContext, SteeringConfig, SteeringLoop, Steppable};

// ─── Steppable: linear temperature ramp ─────────────────────────

struct TemperatureRamp {
    start: f64,
    slope: f64,
}

impl Steppable for TemperatureRamp {
    fn name(&self) -> &str {
        "temperature_ramp"
    }

    fn frequency(&self) -> u64 {
        10
    }

    fn start(&mut self, ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError> {
        if let Some(t) = ctx.get("temperature").and_then(|p| p.content().parse::<f64>().ok()) {
            self.start = t;
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError> {
        let t = self.start + self.slope * ctx.step().0 as f64;
        ctx.set_content("temperature", format!("{t:.2}"))?;
        Ok(())
    }
}

// ─── Updater: stand-in for the native engine ────────────────────

struct LoggingUpdater;

impl ModuleUpdater for LoggingUpdater {
    fn update_module(
        &mut self,
        module_key: &str,
        scope: NodeId,
        doc: &dyn DocumentRead,
    ) -> Result<(), StepError> {
        let values: Vec<String> = doc
            .children(scope)
            .iter()
            .filter_map(|&c| Some(format!("{}={}", doc.name(c)?, doc.content(c)?)))
            .collect();
        println!("  re-init {module_key}: {}", values.join(" "));
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let doc = DocumentBuilder::new()
        .open("CompuCell3D")
        .open("Potts")
        .leaf("Temperature", &[("id", "temperature")], "10.0")
        .leaf("NeighborOrder", &[("id", "neighbor_order")], "2")
        .close()
        .open("Plugin")
        .attr("Name", "Volume")
        .leaf("TargetVolume", &[("id", "target_volume")], "25")
        .close()
        .close()
        .finish()?;

    let config = SteeringConfig {
        max_steps: Some(50),
        ..SteeringConfig::default()
    };
    let mut sim = SteeringLoop::new(config, doc, LoggingUpdater)?;
    sim.add_steppable(Box::new(TemperatureRamp {
        start: 0.0,
        slope: 0.5,
    }));

    loop {
        match sim.step() {
            Ok(m) if m.modules_updated > 0 => {
                println!("step {:>3}: {} module(s) updated in {}us", m.step, m.modules_updated, m.total_us);
            }
            Ok(_) => {}
            Err(StepError::Finished) => break,
            Err(e) => return Err(e.into()),
        }
    }
    sim.finish()?;

    let temp = sim.service().peek("temperature").map(|p| p.content().to_string());
    println!("final temperature: {}", temp.unwrap_or_default());
    Ok(())
}
