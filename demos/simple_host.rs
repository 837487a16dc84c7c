// demos/simple_host.rs (Standalone App Using Crier)

use crier::{config::Config, Crier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::default();
    let crier = Crier::new(config);

    let report = crier.run().await?;
    println!(
        "Dispatched {} producers x {} displayers = {} pairs.",
        report.producers, report.displayers, report.pairs
    );
    Ok(())
}
