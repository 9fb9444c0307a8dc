use anyhow::Result;

use crate::context::CommandContext;

pub async fn run(ctx: &CommandContext) -> Result<()> {
    println!("znn-cli {}", env!("CARGO_PKG_VERSION"));
    let client = ctx.client()?;
    match client.momentum().await {
        Ok(momentum) => println!(
            "Node {} at momentum height {}",
            client.url(),
            momentum.height
        ),
        Err(e) => {
            tracing::debug!(error = %e, "node query failed");
            println!("Node {} unreachable", client.url());
        }
    }
    Ok(())
}
