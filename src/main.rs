use infoschema::{catalog::Catalog, config, executor::Executor, server};
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    human_panic::setup_panic!();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infoschema=info")),
        )
        .init();
    info!("🔢 Starting infoschema...");
    let config = config::Config::from_env()?;
    info!("⚙️ Launch configuration:\n{}", config);

    let mut executor = Executor::new(&config, Catalog::new());
    let executor_handle = executor.prepare_channel();
    let executor_task = tokio::spawn(async move { executor.start().await });

    server::start_server(&config, executor_handle).await?;
    // The executor stops once the server has dropped every handle
    executor_task.await??;
    Ok(())
}
