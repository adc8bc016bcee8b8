/// distcalc agent
/// 
/// Polls the orchestrator for ready tasks and computes them with
/// `COMPUTING_POWER` concurrent workers.

use distcalc::{
    agent::run_agent,
    config::{load_dotenv, Config},
    server::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    load_dotenv();

    let config = Config::from_env();
    run_agent(config.agent).await
}
