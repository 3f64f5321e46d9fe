use clap::Parser;
use holodex_app::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    holodex_app::init_tracing();
    holodex_app::run(Cli::parse()).await
}
