mod adapters;
mod cli;
mod config;
mod dataset;
mod gateways;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    cli::run()
}
