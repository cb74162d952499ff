pub use error::Error;
mod conf;
mod error;
mod import;
mod model;
mod service;

use conf::Conf;
use std::env;
use tracing_subscriber::EnvFilter;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();

    let mut dry_run = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            other => Err(Error::Cli(format!("Unknown argument: {other}")))?,
        }
    }

    let conf = Conf::from_env(dry_run)?;
    import::run(&conf).await?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
