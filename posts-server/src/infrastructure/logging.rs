use anyhow::{Result, anyhow};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG` wins over `default_level`. Without it the driver's own
/// events stay at `warn`.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .unwrap_or_else(|_| EnvFilter::new("info"))
            .add_directive(
                "mongodb=warn"
                    .parse::<Directive>()
                    .map_err(|e| anyhow!("invalid log directive: {e}"))?,
            ),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
