//! Scan-to-label station binary.
//!
//! Reads scanner input from stdin, previews each label to the data
//! directory, and prints on `:print`.

use tracing_subscriber::EnvFilter;

use label_station::Frontend;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting label station");

    let (station, config) = label_station::init_station()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Frontend::new(station, config).run(stdin.lock(), stdout.lock())?;

    tracing::info!("Label station stopped");
    Ok(())
}
