use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG` overrides the default `info` filter. Logs go to stderr so
/// compiled sources on stdout stay clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    guardgen::cli::CommandLineInterface::load().run()
}
