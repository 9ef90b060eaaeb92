use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = ark_resolver::run() {
        let class = e.class();
        eprintln!(
            "{} {}",
            format!("error ({}):", class.label()).bright_red().bold(),
            e
        );
        std::process::exit(class.exit_code());
    }
}
