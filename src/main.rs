use clap::Parser;
use logbook::cli::Cli;
use logbook_core::{store, MainLoop};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/logbook-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("logbook debug log started, tail -f /tmp/logbook-debug.log");
    }

    let settings = cli.settings()?;
    let mut main_loop = MainLoop::new();
    let store = store::open(&settings.store, main_loop.handle())?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();
    logbook::app::execute(cli.command, store.as_ref(), &mut main_loop, &settings.ui, stdin, &mut stdout).await
}
