use clap::Parser;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

use layman::config;
use layman::handlers::Manager;
use layman::ipc::{Conn, Event, I3Conn, I3Events};
use layman::utils::xdo::XdoGate;

#[derive(Debug, Parser)]
#[command(author, version, about = "Extra window layouts for the i3 window manager")]
struct Cli {
    /// Tracing filter directives, e.g. "debug" or "layman=debug".
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn setup_logging(directives: &str) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives);
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);
    tracing::info!("layman {} booting", env!("CARGO_PKG_VERSION"));

    let mut conn = I3Conn::connect()?;
    let assignments = config::workspace_assignments(&conn.get_config()?);
    let mut manager = Manager::new(conn, XdoGate);
    manager.startup(assignments)?;

    let mut events = I3Events::connect()?;
    events.subscribe(&["window", "workspace", "tick"])?;
    loop {
        match events.next_event()? {
            Event::Shutdown => {
                tracing::info!("window manager shut down, exiting");
                return Ok(());
            }
            event => {
                // One failed handler must not take the event loop down.
                if let Err(err) = manager.handle_event(&event) {
                    tracing::error!("event handling failed: {err}");
                }
            }
        }
    }
}
