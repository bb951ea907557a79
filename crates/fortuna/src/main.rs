use clap::{Parser, Subcommand};
use fortuna::config::{self, Config};
use fortuna::gui::app::AppModel;
use fortuna::gui::wheel::WheelState;
use fortuna::sys::{self, runtime};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "fortuna", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel window.
    Show,
    /// Hide the wheel window.
    Hide,
    /// Spin to a section index, or to a weighted-random one.
    Spin { index: Option<usize> },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => send_command("show"),
        Some(Commands::Hide) => send_command("hide"),
        Some(Commands::Spin { index }) => {
            let cmd = match index {
                Some(i) => format!("spin {i}"),
                None => "spin".to_string(),
            };
            send_command(&cmd)
        }
        None => {
            run_wheel();
            Ok(())
        }
    }
}

fn run_wheel() {
    match config::write_default_config() {
        Ok(path) => log::debug!("Config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }

    let config = config::load_or_setup();
    let state = match WheelState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            WheelState::from_config(&Config::sample()).expect("sample config is valid")
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("dev.fortuna.Fortuna");

    app.run::<AppModel>((state, rx));
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(sys::SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to fortuna daemon at {}: {}. Is fortuna running?",
            sys::SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
