// pn532-tap/src/main.rs

use std::process;

use env_logger::{Builder, Env, Target};
use log::{error, info, warn};

use pn532_tap::clock::SystemClock;
use pn532_tap::config::Config;
use pn532_tap::events::EventEmitter;
use pn532_tap::reader::ReconnectSupervisor;
use pn532_tap::transport::SerialConnector;
use pn532_tap::CancellationToken;

fn main() {
    // stdout carries the IPC stream; diagnostics go to stderr only.
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let mut emitter = EventEmitter::stdout();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            emitter.report_fatal(e.to_string());
            process::exit(1);
        }
    };
    info!(
        "starting on {} at {} baud ({})",
        config.port,
        config.baud_rate,
        if config.is_emulation() {
            "card emulation"
        } else {
            "reader"
        }
    );

    let token = CancellationToken::new();
    let signal_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if signal_token.cancel("termination signal received") {
            info!("termination signal received, stopping");
        }
    }) {
        warn!("cannot install signal handler: {}", e);
    }

    let connector = SerialConnector::new(config.port.clone(), config.baud_rate);
    let supervisor =
        match ReconnectSupervisor::new(&config, connector, SystemClock, emitter, token) {
            Ok(supervisor) => supervisor,
            Err(e) => {
                error!("{}", e);
                EventEmitter::stdout().report_fatal(e.to_string());
                process::exit(1);
            }
        };

    let status = supervisor.run();
    process::exit(status.code());
}
