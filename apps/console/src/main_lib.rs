use std::io::Write;
use std::sync::Arc;

use is_terminal::IsTerminal;
use paydesk_core::sync::{ScreenView, SyncConfig, SyncController, SyncRuntime};
use paydesk_device_api::DeviceApiHttpClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};
use crate::input::{parse_line, Input, USAGE};
use crate::view;

/// Logs go to stderr so they never interleave with the redrawn screen.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let sync_config = SyncConfig::new(config.banner_ttl)?;
    let client = DeviceApiHttpClient::with_timeout(&config.api_url, config.request_timeout)?;
    tracing::info!("Using device API at {}", client.base_url());

    let (runtime, mut outcomes) = SyncRuntime::new(Arc::new(client));
    let mut controller = SyncController::new(sync_config);
    runtime.dispatch_all(controller.start());

    let colored = std::io::stdout().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    redraw(&controller, colored, None)?;

    loop {
        let note = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let keypad_open = matches!(
                    controller.screen().view,
                    ScreenView::PlaceList(places) if places.keypad.is_some()
                );
                match parse_line(&line, keypad_open) {
                    Input::Commands(commands) => {
                        for command in commands {
                            tracing::debug!("command: {:?}", command);
                            runtime.dispatch_all(controller.handle(command));
                        }
                        None
                    }
                    Input::Help => Some(USAGE.to_string()),
                    Input::Quit => break,
                    Input::Empty => None,
                    Input::Invalid(message) => Some(format!("{}\n\n{}", message, USAGE)),
                }
            }
            Some(outcome) = outcomes.recv() => {
                runtime.dispatch_all(controller.apply(outcome));
                None
            }
        };
        redraw(&controller, colored, note.as_deref())?;
    }

    tracing::info!("Console closed");
    Ok(())
}

fn redraw(controller: &SyncController, colored: bool, note: Option<&str>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if colored {
        write!(stdout, "\x1b[2J\x1b[H")?;
    }
    write!(stdout, "{}", view::draw(&controller.screen(), colored))?;
    if let Some(note) = note {
        writeln!(stdout, "\n{}", note)?;
    }
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
