//! Chat with an answering service from the terminal.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use ragchat::config::service_config_from_env;
use ragchat::core::conversation::Role;
use ragchat::core::{ControllerBuilder, Snapshot};
use ragchat::render::{self, TranscriptCursor};
use ragchat_http_service::HttpAnswerService;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::watch;
use tokio::time::sleep;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = service_config_from_env();
    info!("asking questions at {}", config.url());

    let controller =
        ControllerBuilder::with_answer_service(HttpAnswerService::new(config))
            .on_error(|err| debug!("answer request failed: {err:?}"))
            .build();
    let mut snapshot_rx = controller.subscribe();
    let mut cursor = TranscriptCursor::default();

    println!("{}\n", render::banner());

    let mut stdin = io::BufReader::new(io::stdin());
    loop {
        print!("{}", render::PROMPT);
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        controller.update_draft(line.trim_end_matches(['\r', '\n']));
        if controller.submit().accepted().await.is_err() {
            // Nothing was sent, just ask again.
            continue;
        }

        let Some(snapshot) = wait_while_pending(&mut snapshot_rx).await else {
            break;
        };

        // The question is already on screen as typed.
        for msg in cursor.take_new(snapshot.transcript().messages()) {
            if msg.role() == Role::Bot {
                println!("{}\n", render::format_message(msg));
            }
        }
    }
}

/// Shows a spinner until the controller settles. No input is read in the
/// meantime.
async fn wait_while_pending(
    snapshot_rx: &mut watch::Receiver<Snapshot>,
) -> Option<Snapshot> {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style);
    progress_bar.set_message("🤔 Thinking...");

    let snapshot = loop {
        let snapshot = snapshot_rx.borrow_and_update().clone();
        if !snapshot.is_pending() {
            break Some(snapshot);
        }

        progress_bar.inc(1);
        select! {
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break None;
                }
            }
            _ = sleep(Duration::from_millis(100)) => {}
        }
    };

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();
    snapshot
}

async fn read_line(stdin: &mut io::BufReader<io::Stdin>) -> Option<String> {
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
