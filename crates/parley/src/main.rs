//! Chat with a remote assistant from the terminal.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use parley::SessionBuilder;
use parley::config::endpoint_config_from_env;
use parley::render::{TYPING_INDICATOR, TranscriptPrinter};
use parley_http_endpoint::HttpEndpoint;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::select;
use tokio::time::sleep;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match endpoint_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    info!("using endpoint {}", config.url());
    let endpoint = match HttpEndpoint::new(config) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            eprintln!("failed to create the HTTP client: {err}");
            return;
        }
    };

    let session = SessionBuilder::with_endpoint(endpoint).build();
    let mut view_rx = session.subscribe();
    let mut printer = TranscriptPrinter::default();
    for line in printer.take_new_lines(&view_rx.borrow_and_update()) {
        println!("{line}");
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut lines = BufReader::new(io::stdin()).lines();

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut lines).await else {
            break;
        };
        // Blank input never reaches the session.
        if line.trim().is_empty() {
            continue;
        }
        if session.submit(line).is_err() {
            break;
        }

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message(TYPING_INDICATOR);
                    progress_bar
                })
                .inc(1);

            let tick = sleep(Duration::from_millis(100));
            select! {
                changed = view_rx.changed() => {
                    if changed.is_err() {
                        break 'outer;
                    }
                },
                _ = tick => {
                    continue;
                }
            }

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = progress_bar.take() {
                progress_bar.finish_and_clear();
            }

            let view = view_rx.borrow_and_update().clone();
            for line in printer.take_new_lines(&view) {
                println!("{line}");
            }
            if !view.is_pending() {
                break;
            }
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {err}");
            None
        }
    }
}
