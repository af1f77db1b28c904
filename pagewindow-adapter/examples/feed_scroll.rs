use std::future::ready;

use pagewindow::{Entry, Error, LoadOptions, PageRequest, ScrollSnapshot, TransportError};
use pagewindow_adapter::{Controller, ControllerOptions, Outcome, Request};
use serde_json::{Value, json};

const DATASET_LEN: i64 = 500;
const ROW_HEIGHT: f64 = 20.0;
const VIEWPORT: f64 = 400.0;

fn source(request: PageRequest) -> std::future::Ready<Result<Value, TransportError>> {
    let start = request.start.clamp(0, DATASET_LEN);
    let end = request.end.clamp(start, DATASET_LEN);
    let entries: Vec<Value> = (start..end)
        .map(|i| json!({ "key": format!("post-{i}"), "likes": i % 7 }))
        .collect();
    ready(Ok(json!({
        "boundaries": { "start": start, "end": end },
        "flags": { "endOfResults": end >= DATASET_LEN },
        "queryResults": entries,
    })))
}

fn main() {
    // A feed scrolled to the bottom until exhausted, then back to the top. The anchor tells the
    // host how far the entry it was looking at moved, so it can keep it on screen.
    let options = ControllerOptions::new(source)
        .with_load(LoadOptions::new().with_packet_size(25).with_load_size(100))
        .with_error_handler(|err: &Error| eprintln!("load failed: {err}"));
    let c: Controller<_, Entry> = match Controller::new(options) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("invalid setup: {err}");
            return;
        }
    };

    pollster::block_on(async {
        c.dispatch(Request::Launch).await;

        loop {
            let height = c.state().len() as f64 * ROW_HEIGHT;
            let snapshot = ScrollSnapshot::new(height - VIEWPORT, height, VIEWPORT);
            match c.dispatch(Request::Scroll(snapshot)).await {
                Outcome::Applied { anchor } => {
                    let state = c.state();
                    println!(
                        "down: {}..{} shift={:?}",
                        state.boundaries.start,
                        state.boundaries.end,
                        anchor.and_then(|a| a.shift())
                    );
                }
                other => {
                    println!("down: {other:?}");
                    break;
                }
            }
        }

        loop {
            let height = c.state().len() as f64 * ROW_HEIGHT;
            let snapshot = ScrollSnapshot::new(0.0, height, VIEWPORT);
            match c.dispatch(Request::Scroll(snapshot)).await {
                Outcome::Applied { anchor } => {
                    let state = c.state();
                    println!(
                        "up: {}..{} shift={:?}",
                        state.boundaries.start,
                        state.boundaries.end,
                        anchor.and_then(|a| a.shift())
                    );
                }
                other => {
                    println!("up: {other:?}");
                    break;
                }
            }
        }
    });
}
