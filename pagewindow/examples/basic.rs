use std::future::ready;

use pagewindow::{
    Direction, Entry, LoadOptions, PageRequest, QueryParams, TransportError, WindowState,
    fetch_page,
};
use serde_json::{Value, json};

const DATASET_LEN: i64 = 250;

// An in-memory dataset answering `[start, end)` requests.
fn source(request: PageRequest) -> std::future::Ready<Result<Value, TransportError>> {
    let start = request.start.clamp(0, DATASET_LEN);
    let end = request.end.clamp(start, DATASET_LEN);
    let entries: Vec<Value> = (start..end)
        .map(|i| json!({ "key": format!("row-{i}"), "title": format!("Row {i}") }))
        .collect();
    ready(Ok(json!({
        "boundaries": { "start": start, "end": end },
        "flags": { "endOfResults": end >= DATASET_LEN },
        "queryResults": entries,
    })))
}

fn main() -> pagewindow::Result<()> {
    let options = LoadOptions::new().with_packet_size(20).with_load_size(60);
    let params = QueryParams::new();
    let mut state = WindowState::<Entry>::default();

    pollster::block_on(async {
        while !state.flags.end_of_results {
            let outcome =
                fetch_page(&source, Direction::Forward, &state, &options, &params).await?;
            println!(
                "forward: fetched={} trimmed={} window={}..{}",
                outcome.stats.fetched,
                outcome.stats.trimmed,
                outcome.boundaries.start,
                outcome.boundaries.end
            );
            outcome.apply_to(&mut state);
        }

        while !state.flags.beginning_of_results {
            let outcome =
                fetch_page(&source, Direction::Backward, &state, &options, &params).await?;
            println!(
                "backward: fetched={} trimmed={} window={}..{}",
                outcome.stats.fetched,
                outcome.stats.trimmed,
                outcome.boundaries.start,
                outcome.boundaries.end
            );
            outcome.apply_to(&mut state);
        }
        Ok::<_, pagewindow::Error>(())
    })
}
