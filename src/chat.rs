//! Chat & visualization exchange.
//!
//! One submitted query fans out to `/query_router` and `/visualize_router`
//! concurrently. Both outcomes are awaited before anything is merged into
//! [`AppState`], and the merge treats each outcome independently:
//!
//! | answer | chart | result |
//! |--------|-------|--------|
//! | ok     | ok    | answer message, sources replaced, chart replaced |
//! | ok     | err   | answer message, sources replaced, chart untouched |
//! | err    | ok    | failure message, sources untouched, chart replaced |
//! | err    | err   | failure message only |
//!
//! Every exchange appends exactly one assistant message.

use crate::api::{BackendResult, FinanceBackend, QueryResponse, VisualizeResponse};
use crate::store::{AppState, ChartState};
use crate::types::ChatMessage;

pub const THINKING_LABEL: &str = "Thinking…";
pub const NO_ANSWER_FALLBACK: &str = "No financial insights found.";
pub const NO_CHART_FALLBACK: &str = "No visualizable financial data found.";
pub const CONNECTION_FAILURE: &str = "Unable to connect to backend.";

/// Settled results of both backend calls for one query.
#[derive(Debug)]
pub struct ExchangeOutcome {
    pub answer: BackendResult<QueryResponse>,
    pub chart: BackendResult<VisualizeResponse>,
}

/// Record the user's message and enter the pending state.
///
/// Returns the query to send, or `None` when the input is blank or an exchange
/// is already in flight; in both cases the state is left untouched.
pub fn begin_exchange(state: &mut AppState, input: &str) -> Option<String> {
    let query = input.trim();
    if query.is_empty() || state.is_pending() {
        return None;
    }

    state.push_message(ChatMessage::user(query));
    state.set_pending(true);
    Some(query.to_string())
}

/// Issue both backend calls together and wait for both to settle.
pub async fn run_exchange(backend: &dyn FinanceBackend, query: &str) -> ExchangeOutcome {
    let (answer, chart) = futures::join!(backend.query(query), backend.visualize(query));
    ExchangeOutcome { answer, chart }
}

/// Merge a settled exchange into the state and leave the pending state.
pub fn finish_exchange(state: &mut AppState, outcome: ExchangeOutcome) {
    match outcome.answer {
        Ok(response) => {
            let answer = response.answer_text().unwrap_or(NO_ANSWER_FALLBACK);
            state.push_message(ChatMessage::assistant(answer));
            state.replace_sources(response.citations());
        }
        Err(err) => {
            tracing::warn!(error = %err, "query request failed");
            state.push_message(ChatMessage::assistant(CONNECTION_FAILURE));
        }
    }

    match outcome.chart {
        Ok(response) => apply_visualization(state, &response),
        Err(err) => tracing::warn!(error = %err, "visualization request failed"),
    }

    state.set_pending(false);
}

fn apply_visualization(state: &mut AppState, response: &VisualizeResponse) {
    let records = response.records();
    if records.is_empty() {
        state.clear_chart(NO_CHART_FALLBACK);
        return;
    }

    tracing::info!(
        records = records.len(),
        kind = ?response.kind(),
        image = response.image().is_some(),
        "chart updated"
    );
    state.set_chart(ChartState {
        kind: response.kind(),
        image_base64: response.image().map(str::to_string),
        insight: response.insight_text().map(str::to_string),
        records,
    });
}
