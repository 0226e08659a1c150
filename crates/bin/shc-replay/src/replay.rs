//! Recorded poll cycles.
//!
//! A cycle file holds either a JSON array of events or the hub's long-poll
//! response, `{"result": [...]}`.

use std::path::{Path, PathBuf};

use serde_json::Value;
use shc_app::ports::ChangePublisher;
use shc_app::services::poll_processor::{CycleReport, PollEventProcessor};

/// Key of the event list in a long-poll response.
const RESULT_FIELD: &str = "result";

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} holds neither an event array nor a long-poll response", path.display())]
    NotACycle { path: PathBuf },
}

/// Extract the events of a cycle from the file content.
///
/// # Errors
///
/// Returns [`ReplayError::Json`] when `text` is not JSON and
/// [`ReplayError::NotACycle`] when it has neither accepted shape.
pub fn parse_cycle(path: &Path, text: &str) -> Result<Vec<Value>, ReplayError> {
    let document: Value = serde_json::from_str(text).map_err(|source| ReplayError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match document {
        Value::Array(events) => Ok(events),
        Value::Object(mut response) => match response.remove(RESULT_FIELD) {
            Some(Value::Array(events)) => Ok(events),
            _ => Err(ReplayError::NotACycle {
                path: path.to_path_buf(),
            }),
        },
        _ => Err(ReplayError::NotACycle {
            path: path.to_path_buf(),
        }),
    }
}

/// Read and parse a cycle file.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] when the file cannot be read, or any error of
/// [`parse_cycle`].
pub fn load_cycle(path: &Path) -> Result<Vec<Value>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cycle(path, &text)
}

/// Apply cycle files in order.
///
/// Every file is loaded before the first cycle is applied, so an unreadable
/// file leaves the registry untouched.
///
/// # Errors
///
/// Returns the first file that cannot be loaded. Rejected events are not
/// errors; they are reported in the returned [`CycleReport`]s.
#[tracing::instrument(skip(processor, paths), fields(files = paths.len()))]
pub async fn replay<P: ChangePublisher>(
    processor: &PollEventProcessor<P>,
    paths: &[PathBuf],
) -> Result<Vec<CycleReport>, ReplayError> {
    let cycles = paths
        .iter()
        .map(|path| load_cycle(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut reports = Vec::with_capacity(cycles.len());
    for (path, events) in paths.iter().zip(&cycles) {
        tracing::debug!(path = %path.display(), events = events.len(), "replaying cycle");
        reports.push(processor.apply_cycle(events).await);
    }
    Ok(reports)
}
