use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::Mutex,
};

use tracing::{debug, warn};

use crate::trace::trace::TraceEvent;

/// JSONL sink for grounding passes.
///
/// A sink that could not open its file, or was built with `disabled()`,
/// drops every event. Grounding results never depend on it.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open trace file, tracing disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append every event of one pass under a single lock, so lines from
    /// concurrent passes never interleave. Returns the number of lines written.
    pub fn log_pass(&self, events: &[TraceEvent]) -> usize {
        let Some(file) = &self.file else {
            return 0;
        };
        let Ok(mut guard) = file.lock() else {
            warn!("trace file lock poisoned, dropping {} events", events.len());
            return 0;
        };

        let mut out = BufWriter::new(&mut *guard);
        let mut written = 0;
        for event in events {
            let line = match serde_json::to_string(event) {
                Ok(line) => line,
                Err(e) => {
                    warn!(element = %event.element_id, error = %e, "skipping unserializable trace event");
                    continue;
                }
            };
            if let Err(e) = writeln!(out, "{}", line) {
                warn!(error = %e, "trace write failed");
                return written;
            }
            written += 1;
        }

        if let Err(e) = out.flush() {
            warn!(error = %e, "trace flush failed");
        }
        debug!(written, "trace events appended");
        written
    }
}
