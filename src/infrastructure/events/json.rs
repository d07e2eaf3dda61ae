//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for CI/automation consumption.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use chrono::Utc;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    started: Instant,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            started: Instant::now(),
        }
    }

    fn write_event(&self, mut event: Value) {
        if let Value::Object(map) = &mut event {
            map.insert("command".into(), json!("mirror"));
            map.insert("timestamp".into(), json!(Utc::now().to_rfc3339()));
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        let json = match event {
            SyncEvent::Started {
                source,
                destination,
            } => json!({
                "event": "start",
                "source": source,
                "destination": destination,
            }),

            SyncEvent::OrganizationSyncing { name } => json!({
                "event": "item_start",
                "kind": "organization",
                "name": name,
            }),

            SyncEvent::OrganizationCreated { name } => json!({
                "event": "created",
                "kind": "organization",
                "name": name,
            }),

            SyncEvent::OrganizationUpdated { name, fields } => json!({
                "event": "updated",
                "kind": "organization",
                "name": name,
                "fields": fields,
            }),

            SyncEvent::PackageSyncing { name } => json!({
                "event": "item_start",
                "kind": "package",
                "name": name,
            }),

            SyncEvent::PackageCreated { name } => json!({
                "event": "created",
                "kind": "package",
                "name": name,
            }),

            SyncEvent::PackageUpdated { name, fields } => json!({
                "event": "updated",
                "kind": "package",
                "name": name,
                "fields": fields,
            }),

            SyncEvent::PackageDeleted { name } => json!({
                "event": "deleted",
                "kind": "package",
                "name": name,
            }),

            SyncEvent::ResourceCreated {
                package,
                name,
                hash,
            } => json!({
                "event": "created",
                "kind": "resource",
                "package": package,
                "name": name,
                "hash": hash,
            }),

            SyncEvent::ResourceUpdated {
                package,
                name,
                hash,
            } => json!({
                "event": "updated",
                "kind": "resource",
                "package": package,
                "name": name,
                "hash": hash,
            }),

            SyncEvent::ResourceDeleted {
                package,
                name,
                hash,
            } => json!({
                "event": "deleted",
                "kind": "resource",
                "package": package,
                "name": name,
                "hash": hash,
            }),

            SyncEvent::Completed { changes } => {
                let status = if changes.is_empty() {
                    "in_sync"
                } else {
                    "changed"
                };
                json!({
                    "event": "complete",
                    "status": status,
                    "total": changes.total(),
                    "changes": changes,
                    "elapsed_ms": self.started.elapsed().as_millis() as u64,
                })
            }
        };

        self.write_event(json);
    }
}
