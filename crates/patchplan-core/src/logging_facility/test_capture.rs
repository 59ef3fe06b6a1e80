//! In-memory event capture for logging assertions
//!
//! The engine logs a start/end bracket per entry point and one debug event
//! per emitted patch operation. `TestCapture` records both and answers the
//! questions diff tests ask: what did an operation log for a resource kind,
//! which patch operations were emitted, and which error codes came out.

use patchplan_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP, FIELD_PATCH_OP, FIELD_PATH,
    FIELD_RESOURCE_KIND,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, fields rendered as strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// `start`, `end` or `end_error` for bracket events
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn resource_kind(&self) -> Option<&str> {
        self.field(FIELD_RESOURCE_KIND)
    }

    /// `(patch_op, path)` when the event records an emitted operation
    pub fn patch_op(&self) -> Option<(&str, &str)> {
        Some((self.field(FIELD_PATCH_OP)?, self.field(FIELD_PATH)?))
    }

    fn closes_bracket(&self) -> bool {
        matches!(self.event(), Some(EVENT_END) | Some(EVENT_END_ERROR))
    }
}

struct Fields<'a>(&'a mut BTreeMap<String, String>);

impl Visit for Fields<'_> {
    // Integers and bools arrive here too; their Debug form is the plain value.
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Handle over the shared event buffer
#[derive(Clone, Default)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Bracket events of one operation, in emission order
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op() == Some(op))
    }

    /// Bracket events of one operation on one resource kind
    pub fn events_for_kind(&self, op: &str, resource_kind: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op() == Some(op) && e.resource_kind() == Some(resource_kind))
    }

    /// The closing `end` or `end_error` event of an operation on a kind
    pub fn closing_event(&self, op: &str, resource_kind: &str) -> Option<CapturedEvent> {
        self.events_for_kind(op, resource_kind)
            .into_iter()
            .rev()
            .find(CapturedEvent::closes_bracket)
    }

    /// Every emitted patch operation as `(patch_op, path)`
    pub fn patch_ops(&self) -> Vec<(String, String)> {
        self.events()
            .iter()
            .filter_map(|e| e.patch_op().map(|(op, path)| (op.to_string(), path.to_string())))
            .collect()
    }

    /// Error codes logged by an operation's `end_error` events
    pub fn error_codes(&self, op: &str) -> Vec<String> {
        self.events_for(op)
            .iter()
            .filter(|e| e.event() == Some(EVENT_END_ERROR))
            .filter_map(|e| e.field(FIELD_ERR_CODE).map(str::to_string))
            .collect()
    }

    fn filtered(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }

    fn record(&self, event: CapturedEvent) {
        self.events.lock().map(|mut events| events.push(event)).ok();
    }
}

struct CaptureLayer(TestCapture);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut Fields(&mut fields));
        self.0.record(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Tests in one binary share the buffer, so filter on a distinct op name,
/// resource kind or path.
///
/// # Example
///
/// ```
/// use patchplan_core::logging_facility::test_capture::init_test_capture;
/// use patchplan_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op", resource_kind = "role");
/// assert_eq!(capture.events_for_kind("doc_example_op", "role").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer(capture.clone()))
                .try_init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(pairs: &[(&str, &str)]) -> CapturedEvent {
        CapturedEvent {
            level: Level::DEBUG,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_patch_op_needs_both_fields() {
        let emitted = event(&[(FIELD_PATCH_OP, "remove"), (FIELD_PATH, "/owner")]);
        assert_eq!(emitted.patch_op(), Some(("remove", "/owner")));
        assert_eq!(event(&[(FIELD_PATH, "/owner")]).patch_op(), None);
    }

    #[test]
    fn test_closing_event_picks_end_over_start() {
        let capture = TestCapture::default();
        capture.record(event(&[
            (FIELD_OP, "diff_resource"),
            (FIELD_EVENT, "start"),
            (FIELD_RESOURCE_KIND, "role"),
        ]));
        capture.record(event(&[
            (FIELD_OP, "diff_resource"),
            (FIELD_EVENT, EVENT_END),
            (FIELD_RESOURCE_KIND, "role"),
        ]));

        let closing = capture.closing_event("diff_resource", "role").unwrap();
        assert_eq!(closing.event(), Some(EVENT_END));
        assert!(capture.closing_event("diff_resource", "source").is_none());
    }
}
