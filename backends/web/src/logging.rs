//! Tracing and panic forwarding to the browser console.

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::{Mutex, Once, OnceLock};

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use wasm_bindgen::JsValue;
use web_sys::console;

const TRACING_PREFIX: &str = "[hashnav]";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();
static LOG_LEVEL: OnceLock<Mutex<LevelFilter>> = OnceLock::new();

fn current_level() -> LevelFilter {
    LOG_LEVEL
        .get()
        .and_then(|slot| slot.lock().ok().map(|guard| *guard))
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Update the console log filter level. Unknown names fall back to `info`.
pub fn set_log_level(level: &str) {
    let parsed = LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL);
    let slot = LOG_LEVEL.get_or_init(|| Mutex::new(DEFAULT_LOG_LEVEL));
    if let Ok(mut guard) = slot.lock() {
        *guard = parsed;
    }
}

/// Install the panic hook and the console tracing layer (idempotent).
pub fn install_console_forwarder() {
    TRACING_INSTALLED.call_once(|| {
        console_error_panic_hook::set_once();

        let result = tracing_subscriber::registry()
            .with(ConsoleLayer)
            .try_init();
        if result.is_err() {
            console::warn_1(&JsValue::from_str(
                "hashnav console forwarder failed to initialize",
            ));
        }
    });
}

// ============================================================================
// Tracing Layer
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct ConsoleLayer;

impl<S> Layer<S> for ConsoleLayer
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if current_level() < level {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = JsValue::from(format!(
            "{TRACING_PREFIX} {level} {}: {}{}",
            event.metadata().target(),
            visitor.message.unwrap_or_default(),
            visitor.fields,
        ));

        match level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}
