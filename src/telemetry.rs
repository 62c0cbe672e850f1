//! Global tracing subscriber setup shared by both binaries.

use std::env;

use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Install the compact subscriber used by the service and the generator.
///
/// Alert lines go out at `warn` (warning tier) and `error` (cloudburst tier),
/// so the filter must keep those levels for alerts to stay visible. It comes
/// from `RUST_LOG` when set. Otherwise `AXUM_LOG_LEVEL` picks the crate level
/// (default `debug`) and hyper and reqwest are held at `warn`.
///
/// `FORCE_COLOR` (`1`/`true`/`yes` or `0`/`false`/`no`) overrides TTY
/// detection. `AXUM_SPAN_EVENTS=full` or `enter_exit` adds span events on top
/// of the default close events.
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    // FORCE_COLOR wins over TTY detection
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter())
        .with_ansi(use_color)
        .compact()
        .init();
}

/// Use RUST_LOG if available, otherwise fall back to AXUM_LOG_LEVEL.
fn env_filter() -> EnvFilter {
    // ---
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    EnvFilter::new(default_directives(env::var("AXUM_LOG_LEVEL").ok().as_deref()))
}

fn default_directives(level: Option<&str>) -> String {
    format!("{},hyper=warn,reqwest=warn", level_directive(level))
}

fn level_directive(raw: Option<&str>) -> &'static str {
    match raw {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => "debug",
    }
}
