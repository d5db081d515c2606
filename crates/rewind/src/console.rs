//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that formats `rewind_search` events
//! with colors. Enabled by the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::filter::Builder;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Directive used when `RUST_LOG` sets none.
const DEFAULT_DIRECTIVE: &str = "rewind_search=info";

/// Initializes console output for searches.
///
/// Safe to call multiple times - only the first call has effect. Prints the
/// banner and installs a subscriber filtered by `RUST_LOG`, falling back to
/// `rewind_search=info` when `RUST_LOG` is unset or empty. Does nothing to
/// the subscriber if another one is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = filter_builder().from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn filter_builder() -> Builder {
    let builder = EnvFilter::builder();
    match DEFAULT_DIRECTIVE.parse() {
        Ok(directive) => builder.with_default_directive(directive),
        Err(_) => builder,
    }
}

fn print_banner() {
    let title = format!("rewind v{}", env!("CARGO_PKG_VERSION"));
    let subtitle = "replay-based nondeterministic search";

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout);
    let _ = writeln!(stdout, "  {}  {}", title.bright_cyan().bold(), subtitle.bright_white());
    let _ = writeln!(stdout);
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Only handle rewind_search events
        if !metadata.target().starts_with("rewind_search") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_search_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    environment_mode: Option<String>,
    run_limit: Option<String>,
    path: Option<String>,
    next_path: Option<String>,
    outcome: Option<String>,
    runs: Option<u64>,
    solutions: Option<u64>,
    failures: Option<u64>,
    elapsed_ms: Option<u64>,
    depth: Option<u64>,
    position: Option<u64>,
    index: Option<u64>,
    count: Option<u64>,
    terminated_early: bool,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "environment_mode" => self.environment_mode = Some(s),
            "run_limit" => self.run_limit = Some(s),
            "path" => self.path = Some(s),
            "next_path" => self.next_path = Some(s),
            "outcome" => self.outcome = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "runs" => self.runs = Some(value),
            "solutions" => self.solutions = Some(value),
            "failures" => self.failures = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "depth" => self.depth = Some(value),
            "position" => self.position = Some(value),
            "index" => self.index = Some(value),
            "count" => self.count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "terminated_early" {
            self.terminated_early = value;
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }
}

fn format_search_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "search_start" => format_search_start(v),
        "run_end" => format_run_end(v),
        "stale_path" => format_stale_path(v),
        "search_terminated" => format_search_terminated(v),
        "search_end" => format_search_end(v),
        _ => String::new(),
    }
}

fn format_search_start(v: &EventVisitor) -> String {
    let mode = v.environment_mode.as_deref().unwrap_or("NonReproducible");
    let limit = v.run_limit.as_deref().unwrap_or("None");

    format!(
        "{} {} {} Search started: environment mode ({}), run limit ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Search]".bright_cyan(),
        mode.bright_yellow(),
        limit.bright_yellow()
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    let path = v.path.as_deref().unwrap_or("[]");
    let depth = v.depth.unwrap_or(0);
    let outcome = match v.outcome.as_deref() {
        Some("success") => "success".bright_green().to_string(),
        Some(other) => other.bright_black().to_string(),
        None => "?".white().to_string(),
    };

    format!(
        "    {} {:<24} depth {:>3} | {}",
        "->".bright_blue(),
        path.white(),
        depth,
        outcome
    )
}

fn format_stale_path(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Stale path {}: index {} at choice point {} exceeds {} alternatives",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Search]".bright_cyan(),
        v.path.as_deref().unwrap_or("[]").white(),
        v.index.unwrap_or(0).to_string().bright_red(),
        v.position.unwrap_or(0),
        v.count.unwrap_or(0)
    )
}

fn format_search_terminated(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Search terminated after {} runs, next path {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Search]".bright_cyan(),
        v.runs.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.next_path.as_deref().unwrap_or("[]").white()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let runs = v.runs.unwrap_or(0);
    let solutions = v.solutions.unwrap_or(0);
    let failures = v.failures.unwrap_or(0);
    let elapsed_ms = v.elapsed_ms.unwrap_or(0);
    let runs_per_sec = if elapsed_ms == 0 {
        runs
    } else {
        runs * 1000 / elapsed_ms
    };

    let mut output = format!(
        "{} {} {} Search ended: time spent ({}), runs ({}), replay speed ({}/sec)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Search]".bright_cyan(),
        format_duration_ms(elapsed_ms).yellow(),
        runs.to_formatted_string(&Locale::en).white(),
        runs_per_sec.to_formatted_string(&Locale::en).bright_magenta().bold()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = match (solutions, v.terminated_early) {
        (0, false) => "NO SOLUTIONS",
        (0, true) => "NO SOLUTIONS (terminated early)",
        (_, false) => "SEARCH SPACE EXHAUSTED",
        (_, true) => "TERMINATED EARLY",
    };
    let status_colored = if solutions > 0 {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_red().bold().to_string()
    };
    let status_padding = 56usize.saturating_sub(status_text.len() + 4);
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    for (label, value) in [("Solutions:", solutions), ("Failed runs:", failures)] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value.to_formatted_string(&Locale::en),
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::Level;

    fn search_debug_enabled(directives: &str) -> bool {
        let subscriber =
            tracing_subscriber::registry().with(filter_builder().parse_lossy(directives));
        tracing::subscriber::with_default(subscriber, || {
            tracing::enabled!(target: "rewind_search::search", Level::DEBUG)
        })
    }

    fn search_info_enabled(directives: &str) -> bool {
        let subscriber =
            tracing_subscriber::registry().with(filter_builder().parse_lossy(directives));
        tracing::subscriber::with_default(subscriber, || {
            tracing::enabled!(target: "rewind_search::search", Level::INFO)
        })
    }

    #[test]
    fn test_filter_honors_explicit_directive() {
        assert!(search_debug_enabled("rewind_search=debug"));
        assert!(search_debug_enabled("debug"));
    }

    #[test]
    fn test_filter_defaults_to_info() {
        assert!(search_info_enabled(""));
        assert!(!search_debug_enabled(""));
    }

    #[test]
    fn test_filter_can_silence_search() {
        assert!(!search_info_enabled("rewind_search=warn"));
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("choice".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_search_event(&visitor).is_empty());
    }

    #[test]
    fn test_search_end_mentions_counts() {
        let visitor = EventVisitor {
            event: Some("search_end".to_string()),
            runs: Some(15_720),
            solutions: Some(92),
            failures: Some(15_628),
            elapsed_ms: Some(2_000),
            ..EventVisitor::default()
        };

        let output = format_search_end(&visitor);
        assert!(output.contains("15,720"));
        assert!(output.contains("92"));
        assert!(output.contains("SEARCH SPACE EXHAUSTED"));
    }
}
