//! Stderr logging for the CLI
//!
//! One-shot commands: `12:00:00.123 [DEBUG] rpn_calc::engine: apply op=+ depth=1`.
//! The REPL drops the time column, the prompt already orders the lines.

use colored::*;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

fn colored_label(level: &Level) -> ColoredString {
    let label = level_label(level);
    match *level {
        Level::TRACE => label.magenta(),
        Level::DEBUG => label.blue(),
        Level::INFO => label.green(),
        Level::WARN => label.yellow(),
        Level::ERROR => label.red().bold(),
    }
}

/// `[time] [LEVEL] target: message fields`
struct CliFormat {
    timestamps: bool,
}

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        if self.timestamps {
            let now = chrono::Local::now();
            write!(writer, "{} ", now.format("%H:%M:%S%.3f"))?;
        }

        if writer.has_ansi_escapes() {
            write!(writer, "{} ", colored_label(metadata.level()))?;
        } else {
            write!(writer, "{} ", level_label(metadata.level()))?;
        }
        write!(writer, "{}: ", metadata.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Logging options taken from the command line
#[derive(Debug, Clone, Copy)]
pub struct LogOptions {
    pub verbose: bool,
    pub color: bool,
    pub timestamps: bool,
}

/// Install the global subscriber; a second call is a no-op
pub fn init(options: LogOptions) {
    let layer = fmt::layer()
        .event_format(CliFormat {
            timestamps: options.timestamps,
        })
        .with_writer(std::io::stderr)
        .with_ansi(options.color);

    let _ = tracing_subscriber::registry()
        .with(default_filter(options.verbose))
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        assert_eq!(level_label(&Level::INFO), "[INFO]");
        assert_eq!(level_label(&Level::TRACE), "[TRACE]");
        colored::control::set_override(false);
        assert_eq!(colored_label(&Level::WARN).to_string(), "[WARN]");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let options = LogOptions {
            verbose: true,
            color: false,
            timestamps: false,
        };
        init(options);
        init(LogOptions {
            timestamps: true,
            ..options
        });
        tracing::debug!("still logging");
    }
}
