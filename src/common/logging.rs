//! Console logging.
//!
//! Every line the dispatcher prints starts with the program banner, so output
//! from the tool itself stays distinguishable from subprocess output.

use std::fmt;
use std::io;

use colored::Colorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Fixed program banner.
pub const BANNER: &str = "[repotree]";

/// Filter directive variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "REPOTREE_LOG";

const DEFAULT_LEVEL: &str = "info";

/// The banner as printed, green when colour output is enabled.
pub fn banner() -> String {
    BANNER.green().to_string()
}

/// Event formatter producing `[repotree] message` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerFormat;

impl<S, N> FormatEvent<S, N> for BannerFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{} ", banner())?;

        match *event.metadata().level() {
            Level::ERROR => write!(writer, "{} ", "ERROR".red().bold())?,
            Level::WARN => write!(writer, "{} ", "WARN".yellow().bold())?,
            Level::DEBUG | Level::TRACE => write!(writer, "{} ", "DEBUG".dimmed())?,
            Level::INFO => {}
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .event_format(BannerFormat)
        .with_writer(io::stdout)
        .try_init();
}
