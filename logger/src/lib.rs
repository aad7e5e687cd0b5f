//! Default logging setup for tools and tests built on the network core
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

use std::{sync::Mutex, time::Instant};

/// Environment variable holding the log filter, defaults to `info`.
pub const FILTER_ENV: &str = "NTK_LOG";
/// Environment variable selecting whether to emit colored output.
pub const STYLE_ENV: &str = "NTK_LOG_STYLE";

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

fn builder(default_filter: &str) -> env_logger::Builder {
    let start_time = Instant::now();
    let last_target = Mutex::new(String::new());

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or(FILTER_ENV, default_filter)
            .write_style(STYLE_ENV),
    );

    builder.format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        let level = record.level();
        let target = record.target();

        {
            let mut last_target = last_target.lock().unwrap_or_else(|err| err.into_inner());

            if target != *last_target {
                last_target.clear();
                last_target.push_str(target);

                writeln!(
                    buf,
                    "{} {}",
                    format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                    format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
                )?;
            }
        }

        writeln!(
            buf,
            "{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{level:<5}{style:#}",
                style = buf.default_level_style(level),
            ),
            record.args(),
        )
    });

    builder
}

/// Perform the default logging setup.
///
/// The filter is read from `NTK_LOG` using `env_logger`'s syntax and defaults to `info`. Log lines
/// are grouped by target, printing a header line whenever the target changes.
///
/// # Panics
///
/// Panics when a global logger was already installed.
pub fn setup() {
    builder("info").init();
}

/// Perform the logging setup used by tests.
///
/// This uses the same format as [`setup`] but defaults to `warn`, writes through the test harness
/// capture and can be called any number of times.
pub fn setup_for_tests() {
    let _ = builder("warn").is_test(true).try_init();
}
