//! TinyLog CLI
//!
//! Small front-end over tinylog-core and tinylog-extra for trying the
//! library out and for shell scripts that want rotating log files.
//!
//! ## Usage
//!
//! ```bash
//! # Run the example session (console, optionally a file too)
//! tinylog demo --file demo.log
//!
//! # Append one record to a rotating log file
//! tinylog write --file app.log --max-size 1048576 warn "disk almost full"
//!
//! # Configure loggers from JSON and log every stdin line
//! tail -f access.log | tinylog pipe --config logging.json --logger access
//!
//! # Print a file as a hex table
//! tinylog hexdump --hex-offset firmware.bin
//!
//! # Print a banner
//! tinylog title "Nightly Build"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tinylog_core::sink::{ConsoleSink, FileSink, DEFAULT_MAX_FILE_SIZE};
use tinylog_core::title::DEFAULT_TITLE;
use tinylog_core::transcode::to_wide;
use tinylog_core::{
    log_debug, log_error, log_info, log_trace, log_warn, logf, logs, wlogs, Level, Logger,
    LoggingConfig, Registry, Sink,
};
use tinylog_extra::{hexdump, hexdump_wide, hexdump_with, pretty, Offset};

/// TinyLog - lightweight embeddable logging
#[derive(Parser)]
#[command(name = "tinylog")]
#[command(version)]
#[command(about = "TinyLog - lightweight embeddable logging")]
#[command(
    long_about = "Named loggers, multiple sinks per logger, severity filtering and size-bounded file rotation."
)]
struct Cli {
    /// Increase verbosity of internal diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the example session: banner, text, pretty-printed map, hex dump
    Demo {
        /// Also write the session to this file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Rotation threshold for --file, in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
        max_size: u64,
        /// Include the UTF-16 front-end
        #[arg(long)]
        wide: bool,
        /// Plain console output
        #[arg(long)]
        no_color: bool,
    },

    /// Append one record to a rotating log file
    Write {
        /// Log file (a `.bak` backup is kept on rotation)
        #[arg(short, long)]
        file: PathBuf,
        /// Rotation threshold in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
        max_size: u64,
        /// Logger floor
        #[arg(long, default_value = "trace")]
        level: Level,
        /// Sink floor
        #[arg(long)]
        sink_level: Option<Level>,
        /// Use the UTF-8 file sink
        #[arg(long)]
        utf8: bool,
        /// Record level: trace, debug, info, warn, error or fatal
        record_level: Level,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Configure loggers from a JSON file and log each line of stdin
    Pipe {
        /// Logging configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Logger to write to (default: the first configured logger)
        #[arg(long)]
        logger: Option<String>,
        /// Level of every record
        #[arg(long, default_value = "info")]
        level: Level,
    },

    /// Print a file as a hex table
    Hexdump {
        /// Hexadecimal offsets instead of decimal
        #[arg(long)]
        hex_offset: bool,
        /// File to dump
        path: PathBuf,
    },

    /// Print a banner
    Title {
        /// Banner text
        text: Option<String>,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout belongs to the commands' own output.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Demo {
            file,
            max_size,
            wide,
            no_color,
        } => run_demo(file.as_deref(), max_size, wide, no_color),
        Commands::Write {
            file,
            max_size,
            level,
            sink_level,
            utf8,
            record_level,
            message,
        } => {
            let sink: Arc<dyn Sink> = if utf8 {
                Arc::new(FileSink::builder(&file).max_file_size(max_size).build_utf8())
            } else {
                Arc::new(FileSink::builder(&file).max_file_size(max_size).build())
            };
            if !sink.is_open() {
                bail!("cannot open log file {}", file.display());
            }
            sink.set_verbose(false);
            if let Some(sink_level) = sink_level {
                sink.set_level(sink_level);
            }

            let logger = Registry::instance().create_logger("write")?;
            logger.set_level(level);
            logger.add_dyn_sink(sink);

            logf!(target: &logger, record_level, "{}", message.join(" "));
            tracing::debug!(file = %file.display(), %record_level, "record handed to sink");
            Ok(())
        }
        Commands::Pipe {
            config,
            logger,
            level,
        } => run_pipe(&config, logger.as_deref(), level),
        Commands::Hexdump { hex_offset, path } => {
            let data =
                fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
            let offset = if hex_offset { Offset::Hex } else { Offset::Decimal };
            print!("{}", hexdump_with(&data, offset));
            Ok(())
        }
        Commands::Title { text } => {
            print!("{}", Logger::title(text.as_deref().unwrap_or(DEFAULT_TITLE)));
            println!();
            Ok(())
        }
    }
}

fn run_demo(file: Option<&Path>, max_size: u64, wide: bool, no_color: bool) -> Result<()> {
    let logger = Registry::instance().create_default_logger()?;
    logger.set_level(Level::Debug);

    let console = logger.create_sink(ConsoleSink::stdout());
    if no_color {
        console.set_color(false);
    }
    if let Some(path) = file {
        let sink = logger.create_sink(FileSink::builder(path).max_file_size(max_size).build_utf8());
        if !sink.is_open() {
            bail!("cannot open log file {}", path.display());
        }
    }

    logs!(Level::Info).append(Logger::title_default());
    log_trace!("below the demo floor, never printed");
    log_debug!("{} workers started", 4);
    log_info!("plain text message");

    let ports = BTreeMap::from([("http", 80), ("https", 443)]);
    log_info!("listening {}", pretty(&ports));
    logs!(Level::Warn)
        .append("retry queue ")
        .append(pretty(&vec![("job-7", 3), ("job-9", 1)]));

    let packet = b"\x02GET /index.html\r\n\x00\xff";
    log_error!("malformed packet\n{}", hexdump(packet));

    if wide {
        let text = to_wide("wide text \u{4e2d}\u{6587}");
        wlogs!(Level::Info).append_wide(&text);
        log_info!("as bytes\n{}", hexdump_wide(&text, Offset::Hex));
    }

    log_warn!(
        "demo finished, loggers: {}",
        pretty(&Registry::instance().logger_names())
    );
    Ok(())
}

fn run_pipe(config: &Path, name: Option<&str>, level: Level) -> Result<()> {
    let config = LoggingConfig::load(config)
        .with_context(|| format!("cannot load configuration {}", config.display()))?;
    let registry = Registry::instance();
    let loggers = config.apply(registry)?;

    let logger = match name {
        Some(name) => registry
            .get_logger(name)
            .ok_or_else(|| anyhow!("no logger named {name} in configuration"))?,
        None => loggers
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("configuration defines no loggers"))?,
    };
    tracing::info!(logger = logger.name(), sinks = logger.sink_count(), "piping stdin");

    let mut count = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("cannot read stdin")?;
        logf!(target: &logger, level, "{}", line);
        count += 1;
    }
    tracing::debug!(count, "stdin closed");
    Ok(())
}
