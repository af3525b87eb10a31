//! CLI entry point for the peer-assessment rater.
//!
//! Reads a survey export, scores every student and prints the feedback report.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use pa_rater::analyzers::analyzer::analyze;
use pa_rater::analyzers::normalize::{DEFAULT_TARGET, MAX_SCORE};
use pa_rater::output::{
    CommentStyle, DEFAULT_TITLE, ReportOptions, SELF_EXCLUSION_WARNING, StudentOrder, render_json,
    write_preamble, write_report,
};
use pa_rater::parser::read_survey;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pa_rater")]
#[command(
    about = "Normalized peer-assessment scores and feedback from a survey CSV",
    long_about = None
)]
struct Cli {
    /// Survey export (CSV, first row headers)
    #[arg(value_name = "CSV_FILE")]
    file: PathBuf,

    /// Order of students in the table and feedback blocks
    #[arg(short, long, value_enum, default_value_t = OrderArg::Appearance)]
    order: OrderArg,

    /// Layout of peer comments in each feedback block
    #[arg(short, long, value_enum, default_value_t = CommentsArg::Lines)]
    comments: CommentsArg,

    /// Report title shown in the banner
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Score the group mean is shifted to
    #[arg(
        long,
        default_value_t = DEFAULT_TARGET,
        value_parser = clap::value_parser!(u8).range(0..=MAX_SCORE as i64)
    )]
    target: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Header order
    Appearance,
    /// Highest score first
    Rank,
}

#[derive(Clone, Copy, ValueEnum)]
enum CommentsArg {
    /// One comment per line
    Lines,
    /// All comments on one line, separated by " | "
    Joined,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<OrderArg> for StudentOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Appearance => StudentOrder::Appearance,
            OrderArg::Rank => StudentOrder::Rank,
        }
    }
}

impl From<CommentsArg> for CommentStyle {
    fn from(arg: CommentsArg) -> Self {
        match arg {
            CommentsArg::Lines => CommentStyle::Lines,
            CommentsArg::Joined => CommentStyle::Joined,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr, plus a JSON rolling log file when LOG_FILE_PATH is set
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let (json_layer, _file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("pa_rater.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON")
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let survey = read_survey(&cli.file)?;
    let assessment = analyze(&survey, cli.target)?;

    let options = ReportOptions {
        title: cli.title,
        order: cli.order.into(),
        comment_style: cli.comments.into(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.format {
        FormatArg::Text => {
            write_preamble(&mut out, &assessment)?;
            write_report(&mut out, &assessment, &options)?;
        }
        FormatArg::Json => {
            if !assessment.self_exclusion_enabled() {
                eprintln!("{SELF_EXCLUSION_WARNING}");
            }
            writeln!(out, "{}", render_json(&assessment, &options)?)?;
        }
    }

    out.flush()?;
    info!(file = %cli.file.display(), "Report written");
    Ok(())
}
