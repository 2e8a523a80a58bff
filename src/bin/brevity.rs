//! CLI binary for brevity.
//!
//! A thin shim over the library crate: `summarize` maps flags to a
//! `SummarizeConfig`, drives one upload and prints the summary; `serve` runs
//! the health-check server.

use anyhow::{Context, Result};
use brevity::{
    server, NotifyCallback, ServerConfig, SummarizeConfig, SummaryView, UploadNotifyCallback,
    UploadOrchestrator, UploadResult, UploadState, WordCount,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI notifications using indicatif ────────────────────────────────────────

/// Terminal notifications: a spinner while the upload is in flight, then a
/// one-line toast for the outcome.
struct CliNotifyCallback {
    bar: ProgressBar,
}

impl CliNotifyCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::hidden();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        Arc::new(Self { bar })
    }
}

impl UploadNotifyCallback for CliNotifyCallback {
    fn on_no_file(&self) {
        eprintln!("{} {}", yellow("⚠"), bold("Please upload a PDF first!"));
    }

    fn on_rejected_busy(&self) {
        eprintln!("{} An upload is already in progress", yellow("⚠"));
    }

    fn on_upload_start(&self, file_name: &str, word_count: u32) {
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.set_prefix("Summarizing");
        self.bar.set_message(format!("{file_name}  {}", dim(&format!("~{word_count} words"))));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_upload_complete(&self, _file_name: &str, summary_len: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold("Summary generated!"),
            dim(&format!("{summary_len} chars"))
        );
    }

    fn on_upload_error(&self, _file_name: &str, error: &str) {
        self.bar.finish_and_clear();
        // Keep the toast to one line; the full error goes to the log.
        let first_line = error.lines().next().unwrap_or(error);
        let msg = if first_line.chars().count() > 100 {
            let cut: String = first_line.chars().take(99).collect();
            format!("{cut}\u{2026}")
        } else {
            first_line.to_string()
        };
        eprintln!("{} {}  {}", red("✘"), bold("Error summarizing PDF!"), red(&msg));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize to ~150 words (default) using the local service
  brevity summarize paper.pdf

  # Shorter summary from a remote service
  brevity summarize --words 50 --backend https://brevity.example.com paper.pdf

  # JSON output including the display font
  brevity summarize --json --font Georgia paper.pdf > summary.json

  # Health-check server on port 5000
  PORT=5000 brevity serve

WORD COUNTS:
  50, 100, 150 (default), 200, 250

ENVIRONMENT VARIABLES:
  BREVITY_BACKEND_URL   Summarization service origin (default http://127.0.0.1:8000)
  BREVITY_WORD_COUNT    Default word count
  BREVITY_FONT          Default display font
  BREVITY_TIMEOUT       Request timeout in seconds (default: wait indefinitely)
  PORT / HOST           Health server bind address (default 0.0.0.0:5000)
  RUST_LOG              Override log filter

  A .env file in the working directory is loaded when present.
"#;

/// Summarize PDFs through a summarization service.
#[derive(Parser, Debug)]
#[command(
    name = "brevity",
    version,
    about = "Summarize PDF files through a summarization service",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "BREVITY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the summary itself.
    #[arg(short, long, global = true, env = "BREVITY_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF and print its summary.
    Summarize(SummarizeArgs),
    /// Run the health-check server.
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct SummarizeArgs {
    /// PDF file to upload.
    input: Option<PathBuf>,

    /// Target summary length in words.
    #[arg(short, long, env = "BREVITY_WORD_COUNT", default_value_t = WordCount::default(),
          value_parser = parse_word_count)]
    words: WordCount,

    /// Summarization service origin.
    #[arg(long, env = "BREVITY_BACKEND_URL", default_value = brevity::config::DEFAULT_BACKEND_URL)]
    backend: String,

    /// Upload path on the service.
    #[arg(long, env = "BREVITY_UPLOAD_PATH", default_value = brevity::config::DEFAULT_UPLOAD_PATH)]
    upload_path: String,

    /// Font the summary is displayed in (reported in JSON output).
    #[arg(long, env = "BREVITY_FONT", default_value = brevity::config::DEFAULT_FONT)]
    font: String,

    /// Request timeout in seconds. Omit to wait indefinitely.
    #[arg(long, env = "BREVITY_TIMEOUT")]
    timeout: Option<u64>,

    /// Write the summary to this file instead of stdout.
    #[arg(short, long, env = "BREVITY_OUTPUT")]
    output: Option<PathBuf>,

    /// Output structured JSON (SummaryView) instead of plain text.
    #[arg(long, env = "BREVITY_JSON")]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Port to listen on. Falls back to PORT, then 5000.
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind. Falls back to HOST, then 0.0.0.0.
    #[arg(long)]
    host: Option<String>,
}

fn parse_word_count(s: &str) -> std::result::Result<WordCount, String> {
    s.parse::<WordCount>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        match cli.command {
            // The spinner and toasts cover what the user needs while summarizing.
            Command::Summarize(_) => "error",
            Command::Serve(_) => "info,tower_http=debug",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Summarize(ref args) => run_summarize(args, cli.quiet).await,
        Command::Serve(ref args) => run_serve(args).await,
    }
}

async fn run_summarize(args: &SummarizeArgs, quiet: bool) -> Result<()> {
    let notify: Option<NotifyCallback> = if quiet {
        None
    } else {
        Some(CliNotifyCallback::new() as Arc<dyn UploadNotifyCallback>)
    };
    let config = build_config(args, notify)?;
    let orchestrator = UploadOrchestrator::from_config(&config).context("Failed to set up upload")?;

    let start = Instant::now();
    let result = orchestrator
        .submit_path(args.input.as_deref(), config.word_count)
        .await;
    debug_assert_eq!(orchestrator.state(), UploadState::Idle);

    let summary_text = match result {
        UploadResult::Success { summary_text } => summary_text,
        UploadResult::Failure { reason } => anyhow::bail!("Summarization failed: {reason}"),
    };

    let file_name = args
        .input
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut view = SummaryView::new(file_name, summary_text, &config);
    view.duration_ms = start.elapsed().as_millis() as u64;

    let rendered = if args.json {
        serde_json::to_string_pretty(&view).context("Failed to serialise output")?
    } else {
        view.summary.clone()
    };

    if let Some(ref path) = args.output {
        tokio::fs::write(path, with_trailing_newline(&rendered))
            .await
            .with_context(|| format!("Failed to write output file {:?}", path))?;
        if !quiet {
            eprintln!(
                "{}  {} words  {}ms  →  {}",
                green("✔"),
                view.actual_word_count(),
                view.duration_ms,
                bold(&path.display().to_string()),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(with_trailing_newline(&rendered).as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

async fn run_serve(args: &ServeArgs) -> Result<()> {
    let mut config = ServerConfig::from_env().context("Invalid server configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ref host) = args.host {
        config.host = host.clone();
    }

    tracing::info!("Starting {} v{}", server::SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    server::serve(&config).await.context("Health server failed")?;
    Ok(())
}

/// Map CLI args to `SummarizeConfig`.
fn build_config(args: &SummarizeArgs, notify: Option<NotifyCallback>) -> Result<SummarizeConfig> {
    let mut builder = SummarizeConfig::builder()
        .backend_url(&args.backend)
        .upload_path(&args.upload_path)
        .word_count(args.words)
        .font(&args.font);

    if let Some(secs) = args.timeout {
        builder = builder.timeout_secs(secs);
    }
    if let Some(cb) = notify {
        builder = builder.notify(cb);
    }

    builder.build().context("Invalid configuration")
}

fn with_trailing_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{s}\n")
    }
}
