//! `SiteAudit` CLI: run a mock website audit from the terminal.
//!
//! Walks the same four screens as the web flow: enter a URL, watch the
//! analysis, unlock the report with your details, and optionally start over.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod prompt;
mod render;

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use siteaudit_core::error::{FlowError, LeadField};
use siteaudit_core::flow::{FlowController, Screen};
use siteaudit_core::model::{AuditReport, BusinessType, LeadForm, LeadInfo};
use siteaudit_core::sequencer::{AnalysisSequencer, Pacer, SequenceOutcome};
use siteaudit_core::summary::ReportSummary;

use crate::config::{CliConfig, LogFormat};
use crate::prompt::{Interrupted, Prompter};
use crate::render::{BOLD, DIM, RED, RESET};

/// Exit code after Ctrl-C, matching shell convention for SIGINT.
const EXIT_CANCELLED: u8 = 130;

// ── CLI structure ────────────────────────────────────────────────────

/// Find out what's holding your website back.
#[derive(Parser)]
#[command(
    name = "siteaudit",
    version,
    about = "SiteAudit CLI: run a free website audit and unlock the full report",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         SITEAUDIT_LOG_LEVEL    Log filter (default: warn)\n  \
         SITEAUDIT_LOG_FORMAT   text or json (default: text)\n  \
         SITEAUDIT_PACE         Analysis delay multiplier (default: 1.0)\n\n\
         {DIM}Examples:{RESET}\n  \
         siteaudit audit\n  \
         siteaudit audit example.com --name 'Jo Smith' --email jo@example.com --business-type saas\n  \
         siteaudit audit example.com --json --pace 0"
    ),
)]
struct Cli {
    /// Log filter, overrides SITEAUDIT_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a website. Prompts for anything not given as a flag.
    Audit(AuditArgs),
    /// List the analysis phases and their durations.
    Phases {
        /// Delay multiplier to show durations at.
        #[arg(long)]
        pace: Option<f64>,
    },
    /// List the accepted business types.
    #[command(name = "business-types")]
    BusinessTypes,
}

#[derive(Args)]
struct AuditArgs {
    /// Website to audit, e.g. example.com. Omit for an interactive session.
    url: Option<String>,
    /// Your name.
    #[arg(long)]
    name: Option<String>,
    /// Your work email.
    #[arg(long)]
    email: Option<String>,
    /// One of: ecommerce, saas, agency, local, startup, enterprise, other.
    #[arg(long)]
    business_type: Option<String>,
    /// Print the unlocked report as JSON instead of formatted text.
    #[arg(long, default_value = "false")]
    json: bool,
    /// Show the preview scores before the report is unlocked.
    #[arg(long, default_value = "false")]
    peek: bool,
    /// Analysis delay multiplier, overrides SITEAUDIT_PACE. 0 skips the wait.
    #[arg(long)]
    pace: Option<f64>,
}

/// How a command finished without error.
enum Outcome {
    Done,
    Cancelled,
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = CliConfig::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config);

    match run(cli.command, &config).await {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => ExitCode::from(EXIT_CANCELLED),
        Err(e) if e.is::<Interrupted>() => {
            eprintln!();
            render::warning("interrupted");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn run(cmd: Commands, config: &CliConfig) -> Result<Outcome> {
    match cmd {
        Commands::Audit(args) => cmd_audit(args, config).await,
        Commands::Phases { pace } => {
            cmd_phases(pace.unwrap_or(config.pace));
            Ok(Outcome::Done)
        }
        Commands::BusinessTypes => {
            cmd_business_types();
            Ok(Outcome::Done)
        }
    }
}

// ── audit ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AuditOutput<'a> {
    report: &'a AuditReport,
    lead: &'a LeadInfo,
    summary: ReportSummary<'a>,
}

async fn cmd_audit(args: AuditArgs, config: &CliConfig) -> Result<Outcome> {
    // A JSON run prints exactly one object, so it never offers to start over.
    let repeat = args.url.is_none() && !args.json;
    let sequencer = AnalysisSequencer::new().pace(args.pace.unwrap_or(config.pace));
    let mut input = Prompter::new();
    let mut flow = FlowController::new();
    info!(session = %flow.session_id(), repeat, "audit session started");

    if !args.json {
        render::print_banner();
    }

    loop {
        landing(&mut flow, args.url.as_deref(), &mut input).await?;

        if analyze(&mut flow, &sequencer, args.json).await? != SequenceOutcome::Completed {
            render::warning("analysis cancelled");
            return Ok(Outcome::Cancelled);
        }
        if !args.json {
            if let Some(Screen::Preview { report, .. }) = flow.screen() {
                render::print_preview(report, args.peek);
            }
        }

        capture_lead(&mut flow, &args, &mut input).await?;

        if let Some(Screen::Unlocked { report, lead, .. }) = flow.screen() {
            if args.json {
                let output = AuditOutput {
                    report,
                    lead,
                    summary: ReportSummary::new(report),
                };
                let json = serde_json::to_string_pretty(&output).context("failed to encode report")?;
                println!("{json}");
            } else {
                render::print_report(report, lead);
            }
        }

        if !repeat || !input.confirm("Run another audit?").await? {
            return Ok(Outcome::Done);
        }
        flow.start_over()?;
    }
}

/// Landing screen: submit the preset URL, or prompt until one validates.
async fn landing(flow: &mut FlowController, preset: Option<&str>, input: &mut Prompter) -> Result<()> {
    if let Some(raw) = preset {
        flow.submit_url(raw)?;
        return Ok(());
    }

    loop {
        let raw = input.ask("Website URL").await?;
        match flow.submit_url(&raw) {
            Ok(()) => return Ok(()),
            Err(FlowError::InvalidUrl(e)) => render::field_error(&e.to_string()),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Analyzing screen. Ctrl-C cancels the sequence.
async fn analyze<P: Pacer>(
    flow: &mut FlowController,
    sequencer: &AnalysisSequencer<P>,
    quiet: bool,
) -> Result<SequenceOutcome> {
    if !quiet {
        render::print_analyzing(flow.url().unwrap_or_default());
    }

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let run = flow.run_analysis(sequencer, cancel_rx, move |progress| {
        if !quiet {
            render::print_progress(progress);
        }
    });
    tokio::pin!(run);

    // The Ctrl-C handler is installed on the first poll, together with the run.
    let outcome = tokio::select! {
        outcome = &mut run => outcome?,
        Ok(()) = tokio::signal::ctrl_c() => {
            let _ = cancel_tx.send(true);
            run.await?
        }
    };
    Ok(outcome)
}

/// Lead capture screen. Flag values are used as given; missing fields are
/// prompted for and re-prompted while invalid.
async fn capture_lead(flow: &mut FlowController, args: &AuditArgs, input: &mut Prompter) -> Result<()> {
    let mut form = LeadForm::new(
        args.name.clone().unwrap_or_default(),
        args.email.clone().unwrap_or_default(),
        args.business_type.clone().unwrap_or_default(),
    );
    let prompted: Vec<LeadField> = [
        (LeadField::Name, args.name.is_none()),
        (LeadField::Email, args.email.is_none()),
        (LeadField::BusinessType, args.business_type.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, missing)| missing.then_some(field))
    .collect();
    let mut pending = prompted.clone();

    loop {
        for field in &pending {
            match field {
                LeadField::Name => form.name = input.ask("Your name").await?,
                LeadField::Email => form.email = input.ask("Work email").await?,
                LeadField::BusinessType => form.business_type = input.ask_business_type().await?,
            }
        }

        match flow.submit_lead(&form) {
            Ok(()) => return Ok(()),
            Err(FlowError::InvalidLead(errors)) => {
                render::print_lead_errors(&errors);
                if errors.iter().any(|(field, _)| !prompted.contains(&field)) {
                    bail!("invalid lead details: {errors}");
                }
                pending = errors.iter().map(|(field, _)| field).collect();
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// ── phases / business-types ──────────────────────────────────────────

fn cmd_phases(pace: f64) {
    let sequencer = AnalysisSequencer::new().pace(pace);
    println!("{BOLD}Analysis phases{RESET}");
    for (i, phase) in sequencer.phase_table().iter().enumerate() {
        println!(
            "  {DIM}{}.{RESET} {:<34} {:>5} ms",
            i + 1,
            phase.label,
            sequencer.scaled(phase).as_millis()
        );
    }
    println!("  {DIM}total{RESET} {:>40} ms", sequencer.total_duration().as_millis());
}

fn cmd_business_types() {
    for bt in BusinessType::ALL {
        println!("  {:<12} {DIM}{}{RESET}", bt.value(), bt.label());
    }
}
