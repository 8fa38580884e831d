mod analytics;
mod config;
mod error;
mod logging;
mod report;
mod scope;
mod state;
mod stats;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::analytics::Analytics;
use crate::config::{AnalyticsConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::AppError;
use crate::report::OutputFormat;
use crate::report::json::render_dashboard_json;
use crate::report::text::render_dashboard_text;
use crate::scope::identity::{EntityId, parse_id_str};
use crate::scope::key::ScopeKey;
use crate::scope::resolver::ScopeResolver;
use crate::scope::{Level, ScopeSelection};
use crate::state::{FileStore, KeyValueStore, MemoryStore, Tab};
use crate::stats::transport::{HttpTransport, StatsTransport};

#[derive(Debug, Parser)]
#[command(
    name = "interview-analytics",
    version,
    about = "Scope-aware interview analytics for a hiring backend"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the scope, fetch the active tab's statistics and render them.
    Show(ShowArgs),
    /// Feed a scripted sequence of selections through the scope resolver.
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Base URL of the REST backend, e.g. https://hr.example.com/api
    #[arg(long, env = "INTERVIEW_ANALYTICS_API_BASE")]
    api_base: String,

    #[arg(long, env = "INTERVIEW_ANALYTICS_ORG", value_parser = parse_id_arg)]
    org: EntityId,

    /// JSON file with `departmentData` / `occupationData` / `jobAdData`.
    #[arg(long)]
    selection: Option<PathBuf>,

    #[arg(long, value_parser = parse_id_arg)]
    department: Option<EntityId>,

    #[arg(long, value_parser = parse_id_arg)]
    occupation: Option<EntityId>,

    #[arg(long, value_parser = parse_id_arg)]
    job_ad: Option<EntityId>,

    /// Show the organization while keeping the selections.
    #[arg(long, conflicts_with = "clear_force")]
    organization: bool,

    /// Leave a previously forced organization view.
    #[arg(long)]
    clear_force: bool,

    #[arg(long, value_parser = parse_tab_arg)]
    tab: Option<Tab>,

    #[arg(long, value_parser = parse_id_arg)]
    step: Option<EntityId>,

    #[arg(long, value_parser = parse_id_arg)]
    question: Option<EntityId>,

    #[arg(long, value_parser = parse_id_arg)]
    candidate: Option<EntityId>,

    #[arg(long, value_parser = parse_id_arg)]
    skill: Option<EntityId>,

    /// Session file holding per-scope view state.
    #[arg(long)]
    session: Option<PathBuf>,

    /// Keep view state in memory only for this run.
    #[arg(long, conflicts_with = "session")]
    no_session: bool,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[arg(long, default_value = "text", value_parser = parse_format_arg)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// JSON array of selection steps.
    #[arg(long)]
    script: PathBuf,

    #[arg(long, env = "INTERVIEW_ANALYTICS_ORG", default_value = "1", value_parser = parse_id_arg)]
    org: EntityId,

    #[arg(long, default_value = "text", value_parser = parse_format_arg)]
    format: OutputFormat,
}

fn parse_id_arg(raw: &str) -> Result<EntityId, String> {
    parse_id_str(raw).ok_or_else(|| format!("'{raw}' is not a numeric id"))
}

fn parse_tab_arg(raw: &str) -> Result<Tab, String> {
    raw.parse()
}

fn parse_format_arg(raw: &str) -> Result<OutputFormat, String> {
    raw.parse()
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Show(args) => run_show(args),
        Command::Replay(args) => run_replay(args),
    }
}

fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let config = AnalyticsConfig::new(&args.api_base, args.org)?
        .with_session_path(args.session.clone())
        .with_timeout_secs(args.timeout);
    debug!(?config, "configuration");

    let selection = build_selection(&args)?;
    let transport: Arc<dyn StatsTransport> =
        Arc::new(HttpTransport::new(&config.api_base, config.request_timeout)?);
    let store: Box<dyn KeyValueStore> = if args.no_session {
        Box::new(MemoryStore::new())
    } else {
        let file = FileStore::new(&config.session_path);
        debug!(path = %file.path().display(), "session file");
        Box::new(file)
    };

    let mut analytics = Analytics::new(config.org_id, transport, store, selection);
    if args.organization {
        analytics.goto_organization();
    } else if args.clear_force {
        analytics.clear_force();
    }

    if args.step.is_some() {
        analytics.select_step(args.step);
    }
    if args.question.is_some() {
        analytics.select_question(args.question);
    }
    if let Some(tab) = args.tab {
        analytics.set_tab(tab);
    }
    analytics.select_candidate(args.candidate);
    analytics.select_skill(args.skill);
    debug!(
        level = %analytics.level(),
        key = analytics.scope_key().map(ScopeKey::as_str).unwrap_or_default(),
        tab = %analytics.ui_state().active_tab,
        scope = ?analytics.scope(),
        resolver = ?analytics.resolver_state(),
        "scope resolved"
    );

    analytics.refresh();
    analytics.wait(config.request_timeout + Duration::from_secs(1));

    let view = analytics.view();
    let rendered = match args.format {
        OutputFormat::Text => render_dashboard_text(&view),
        OutputFormat::Json => render_dashboard_json(&view)?,
    };
    println!("{rendered}");
    Ok(())
}

fn build_selection(args: &ShowArgs) -> Result<ScopeSelection, AppError> {
    let mut selection = match &args.selection {
        Some(path) => read_json::<ScopeSelection>(path)?,
        None => ScopeSelection::default(),
    };
    let ids = ScopeSelection::from_ids(args.department, args.occupation, args.job_ad);
    if ids.department_data.is_some() {
        selection.department_data = ids.department_data;
    }
    if ids.occupation_data.is_some() {
        selection.occupation_data = ids.occupation_data;
    }
    if ids.job_ad_data.is_some() {
        selection.job_ad_data = ids.job_ad_data;
    }
    Ok(selection)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayStep {
    #[serde(flatten)]
    selection: ScopeSelection,
    #[serde(default)]
    action: Option<ReplayAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ReplayAction {
    GotoOrganization,
    ClearForce,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayOutcome {
    step: usize,
    level: Level,
    scope_key: String,
}

fn run_replay(args: ReplayArgs) -> Result<(), AppError> {
    let steps = read_json::<Vec<ReplayStep>>(&args.script)?;
    let outcomes = replay_steps(&steps, args.org);
    match args.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!(
                    "step {:>3}: {:<12} {}",
                    outcome.step, outcome.level, outcome.scope_key
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }
    Ok(())
}

/// Selection steps replace the whole selection; action steps leave it as is.
fn replay_steps(steps: &[ReplayStep], org_id: EntityId) -> Vec<ReplayOutcome> {
    let mut resolver = ScopeResolver::new();
    let mut selection = ScopeSelection::default();
    let mut outcomes = Vec::with_capacity(steps.len());

    for (idx, step) in steps.iter().enumerate() {
        match step.action {
            Some(ReplayAction::GotoOrganization) => resolver.goto_organization(),
            Some(ReplayAction::ClearForce) => resolver.clear_force(),
            None => {
                selection = step.selection.clone();
                resolver.observe(&selection);
            }
        }
        let scope = resolver.resolve(&selection, org_id);
        outcomes.push(ReplayOutcome {
            step: idx + 1,
            level: scope.level,
            scope_key: ScopeKey::for_scope(&scope).to_string(),
        });
    }
    outcomes
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
