use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use futures::future;
use gamification::analyze::{Area, Dashboard, DashboardState, Period, ViewState, ALL_AREAS};
use gamification::clickup::{ClickUpClient, ClickUpOAuth, ClickUpTeam, DEFAULT_BASE_URL};
use gamification::model::{AppConfig, ScoredRecord};
use gamification::pipeline::{fetch_snapshot, score_snapshot};
use gamification::report::{members_table, MarkdownReport};
use gamification::utils::{page_reporter, MultiProgressExt};
use gamification::{telemetry, Result};
use indicatif::MultiProgress;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    name = "gamify",
    about = "Score closed ClickUp tasks and render the gamification dashboard",
    version
)]
struct Cli {
    #[arg(long = "config", default_value = "config.json", global = true)]
    config_path: PathBuf,
    #[arg(long = "rules", default_value = "pontuacoes.json", global = true)]
    rules_path: PathBuf,
    #[arg(long = "tasks", default_value = "clickup_tasks.json", global = true)]
    tasks_path: PathBuf,
    #[arg(long = "records", default_value = "processed_tasks.json", global = true)]
    records_path: PathBuf,
    #[arg(long = "clickup_url", default_value = DEFAULT_BASE_URL, global = true)]
    clickup_url: String,
    /// Overrides `clickup_token` from the config file
    #[arg(long = "clickup_token", env = "CLICKUP_TOKEN", hide_env_values = true, global = true)]
    clickup_token: Option<String>,
    #[arg(long = "log_level", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the closed tasks of the configured lists
    Fetch,
    /// Score the downloaded tasks with the rule table
    Score,
    /// Fetch, then score
    Refresh,
    /// Render the dashboard for a period and area
    Report(ReportArgs),
    /// List team members with their task counts
    Members,
    /// Exchange an OAuth authorization code for an access token and store it
    Token {
        /// Authorization code received on the redirect URI
        code: String,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// One of: "Current Month", "Last 7 days", "Last 30 days", "Current Quarter", "Custom", "All"
    #[arg(long, default_value = "Current Month")]
    period: String,
    /// First day of a custom period (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day of a custom period (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Tag to filter on, matched exactly
    #[arg(long, default_value = ALL_AREAS)]
    area: String,
    #[arg(long, default_value = "dashboard.md")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    if let Err(err) = telemetry::init(&cli.log_level) {
        eprintln!("❌ {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "gamify", error = %err, "command failed");
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Fetch => fetch(cli).await,
        Command::Score => score(cli),
        Command::Refresh => {
            fetch(cli).await?;
            score(cli)
        }
        Command::Report(args) => report(cli, args),
        Command::Members => members(cli).await,
        Command::Token { code } => token(cli, code).await,
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = AppConfig::from_config_or_default(&cli.config_path)?;
    Ok(config.with_token_override(cli.clickup_token.clone()))
}

async fn fetch(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let client = ClickUpClient::new(&cli.clickup_url, config.token()?)?;

    let multi_progress = MultiProgress::new();
    let fetched = fetch_snapshot(&client, &config, &cli.tasks_path, |list_id| {
        page_reporter(multi_progress.add_spinner(format!("list {list_id}")))
    })
    .await;
    if let Err(err) = multi_progress.clear() {
        debug!(target: "gamify::fetch", error = %err, "cannot clear progress bars");
    }

    let count = fetched?;
    println!(
        "✅ {count} closed tasks saved to `{}`",
        cli.tasks_path.display()
    );
    Ok(())
}

fn score(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let outcome = score_snapshot(&config, &cli.rules_path, &cli.tasks_path, &cli.records_path)?;
    println!(
        "✅ {} records scored from {} tasks with `{}` ({} rejected)",
        outcome.records,
        outcome.tasks,
        cli.rules_path.display(),
        outcome.rejected
    );
    Ok(())
}

fn report(cli: &Cli, args: &ReportArgs) -> Result<()> {
    let config = load_config(cli)?;
    let records = ScoredRecord::from_config(&cli.records_path)?;
    let period = Period::from_label(&args.period, args.from, args.to)?;
    let view = ViewState::new(period, Area::from_label(&args.area));
    let now = Utc::now().with_timezone(&config.offset()?).naive_local();

    let dashboard = Dashboard::build(&records, view, now, config.monthly_goal);
    dashboard.report_create(&args.output)?;
    match &dashboard.state {
        DashboardState::Ready => println!(
            "✅ Dashboard with {} contributors written to `{}`",
            dashboard.aggregation.ranking.len(),
            args.output.display()
        ),
        DashboardState::EmptyDataWarning => println!(
            "⚠️ No records match the filters; empty dashboard written to `{}`",
            args.output.display()
        ),
        DashboardState::InvalidPeriod(err) => println!(
            "⚠️ {err}; empty dashboard written to `{}`",
            args.output.display()
        ),
    }
    Ok(())
}

async fn members(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let client = ClickUpClient::new(&cli.clickup_url, config.token()?)?;
    let members = client.team_members(config.team_id()?).await?;

    let summaries = future::join_all(
        members
            .iter()
            .map(|member| client.user_task_summary(member.id)),
    )
    .await;
    let mut rows = Vec::with_capacity(members.len());
    for (member, summary) in members.into_iter().zip(summaries) {
        rows.push((member, summary?));
    }

    println!("{}", members_table(&rows)?);
    Ok(())
}

async fn token(cli: &Cli, code: &str) -> Result<()> {
    let mut config = AppConfig::from_config_or_default(&cli.config_path)?;
    let client = ClickUpClient::new(&cli.clickup_url, "")?;
    let access_token = client.exchange_code(config.oauth()?, code).await?;

    config.clickup_token = Some(access_token);
    config.save(&cli.config_path)?;
    println!("✅ Access token stored in `{}`", cli.config_path.display());
    Ok(())
}
