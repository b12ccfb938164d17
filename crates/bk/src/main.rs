use bk_core::config::load_config;
use bk_core::identity::{IdentityFeed, IdentitySnapshot};
use bk_core::types::{Overview, TaskId, UserId};
use bk_core::Tracker;
use bk_db::DbStore;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::Path;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "bk", about = "Track study sessions, goals, streaks and tasks")]
struct Cli {
    /// Signed-in user id. Stands in for the external identity provider.
    #[arg(long, env = "BENKYO_USER")]
    user: Option<String>,

    /// Display name snapshotted into new records.
    #[arg(long, env = "BENKYO_NAME")]
    name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a finished study session
    Log(LogArgs),
    /// Show totals, the weekly chart, streak and per-subject breakdown
    Stats,
    /// Show your records, newest first
    Records,
    /// Show the cross-user leaderboard
    Ranking,
    /// Manage the study to-do list
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Args)]
struct LogArgs {
    /// What was studied
    content: String,
    /// Minutes spent
    #[arg(short, long)]
    minutes: i64,
    #[arg(short, long)]
    subject: Option<String>,
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a to-do item
    Add { subject: String, topic: String },
    /// Toggle completion on a task
    Done { id: String },
    /// List open tasks, then completed ones grouped by subject
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {err}", "error:".red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path =
        std::env::var("BENKYO_DB_PATH").unwrap_or_else(|_| ".benkyo/study.db".to_string());
    if let Some(parent) = Path::new(&db_path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let config_path =
        std::env::var("BENKYO_CONFIG").unwrap_or_else(|_| ".benkyo/config.toml".to_string());
    let config = load_config(Path::new(&config_path))?;

    // The provider fires once at startup; here the "provider" is the CLI
    // flags/env, published through the same feed a real adapter would use.
    let feed = IdentityFeed::new(match cli.user {
        Some(id) => IdentitySnapshot::signed_in(UserId::new(id), cli.name),
        None => IdentitySnapshot::signed_out(),
    });
    let identity = feed.current();

    let tracker = Tracker::new(DbStore::open(Path::new(&db_path))?, config)?;

    match cli.command {
        Command::Log(args) => {
            let record = tracker
                .logs()
                .record(&identity, args.subject, args.content, args.minutes)
                .await?;
            println!("{} {} ({} min)", "recorded".green(), record.content, record.time);
        }
        Command::Stats => {
            let overview = tracker.logs().overview(&identity, Utc::now()).await?;
            print_overview(&overview, tracker.config().weekly_goal_minutes);
        }
        Command::Records => {
            for record in tracker.logs().for_user(&identity).await? {
                let day = record
                    .created_at
                    .map_or_else(|| "pending".to_string(), |at| at.format("%Y-%m-%d").to_string());
                println!("{}  {} ({} min)", day.dimmed(), record.content, record.time);
            }
        }
        Command::Ranking => {
            for (place, entry) in tracker.logs().leaderboard().await?.iter().enumerate() {
                println!("{:>2}. {}  {} min", place + 1, entry.label.bold(), entry.minutes);
            }
        }
        Command::Task(command) => run_task(&tracker, &identity, command).await?,
    }
    Ok(())
}

async fn run_task(
    tracker: &Tracker<DbStore>,
    identity: &IdentitySnapshot,
    command: TaskCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        TaskCommand::Add { subject, topic } => {
            let task = tracker.tasks().add(identity, subject, topic).await?;
            println!("{} {} - {} [{}]", "added".green(), task.subject, task.topic, task.id);
        }
        TaskCommand::Done { id } => {
            let id = TaskId::from_str(&id)?;
            let updated = tracker.tasks().toggle(identity, &id).await?;
            if let Some(task) = updated.iter().find(|task| task.id == id) {
                let state = if task.completed { "done" } else { "reopened" };
                println!("{} {} - {}", state.green(), task.subject, task.topic);
            }
        }
        TaskCommand::List => {
            println!("{}", "open".bold());
            for task in tracker.tasks().incomplete(identity).await? {
                println!("  [ ] {} - {}  ({})", task.subject, task.topic, task.id.dimmed());
            }
            println!("{}", "completed".bold());
            for (subject, members) in tracker.tasks().completed_by_subject(identity).await? {
                println!("  {subject}");
                for task in members {
                    println!("    [x] {}", task.topic);
                }
            }
        }
    }
    Ok(())
}

fn print_overview(overview: &Overview, goal_minutes: i64) {
    println!("total: {} min", overview.total_minutes.bold());
    println!("today: {} min", overview.today_minutes);
    println!(
        "this week: {} min ({}% of the {} min goal)",
        overview.weekly_total, overview.weekly_achievement_percent, goal_minutes
    );
    println!("streak: {} day(s)", overview.streak_days.bold());

    println!();
    let peak = overview
        .weekly_series
        .iter()
        .map(|bucket| bucket.minutes)
        .max()
        .unwrap_or(0)
        .max(1);
    for bucket in &overview.weekly_series {
        let width = usize::try_from(bucket.minutes * 40 / peak).unwrap_or(0);
        println!(
            "{:>5}  {} {}",
            bucket.label,
            "#".repeat(width).blue(),
            bucket.minutes
        );
    }

    println!();
    for total in &overview.subject_totals {
        println!("{:<16} {} min", total.subject, total.minutes);
    }

    println!();
    println!("{}", "leaderboard".bold());
    for (place, entry) in overview.ranking.iter().enumerate() {
        println!("{:>2}. {}  {} min", place + 1, entry.label, entry.minutes);
    }
}
