use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use pagegrade::config::Config;
use pagegrade::db::{Database, SqliteDatabase};
use pagegrade::graph::GraphClient;
use pagegrade::output::terminal;
use pagegrade::pipeline::Source;
use pagegrade::trends::{category_trends, summarize_trend, DEFAULT_STABLE_BAND};

/// How many recommendations the analyze command prints by default.
const DEFAULT_RECOMMENDATIONS: usize = 5;

/// pagegrade: audit a social-media business page.
///
/// Scores a page's posting history against industry benchmarks with a
/// catalog of heuristic checks, and tracks the score across runs.
#[derive(Parser)]
#[command(name = "pagegrade", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the history database
    Init,

    /// Analyze one page (a metrics snapshot .json or a live page id)
    Analyze {
        /// Path to a metrics snapshot, or a page id to fetch live
        source: String,

        /// Industry benchmark code (see `pagegrade triggers`)
        #[arg(long)]
        industry: Option<String>,

        /// Print how every trigger reached its result
        #[arg(long)]
        explain: bool,

        /// Don't store the run in the history database
        #[arg(long)]
        no_save: bool,

        /// Number of recommendations to show (default: 5)
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATIONS)]
        limit: usize,

        /// Print the report as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Compare a page against competitors
    Compare {
        /// Path to a metrics snapshot, or a page id to fetch live
        source: String,

        /// Competitor snapshots or page ids (repeatable)
        #[arg(long = "competitor", required = true)]
        competitors: Vec<String>,

        /// Industry benchmark code applied to every page
        #[arg(long)]
        industry: Option<String>,
    },

    /// Show stored runs and the score trend for a page
    History {
        page_id: String,

        /// Number of most recent runs (default: 10)
        #[arg(long, default_value = "10")]
        limit: u32,
    },

    /// Show recent alerts
    Alerts {
        /// Only alerts for this page
        page_id: Option<String>,

        /// Number of alerts (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Write a Markdown report for a page's latest run
    Report {
        page_id: String,

        /// Output path (default: pagegrade-<page_id>.md)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the trigger catalog and industry benchmarks
    Triggers,

    /// Show system status (DB stats, tracked pages, recent alerts)
    Status,

    /// Start the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 3000)
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pagegrade=info")),
        )
        .init();

    pagegrade::triggers::catalog::validate_catalog().context("Trigger catalog is invalid")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing pagegrade database...");
            let config = Config::load()?;
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\npagegrade is ready. Next step: analyze a page");
            println!("  pagegrade analyze snapshot.json");
            println!("  pagegrade analyze <page id>   (needs PAGE_ACCESS_TOKEN in .env)");
        }

        Commands::Analyze {
            source,
            industry,
            explain,
            no_save,
            limit,
            json,
        } => {
            let config = Config::load()?;
            let source = Source::parse(&source);
            let client = graph_client(&config, source.is_live())?;
            let options = config.collect_options(industry.as_deref());

            let mut metrics = source.load(client.as_ref(), &options).await?;
            if industry.is_some() {
                metrics.industry = industry;
            }

            if explain {
                terminal::display_traces(&pagegrade::analysis::explain(&metrics)?);
            }

            let (report, alerts) = if no_save {
                (pagegrade::analysis::analyze(&metrics, Utc::now())?, Vec::new())
            } else {
                let db = init_database(&config)?;
                let outcome = pagegrade::pipeline::process_metrics(
                    db.as_ref(),
                    &metrics,
                    &config.alert_thresholds,
                    Utc::now(),
                )
                .await?;
                (outcome.report, outcome.alerts)
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report, limit);
                if !alerts.is_empty() {
                    terminal::display_alerts(&alerts);
                }
                if no_save {
                    println!("{}", "Run not stored (--no-save).".dimmed());
                }
            }
        }

        Commands::Compare {
            source,
            competitors,
            industry,
        } => {
            let config = Config::load()?;
            let own_source = Source::parse(&source);
            let competitor_sources: Vec<Source> =
                competitors.iter().map(|s| Source::parse(s)).collect();

            let any_live =
                own_source.is_live() || competitor_sources.iter().any(Source::is_live);
            let client = graph_client(&config, any_live)?;
            let options = config.collect_options(industry.as_deref());

            let mut own = own_source.load(client.as_ref(), &options).await?;
            if industry.is_some() {
                own.industry = industry.clone();
            }

            let mut competitor_metrics = Vec::new();
            let mut live_ids = Vec::new();
            for source in competitor_sources {
                match source {
                    Source::File(_) => {
                        competitor_metrics.push(source.load(None, &options).await?);
                    }
                    Source::Page(page_id) => live_ids.push(page_id),
                }
            }
            if let Some(client) = client.as_ref() {
                if !live_ids.is_empty() {
                    println!("Fetching {} competitor pages...", live_ids.len());
                    competitor_metrics.extend(
                        pagegrade::pipeline::collect_competitors(
                            client,
                            &live_ids,
                            &options,
                            config.concurrency,
                        )
                        .await,
                    );
                }
            }
            if competitor_metrics.is_empty() {
                anyhow::bail!("No competitor could be loaded");
            }

            let now = Utc::now();
            let own_report = pagegrade::analysis::analyze(&own, now)?;
            let mut competitor_reports = Vec::with_capacity(competitor_metrics.len());
            for mut metrics in competitor_metrics {
                if industry.is_some() {
                    metrics.industry = industry.clone();
                }
                competitor_reports.push(pagegrade::analysis::analyze(&metrics, now)?);
            }

            let comparison = pagegrade::compare::compare(&own_report, &competitor_reports);
            terminal::display_comparison(&comparison);
        }

        Commands::History { page_id, limit } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let runs = db.get_run_summaries(&page_id, limit).await?;
            let history = db.get_history(&page_id, limit).await?;
            let trend = summarize_trend(&history, DEFAULT_STABLE_BAND);
            let categories = category_trends(&history);
            terminal::display_history(&page_id, &runs, trend.as_ref(), &categories);
        }

        Commands::Alerts { page_id, limit } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let alerts = db.get_recent_alerts(page_id.as_deref(), limit).await?;
            terminal::display_alerts(&alerts);
        }

        Commands::Report { page_id, output } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let Some(report) = db.get_latest_report(&page_id).await? else {
                anyhow::bail!(
                    "No stored analysis for page {page_id}. Run `pagegrade analyze` first."
                );
            };
            let history = db.get_history(&page_id, 30).await?;
            let trend = summarize_trend(&history, DEFAULT_STABLE_BAND);

            let path = output.unwrap_or_else(|| PathBuf::from(format!("pagegrade-{page_id}.md")));
            pagegrade::output::markdown::generate_report(&report, trend.as_ref(), &path)?;
            println!("Report written to {}", path.display().to_string().bold());
        }

        Commands::Triggers => {
            terminal::display_catalog(pagegrade::triggers::catalog::definitions());
            println!("{}", "Industry benchmarks:".bold());
            for benchmark in pagegrade::benchmarks::BENCHMARKS {
                println!(
                    "  {:<14} {:<28} {:.2}% engagement, {:.0} posts/week",
                    benchmark.code,
                    benchmark.name,
                    benchmark.avg_engagement_rate,
                    benchmark.ideal_posts_per_week
                );
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            if !pagegrade::status::is_initialized(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `pagegrade init` to set up the database.");
                return Ok(());
            }
            let db = open_database(&config)?;
            pagegrade::status::show(&db, &config.db_path).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let db = init_database(&config)?;
            pagegrade::web::run_server(config, db, port, &bind).await?;
        }
    }

    Ok(())
}

/// Build a Graph client when a command needs live data.
fn graph_client(config: &Config, needed: bool) -> Result<Option<GraphClient>> {
    if !needed {
        return Ok(None);
    }
    config.require_access_token()?;
    Ok(Some(GraphClient::new(
        &config.graph_api_url,
        &config.access_token,
    )?))
}

/// Open an existing database behind the async trait.
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    pagegrade::db::connect(&config.db_path)
}

/// Create (or open) the database, running migrations.
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = pagegrade::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}
