//! Sentinelle - Multi-domain strategic intelligence center
//!
//! Thin CLI shell over the professional-center controller: opens a sector
//! center, applies filters from the command line, and prints the stats and
//! brief list a page shell would render.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sentinelle::briefs::{
    ConfidenceFilter, ConfidenceThreshold, PeriodFilter, PriorityFilter, PriorityLevel,
};
use sentinelle::center::{badge_tone, profile_for, CenterController};
use sentinelle::config::SentinelleConfig;
use sentinelle::entity::{EntityService, RestEntityClient, StubEntityService, User};
use sentinelle::session::{Role, SessionContext};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentinelle")]
#[command(version)]
#[command(about = "Multi-domain strategic intelligence center")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SENTINELLE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a sector center and print its stats and brief list
    Center {
        /// Sector domain (defaults to the configured one)
        #[arg(short, long)]
        domain: Option<String>,

        /// Run against the in-memory demo service instead of the backend
        #[arg(long)]
        offline: bool,

        /// Text search over title and summary
        #[arg(short, long)]
        search: Option<String>,

        /// Priority filter (Routine|Attention|Urgent|Critique|Flash)
        #[arg(long)]
        priority: Option<String>,

        /// Minimum confidence (50|75|90)
        #[arg(long)]
        confidence: Option<String>,

        /// Region text filter
        #[arg(long)]
        region: Option<String>,

        /// Period filter (all|today|7days|30days)
        #[arg(long, default_value = "all")]
        period: String,

        /// Custom period start (YYYY-MM-DD); overrides --period
        #[arg(long)]
        start_date: Option<String>,

        /// Custom period end, inclusive (YYYY-MM-DD); overrides --period
        #[arg(long)]
        end_date: Option<String>,

        /// Display role override (analyst|manager|director|admin)
        #[arg(long)]
        as_role: Option<String>,
    },

    /// Check backend reachability
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("sentinelle={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if let Some(config_path) = cli.config {
        SentinelleConfig::load(&config_path)?
    } else {
        let default_path = SentinelleConfig::default_path();
        if default_path.exists() {
            SentinelleConfig::load(&default_path)?
        } else {
            SentinelleConfig::default()
        }
    };

    match cli.command {
        Commands::Center {
            domain,
            offline,
            search,
            priority,
            confidence,
            region,
            period,
            start_date,
            end_date,
            as_role,
        } => {
            let domain = domain.unwrap_or_else(|| config.center.default_domain.clone());
            let service: Arc<dyn EntityService> = if offline {
                Arc::new(demo_service().await)
            } else {
                Arc::new(RestEntityClient::new(&config.backend)?)
            };

            let session = match as_role {
                Some(role) => SessionContext::with_override(
                    Role::Analyst,
                    role.parse::<Role>().map_err(anyhow::Error::msg)?,
                ),
                None => SessionContext::new(Role::Analyst),
            };

            let mut center =
                CenterController::new(service, profile_for(&domain), session, &config.center);
            center.load_data().await;

            if let Some(term) = search {
                center.set_search_term(term);
            }
            if let Some(level) = priority {
                let level = level
                    .parse::<PriorityLevel>()
                    .map_err(anyhow::Error::msg)?;
                center.set_priority(PriorityFilter::Exact(level));
            }
            if let Some(threshold) = confidence {
                let threshold = threshold
                    .parse::<ConfidenceThreshold>()
                    .map_err(anyhow::Error::msg)?;
                center.set_confidence(ConfidenceFilter::AtLeast(threshold));
            }
            if let Some(text) = region {
                center.set_region(text);
            }
            center.set_period(parse_period(&period, start_date, end_date)?);

            render_center(&mut center);
        }
        Commands::Doctor => {
            let client = RestEntityClient::new(&config.backend)?;
            print!("Backend {} ... ", config.backend.base_url);
            match client.ping().await {
                Ok(()) => println!("ok"),
                Err(e) => {
                    println!("unreachable");
                    bail!("backend check failed: {}", e);
                }
            }
        }
        Commands::Config { default } => {
            let shown = if default {
                SentinelleConfig::default()
            } else {
                config
            };
            println!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

fn parse_period(
    period: &str,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<PeriodFilter> {
    if start_date.is_some() || end_date.is_some() {
        return Ok(PeriodFilter::Custom {
            start: start_date.map(|s| parse_date(&s)).transpose()?,
            end: end_date.map(|s| parse_date(&s)).transpose()?,
        });
    }
    match period {
        "all" => Ok(PeriodFilter::All),
        "today" => Ok(PeriodFilter::Today),
        "7days" => Ok(PeriodFilter::Last7Days),
        "30days" => Ok(PeriodFilter::Last30Days),
        other => bail!("unknown period: {} (expected all|today|7days|30days)", other),
    }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))?;
    date.and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .context("invalid date")
}

fn render_center(center: &mut CenterController) {
    for notice in center.drain_notices() {
        eprintln!("[{:?}] {}", notice.severity, notice.message);
    }

    let stats = center.stats();
    println!(
        "{} — état {:?} — rôle affiché: {}",
        center.profile().display_name,
        center.load_state(),
        center.session().effective_role(),
    );
    println!(
        "{} briefs ({} critiques) | prévisions: {} (dont {} à forte probabilité) | signaux: {} | tendances: {}",
        stats.total_briefs,
        stats.critical_briefs,
        stats.linked_predictions,
        stats.high_prob_predictions,
        stats.linked_signals,
        stats.linked_trends,
    );
    for (label, value) in &stats.extra {
        println!("{}: {}", label, value);
    }

    println!();
    let filtered = center.filtered_briefs();
    if filtered.is_empty() {
        println!("Aucun brief ne correspond aux filtres.");
        return;
    }
    for brief in filtered {
        let confidence = brief
            .confidence_score
            .map(|score| format!("{}%", score))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "[{}] {} | confiance {} | {} | {}",
            brief.priority_level,
            brief.brief_title,
            confidence,
            brief.created_date.format("%Y-%m-%d"),
            badge_tone(brief.priority_level).css_class(),
        );
    }
}

/// In-memory demo dataset for `--offline`
async fn demo_service() -> StubEntityService {
    use serde_json::json;

    let service = StubEntityService::new();
    let now = Utc::now();
    service
        .seed(
            "Brief",
            vec![
                json!({
                    "id": "demo-1",
                    "domain": "Militaire",
                    "brief_title": "Analyse tensions Détroit d'Ormuz",
                    "executive_summary": "Concentration navale inhabituelle observée.",
                    "priority_level": "Flash",
                    "classification": "Confidentiel",
                    "confidence_score": 92,
                    "geographic_focus": {"regions": ["Moyen-Orient", "Golfe Persique"]},
                    "created_date": (now - chrono::Duration::hours(6)).to_rfc3339(),
                }),
                json!({
                    "id": "demo-2",
                    "domain": "Militaire",
                    "brief_title": "Exercices conjoints en mer Baltique",
                    "executive_summary": "Manœuvres annuelles, ampleur comparable à 2025.",
                    "priority_level": "Routine",
                    "classification": "Diffusion restreinte",
                    "confidence_score": 64,
                    "geographic_focus": {"regions": ["Baltique"]},
                    "created_date": (now - chrono::Duration::days(12)).to_rfc3339(),
                }),
                json!({
                    "id": "demo-3",
                    "domain": "Finance",
                    "brief_title": "Resserrement du crédit interbancaire",
                    "priority_level": "Urgent",
                    "confidence_score": 78,
                    "geographic_focus": {"regions": ["Europe"]},
                    "created_date": (now - chrono::Duration::days(2)).to_rfc3339(),
                }),
            ],
        )
        .await;
    service
        .seed(
            "Prediction",
            vec![json!({
                "id": "demo-p1",
                "title": "Escalade régionale sous 30 jours",
                "domain": "Militaire",
                "probability_score": 81,
                "created_date": (now - chrono::Duration::days(1)).to_rfc3339(),
            })],
        )
        .await;
    service
        .seed(
            "Signal",
            vec![json!({
                "id": "demo-s1",
                "title": "Hausse du trafic maritime de nuit",
                "domain": "Militaire",
                "signal_type": "maritime",
                "created_date": (now - chrono::Duration::days(3)).to_rfc3339(),
            })],
        )
        .await;
    service
        .set_user(User {
            id: "demo-user".to_string(),
            email: "analyste@sentinelle.app".to_string(),
            full_name: "Analyste Démo".to_string(),
            role: Some("analyst".to_string()),
        })
        .await;
    service
}
