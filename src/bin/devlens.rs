use anyhow::Context;
use clap::{Parser, Subcommand};

use devlens::{
    ContributorStats, DevLens, EventStore, Kpi, MetricsSnapshot, RankOptions, ScopeSelector,
    SortDirection, Window,
};

#[derive(Parser)]
#[command(name = "devlens", about = "Engineering-productivity metrics CLI")]
struct Cli {
    /// Path to the event feed JSON
    #[arg(long, default_value = "events.json")]
    data: String,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for a scope
    Metrics {
        #[command(subcommand)]
        target: MetricsTarget,
    },
    /// Rank a team's contributors
    Contributors {
        /// Team id
        team_id: u64,
        /// Filter by role: all, frontend, backend
        #[arg(long, default_value = "all")]
        role: String,
        /// Sort key: name, username, or a KPI key (e.g. deployment_frequency)
        #[arg(long, default_value = "name")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Time window (all, 7d, 30d)
        #[arg(long, default_value = "all")]
        window: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two scopes side by side
    Compare {
        /// First team id
        team_id: u64,
        /// Second team id, or "org" for the organization average
        other: String,
        #[arg(long, default_value = "all")]
        window: String,
        #[arg(long)]
        json: bool,
    },
    /// Show feed status
    Status,
}

#[derive(Subcommand)]
enum MetricsTarget {
    /// Metrics for a team
    Team {
        team_id: u64,
        /// Time window (all, 7d, 30d)
        #[arg(long, default_value = "all")]
        window: String,
        /// Limit output to these KPIs (repeatable)
        #[arg(long = "kpi", value_name = "KEY")]
        kpis: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Metrics for one contributor within a team
    Developer {
        team_id: u64,
        developer_id: u64,
        #[arg(long, default_value = "all")]
        window: String,
        #[arg(long = "kpi", value_name = "KEY")]
        kpis: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Organization-wide average
    Org {
        #[arg(long, default_value = "all")]
        window: String,
        #[arg(long = "kpi", value_name = "KEY")]
        kpis: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let store = EventStore::from_path(&cli.data)
        .with_context(|| format!("failed to load event feed from {}", cli.data))?;
    let lens = DevLens::new(store);

    match cli.command {
        Commands::Status => {
            print_status(&lens);
        }
        Commands::Metrics { target } => {
            handle_metrics(&lens, target)?;
        }
        Commands::Contributors {
            team_id,
            role,
            sort,
            desc,
            window,
            json,
        } => {
            let options = RankOptions {
                role: role.parse()?,
                sort_key: sort.parse()?,
                direction: if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            };
            let window = Window::parse(&window)?;
            let rows = lens.contributors(team_id, &options, &window)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_contributors(&rows);
            }
        }
        Commands::Compare {
            team_id,
            other,
            window,
            json,
        } => {
            let window = Window::parse(&window)?;
            let second = if other == "org" {
                ScopeSelector::Organization
            } else {
                let id: u64 = other
                    .parse()
                    .with_context(|| format!("expected a team id or \"org\", got: {other}"))?;
                ScopeSelector::Team(id)
            };
            let (a, b) = lens.compare(&ScopeSelector::Team(team_id), &second, &window)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&(&a, &b))?);
            } else {
                print_comparison(&a, &b);
            }
        }
    }

    Ok(())
}

fn handle_metrics(lens: &DevLens, target: MetricsTarget) -> anyhow::Result<()> {
    let (selector, window, kpis, json) = match target {
        MetricsTarget::Team {
            team_id,
            window,
            kpis,
            json,
        } => (ScopeSelector::Team(team_id), window, kpis, json),
        MetricsTarget::Developer {
            team_id,
            developer_id,
            window,
            kpis,
            json,
        } => (
            ScopeSelector::Developer {
                team_id,
                developer_id,
            },
            window,
            kpis,
            json,
        ),
        MetricsTarget::Org { window, kpis, json } => {
            (ScopeSelector::Organization, window, kpis, json)
        }
    };

    let window = Window::parse(&window)?;
    let selected = parse_kpis(&kpis)?;
    let snapshot = lens.snapshot(&selector, &window)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot, &window, &selected);
    }
    Ok(())
}

/// Empty selection means all KPIs, in registry order.
fn parse_kpis(keys: &[String]) -> anyhow::Result<Vec<Kpi>> {
    if keys.is_empty() {
        return Ok(Kpi::ALL.to_vec());
    }
    keys.iter()
        .map(|k| k.parse::<Kpi>().map_err(Into::into))
        .collect()
}

fn print_status(lens: &DevLens) {
    let store = lens.store();
    println!("Feed Status");
    println!("  Teams:          {}", store.organization.teams.len());
    println!("  Developers:     {}", store.organization.developers().count());
    println!("  Projects:       {}", store.organization.projects().count());
    println!("  Merge requests: {}", store.events.merge_requests.len());
    println!("  Commits:        {}", store.events.commits.len());
    println!("  Deployments:    {}", store.events.deployments.len());
    println!("  Incidents:      {}", store.events.incidents.len());
}

fn print_snapshot(snapshot: &MetricsSnapshot, window: &Window, kpis: &[Kpi]) {
    println!("Metrics: {} ({window})", snapshot.name);
    for kpi in kpis {
        let value = kpi.value_of(snapshot);
        println!(
            "  {:<24} {:>12}  ({})",
            kpi.name(),
            kpi.format(value),
            kpi.unit()
        );
    }
    println!("  Timeline points: {}", snapshot.timeline.len());
}

fn print_contributors(rows: &[ContributorStats]) {
    if rows.is_empty() {
        println!("No contributors match the filter.");
        return;
    }
    for row in rows {
        let s = &row.snapshot;
        println!(
            "{:<12} {:<10} lead: {:<12} deploys: {:<4} commits: {}",
            row.developer.name,
            row.developer.role.to_string(),
            Kpi::AvgLeadTime.format(s.avg_lead_time_ms),
            s.deployment_frequency,
            s.commit_throughput,
        );
    }
    println!("\n{} contributors", rows.len());
}

fn print_comparison(a: &MetricsSnapshot, b: &MetricsSnapshot) {
    println!("Comparison: {} vs {}", a.name, b.name);
    for kpi in Kpi::ALL {
        println!(
            "  {:<24} {:>12}  {:>12}",
            kpi.name(),
            kpi.format(kpi.value_of(a)),
            kpi.format(kpi.value_of(b)),
        );
    }
}
