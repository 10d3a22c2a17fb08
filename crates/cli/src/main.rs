//! Eventops CLI - shift calendars and resource assignment from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use eventops_assignment::{ResourceAssignmentStore, ResourceManager, ResourceSpec};
use eventops_core::{ReplicationRequest, ResourceFilter, ResourceKind, ShiftKey};
use eventops_replication::{ReplicationEngine, ReplicationError};
use eventops_schedule::{EventSchedule, ShiftCalendar};
use eventops_storage::{JsonStore, ResourceStore};
use tracing::Level;

#[derive(Parser)]
#[command(name = "eventops")]
#[command(about = "Event shift scheduling and resource assignment", long_about = None)]
struct Cli {
    /// Storage directory
    #[arg(long, default_value = ".eventops")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Company,
    Credential,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Company => ResourceKind::Company,
            KindArg::Credential => ResourceKind::CredentialType,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ordered shift calendar of an event file
    Shifts {
        /// Path to the event schedule JSON
        event: std::path::PathBuf,
    },
    /// List resources grouped per shift
    List {
        /// Path to the event schedule JSON
        event: std::path::PathBuf,
        /// Resource kind
        #[arg(long, value_enum, default_value = "company")]
        kind: KindArg,
    },
    /// Create a resource at one shift
    Create {
        /// Display name
        name: String,
        /// Shift key, e.g. 2025-01-10-evento-diurno
        #[arg(long)]
        shift: String,
        /// Resource kind
        #[arg(long, value_enum, default_value = "company")]
        kind: KindArg,
        /// Display color (hex)
        #[arg(long)]
        color: Option<String>,
    },
    /// Replicate one shift's resources to other shifts
    Replicate {
        /// Source shift key
        #[arg(long)]
        source: String,
        /// Target shift keys
        #[arg(long, required = true, num_args = 1..)]
        target: Vec<String>,
        /// Resource kind
        #[arg(long, value_enum, default_value = "company")]
        kind: KindArg,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shifts { event } => {
            let calendar = load_calendar(&event)?;
            println!("Shifts ({})", calendar.len());
            for shift in calendar.shifts() {
                println!("  {} | {}", shift.shift_key(), shift.label);
            }
            for overlap in calendar.overlaps() {
                println!(
                    "Warning: {} appears under multiple phases: {:?}",
                    overlap.date, overlap.phases
                );
            }
        }
        Commands::List { event, kind } => {
            let calendar = load_calendar(&event)?;
            let storage = JsonStore::new(&cli.data_dir).await?;
            let resources = storage
                .list_resources(&ResourceFilter::kind(kind.into()))
                .await?;
            let view = ResourceAssignmentStore::new(&calendar, &resources);

            for (shift_key, members) in view.group_by_shift() {
                println!("{} ({})", shift_key, members.len());
                for resource in members {
                    println!(
                        "  {} | {} | {}",
                        resource.id,
                        resource.name,
                        if resource.active { "active" } else { "inactive" },
                    );
                }
            }
        }
        Commands::Create {
            name,
            shift,
            kind,
            color,
        } => {
            let manager = ResourceManager::new(JsonStore::new(&cli.data_dir).await?);
            let resource = manager
                .create(ResourceSpec {
                    kind: kind.into(),
                    name,
                    color,
                    shift_key: ShiftKey::new(shift),
                })
                .await?;
            println!("Created {} ({})", resource.name, resource.id);
        }
        Commands::Replicate {
            source,
            target,
            kind,
        } => {
            let engine = ReplicationEngine::new(JsonStore::new(&cli.data_dir).await?);
            let request = ReplicationRequest::new(
                ShiftKey::new(source),
                target.into_iter().map(ShiftKey::new).collect(),
                kind.into(),
            );
            match engine.replicate(&request).await {
                Ok(tally) => println!("Replication: {}", tally),
                Err(ReplicationError::NothingToReplicate(key)) => {
                    println!("Nothing to replicate: no resources at {}", key);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn load_calendar(path: &std::path::Path) -> Result<ShiftCalendar> {
    let json = std::fs::read_to_string(path)?;
    let schedule: EventSchedule = serde_json::from_str(&json)?;
    Ok(ShiftCalendar::from_schedule(&schedule))
}
