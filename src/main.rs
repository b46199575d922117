//! firstrep - rotating workout generator with history and PRs

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use firstrep::chat::ChatMode;
use firstrep::db::Database;
use firstrep::library::Library;
use firstrep::records::{ResultEntry, format_congrats};
use firstrep::session::{Session, SessionRequest, SetsMode};
use firstrep::tracker::Tracker;
use firstrep::tui::App;

#[derive(Parser)]
#[command(name = "firstrep")]
#[command(author, version, about = "Rotating workout generator with history and PRs")]
struct Cli {
    /// SQLite file holding all saved state
    #[arg(long, env = "FIRSTREP_DB", default_value = "firstrep.db", global = true)]
    db: String,

    /// JSON file replacing the built-in exercise library
    #[arg(long, env = "FIRSTREP_LIBRARY", global = true)]
    library: Option<PathBuf>,

    /// Chat coach mode: offline or api
    #[arg(long, env = "FIRSTREP_CHAT_MODE", default_value = "offline", global = true)]
    chat_mode: ChatMode,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy)]
struct Plan {
    /// Training days per week (1-6)
    #[arg(short, long, default_value = "3")]
    days: u32,

    /// Minutes per session (20-180)
    #[arg(short, long, default_value = "45")]
    time: u32,

    /// Custom sets per exercise (1-6); derived from time when omitted
    #[arg(short, long)]
    sets: Option<u32>,
}

impl Plan {
    fn request(&self) -> Result<SessionRequest> {
        let mode = self.sets.map_or(SetsMode::Auto, SetsMode::Custom);
        Ok(SessionRequest::new(self.days, self.time, mode)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui {
        #[command(flatten)]
        plan: Plan,
    },

    /// Show which split comes next
    Next {
        /// Training days per week
        #[arg(short, long, default_value = "3")]
        days: u32,
    },

    /// Generate the next workout (advances the rotation)
    Generate {
        #[command(flatten)]
        plan: Plan,
    },

    /// Show the generated workout waiting to be saved
    Show,

    /// Save results for the generated workout
    Save {
        /// One per exercise in order: 135x8, 135x, x8 or - for blank
        #[arg(allow_hyphen_values = true)]
        entries: Vec<ResultEntry>,
    },

    /// Drop the generated workout without saving
    Discard,

    /// List saved workouts
    History {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a saved workout (PRs are kept)
    Delete {
        id: String,
    },

    /// Show personal records
    Prs,

    /// Restart the split rotation
    Reset,

    /// Delete all history, PRs, rotation, variations and chat
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Write all data to a JSON file
    Export {
        #[arg(default_value = "firstrep-export.json")]
        path: PathBuf,
    },

    /// Load data from an export file
    Import {
        path: PathBuf,
    },

    /// Ask the coach
    Chat {
        /// Question text; shows the chat log when empty
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they stay out of command output; RUST_LOG overrides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let library = match &cli.library {
        Some(path) => Library::load(path)?,
        None => Library::builtin(),
    };
    let db = Database::open(&cli.db)?;
    let mut tracker = Tracker::new(db, library).with_chat_mode(cli.chat_mode);

    match cli.command {
        Some(Commands::Tui { plan }) => {
            let mut app = App::new(tracker, plan.request()?);
            app.run()?;
        }

        Some(Commands::Next { days }) => {
            println!("{}", tracker.rotation_hint(days));
        }

        Some(Commands::Generate { plan }) => {
            let request = plan.request()?;
            let session = tracker.generate(&request);
            print_session(&session);
            println!();
            println!("Workout generated. Rotation + variation advanced.");
            println!("{}", tracker.rotation_hint(plan.days));
        }

        Some(Commands::Show) => match tracker.pending_session() {
            Some(session) => print_session(&session),
            None => println!("No workout generated. Run `firstrep generate`."),
        },

        Some(Commands::Save { entries }) => {
            let outcome = tracker.save(&entries)?;
            if outcome.improvements.is_empty() {
                println!("Saved. History and PRs updated.");
            } else {
                println!("Saved. PRs updated. Nice work.");
                println!();
                println!("{}", format_congrats(&outcome.improvements));
            }
        }

        Some(Commands::Discard) => {
            if tracker.discard_session() {
                println!("Workout cleared (not saved).");
            } else {
                println!("No workout to clear.");
            }
        }

        Some(Commands::History { limit }) => {
            let history = tracker.history();
            if history.is_empty() {
                println!("No workouts saved yet.");
            }
            for w in history.list().iter().take(limit) {
                println!(
                    "{} | {} | Variation: {} | Workout ID: {}",
                    w.created_at.format("%Y-%m-%d"),
                    w.split,
                    w.variation_index + 1,
                    w.id
                );
                for e in &w.exercises {
                    let weight = e.weight.map_or("-".to_string(), |v| format!("{v} lbs"));
                    let reps = e.reps.map_or("-".to_string(), |v| format!("{v} reps"));
                    let rest = tracker.guide().rest_for(&e.rep_range);
                    println!(
                        "    {}: {} × {} ({} sets) • Rest {}",
                        e.name, weight, reps, e.sets, rest.rest
                    );
                    if let Some(template) = tracker.library().find_exercise(&e.name)
                        && !template.alternatives.is_empty()
                    {
                        println!("      Alternatives: {}", template.alternatives.join(", "));
                    }
                }
                println!("{:-<60}", "");
            }
        }

        Some(Commands::Delete { id }) => {
            if tracker.delete_workout(&id) > 0 {
                println!("Workout deleted. (PRs are not recalculated automatically.)");
            } else {
                println!("No workout with id {id}.");
            }
        }

        Some(Commands::Prs) => {
            let prs = tracker.prs();
            if prs.is_empty() {
                println!("No PRs yet. Save workouts with weight + reps.");
            }
            for (name, pr) in prs.iter() {
                println!(
                    "{:32} | Best: {} lbs × {} reps • {}",
                    name,
                    pr.weight,
                    pr.reps,
                    pr.achieved_at.format("%Y-%m-%d")
                );
            }
        }

        Some(Commands::Reset) => {
            tracker.reset_rotation();
            println!("Rotation reset to the start.");
        }

        Some(Commands::Clear { yes }) => {
            if yes {
                tracker.clear_all();
                println!("All data cleared.");
            } else {
                println!(
                    "This will delete ALL FirstRep history, PRs, rotation, variations, and chat. \
                     Re-run with --yes to continue."
                );
            }
        }

        Some(Commands::Export { path }) => {
            let json = tracker.export().to_json_pretty()?;
            tokio::fs::write(&path, json).await?;
            println!("Export written to {}.", path.display());
        }

        Some(Commands::Import { path }) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(firstrep::error::ImportError::Read)?;
            tracker.import_json(&text)?;
            println!("Import complete.");
        }

        Some(Commands::Chat { message }) => {
            let question = message.join(" ");
            match tracker.chat(&question) {
                Some(answer) => println!("{}\n\n{}", tracker.chat_mode().badge(), answer.text),
                None => {
                    let log = tracker.chat_log();
                    if log.is_empty() {
                        println!("No messages yet.");
                    }
                    for m in log {
                        println!("[{}] {}:\n{}\n", m.at.format("%Y-%m-%d"), m.role.label(), m.text);
                    }
                }
            }
        }

        None => {
            // Default: show TUI
            let plan = Plan { days: 3, time: 45, sets: None };
            let mut app = App::new(tracker, plan.request()?);
            app.run()?;
        }
    }

    Ok(())
}

fn print_session(session: &Session) {
    println!(
        "Today's Workout ({} • Variation {})",
        session.split,
        session.variation_index + 1
    );
    println!("Sets per exercise: {}", session.sets_per_exercise);
    println!("{:-<60}", "");
    for (i, e) in session.exercises.iter().enumerate() {
        let note = if e.rest.note.is_empty() { "General training" } else { e.rest.note.as_str() };
        println!("{}. {}", i + 1, e.name);
        println!("   {} sets × {} reps | Rest: {} ({})", e.sets, e.rep_range, e.rest.rest, note);
        println!("   Alternatives: {}", e.alternatives.join(", "));
    }
}
