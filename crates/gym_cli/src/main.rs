//! Admin CLI for the gym database.
//!
//! # Responsibility
//! - Initialize the database file and print display projections from a
//!   terminal.
//! - Exercise `gym_core` end to end without any UI layer.

use clap::{Parser, Subcommand};
use gym_core::projection::Field;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gym-admin")]
#[command(version, about = "Gym administration database tool")]
struct Cli {
    /// SQLite database file
    #[arg(long, default_value = gym_core::DATABASE_NAME)]
    db: PathBuf,

    /// Directory for rolling log files (absolute path)
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database file and apply the schema
    Init,

    /// Print the display projection for an entity (e.g. Member, Membership)
    Show { entity: String },

    /// Print the core crate version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(message) = gym_core::init_logging(gym_core::default_log_level(), log_dir) {
            eprintln!("logging setup failed: {message}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), gym_core::RepoError> {
    match &cli.command {
        Commands::Init => {
            gym_core::open_db(&cli.db)?;
            println!("schema ready at {}", cli.db.display());
            Ok(())
        }
        Commands::Show { entity } => {
            let conn = gym_core::open_db(&cli.db)?;
            let projection = gym_core::project(&conn, entity)?;
            println!("{}", projection.columns.join(" | "));
            for row in &projection.rows {
                let cells: Vec<String> = row.iter().map(render_field).collect();
                println!("{}", cells.join(" | "));
            }
            if projection.is_empty() {
                println!("(no rows)");
            }
            Ok(())
        }
        Commands::Version => {
            println!("gym_core version={}", gym_core::core_version());
            Ok(())
        }
    }
}

fn render_field(field: &Field) -> String {
    match field {
        Field::Null => String::new(),
        Field::Integer(value) => value.to_string(),
        Field::Real(value) => value.to_string(),
        Field::Text(value) => value.clone(),
        Field::Blob(value) => format!("<{} bytes>", value.len()),
    }
}
