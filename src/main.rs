use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use soterrado::cli::{handle_record_command, Context, Menu, RecordCommands};
use soterrado::config::{Settings, SoterradoPaths};

#[derive(Parser)]
#[command(
    name = "soterrado",
    version,
    about = "Terminal log of undergrounding (cable-laying) work",
    long_about = "soterrado records undergrounding tasks (meters, technician, location, \
                  supervision) in a CSV table, lets you modify them with an audit trail \
                  and exports them to a spreadsheet. Run without a command for the \
                  interactive menu."
)]
struct Cli {
    /// Directory holding the record table, audit log and settings
    #[arg(long, global = true, env = "SOTERRADO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Menu,

    #[command(flatten)]
    Records(RecordCommands),

    /// Initialize the data directory, record table and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => SoterradoPaths::with_base_dir(dir),
        None => SoterradoPaths::new()?,
    };

    match cli.command {
        None | Some(Commands::Menu) => {
            let ctx = Context::load(paths)?;
            let stdin = io::stdin();
            Menu::new(&ctx, stdin.lock(), io::stdout()).run()?;
        }
        Some(Commands::Records(cmd)) => {
            let ctx = Context::load(paths)?;
            handle_record_command(&ctx, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing soterrado at: {}", paths.base_dir().display());
            soterrado::storage::initialize_storage(&paths)?;
            if !paths.is_initialized() {
                Settings::default().save(&paths)?;
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("soterrado Configuration");
            println!("=======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Record table:   {}", paths.table_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Date format:  {}", settings.date_format);
            println!(
                "  Export file:  {}",
                paths.export_file(&settings.export_file_name).display()
            );
        }
    }

    Ok(())
}

/// Diagnostic logging to stderr, filtered by `SOTERRADO_LOG` (default: warn)
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SOTERRADO_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
