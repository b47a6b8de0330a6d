use clap::Parser;
use std::path::PathBuf;

mod error;
mod output;
mod scaffold;

use scaffold::{Scaffold, Style, DEFAULT_BRANCH, DEFAULT_TEMPLATE};

#[derive(Parser)]
#[command(
    name = "create-r3f-app",
    version,
    about = "Create a React Three Fiber app from the starter template"
)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Clone the starter, install dependencies and apply the chosen style system
    New {
        /// Directory to create
        name: String,

        /// Styling system of the generated project
        #[arg(long, value_enum, default_value_t = Style::Tailwind)]
        style: Style,

        /// Template repository to clone
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: String,

        /// Template branch
        #[arg(long, default_value = DEFAULT_BRANCH)]
        branch: String,

        /// Print the migration report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Migrate an existing project's utility classes to styled components
    Migrate {
        /// Project root; defaults to the nearest ancestor with a package.json
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// JSON file overriding migration defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Print the migration report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // stdout is reserved for the JSON report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::New {
            name,
            style,
            template,
            branch,
            json,
        } => {
            let cwd = std::env::current_dir()?;
            let scaffold = Scaffold {
                name,
                parent: cwd,
                style,
                template,
                branch,
            };
            if let Some(report) = scaffold.run().await? {
                output::print_report(&report, json)?;
            }
        }
        Commands::Migrate {
            project_root,
            config,
            dry_run,
            json,
        } => {
            let root = resolve_project_root(project_root)?;
            let config = match config {
                Some(path) => r3f_migrate::MigrationConfig::load(&path).await?,
                None => r3f_migrate::MigrationConfig::default(),
            };
            tracing::info!(project_root = %root.display(), dry_run, "migrating to styled-components");
            let report = r3f_migrate::migrate_project(&root, config, dry_run).await?;
            output::print_report(&report, json)?;
        }
    }

    Ok(())
}

fn resolve_project_root(explicit: Option<PathBuf>) -> Result<PathBuf, error::CliError> {
    let root = match explicit {
        Some(root) => root,
        None => {
            let cwd = std::env::current_dir()?;
            r3f_common::project::find_project_root(&cwd).unwrap_or(cwd)
        }
    };
    Ok(root.canonicalize()?)
}
