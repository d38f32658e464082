use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod pubspec_check;

#[derive(Parser)]
#[command(
    name = "repo-tools",
    version,
    about = "Maintenance tooling for a Flutter plugin monorepo"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format for check results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable transcript (default)
    #[default]
    Text,
    /// JSON array of package reports
    Json,
}

#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Check pubspec.yaml files for repository conventions
    #[command(alias = "pubspec")]
    PubspecCheck {
        /// Directory containing the repository's packages
        #[arg(long, env = "REPO_TOOLS_PACKAGES_DIR", default_value = "packages")]
        packages_dir: PathBuf,
        /// Only check these packages (names or federated group names)
        #[arg(long, value_delimiter = ',')]
        packages: Vec<String>,
        /// Skip these packages (names or federated group names)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

pub fn run(cli: Cli) {
    init_logging(cli.verbose);

    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::PubspecCheck {
            packages_dir,
            packages,
            exclude,
            format,
        }) => pubspec_check::run(packages_dir, packages, exclude, format),
        None => {
            eprintln!("Usage: repo-tools <command> [args]");
            eprintln!("Run `repo-tools --help` for details.");
            std::process::exit(1);
        }
    }
}

/// Initialize `env_logger`: `warn` by default, `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn print_about() {
    println!(
        "repo-tools: Flutter plugin monorepo maintenance\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}
