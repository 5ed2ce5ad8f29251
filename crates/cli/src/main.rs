use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fortune_core::config::FortuneConfig;
use fortune_core::themes;
use fortune_provision::{CopywritingStatus, ProvisionReport, ResourceLayout, migrate};
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fortune - fortune slip resource manager", long_about = None)]
struct Args {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run startup provisioning (default)
    Check,
    /// List themes, their aliases and enable flags
    Themes,
    /// Resolve a theme alias to its theme id
    Resolve {
        #[arg(index = 1)]
        alias: String,
    },
    /// Split a legacy fortune_setting.json into group_rules.json and specific_rules.json
    Migrate {
        /// Path to the legacy fortune_setting.json
        #[arg(index = 1)]
        legacy: PathBuf,
        /// Directory that receives the split files
        #[arg(index = 2)]
        dest: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = match &args.log_file {
        Some(path) => match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .init();
                Some(guard)
            }
            Err(e) => {
                eprintln!("❌ Cannot open log file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .init();
            None
        }
    };

    fortune_core::init();

    if let Err(e) = run(args.command.unwrap_or(Commands::Check)).await {
        error!("{:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Resolve { alias } => {
            match themes::resolve(&alias) {
                Some(id) => println!("{} -> {}", alias, id),
                None => println!("{} is not a known theme", alias),
            }
            Ok(())
        }
        Commands::Migrate { legacy, dest } => {
            let layout = ResourceLayout::new(&dest);
            let group = migrate::migrate_group_rules(&legacy, &layout.group_rules).await?;
            let specific = migrate::migrate_specific_rules(&legacy, &layout.specific_rules).await?;
            println!("group_rules.json: {}", if group { "migrated" } else { "empty" });
            println!("specific_rules.json: {}", if specific { "migrated" } else { "empty" });
            Ok(())
        }
        Commands::Themes => {
            let config = FortuneConfig::load().context("failed to load configuration")?;
            for (id, aliases) in themes::THEME_CATALOG {
                let state = if *id == themes::RANDOM {
                    "-"
                } else if config.flags.is_enabled(id) {
                    "on"
                } else {
                    "off"
                };
                println!("{:<18} {:<4} {}", id, state, aliases.join(", "));
            }
            Ok(())
        }
        Commands::Check => {
            let config = FortuneConfig::load().context("failed to load configuration")?;
            let report = fortune_provision::fortune_check(&config).await?;
            print_report(&config, &report);
            Ok(())
        }
    }
}

fn print_report(config: &FortuneConfig, report: &ProvisionReport) {
    println!("✅ Resources ready at {}", config.settings.fortune_path.display());
    match &report.copywriting {
        CopywritingStatus::Refreshed { version } => {
            println!("   copywriting: refreshed ({})", version.as_deref().unwrap_or("no version"))
        }
        CopywritingStatus::KeptLocal => println!("   copywriting: kept local copy"),
    }
    println!("   fortune_data.json: {:?}", report.fortune_data);
    println!("   group_rules.json: {:?}", report.group_rules);
    println!("   specific_rules.json: {:?}", report.specific_rules);
    println!("   enabled themes: {}", report.enabled_themes.join(", "));
}
