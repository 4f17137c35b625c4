//! fedora-configure - Fedora cloud image to desktop system
//!
//! Meant to be driven by the image build, after the target root is mounted.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fedora_configure::config::ConfigureConfig;
use fedora_configure::configure::plan::Plan;
use fedora_configure::configure::Configurator;
use fedora_configure::desktop::{DesktopEnvironment, SELECTORS};
use fedora_configure::utils::error::ConfigureError;
use fedora_configure::utils::{prompt, signal};

#[derive(Parser)]
#[command(name = "fedora-configure")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show output of commands run in the target
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dry run mode - show what would be done without making changes
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the mounted target root
    Configure(TargetArgs),

    /// Print the commands a configuration run would execute
    Plan {
        #[command(flatten)]
        target: TargetArgs,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accepted desktop environment selectors
    ListDesktops,

    /// Validate a configuration file
    Validate {
        /// Path to configuration file
        config: PathBuf,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "fedora-configure.toml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Desktop environment selector (see list-desktops)
    #[arg(short, long, env = "FEDORA_CONFIGURE_DESKTOP")]
    desktop: Option<String>,

    /// Fedora release of the target image (e.g. 39)
    #[arg(short = 'r', long, env = "FEDORA_CONFIGURE_DISTRO_VERSION")]
    distro_version: Option<String>,

    /// Mounted target root
    #[arg(long)]
    root: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        let desktop_error = e
            .downcast_ref::<ConfigureError>()
            .is_some_and(ConfigureError::is_desktop_selection);
        if desktop_error {
            eprintln!("{}", format!("{e}").bright_red());
        } else {
            eprintln!("{} {:#}", "Error:".bright_red(), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let dry_run = cli.dry_run;
    if dry_run {
        info!("Running in dry-run mode - no changes will be made");
    }

    match cli.command {
        Commands::Configure(target) => cmd_configure(&target, cli.verbose, dry_run),
        Commands::Plan { target, json } => cmd_plan(&target, json),
        Commands::ListDesktops => cmd_list_desktops(),
        Commands::Validate { config } => cmd_validate(&config),
        Commands::GenerateConfig { output } => cmd_generate_config(&output),
    }
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(args: &TargetArgs) -> Result<ConfigureConfig> {
    let desktop = args
        .desktop
        .as_deref()
        .map(str::parse::<DesktopEnvironment>)
        .transpose()?;

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let mut config = ConfigureConfig::from_file(path)?;
            if let Some(de) = desktop {
                config.desktop.environment = de;
            }
            if let Some(version) = &args.distro_version {
                config.target.distro_version = version.clone();
            }
            config
        }
        None => {
            let version = args.distro_version.as_deref().ok_or_else(|| {
                ConfigureError::ConfigError(
                    "--distro-version is required without --config".to_string(),
                )
            })?;
            let de = match desktop {
                Some(de) => de,
                None => prompt_desktop()?,
            };
            ConfigureConfig::new(de, version)
        }
    };

    if let Some(root) = &args.root {
        config.target.root = root.clone();
    }
    config.validate()?;
    Ok(config)
}

fn prompt_desktop() -> Result<DesktopEnvironment> {
    let choice = prompt::prompt_select("Desktop environment", &DesktopEnvironment::ALL, 0)?;
    Ok(DesktopEnvironment::ALL[choice])
}

fn cmd_configure(args: &TargetArgs, verbose: bool, dry_run: bool) -> Result<()> {
    let mut config = resolve_config(args)?;
    config.options.verbose |= verbose;
    config.options.dry_run |= dry_run;

    if !config.options.dry_run && !nix::unistd::geteuid().is_root() {
        return Err(ConfigureError::NotRoot.into());
    }

    signal::install_signal_handlers();
    Configurator::new(config).run()?;
    Ok(())
}

fn cmd_plan(args: &TargetArgs, json: bool) -> Result<()> {
    let config = resolve_config(args)?;
    let plan = Plan::from_config(&config);

    if json {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    println!(
        "Target {} - Fedora {} - {}",
        config.target.root.display(),
        plan.distro_version,
        plan.desktop
    );
    for (i, step) in plan.steps.iter().enumerate() {
        println!(
            "{:>3}. [{:?}] {:<40} chroot {}",
            i + 1,
            step.policy,
            step.description,
            step.command
        );
    }
    Ok(())
}

fn cmd_list_desktops() -> Result<()> {
    println!("{:<10} {}", "SELECTOR", "INSTALLS");
    println!("{}", "-".repeat(40));
    for tag in SELECTORS {
        let de: DesktopEnvironment = tag.parse()?;
        println!("{:<10} {}", tag, de);
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<()> {
    let config = ConfigureConfig::from_file(config_path)?;
    config.validate()?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn cmd_generate_config(output: &Path) -> Result<()> {
    let content = ConfigureConfig::sample().to_toml()?;
    std::fs::write(output, content)?;
    println!("✓ Sample configuration written to {}", output.display());
    Ok(())
}
