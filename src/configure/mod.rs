//! Turns a mounted Fedora cloud image into a desktop system

pub mod packages;
pub mod plan;
pub mod selinux;
pub mod services;

use crate::config::ConfigureConfig;
use crate::desktop::DesktopEnvironment;
use crate::utils::command::CommandRunner;
use crate::utils::error::{ConfigureError, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use plan::{Phase, Plan, Step, StepPolicy};
use std::time::Duration;
use tracing::{info, warn};

/// Configure the default target root for `desktop` on Fedora `distro_version`.
///
/// The selector and version are validated before anything runs inside the
/// chroot, so a bad selector never leaves the image half configured.
pub fn configure(desktop: &str, distro_version: &str, verbose: bool) -> Result<()> {
    let desktop: DesktopEnvironment = desktop.parse()?;
    let mut config = ConfigureConfig::new(desktop, distro_version);
    config.options.verbose = verbose;
    Configurator::new(config).run()
}

/// Runs a configuration plan against the target root
pub struct Configurator {
    config: ConfigureConfig,
    cmd: CommandRunner,
}

impl Configurator {
    pub fn new(config: ConfigureConfig) -> Self {
        let cmd = CommandRunner::new(config.options.dry_run, config.options.verbose);
        Self { config, cmd }
    }

    pub fn plan(&self) -> Plan {
        Plan::from_config(&self.config)
    }

    /// Validate, then execute every step in order
    pub fn run(self) -> Result<()> {
        self.config.validate()?;
        if !self.cmd.is_dry_run() {
            self.config.validate_target()?;
        }

        let plan = self.plan();
        info!(
            "Configuring {} for Fedora {} ({} steps)",
            self.config.target.root.display(),
            plan.distro_version,
            plan.steps.len()
        );
        println!("{}", "Configuring Fedora".bright_cyan());

        let mut phase = None;
        for step in &plan.steps {
            if phase != Some(step.phase) {
                phase = Some(step.phase);
                self.announce(step.phase, plan.desktop);
            }
            self.execute(step)?;
        }

        info!("Fedora configuration finished ({})", plan.desktop);
        Ok(())
    }

    fn announce(&self, phase: Phase, desktop: DesktopEnvironment) {
        match phase {
            Phase::Desktop => {
                println!("{}", phase.banner().bright_cyan());
                println!("Installing {}", desktop.tag());
            }
            _ => println!("{}", phase.banner()),
        }
    }

    fn execute(&self, step: &Step) -> Result<()> {
        let spinner = self.spinner(step);
        let result = self
            .cmd
            .run_in_chroot(&self.config.target.root, &step.command, step.quiet);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Ok(()) => Ok(()),
            // A signal also reaches the child, so its failure is the interrupt
            Err(_) if self.cmd.is_interrupted() => Err(ConfigureError::Interrupted),
            Err(e) if step.policy == StepPolicy::BestEffort => {
                warn!("{} failed, continuing: {}", step.description, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Only shown when command output is hidden; verbose runs already show progress
    fn spinner(&self, step: &Step) -> Option<ProgressBar> {
        if self.cmd.is_dry_run() || self.cmd.is_verbose() {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(step.description.clone());
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}
