//! Ordered list of chroot commands for one configuration run

use crate::config::ConfigureConfig;
use crate::configure::{packages, selinux, services};
use crate::desktop::DesktopEnvironment;
use crate::utils::command::ChrootCommand;
use crate::utils::error::Result;
use serde::Serialize;

/// Groups steps for progress banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Packages,
    Repositories,
    Services,
    Desktop,
    Security,
}

impl Phase {
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Packages => "Installing packages",
            Self::Repositories => "Adding nonfree repositories",
            Self::Services => "Disabling plymouth and zram",
            Self::Desktop => "Downloading and installing desktop environment, might take a while",
            Self::Security => "Setting SELinux to permissive",
        }
    }
}

/// What happens when a step's command fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPolicy {
    /// Abort the run
    Required,
    /// Log a warning and carry on
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub phase: Phase,
    pub description: String,
    pub command: ChrootCommand,
    pub policy: StepPolicy,
    /// Discard output even when running verbose
    pub quiet: bool,
}

impl Step {
    pub fn required(phase: Phase, description: &str, command: ChrootCommand) -> Self {
        Self {
            phase,
            description: description.to_string(),
            command,
            policy: StepPolicy::Required,
            quiet: false,
        }
    }

    pub fn best_effort(phase: Phase, description: &str, command: ChrootCommand) -> Self {
        Self {
            policy: StepPolicy::BestEffort,
            ..Self::required(phase, description, command)
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub desktop: DesktopEnvironment,
    pub distro_version: String,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Prelude, then exactly one desktop branch, then the SELinux postlude
    pub fn build(desktop: DesktopEnvironment, distro_version: &str) -> Self {
        let mut steps = packages::base_steps();
        steps.push(packages::nonfree_repo_step(distro_version));
        steps.extend(services::disable_steps());
        steps.extend(desktop.steps());
        steps.push(selinux::permissive_step());

        Self {
            desktop,
            distro_version: distro_version.to_string(),
            steps,
        }
    }

    pub fn from_config(config: &ConfigureConfig) -> Self {
        Self::build(config.desktop.environment, &config.target.distro_version)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn desktop_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.phase == Phase::Desktop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(plan: &Plan) -> Vec<String> {
        plan.steps.iter().map(|s| s.command.to_string()).collect()
    }

    #[test]
    fn prelude_runs_in_fixed_order() {
        let plan = Plan::build(DesktopEnvironment::Cli, "39");
        let cmds = rendered(&plan);
        assert_eq!(cmds[0], "dnf update -y");
        assert_eq!(cmds[1], "dnf install linux-firmware -y");
        assert_eq!(cmds[2], "dnf group install 'Minimal Install' -y");
        assert_eq!(cmds[3], "dnf install NetworkManager-tui ncurses cloud-utils -y");
        assert!(cmds[4].starts_with("dnf install https://download1.rpmfusion.org/"));
        assert_eq!(cmds[5], "plymouth-set-default-theme details -R");
        assert_eq!(cmds[6], "dnf remove zram-generator-defaults -y");
        assert_eq!(cmds[7], "systemctl disable systemd-zram-setup@zram0.service");
    }

    #[test]
    fn distro_version_lands_in_nonfree_url() {
        let plan = Plan::build(DesktopEnvironment::Kde, "39");
        assert!(rendered(&plan)
            .iter()
            .any(|c| c.contains("rpmfusion-nonfree-release-39.noarch.rpm")));
    }

    #[test]
    fn selinux_relaxation_is_last_for_every_desktop() {
        for de in DesktopEnvironment::ALL {
            let plan = Plan::build(de, "40");
            let last = plan.steps.last().unwrap();
            assert_eq!(last.phase, Phase::Security, "{de}");
            assert_eq!(
                plan.steps.iter().filter(|s| s.phase == Phase::Security).count(),
                1
            );
            let first_security = plan
                .steps
                .iter()
                .position(|s| s.phase == Phase::Security)
                .unwrap();
            assert!(plan.steps[..first_security]
                .iter()
                .all(|s| s.phase != Phase::Security));
        }
    }

    #[test]
    fn desktop_steps_sit_between_prelude_and_postlude() {
        let plan = Plan::build(DesktopEnvironment::Gnome, "39");
        let positions: Vec<usize> = plan
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.phase == Phase::Desktop)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![8, 9]);
        assert_eq!(plan.steps.len(), 11);
    }

    #[test]
    fn cli_keeps_prelude_and_postlude_only() {
        let plan = Plan::build(DesktopEnvironment::Cli, "39");
        assert_eq!(plan.desktop_steps().count(), 0);
        assert_eq!(plan.steps.len(), 9);
        assert_eq!(plan.steps.last().unwrap().phase, Phase::Security);
    }

    #[test]
    fn group_desktops_issue_exactly_one_group_install() {
        let cases = [
            (DesktopEnvironment::Kde, "KDE Plasma Workspaces"),
            (DesktopEnvironment::Mate, "MATE Desktop"),
            (DesktopEnvironment::Xfce, "Xfce Desktop"),
            (DesktopEnvironment::Lxqt, "LXQt Desktop"),
            (DesktopEnvironment::Deepin, "Deepin Desktop"),
        ];
        for (de, group) in cases {
            let plan = Plan::build(de, "39");
            let desktop: Vec<&Step> = plan.desktop_steps().collect();
            assert_eq!(desktop.len(), 1, "{de}");
            assert_eq!(desktop[0].command.args().last().unwrap(), group);
        }
    }

    #[test]
    fn only_known_flaky_steps_are_best_effort() {
        let plan = Plan::build(DesktopEnvironment::Gnome, "39");
        let best_effort: Vec<&str> = plan
            .steps
            .iter()
            .filter(|s| s.policy == StepPolicy::BestEffort)
            .map(|s| s.command.program())
            .collect();
        assert_eq!(
            best_effort,
            vec!["dnf", "plymouth-set-default-theme", "dnf", "systemctl"]
        );
        assert!(plan.desktop_steps().all(|s| s.policy == StepPolicy::Required));
    }

    #[test]
    fn plan_serializes_for_json_output() {
        let plan = Plan::build(DesktopEnvironment::Xfce, "39");
        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        assert_eq!(json["desktop"], "xfce");
        assert_eq!(json["steps"][5]["policy"], "best-effort");
        assert_eq!(json["steps"][0]["phase"], "packages");
    }
}
