//! Base system packages and repositories

use crate::configure::plan::{Phase, Step};
use crate::utils::command::ChrootCommand;

const BASE_GROUP: &str = "Minimal Install";

/// Extras the cloud image lacks for an interactive machine
const BASE_PACKAGES: &[&str] = &["NetworkManager-tui", "ncurses", "cloud-utils"];

const RPMFUSION_NONFREE_BASE: &str = "https://download1.rpmfusion.org/nonfree/fedora";

/// Update, firmware and the minimal base install
pub fn base_steps() -> Vec<Step> {
    let mut base = ChrootCommand::new("dnf", &["install"]);
    for pkg in BASE_PACKAGES {
        base = base.arg(*pkg);
    }

    vec![
        Step::required(
            Phase::Packages,
            "Update all packages",
            ChrootCommand::new("dnf", &["update", "-y"]),
        ),
        Step::required(
            Phase::Packages,
            "Install firmware",
            ChrootCommand::new("dnf", &["install", "linux-firmware", "-y"]),
        ),
        Step::required(
            Phase::Packages,
            "Install minimal base group",
            ChrootCommand::new("dnf", &["group", "install", BASE_GROUP, "-y"]),
        ),
        Step::required(Phase::Packages, "Install base packages", base.arg("-y")),
    ]
}

/// Release package URL for the RPM Fusion nonfree repository
pub fn nonfree_release_url(distro_version: &str) -> String {
    format!(
        "{}/rpmfusion-nonfree-release-{}.noarch.rpm",
        RPMFUSION_NONFREE_BASE, distro_version
    )
}

/// Registers the nonfree repository. Not fatal: nothing later depends on it.
pub fn nonfree_repo_step(distro_version: &str) -> Step {
    Step::best_effort(
        Phase::Repositories,
        "Add RPM Fusion nonfree repository",
        ChrootCommand::new("dnf", &["install"])
            .arg(nonfree_release_url(distro_version))
            .arg("-y"),
    )
}
