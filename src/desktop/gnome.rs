//! GNOME desktop environment installer

use crate::configure::plan::{Phase, Step};
use crate::utils::command::ChrootCommand;

/// The cloud image ships no GNOME group, so the session is assembled by hand
const GNOME_PACKAGES: &[&str] = &[
    "@base-x",
    "gnome-shell",
    "gnome-terminal",
    "nautilus",
    "firefox",
    "chrome-gnome-shell",
    "gnome-tweaks",
    "@development-tools",
    "gnome-terminal-nautilus",
    "xdg-user-dirs",
    "xdg-user-dirs-gtk",
    "gnome-calculator",
    "gnome-system-monitor",
    "gedit",
    "file-roller",
    "gdm",
    "gnome-initial-setup",
];

const DISPLAY_MANAGER_SERVICE: &str = "gdm.service";

pub fn steps() -> Vec<Step> {
    let mut install = ChrootCommand::new("dnf", &["install", "-y"]);
    for pkg in GNOME_PACKAGES {
        install = install.arg(*pkg);
    }

    vec![
        Step::required(Phase::Desktop, "Install GNOME packages", install),
        Step::required(
            Phase::Desktop,
            "Enable GDM",
            ChrootCommand::new("systemctl", &["enable", DISPLAY_MANAGER_SERVICE]),
        ),
    ]
}
