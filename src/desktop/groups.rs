//! Desktops installed from a single dnf package group

use crate::configure::plan::{Phase, Step};
use crate::utils::command::ChrootCommand;

fn group_install(name: &str, group: &str) -> Step {
    Step::required(
        Phase::Desktop,
        &format!("Install {}", name),
        ChrootCommand::new("dnf", &["group", "install", "-y", group]),
    )
}

pub fn kde() -> Step {
    group_install("KDE Plasma", "KDE Plasma Workspaces")
}

pub fn mate() -> Step {
    group_install("MATE", "MATE Desktop")
}

pub fn xfce() -> Step {
    group_install("Xfce", "Xfce Desktop")
}

pub fn lxqt() -> Step {
    group_install("LXQt", "LXQt Desktop")
}

pub fn deepin() -> Step {
    group_install("Deepin", "Deepin Desktop")
}
