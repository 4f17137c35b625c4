//! Desktop environment selection and installers

use crate::configure::plan::Step;
use crate::utils::error::ConfigureError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod gnome;
pub mod groups;
pub mod none;

/// Selector tags accepted on the command line and in config files
pub const SELECTORS: &[&str] = &[
    "gnome", "kde", "mate", "xfce", "minimal", "lxqt", "deepin", "cli",
];

/// Tags that name a real desktop but have no Fedora support
const UNSUPPORTED: &[(&str, &str)] = &[("budgie", "Budgie")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
    Mate,
    Xfce,
    Lxqt,
    Deepin,
    /// No graphical environment
    Cli,
}

impl DesktopEnvironment {
    pub const ALL: [DesktopEnvironment; 7] = [
        Self::Gnome,
        Self::Kde,
        Self::Mate,
        Self::Xfce,
        Self::Lxqt,
        Self::Deepin,
        Self::Cli,
    ];

    /// Canonical selector tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Gnome => "gnome",
            Self::Kde => "kde",
            Self::Mate => "mate",
            Self::Xfce => "xfce",
            Self::Lxqt => "lxqt",
            Self::Deepin => "deepin",
            Self::Cli => "cli",
        }
    }

    /// Install steps for this environment, in order
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Self::Gnome => gnome::steps(),
            Self::Kde => vec![groups::kde()],
            Self::Mate => vec![groups::mate()],
            Self::Xfce => vec![groups::xfce()],
            Self::Lxqt => vec![groups::lxqt()],
            Self::Deepin => vec![groups::deepin()],
            Self::Cli => none::steps(),
        }
    }
}

impl FromStr for DesktopEnvironment {
    type Err = ConfigureError;

    /// Exact, case-sensitive match. `minimal` shares the Xfce install.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gnome" => Ok(Self::Gnome),
            "kde" => Ok(Self::Kde),
            "mate" => Ok(Self::Mate),
            "xfce" | "minimal" => Ok(Self::Xfce),
            "lxqt" => Ok(Self::Lxqt),
            "deepin" => Ok(Self::Deepin),
            "cli" => Ok(Self::Cli),
            other => match UNSUPPORTED.iter().find(|(tag, _)| *tag == other) {
                Some((_, name)) => Err(ConfigureError::UnsupportedDesktop(name.to_string())),
                None => Err(ConfigureError::UnknownDesktop(other.to_string())),
            },
        }
    }
}

impl TryFrom<String> for DesktopEnvironment {
    type Error = ConfigureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DesktopEnvironment> for String {
    fn from(de: DesktopEnvironment) -> Self {
        de.tag().to_string()
    }
}

impl std::fmt::Display for DesktopEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gnome => write!(f, "GNOME"),
            Self::Kde => write!(f, "KDE Plasma"),
            Self::Mate => write!(f, "MATE"),
            Self::Xfce => write!(f, "Xfce"),
            Self::Lxqt => write!(f, "LXQt"),
            Self::Deepin => write!(f, "Deepin"),
            Self::Cli => write!(f, "None (command line only)"),
        }
    }
}
