//! fedora-configure library - desktop configuration of Fedora cloud images

pub mod config;
pub mod configure;
pub mod desktop;
pub mod utils;

pub use config::ConfigureConfig;
pub use configure::{configure, Configurator};
pub use desktop::DesktopEnvironment;
pub use utils::error::ConfigureError;
