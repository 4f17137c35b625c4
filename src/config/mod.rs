//! Run configuration

mod settings;

pub use settings::*;
