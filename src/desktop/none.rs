//! Command-line only system (no desktop environment)

use crate::configure::plan::Step;
use tracing::debug;

pub fn steps() -> Vec<Step> {
    debug!("No desktop environment selected - command line only");
    Vec::new()
}
