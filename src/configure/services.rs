//! Boot splash and zram services that break on this hardware

use crate::configure::plan::{Phase, Step};
use crate::utils::command::ChrootCommand;

const ZRAM_DEFAULTS_PACKAGE: &str = "zram-generator-defaults";
const ZRAM_SERVICE: &str = "systemd-zram-setup@zram0.service";

/// All of these may fail on a fresh cloud image; none of them are fatal.
pub fn disable_steps() -> Vec<Step> {
    vec![
        // Regenerating the initramfs here tends to fail noisily
        Step::best_effort(
            Phase::Services,
            "Switch plymouth to the details theme",
            ChrootCommand::new("plymouth-set-default-theme", &["details", "-R"]),
        )
        .quiet(),
        Step::best_effort(
            Phase::Services,
            "Remove zram defaults",
            ChrootCommand::new("dnf", &["remove", ZRAM_DEFAULTS_PACKAGE, "-y"]),
        ),
        Step::best_effort(
            Phase::Services,
            "Disable zram service",
            ChrootCommand::new("systemctl", &["disable", ZRAM_SERVICE]),
        ),
    ]
}
