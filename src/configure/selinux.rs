//! SELinux enforcement mode

use crate::configure::plan::{Phase, Step};
use crate::utils::command::ChrootCommand;

pub const SELINUX_CONFIG: &str = "/etc/sysconfig/selinux";

const ENFORCING_TO_PERMISSIVE: &str = "s/SELINUX=enforcing/SELINUX=permissive/g";

/// Rewrites the SELinux mode in place inside the target
pub fn permissive_step() -> Step {
    Step::required(
        Phase::Security,
        "Set SELinux to permissive",
        ChrootCommand::new("sed", &["-i", ENFORCING_TO_PERMISSIVE, SELINUX_CONFIG]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_sysconfig_in_place() {
        let step = permissive_step();
        assert_eq!(step.command.program(), "sed");
        assert_eq!(step.command.args()[0], "-i");
        assert_eq!(step.command.args()[2], SELINUX_CONFIG);
    }
}
