use std::fmt;
use std::process::Command;

/// A missing prerequisite with actionable install instructions.
#[derive(Debug)]
pub struct MissingPrereq {
    pub name: &'static str,
    pub purpose: &'static str,
    pub install_hint: &'static str,
}

impl fmt::Display for MissingPrereq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}: {} (install: {})",
            self.name, self.purpose, self.install_hint
        )
    }
}

pub(crate) fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check the tools a scaffold run shells out to.
/// Returns a list of missing items. Empty list means all prerequisites are met.
pub fn check_prereqs(package_manager: &str) -> Vec<MissingPrereq> {
    let mut missing = Vec::new();

    // The mock backend spawns nothing.
    if package_manager == "mock" {
        return missing;
    }

    if !command_exists("node") {
        missing.push(MissingPrereq {
            name: "node",
            purpose: "JavaScript runtime for the generated monorepo",
            install_hint: "https://nodejs.org | apt install nodejs | dnf install nodejs | brew install node",
        });
    }

    if package_manager == "pnpm" && !command_exists("pnpm") {
        missing.push(MissingPrereq {
            name: "pnpm",
            purpose: "installing dependencies and running create-next-app",
            install_hint: "corepack enable pnpm | npm install -g pnpm",
        });
    }

    missing
}

/// Format a list of missing prerequisites into a user-friendly error message.
pub fn format_missing(missing: &[MissingPrereq]) -> String {
    use std::fmt::Write as _;
    let mut msg = String::from("missing prerequisites:\n");
    for m in missing {
        let _ = writeln!(msg, "{m}");
    }
    msg.push_str("\nturbo-scaffold needs these tools to install the generated workspace.");
    msg
}
