use super::{BIN_NAME, EXIT_FAILURE, EXIT_SUCCESS};
use scaffold_core::{ScaffoldConfig, TemplateSource, WorkspaceContext};
use scaffold_runtime::{check_prereqs, format_missing, select_package_manager};

/// Templates a full `init` run reads.
const REQUIRED_TEMPLATES: &[&str] = &["monorepo", "common", "next", "nest"];

pub fn run(config: &ScaffoldConfig, json_output: bool) -> Result<u8, String> {
    let mut checks: Vec<Check> = Vec::new();
    let mut all_pass = true;

    check_package_manager(config, &mut checks, &mut all_pass);
    check_templates(config, &mut checks, &mut all_pass);

    match WorkspaceContext::probe_current_dir() {
        Ok(ctx) if ctx.initialized => checks.push(Check::pass(
            "workspace",
            &format!("{} is a monorepo root", ctx.cwd.display()),
        )),
        Ok(ctx) => checks.push(Check::info(
            "workspace",
            &format!(
                "{} is not a monorepo root (`{BIN_NAME} <name>` creates one)",
                ctx.cwd.display()
            ),
        )),
        Err(e) => checks.push(Check::warn(
            "workspace",
            &format!("Cannot read working directory: {e}"),
        )),
    }

    print_results(&checks, all_pass, json_output)
}

fn check_package_manager(config: &ScaffoldConfig, checks: &mut Vec<Check>, all_pass: &mut bool) {
    let pm_name = &config.package_manager;
    if let Err(e) = select_package_manager(pm_name, false) {
        *all_pass = false;
        checks.push(Check::fail("package_manager", &e.to_string()));
        return;
    }
    checks.push(Check::pass(
        "package_manager",
        &format!("Package manager: {pm_name}"),
    ));

    let missing = check_prereqs(pm_name);
    if missing.is_empty() {
        checks.push(Check::pass("prereqs", "Prerequisites satisfied"));
    } else {
        *all_pass = false;
        checks.push(Check::fail(
            "prereqs",
            &format!("Missing prerequisites: {}", format_missing(&missing)),
        ));
    }
}

fn check_templates(config: &ScaffoldConfig, checks: &mut Vec<Check>, all_pass: &mut bool) {
    let dir = match config.resolve_templates_dir() {
        Ok(dir) => dir,
        Err(e) => {
            *all_pass = false;
            checks.push(Check::fail("templates", &e.to_string()));
            return;
        }
    };
    let source = TemplateSource::new(&dir);
    if !dir.is_dir() {
        *all_pass = false;
        checks.push(Check::fail(
            "templates",
            &format!("Templates directory not found: {}", dir.display()),
        ));
        return;
    }

    let missing: Vec<&str> = REQUIRED_TEMPLATES
        .iter()
        .copied()
        .filter(|t| !source.has(t))
        .collect();
    if missing.is_empty() {
        checks.push(Check::pass(
            "templates",
            &format!("Templates found in {}", dir.display()),
        ));
    } else {
        *all_pass = false;
        checks.push(Check::fail(
            "templates",
            &format!(
                "Templates missing from {}: {}",
                dir.display(),
                missing.join(", ")
            ),
        ));
    }
}

fn print_results(checks: &[Check], all_pass: bool, json_output: bool) -> Result<u8, String> {
    if json_output {
        let json = serde_json::json!({
            "healthy": all_pass,
            "checks": checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "status": c.status,
                "message": c.message,
            })).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?
        );
    } else {
        println!("turbo-scaffold doctor\n");
        for check in checks {
            let icon = match check.status {
                "pass" => "✓",
                "fail" => "✗",
                "warn" => "⚠",
                _ => "ℹ",
            };
            println!("  {icon} {}", check.message);
        }
        println!();
        if all_pass {
            println!("All checks passed.");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }
    Ok(if all_pass { EXIT_SUCCESS } else { EXIT_FAILURE })
}

struct Check {
    name: String,
    status: &'static str,
    message: String,
}

impl Check {
    fn new(name: &str, status: &'static str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status,
            message: message.to_owned(),
        }
    }

    fn pass(name: &str, message: &str) -> Self {
        Self::new(name, "pass", message)
    }

    fn fail(name: &str, message: &str) -> Self {
        Self::new(name, "fail", message)
    }

    fn warn(name: &str, message: &str) -> Self {
        Self::new(name, "warn", message)
    }

    fn info(name: &str, message: &str) -> Self {
        Self::new(name, "info", message)
    }
}
