use super::{
    colorize_archetype, colorize_archetype_padded, json_pretty, spin_fail, spin_ok, spinner,
    EXIT_SUCCESS,
};
use scaffold_core::{
    InitReport, ScaffoldConfig, ScaffoldOptions, Scaffolder, TemplateSource, UnitPlan, UnitReport,
    WorkspaceContext,
};
use scaffold_runtime::select_package_manager;
use scaffold_schema::{Archetype, UnitDescriptor, UnitName};

const USAGE_HINT: &str = "usage: turbo-scaffold <name> [--next | --node | --nest | --package]";

#[allow(clippy::struct_excessive_bools)]
pub struct ScaffoldArgs<'a> {
    pub name: Option<&'a str>,
    pub archetype: Option<Archetype>,
    pub force: bool,
    pub dry_run: bool,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: &ScaffoldArgs<'_>, config: &ScaffoldConfig) -> Result<u8, String> {
    let raw = args
        .name
        .ok_or_else(|| format!("invalid unit name: a name is required ({USAGE_HINT})"))?;
    let name = UnitName::parse(raw).map_err(|e| e.to_string())?;

    let context = WorkspaceContext::probe_current_dir().map_err(|e| e.to_string())?;
    if args.archetype.is_some() && !context.initialized {
        return Err(scaffold_core::CoreError::NotInitialized(context.cwd).to_string());
    }

    let pm = select_package_manager(&config.package_manager, args.verbose)
        .map_err(|e| e.to_string())?;
    let templates_dir = config
        .resolve_templates_dir()
        .map_err(|e| e.to_string())?;
    let scaffolder = Scaffolder::new(
        context,
        TemplateSource::new(templates_dir),
        pm.as_ref(),
        ScaffoldOptions { force: args.force },
    );

    match args.archetype {
        Some(archetype) => {
            let unit = UnitDescriptor::from_archetype(name, archetype);
            if args.dry_run {
                let plan = scaffolder.plan_add(&unit).map_err(|e| e.to_string())?;
                print_plans(&[plan], args.json)?;
                return Ok(EXIT_SUCCESS);
            }
            let report = with_spinner(args, &format!("adding {unit}"), || {
                scaffolder.add(&unit).map_err(|e| e.to_string())
            })?;
            print_unit_report(&report, args.json)?;
        }
        None => {
            if args.dry_run {
                let plans = scaffolder.plan_init(&name).map_err(|e| e.to_string())?;
                print_plans(&plans, args.json)?;
                return Ok(EXIT_SUCCESS);
            }
            let report = with_spinner(args, &format!("initializing monorepo '{name}'"), || {
                scaffolder.init(&name).map_err(|e| e.to_string())
            })?;
            print_init_report(&report, args.json)?;
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Spinner around a long step. Skipped for JSON output and in verbose
/// mode, where the package manager writes to the terminal itself.
fn with_spinner<T>(
    args: &ScaffoldArgs<'_>,
    msg: &str,
    step: impl FnOnce() -> Result<T, String>,
) -> Result<T, String> {
    if args.json || args.verbose {
        return step();
    }
    let pb = spinner(msg);
    match step() {
        Ok(value) => {
            spin_ok(&pb, msg);
            Ok(value)
        }
        Err(e) => {
            spin_fail(&pb, msg);
            Err(e)
        }
    }
}

fn print_plans(plans: &[UnitPlan], json: bool) -> Result<(), String> {
    if json {
        println!("{}", json_pretty(&plans)?);
        return Ok(());
    }
    for plan in plans {
        println!(
            "{:<28} {} deps: {:<3} dev: {:<3} templates: {}",
            format!("{}/{}", plan.unit.kind.scope(), plan.unit.name),
            colorize_archetype_padded(plan.unit.archetype, 12),
            plan.dependencies.dependencies.len(),
            plan.dependencies.dev_dependencies.len(),
            if plan.templates.is_empty() {
                "-".to_owned()
            } else {
                plan.templates.join(", ")
            },
        );
    }
    if let [single] = plans {
        if let Some(manifest) = &single.manifest {
            let rendered = manifest.to_json_pretty().map_err(|e| e.to_string())?;
            print!("\n{rendered}");
        }
    }
    Ok(())
}

fn print_unit_report(report: &UnitReport, json: bool) -> Result<(), String> {
    if json {
        let payload = serde_json::json!({
            "status": "added",
            "unit": report,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "added {} ({}) at {}",
            report.name,
            colorize_archetype(report.archetype),
            report.dir.display()
        );
    }
    Ok(())
}

fn print_init_report(report: &InitReport, json: bool) -> Result<(), String> {
    if json {
        let payload = serde_json::json!({
            "status": "initialized",
            "monorepo": report,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "initialized monorepo '{}' at {}",
            report.name,
            report.root.display()
        );
        println!("database: {}", report.database);
        for unit in &report.units {
            println!(
                "  {:<8} {:<14} {}",
                unit.kind.scope(),
                unit.name,
                colorize_archetype(unit.archetype)
            );
        }
        println!("\nnext: cd {}", report.name);
    }
    Ok(())
}
