mod commands;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use commands::{exit_code_for, EXIT_FAILURE};
use scaffold_core::ScaffoldConfig;
use scaffold_schema::Archetype;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    name = "turbo-scaffold",
    version,
    about = "Create and extend Turborepo-style TypeScript monorepos",
    long_about = "Without a type flag, initializes a new monorepo in ./<NAME>. \
                  With --next, --node, --nest or --package, adds an app or package \
                  to the monorepo rooted in the current directory."
)]
struct Cli {
    /// Name of the monorepo, app, or package.
    name: Option<String>,

    #[command(flatten)]
    unit: UnitFlags,

    /// Overwrite an existing package.json or a non-empty target directory.
    #[arg(long, default_value_t = false)]
    force: bool,

    /// Print what would be scaffolded without touching the disk.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Directory holding the monorepo/common/next/nest templates.
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Package manager used for installs (pnpm, mock).
    #[arg(long, global = true)]
    package_manager: Option<String>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging and stream package manager output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
#[group(multiple = false)]
struct UnitFlags {
    /// Add a Next.js app.
    #[arg(long)]
    next: bool,
    /// Add a Node.js worker app.
    #[arg(long)]
    node: bool,
    /// Add a NestJS app.
    #[arg(long)]
    nest: bool,
    /// Add a shared package.
    #[arg(long)]
    package: bool,
}

impl UnitFlags {
    fn archetype(&self) -> Option<Archetype> {
        if self.next {
            Some(Archetype::Next)
        } else if self.node {
            Some(Archetype::Node)
        } else if self.nest {
            Some(Archetype::Nest)
        } else if self.package {
            Some(Archetype::PackageLib)
        } else {
            None
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check package manager, templates, and the current workspace.
    Doctor,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("TURBO_SCAFFOLD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match ScaffoldConfig::load_default() {
        Ok(config) => config.with_overrides(cli.package_manager.as_deref(), cli.templates.as_deref()),
        Err(e) => {
            let msg = e.to_string();
            eprintln!("error: {msg}");
            return ExitCode::from(exit_code_for(&msg));
        }
    };

    let runs_package_manager = cli.command.is_none() && !cli.dry_run && cli.name.is_some();
    if runs_package_manager && std::env::var("TURBO_SCAFFOLD_SKIP_PREREQS").as_deref() != Ok("1") {
        let missing = scaffold_runtime::check_prereqs(&config.package_manager);
        if !missing.is_empty() {
            eprintln!("error: {}", scaffold_runtime::format_missing(&missing));
            return ExitCode::from(EXIT_FAILURE);
        }
    }

    let result = match cli.command {
        Some(Commands::Doctor) => commands::doctor::run(&config, cli.json),
        Some(Commands::Completions { shell }) => commands::completions::run::<Cli>(shell),
        Some(Commands::ManPages { dir }) => commands::man_pages::run::<Cli>(&dir),
        None => commands::scaffold::run(
            &commands::scaffold::ScaffoldArgs {
                name: cli.name.as_deref(),
                archetype: cli.unit.archetype(),
                force: cli.force,
                dry_run: cli.dry_run,
                json: cli.json,
                verbose: cli.verbose || cli.trace,
            },
            &config,
        ),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(exit_code_for(&msg))
        }
    }
}
