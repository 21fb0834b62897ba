use crate::package_manager::PackageManager;
use crate::prereq::command_exists;
use crate::RuntimeError;
use scaffold_schema::DependencySpec;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Lines of captured stderr carried into a `CommandFailed` error.
const STDERR_TAIL_LINES: usize = 20;

const CREATE_NEXT_APP_FLAGS: &[&str] = &[
    "--typescript",
    "--eslint",
    "--tailwind",
    "--app",
    "--src-dir",
    "--import-alias",
    "@/*",
    "--use-pnpm",
    "--turbo",
];

/// Package manager backed by a real executable on PATH.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    program: String,
    verbose: bool,
}

impl CommandPackageManager {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_owned(),
            verbose: false,
        }
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Argument vector for `add` / `add -D`, without the program name.
    pub fn add_args(specs: &[DependencySpec], dev: bool) -> Vec<String> {
        let mut args = vec!["add".to_owned()];
        if dev {
            args.push("-D".to_owned());
        }
        args.extend(specs.iter().map(ToString::to_string));
        args
    }

    /// Argument vector for the Next.js generator, without the program name.
    pub fn create_next_app_args(dir: &Path) -> Vec<String> {
        let mut args = vec![
            "dlx".to_owned(),
            "create-next-app@latest".to_owned(),
            dir.to_string_lossy().into_owned(),
        ];
        args.extend(CREATE_NEXT_APP_FLAGS.iter().map(|s| (*s).to_owned()));
        args
    }

    fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<(), RuntimeError> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        info!("running: {command_line}");

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = cwd {
            debug!("cwd: {}", dir.display());
            cmd.current_dir(dir);
        }

        if self.verbose {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| self.spawn_error(e))?;
            if status.success() {
                return Ok(());
            }
            return Err(RuntimeError::CommandFailed {
                command: command_line,
                status: status.to_string(),
                detail: String::new(),
            });
        }

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if output.status.success() {
            return Ok(());
        }
        Err(RuntimeError::CommandFailed {
            command: command_line,
            status: output.status.to_string(),
            detail: stderr_tail(&output.stderr),
        })
    }

    fn spawn_error(&self, e: std::io::Error) -> RuntimeError {
        if e.kind() == std::io::ErrorKind::NotFound {
            RuntimeError::Unavailable(self.program.clone())
        } else {
            RuntimeError::Io(e)
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!("\n{}", lines[start..].join("\n"))
}

impl PackageManager for CommandPackageManager {
    fn name(&self) -> &str {
        &self.program
    }

    fn available(&self) -> bool {
        command_exists(&self.program)
    }

    fn add(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError> {
        if specs.is_empty() {
            return Ok(());
        }
        self.run(&Self::add_args(specs, false), Some(dir))
    }

    fn add_dev(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError> {
        if specs.is_empty() {
            return Ok(());
        }
        self.run(&Self::add_args(specs, true), Some(dir))
    }

    fn install(&self, dir: &Path) -> Result<(), RuntimeError> {
        self.run(&["install".to_owned()], Some(dir))
    }

    fn create_next_app(&self, dir: &Path) -> Result<(), RuntimeError> {
        self.run(&Self::create_next_app_args(dir), None)
    }
}
