//! Post-download build through the project's wrapper script
//!
//! Runs `./gradlew build` or `./mvnw package` in the extracted project and
//! streams its output. The exit status is reported, never turned into an error.

use super::request::Toolchain;
use anyhow::{Context, Result};
use colored::Colorize;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// How a build run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

/// Runs the build of a freshly extracted project
pub trait BuildRunner {
    fn run(&self, dir: &Path, toolchain: Toolchain) -> impl Future<Output = Result<BuildOutcome>>;
}

/// Program and arguments invoking the wrapper for this platform
pub fn wrapper_command(toolchain: Toolchain, windows: bool) -> (String, Vec<String>) {
    if windows {
        let script = match toolchain {
            Toolchain::Gradle => "gradlew.bat",
            Toolchain::Maven => "mvnw.cmd",
        };
        (
            "cmd".to_string(),
            vec![
                "/C".to_string(),
                script.to_string(),
                toolchain.build_goal().to_string(),
            ],
        )
    } else {
        (
            "sh".to_string(),
            vec![
                format!("./{}", toolchain.wrapper()),
                toolchain.build_goal().to_string(),
            ],
        )
    }
}

/// Invokes the wrapper script shipped with the generated project
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapperBuild;

impl BuildRunner for WrapperBuild {
    async fn run(&self, dir: &Path, toolchain: Toolchain) -> Result<BuildOutcome> {
        let (program, args) = wrapper_command(toolchain, cfg!(windows));
        println!();
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            program.yellow(),
            args.join(" ").yellow()
        );
        println!();

        let mut child = TokioCommand::new(&program)
            .args(&args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", toolchain.wrapper()))?;

        let stdout = child
            .stdout
            .take()
            .context("Failed to capture build stdout")?;
        let stderr = child
            .stderr
            .take()
            .context("Failed to capture build stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_done = false;
        let mut stderr_done = false;

        while !(stdout_done && stderr_done) {
            tokio::select! {
                line = stdout_reader.next_line(), if !stdout_done => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_done = true,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_done = true;
                        }
                    }
                }
                line = stderr_reader.next_line(), if !stderr_done => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_done = true,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_done = true;
                        }
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .context("Failed to wait for the build")?;
        println!();

        Ok(BuildOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}
