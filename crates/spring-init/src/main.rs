//! spring-init - Generate Spring Boot projects with Spring Initializr

use anyhow::Result;
use clap::{Parser, Subcommand};
use initializr_core::tui::{CreateArgs, SearchArgs};
use initializr_core::ProductConfig;
use std::path::PathBuf;

/// Spring Initializr product configuration
#[derive(Clone)]
pub struct SpringConfig;

impl ProductConfig for SpringConfig {
    fn name(&self) -> &'static str {
        "spring-init"
    }

    fn display_name(&self) -> &'static str {
        "spring"
    }

    fn default_service_url(&self) -> &'static str {
        "https://start.spring.io"
    }

    fn service_url_env(&self) -> &'static str {
        "SPRING_INITIALIZR_URL"
    }

    fn settings_file(&self) -> &'static str {
        ".spring-init.yaml"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.spring.io/spring-boot/index.html"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for generating Spring Boot projects with Spring Initializr"
    }
}

#[derive(Parser, Debug)]
#[command(name = "spring-init")]
#[command(about = "CLI for generating Spring Boot projects with Spring Initializr")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new Spring Boot project
    Create(CliCreateArgs),
    /// List dependencies matching a search filter
    Search(CliSearchArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Directory to generate the project into (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Spring Initializr root URL (overrides SPRING_INITIALIZR_URL)
    #[arg(long = "service-url")]
    pub service_url: Option<String>,

    /// Use the bundled option catalog instead of fetching it
    #[arg(long)]
    pub offline: bool,

    /// Accept all default answers (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Do not run the wrapper build after extracting the project
    #[arg(long = "skip-build")]
    pub skip_build: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            directory: args.directory,
            service_url: args.service_url,
            offline: args.offline,
            yes: args.yes,
            skip_build: args.skip_build,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliSearchArgs {
    /// Text to match against dependency names (blank lists all)
    pub filter: Option<String>,

    /// Spring Initializr root URL (overrides SPRING_INITIALIZR_URL)
    #[arg(long = "service-url")]
    pub service_url: Option<String>,

    /// Use the bundled option catalog instead of fetching it
    #[arg(long)]
    pub offline: bool,
}

impl From<CliSearchArgs> for SearchArgs {
    fn from(args: CliSearchArgs) -> Self {
        SearchArgs {
            filter: args.filter,
            service_url: args.service_url,
            offline: args.offline,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = SpringConfig;

    let result = match args.command {
        Some(Command::Create(create_args)) => {
            initializr_core::run(&config, create_args.into()).await
        }
        Some(Command::Search(search_args)) => {
            initializr_core::tui::search(&config, search_args.into()).await
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => initializr_core::run(&config, CreateArgs::default()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
