//! Charm-style CLI prompts using cliclack

use crate::answers::{AnswerStore, AnswerValue, Answers};
use crate::catalog::{
    fetcher, CatalogFetcher, CatalogOrigin, OptionCatalog, OptionField, ResolvedCatalog,
};
use crate::product::ProductConfig;
use crate::project::{self, ProjectFetcher, ProjectRequest, WrapperBuild, Written};
use crate::prompts::{build_prompts, merge_selection, DependencyIndex, PromptKind, PromptSpec};
use crate::runtime;
use crate::service;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use url::Url;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory the project is generated into
    pub directory: Option<PathBuf>,

    /// Initializr service root, overriding the configured one
    pub service_url: Option<String>,

    /// Use the bundled option catalog instead of fetching it
    pub offline: bool,

    /// Accept every default answer (non-interactive mode)
    pub yes: bool,

    /// Do not run the wrapper build after extraction
    pub skip_build: bool,
}

/// CLI arguments for the dependency search command
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    /// Text to match against dependency names
    pub filter: Option<String>,

    /// Initializr service root, overriding the configured one
    pub service_url: Option<String>,

    /// Use the bundled option catalog instead of fetching it
    pub offline: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(format!("Welcome to the {} generator!", config.display_name()))?;

    // Step 1: Resolve project directory and service
    let project_dir = resolve_directory(&args)?;
    let base_url = service::service_url(config, args.service_url.as_deref())?;

    // Step 2: Load option catalog (remote, else bundled)
    let resolved = load_catalog(config, &base_url, args.offline).await?;
    report_unsupported(&resolved.catalog)?;

    // Step 3: Build prompts with previous answers as defaults
    let store = AnswerStore::in_dir(&project_dir, config.settings_file());
    let persisted = load_persisted(&store)?;
    let prompts = build_prompts(&resolved.catalog, &persisted);

    // Step 4: Ask
    let answers = collect_answers(&prompts, args.yes)?;

    // Step 5: Persist answers
    match store.save(&answers) {
        Ok(()) => {
            cliclack::log::remark(format!("Saved answers to {}", store.path().display()))?
        }
        Err(e) => cliclack::log::warning(format!("Answers were not saved: {:#}", e))?,
    }

    // Step 6: Download, then build if extracted
    let request = ProjectRequest::from_answers(&answers)?;
    confirm_overwrite(&request, &project_dir, config.settings_file(), args.yes)?;
    let written = download_project(config, &base_url, &request, &project_dir).await?;

    if !args.skip_build {
        run_build(&written, &request).await?;
    }

    print_next_steps(config, &written, &request)?;

    Ok(())
}

/// Print dependencies matching a filter
pub async fn search<C: ProductConfig>(config: &C, args: SearchArgs) -> Result<()> {
    let base_url = service::service_url(config, args.service_url.as_deref())?;
    let resolved = if args.offline {
        fetcher::offline()?
    } else {
        CatalogFetcher::new(base_url, config.user_agent())
            .fetch_or_bundled()
            .await?
    };

    if let CatalogOrigin::Bundled { reason } = &resolved.origin {
        eprintln!(
            "{} Using cached options ({})",
            "Warning:".yellow(),
            reason
        );
    }

    let index = dependency_index(&resolved.catalog);
    let filter = args.filter.unwrap_or_default();
    let matches = index.search(&filter);

    if matches.is_empty() {
        println!("{}", format!("No dependencies match '{}'", filter).yellow());
        return Ok(());
    }

    for entry in &matches {
        println!("  {} {}", entry.display_name, format!("({})", entry.id).dimmed());
    }
    println!();
    println!(
        "{} {} of {} dependencies",
        "Found".green().bold(),
        matches.len(),
        index.len()
    );

    Ok(())
}

/// Present each applicable prompt in order and collect the answers
pub fn collect_answers(prompts: &[PromptSpec], accept_defaults: bool) -> Result<Answers> {
    if accept_defaults {
        cliclack::log::info("Using default answers (--yes mode)")?;
    }

    let mut answers = Answers::new();
    for prompt in prompts {
        if !prompt.is_applicable(&answers) {
            continue;
        }

        let default = prompt.default_value(&answers);
        let value = if accept_defaults {
            default
        } else {
            ask(prompt, default)?
        };
        answers.set(prompt.key.clone(), value);
    }

    Ok(answers)
}

fn ask(prompt: &PromptSpec, default: AnswerValue) -> Result<AnswerValue> {
    match &prompt.kind {
        PromptKind::Text => {
            let default = default.to_param();
            let mut input = cliclack::input(&prompt.message).required(false);
            if !default.is_empty() {
                input = input.placeholder(&default).default_input(&default);
            }
            let value: String = input.interact()?;
            Ok(AnswerValue::Text(value))
        }
        PromptKind::Select { choices } if choices.is_empty() => Ok(default),
        PromptKind::Select { choices } => {
            let mut select = cliclack::select(&prompt.message);
            for choice in choices {
                select = select.item(choice.id.clone(), &choice.name, "");
            }
            if let Some(id) = default.as_text() {
                select = select.initial_value(id.to_string());
            }
            let id: String = select.interact()?;
            Ok(AnswerValue::Text(id))
        }
        PromptKind::Search { index } => {
            let initial = default.as_list().map(<[String]>::to_vec).unwrap_or_default();
            if index.is_empty() {
                return Ok(AnswerValue::List(initial));
            }
            let selected = select_dependencies(&prompt.message, index, initial)?;
            Ok(AnswerValue::List(selected))
        }
        PromptKind::Confirm => {
            let value: bool = cliclack::confirm(&prompt.message)
                .initial_value(default.as_flag().unwrap_or(false))
                .interact()?;
            Ok(AnswerValue::Flag(value))
        }
    }
}

/// Search-then-pick loop over the dependency index
fn select_dependencies(
    message: &str,
    index: &DependencyIndex,
    initial: Vec<String>,
) -> Result<Vec<String>> {
    let mut selected = initial;
    cliclack::log::step(message)?;

    loop {
        let filter: String = cliclack::input("Search dependencies")
            .placeholder("leave blank to list all")
            .required(false)
            .interact()?;

        let matches = index.search(&filter);
        if matches.is_empty() {
            cliclack::log::warning(format!("No dependencies match '{}'", filter))?;
        } else {
            let preselected: Vec<String> = matches
                .iter()
                .filter(|e| selected.contains(&e.id))
                .map(|e| e.id.clone())
                .collect();

            let mut multi = cliclack::multiselect(format!("{} matching dependencies", matches.len()));
            for entry in &matches {
                multi = multi.item(entry.id.clone(), &entry.display_name, "");
            }
            let picked: Vec<String> = multi
                .initial_values(preselected)
                .required(false)
                .interact()?;

            merge_selection(&mut selected, &matches, picked);
        }

        if !selected.is_empty() {
            let names: Vec<&str> = selected
                .iter()
                .map(|id| index.get(id).map_or(id.as_str(), |e| e.display_name.as_str()))
                .collect();
            cliclack::log::info(format!("Selected: {}", names.join(", ")))?;
        }

        let more: bool = cliclack::confirm("Search for more dependencies?")
            .initial_value(false)
            .interact()?;
        if !more {
            break;
        }
    }

    Ok(selected)
}

fn resolve_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    cliclack::log::info(format!("Project directory: {}", path.display()))?;
    Ok(path)
}

async fn load_catalog<C: ProductConfig>(
    config: &C,
    base_url: &Url,
    offline: bool,
) -> Result<ResolvedCatalog> {
    if offline {
        cliclack::log::info("Using bundled options (offline mode)")?;
        return fetcher::offline();
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Fetching Spring Initializr options from {}...", base_url));

    let resolved = CatalogFetcher::new(base_url.clone(), config.user_agent())
        .fetch_or_bundled()
        .await;

    match &resolved {
        Ok(ResolvedCatalog {
            catalog,
            origin: CatalogOrigin::Remote(url),
        }) => {
            spinner.stop(format!("Loaded {} options from {}", catalog.len(), url));
        }
        Ok(ResolvedCatalog {
            origin: CatalogOrigin::Bundled { reason },
            ..
        }) => {
            spinner.stop("Using cached options");
            cliclack::log::warning(format!(
                "We failed to get the most up-to-date Spring Initializr options ({}). We'll use some cached data instead.",
                reason
            ))?;
        }
        Err(_) => {
            spinner.stop("Failed to load options");
        }
    }

    resolved
}

fn report_unsupported(catalog: &OptionCatalog) -> Result<()> {
    for field in catalog.unsupported() {
        let kind = field.kind.as_deref().unwrap_or("untyped");
        cliclack::log::remark(format!(
            "Skipping option '{}' ({} field: {})",
            field.key, kind, field.reason
        ))?;
    }
    Ok(())
}

fn load_persisted(store: &AnswerStore) -> Result<Answers> {
    match store.load() {
        Ok(answers) => {
            if !answers.is_empty() {
                cliclack::log::info(format!(
                    "Using previous answers from {} as defaults",
                    store.path().display()
                ))?;
            }
            Ok(answers)
        }
        Err(e) => {
            cliclack::log::warning(format!("Ignoring previous answers: {:#}", e))?;
            Ok(Answers::new())
        }
    }
}

/// Warn before extracting over existing files
fn confirm_overwrite(
    request: &ProjectRequest,
    dir: &Path,
    settings_file: &str,
    yes: bool,
) -> Result<()> {
    if !request.extract || !dir.is_dir() {
        return Ok(());
    }

    let count = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != settings_file)
        .count();
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!("Directory has {} existing items", count))?;

    let confirm = if yes {
        true
    } else {
        cliclack::confirm("Extract anyway? Existing files may be overwritten.")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

async fn download_project<C: ProductConfig>(
    config: &C,
    base_url: &Url,
    request: &ProjectRequest,
    dir: &Path,
) -> Result<Written> {
    let fetcher = ProjectFetcher::new(base_url.clone(), config.user_agent());

    let spinner = cliclack::spinner();
    spinner.start("Downloading your project as generated by Spring Initializr...");

    match fetcher.download(request, dir).await {
        Ok(written) => {
            spinner.stop(match &written {
                Written::Archive(path) => format!("Downloaded {}", path.display()),
                Written::Descriptor(path) => format!("Downloaded {}", path.display()),
                Written::Extracted { dir, files } => {
                    format!("Extracted {} files into {}", files, dir.display())
                }
            });
            Ok(written)
        }
        Err(e) => {
            spinner.stop("Download failed");
            cliclack::log::error(format!(
                "We couldn't get your project files from {}: {:#}",
                base_url, e
            ))?;
            Err(e)
        }
    }
}

async fn run_build(written: &Written, request: &ProjectRequest) -> Result<()> {
    if !request.extract || !matches!(written, Written::Extracted { .. }) {
        return Ok(());
    }

    let java = runtime::check_java();
    if java.available {
        cliclack::log::info(format!(
            "Detected {} ({})",
            java.name,
            java.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        cliclack::log::warning("Java was not found on PATH; the build will likely fail")?;
    }

    cliclack::log::step(format!(
        "We'll now let {} download your dependencies and run a basic build",
        request.toolchain
    ))?;

    if let Some(outcome) =
        project::build_if_extracted(written, request, &WrapperBuild, project::BUILD_DELAY).await?
    {
        if outcome.success {
            cliclack::log::success("Build finished")?;
        } else {
            cliclack::log::error(format!(
                "Build exited with status {}",
                outcome
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ))?;
        }
    }

    Ok(())
}

fn dependency_index(catalog: &OptionCatalog) -> DependencyIndex {
    catalog
        .fields()
        .find_map(|(_, field)| match field {
            OptionField::HierarchicalMultiSelect { values } => Some(DependencyIndex::build(values)),
            _ => None,
        })
        .unwrap_or_default()
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    written: &Written,
    request: &ProjectRequest,
) -> Result<()> {
    let current = std::env::current_dir().ok();
    let mut steps = Vec::new();

    match written {
        Written::Extracted { dir, .. } => {
            if current.as_deref() != Some(dir.as_path()) {
                steps.push(format!("cd {}", dir.display()));
            }
            steps.push(format!(
                "./{} {}",
                request.toolchain.wrapper(),
                request.toolchain.run_goal()
            ));
        }
        Written::Archive(path) => {
            steps.push(format!("Unzip {}", path.display()));
        }
        Written::Descriptor(path) => {
            steps.push(format!("Add {} to your project", path.display()));
        }
    }
    steps.push(format!("Read the docs at {}", config.docs_url()));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!(
        "Thank you for using the {} generator!",
        config.display_name()
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn collected(format: &str) -> Answers {
        let persisted: Answers = [("toolchain", "maven"), ("format", format)]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog::bundled().unwrap(), &persisted);
        collect_answers(&prompts, true).unwrap()
    }

    #[test]
    fn test_build_format_never_asks_extract() {
        let answers = collected("build");
        assert_eq!(answers.text("format"), Some("build"));
        assert!(!answers.contains("extract"));

        let request = ProjectRequest::from_answers(&answers).unwrap();
        assert!(!request.extract);
    }

    #[test]
    fn test_project_format_extracts_by_default() {
        let answers = collected("project");
        assert_eq!(answers.text("format"), Some("project"));
        assert_eq!(answers.flag("extract"), Some(true));
    }

    #[test]
    fn test_dependency_index_comes_from_catalog() {
        let index = dependency_index(&catalog::bundled().unwrap());
        assert!(!index.is_empty());
        assert!(index.get("web").is_some());
    }
}
