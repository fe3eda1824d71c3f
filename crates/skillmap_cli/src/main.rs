//! SkillMap command-line host.
//!
//! # Responsibility
//! - Resolve configuration from flags and `SKILLMAP_*` variables.
//! - Drive `DirectoryService` views and render them as text or JSON.
//!
//! # Invariants
//! - Errors go to stderr with a non-zero exit code; stdout carries results only.
//! - Flags override environment variables.

use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;
use skillmap_core::{
    Catalog, CatalogAlignedDataset, ConfigError, DirectoryConfig, DirectoryError, DirectoryService,
    DirectoryView, EmployeeDetailView, EmployeeFilter, EmployeeSummary, FetchState, SourceConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

const BAR_WIDTH: usize = 20;
const EXIT_NOT_FOUND: u8 = 2;

/// Browse the employee skills directory.
#[derive(Parser, Debug)]
#[command(name = "skillmap")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SKILLMAP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true, env = "SKILLMAP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// SQLite directory database (created and migrated when missing)
    #[arg(long, global = true, env = "SKILLMAP_DB_PATH")]
    db: Option<PathBuf>,

    /// JSON directory snapshot
    #[arg(long, global = true, env = "SKILLMAP_SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List employees, optionally filtered by text and skill tags
    List {
        /// Case-insensitive substring of name or title
        #[arg(long, short)]
        query: Option<String>,

        /// Required skill tag; repeat to accept any of several skills
        #[arg(long = "skill", short = 's')]
        skills: Vec<String>,

        /// Only direct reports of this manager id
        #[arg(long)]
        manager: Option<i64>,

        #[arg(long)]
        json: bool,
    },
    /// Show one employee with specialty groups and proficiency charts
    Show {
        id: i64,

        #[arg(long)]
        json: bool,
    },
    /// Print the technology catalog in chart order
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Print every skill tag present in the directory
    Tags,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Directory(DirectoryError),
    Output(serde_json::Error),
    Interrupted,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Directory(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to render output: {err}"),
            Self::Interrupted => write!(f, "view was abandoned before it finished loading"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DirectoryError> for CliError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            match err {
                CliError::Directory(DirectoryError::EmployeeNotFound(_)) => {
                    ExitCode::from(EXIT_NOT_FOUND)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = DirectoryConfig {
        source: SourceConfig::resolve(cli.source.db, cli.source.snapshot)?,
        log_dir: cli.log_dir,
        ..DirectoryConfig::default()
    }
    .with_log_level(cli.log_level.as_deref())?;
    config.init_logging()?;

    let service = DirectoryService::new(config.open_source()?);

    match cli.command {
        Command::List {
            query,
            skills,
            manager,
            json,
        } => {
            let view = service.open_directory(manager);
            let employees = loaded_employees(&view)?;
            let mut filter = EmployeeFilter::new().with_query(query.unwrap_or_default());
            for skill in &skills {
                if !filter.selection().contains(skill) {
                    filter.toggle_tag(skill);
                }
            }
            let matched = filter.apply(employees);
            info!(
                "event=cli_command module=cli command=list status=ok total={} matched={}",
                employees.len(),
                matched.len()
            );
            if json {
                print_json(&matched)
            } else {
                print_employee_list(&matched);
                Ok(())
            }
        }
        Command::Show { id, json } => {
            let view = ready(service.open_employee(id))?;
            if let Some(err) = &view.catalog_error {
                eprintln!("warning: {err}; charts are empty");
            }
            info!(
                "event=cli_command module=cli command=show status=ok employee_id={} specialties={}",
                id,
                view.specialty_groups.len()
            );
            if json {
                print_json(&view)
            } else {
                print_employee_detail(&view);
                Ok(())
            }
        }
        Command::Catalog { json } => {
            let catalog = ready(service.open_catalog())?;
            if json {
                print_json(&catalog)
            } else {
                print_catalog(&catalog);
                Ok(())
            }
        }
        Command::Tags => {
            let view = service.open_directory(None);
            loaded_employees(&view)?;
            for tag in view.skill_tags() {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

fn ready<T>(state: FetchState<T>) -> Result<T, CliError> {
    match state {
        FetchState::Ready(value) => Ok(value),
        FetchState::Failed(err) => Err(CliError::Directory(err)),
        FetchState::Loading | FetchState::Abandoned => Err(CliError::Interrupted),
    }
}

/// Employees of a directory view; an unavailable source reads as an empty
/// directory with a warning, and only an abandoned view is an error.
fn loaded_employees(view: &DirectoryView) -> Result<&[EmployeeSummary], CliError> {
    match &view.employees {
        FetchState::Ready(_) => Ok(view.employees()),
        FetchState::Failed(err) => {
            warn!("event=cli_command module=cli status=degraded slot=employees");
            eprintln!("warning: {err}; showing an empty directory");
            Ok(view.employees())
        }
        FetchState::Loading | FetchState::Abandoned => Err(CliError::Interrupted),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_employee_list(employees: &[&EmployeeSummary]) {
    if employees.is_empty() {
        println!("No employees match.");
        return;
    }
    for employee in employees {
        let skills = employee
            .skills
            .iter()
            .map(|skill| format!("{} ({})", skill.technology_name, skill.proficiency.value()))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:>4}  {:<24} {:<24} {}",
            employee.id, employee.name, employee.title, skills
        );
    }
}

fn print_employee_detail(view: &EmployeeDetailView) {
    let profile = &view.profile;
    println!("{} [{}]", profile.name, profile.initials());
    println!("{}", profile.title);

    if !view.has_skill_data() {
        println!();
        println!("No skill data.");
    } else {
        println!();
        println!("Specialties");
        for group in view.specialty_groups.sorted_by_name() {
            println!(
                "  {:<16} skills={} avg={:.1} max={} years={:.1}",
                group.specialty.label(),
                group.len(),
                group.average.unwrap_or_default(),
                group
                    .max_proficiency
                    .map(|value| value.value())
                    .unwrap_or_default(),
                group.total_years
            );
        }
        print_chart("Proficiency", &view.proficiency_chart);
    }

    if !profile.improvement_areas.is_empty() {
        println!();
        println!("Improvement areas");
        for area in &profile.improvement_areas {
            println!(
                "  {:<16} {:>5.1}  {}",
                area.category, area.points, area.description
            );
        }
    }
}

fn print_chart(title: &str, chart: &CatalogAlignedDataset) {
    let Some(series) = chart.series.first() else {
        return;
    };
    println!();
    println!("{title}");
    let label_width = label_width(&chart.labels);
    for (label, value) in chart.labels.iter().zip(&series.values) {
        let filled = usize::from(*value) * BAR_WIDTH / 10;
        println!(
            "  {label:<label_width$} |{:<BAR_WIDTH$}| {value}",
            "#".repeat(filled)
        );
    }
}

/// Column width in chars, matching how `{:<width$}` pads.
fn label_width(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
}

fn print_catalog(catalog: &Catalog) {
    for technology in catalog {
        println!(
            "{:>4}  {:<24} {}",
            technology.id,
            technology.name,
            technology.specialty.label()
        );
    }
}
