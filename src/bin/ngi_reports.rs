use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use ngi_reports::app::ReportBuilder;
use ngi_reports::config::{ConfigLoader, StoreSettings};
use ngi_reports::domain::{ReportContext, ReportOverrides};
use ngi_reports::error::ReportError;
use ngi_reports::output::{JsonOutput, write_summary};
use ngi_reports::statusdb::StatusDbClient;
use ngi_reports::store::{DirectoryStore, StoreClient};

#[derive(Parser)]
#[command(name = "ngi-reports")]
#[command(about = "Build NGI sequencing project report models from StatusDB")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Build the project summary report model")]
    ProjectSummary(ProjectSummaryArgs),
}

#[derive(Args)]
struct ProjectSummaryArgs {
    /// NGI project name, e.g. A.Test_20_01
    #[arg(long)]
    project: Option<String>,

    /// UPPMAX project to deliver to, instead of the one in StatusDB
    #[arg(long)]
    uppmax_id: Option<String>,

    #[arg(long)]
    config: Option<String>,

    /// Read exported documents from this directory instead of StatusDB
    #[arg(long)]
    store_dir: Option<Utf8PathBuf>,

    #[arg(long)]
    creation_date: Option<String>,

    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<ReportError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ReportError) -> u8 {
    match error {
        ReportError::Configuration
        | ReportError::InvalidProjectName(_)
        | ReportError::ProjectNotFound(_)
        | ReportError::MissingConfig => 2,
        ReportError::StoreConnection { .. }
        | ReportError::StoreHttp(_)
        | ReportError::StoreStatus { .. } => 3,
        ReportError::UnsupportedSource { .. } => 4,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ProjectSummary(args) => run_project_summary(args),
    }
}

fn run_project_summary(args: ProjectSummaryArgs) -> miette::Result<()> {
    let config = match (&args.config, &args.store_dir) {
        (Some(path), _) => Some(ConfigLoader::resolve(Some(path.as_str()))?),
        (None, Some(_)) => None,
        (None, None) => Some(ConfigLoader::resolve(None)?),
    };

    let creation_date = args
        .creation_date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    let context = ReportContext::new(creation_date).with_default_project(
        config
            .as_ref()
            .and_then(|config| config.default_project.clone()),
    );
    let overrides = ReportOverrides {
        project: args.project.clone(),
        uppmax_id: args.uppmax_id.clone(),
    };

    let store = match (args.store_dir.clone(), config.map(|config| config.store)) {
        (Some(dir), _) => StoreSettings::Directory(dir),
        (None, Some(store)) => store,
        (None, None) => return Err(ReportError::MissingConfig.into()),
    };
    match store {
        StoreSettings::Directory(dir) => {
            report(DirectoryStore::new(dir), &context, &overrides, &args)
        }
        StoreSettings::StatusDb(settings) => {
            report(StatusDbClient::new(settings)?, &context, &overrides, &args)
        }
    }
}

fn report<C: StoreClient>(
    client: C,
    context: &ReportContext,
    overrides: &ReportOverrides,
    args: &ProjectSummaryArgs,
) -> miette::Result<()> {
    let summary = ReportBuilder::new(client).build(context, overrides)?;
    if let Some(dir) = &args.output_dir {
        let path = write_summary(dir, &summary)?;
        tracing::info!(path = %path, "wrote project summary");
    }
    JsonOutput::print_summary(&summary).into_diagnostic()
}
