use anyhow::{anyhow, bail, Context};
use tracing::debug;

use digitrack::catalog::{Assignment, CatalogFilter, RecordOverrides};
use digitrack::config::{default_config_path, load_config};
use digitrack::import::{ProgressEvent, ProgressReporter, TracingProgress};
use digitrack::{
    classify, parse_and_translate, CatalogService, Config, Database, Importer, Stage,
};

use crate::cli::{Cli, Commands};
use crate::output::Output;

/// Loads the named config file, the default one when it exists, or the
/// built-in defaults.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        return load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        _ => Ok(Config::default()),
    }
}

pub fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let out = Output::new(cli.json);
    let actor = cli.user.as_deref();

    match &cli.command {
        Commands::Parse { name } => {
            let parsed = classify(name.trim());
            out.parsed(&parsed)
        }

        Commands::Translate { name } => {
            let fields = parse_and_translate(name)?;
            out.bilingual(&fields)
        }

        Commands::Add {
            name,
            book,
            author,
            year,
            stage,
        } => {
            let service = CatalogService::new(open_database(&cli, &config)?, config.stage());
            let overrides = RecordOverrides {
                book_name: book.clone(),
                author_name: author.clone(),
                year: year.clone(),
                stage: stage.as_deref().and_then(Stage::from_label),
            };
            let record = service.add_record(name, overrides, actor)?;
            out.message(&format!("Added \"{}\"", record.file_name));
            out.record(&record)
        }

        Commands::Import { file } => {
            let importer = Importer::new(open_database(&cli, &config)?, config.import_config());
            let report = if cli.json {
                importer.run(file, actor, &TracingProgress)?
            } else {
                importer.run(file, actor, &ConsoleProgress)?
            };
            out.import_report(&report)
        }

        Commands::List {
            search,
            stage,
            assignee,
            limit,
            offset,
        } => {
            let service = CatalogService::new(open_database(&cli, &config)?, config.stage());
            let filter = CatalogFilter {
                search: search.clone(),
                stage: stage.as_deref().and_then(Stage::from_label),
                assignee: assignee.clone(),
                limit: *limit,
                offset: *offset,
            };
            let records = service.list(&filter)?;
            out.records(&records)
        }

        Commands::Stage { file, stage } => {
            let stage = Stage::from_label(stage).ok_or_else(|| anyhow!("Stage is required"))?;
            let service = CatalogService::new(open_database(&cli, &config)?, config.stage());
            let record = service.set_stage(file, stage, actor)?;
            out.message(&format!("\"{}\" is now at {}", record.file_name, record.stage));
            out.record(&record)
        }

        Commands::Advance { file } => {
            let service = CatalogService::new(open_database(&cli, &config)?, config.stage());
            let record = service.advance_stage(file, actor)?;
            out.message(&format!("\"{}\" is now at {}", record.file_name, record.stage));
            out.record(&record)
        }

        Commands::Assign {
            file,
            assignee,
            scanned_by,
            digitized_by,
            deadline,
        } => {
            let assignment = Assignment {
                assignee: assignee.clone(),
                scanned_by: scanned_by.clone(),
                digitized_by: digitized_by.clone(),
                deadline: *deadline,
            };
            if assignment.assignee.is_none()
                && assignment.scanned_by.is_none()
                && assignment.digitized_by.is_none()
                && assignment.deadline.is_none()
            {
                bail!("Nothing to assign: pass --assignee, --scanned-by, --digitized-by or --deadline");
            }
            let service = CatalogService::new(open_database(&cli, &config)?, config.stage());
            let record = service.assign(file, &assignment, actor)?;
            out.record(&record)
        }
    }
}

fn open_database(cli: &Cli, config: &Config) -> anyhow::Result<Database> {
    let path = match &cli.database {
        Some(path) => path.clone(),
        None => config
            .resolved_database_path()
            .ok_or_else(|| anyhow!("Could not determine home directory for the database"))?,
    };
    debug!(path = %digitrack::sanitize::redact_path(&path), "Opening catalog");
    Database::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

/// Prints import progress for people watching a terminal.
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::DuplicateSkipped { file_name } => {
                eprintln!("  skipped duplicate: {}", file_name)
            }
            ProgressEvent::Failed { error } => eprintln!("Import failed: {}", error),
            _ => {}
        }
        TracingProgress.report(event);
    }
}
