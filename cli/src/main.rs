//! CLI entrypoint for exam-catalog
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use exam_catalog_application::{
    BrowseCatalogUseCase, BrowseInput, ManageDocumentsUseCase, RegisterDocumentInput,
    TaxonomyUseCase,
};
use exam_catalog_domain::{ClassId, DocumentId, DocumentMetadata, Subject, SubjectId};
use exam_catalog_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonDocumentRepository, JsonTaxonomyStore,
};
use exam_catalog_presentation::{
    AddDocumentArgs, Cli, Command, OutputFormat, OutputFormatter, formatter_for,
    theory_only_flag,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type TaxonomyService = TaxonomyUseCase<JsonTaxonomyStore>;
type BrowseService = BrowseCatalogUseCase<JsonTaxonomyStore, JsonDocumentRepository>;
type ManageService = ManageDocumentsUseCase<JsonTaxonomyStore, JsonDocumentRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting exam-catalog");
    debug!(
        taxonomy = %config.storage.taxonomy_path().display(),
        documents = %config.storage.documents_path().display(),
        "Using data files"
    );

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help to see the available commands.");
    };
    if command.requires_admin() && !cli.admin {
        bail!("This command changes the catalog and requires --admin.");
    }

    // === Dependency Injection ===
    let taxonomy = Arc::new(TaxonomyUseCase::new(Arc::new(JsonTaxonomyStore::new(
        config.storage.taxonomy_path(),
    ))));
    let documents = Arc::new(JsonDocumentRepository::new(config.storage.documents_path()));
    let browse = BrowseCatalogUseCase::new(taxonomy.clone(), documents.clone());
    let manage = ManageDocumentsUseCase::new(taxonomy.clone(), documents);

    let formatter = formatter_for(output_format(cli.output, &config));
    let output = run(
        command,
        cli.admin,
        &taxonomy,
        &browse,
        &manage,
        formatter.as_ref(),
    )
    .await?;

    println!("{}", output);

    Ok(())
}

/// Command-line flag wins over the config file.
fn output_format(flag: Option<OutputFormat>, config: &FileConfig) -> OutputFormat {
    flag.unwrap_or(match config.output.format.unwrap_or_default() {
        FileOutputFormat::Table => OutputFormat::Table,
        FileOutputFormat::Json => OutputFormat::Json,
    })
}

/// Initialize logging based on verbosity level, optionally mirrored to a file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Could not create log directory {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(
    command: Command,
    is_admin: bool,
    taxonomy: &TaxonomyService,
    browse: &BrowseService,
    manage: &ManageService,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let output = match command {
        Command::Classes => formatter.classes(&taxonomy.hierarchy().await?),

        Command::Subjects { class } => {
            let hierarchy = taxonomy.hierarchy().await?;
            let class_id = ClassId::new(&class);
            let Some(class) = hierarchy.class(&class_id) else {
                bail!("Class not found: {}", class_id);
            };
            formatter.subjects(class)
        }

        Command::Menu { class, subject } => {
            let menu = browse
                .menu(&ClassId::new(class), &SubjectId::new(subject), is_admin)
                .await?;
            formatter.menu(&menu)
        }

        Command::Browse {
            class,
            subject,
            slug,
        } => {
            let mut input = BrowseInput::new(ClassId::new(class), SubjectId::new(subject))
                .as_admin(is_admin);
            if let Some(slug) = slug {
                input = input.with_exam_slug(slug);
            }
            formatter.listing(&browse.browse(input).await?)
        }

        Command::Show { id } => {
            let document = browse.document(DocumentId::new(id), is_admin).await?;
            formatter.document(&document)
        }

        Command::ExamTypes => {
            let hierarchy = taxonomy.hierarchy().await?;
            formatter.exam_types(&hierarchy.exam_type_options())
        }

        Command::AddSubject {
            class,
            id,
            name,
            theory_only,
            practical,
        } => {
            let class_id = ClassId::new(class);
            let mut subject = Subject::new(SubjectId::new(id), name.trim());
            if let Some(flag) = theory_only_flag(theory_only, practical) {
                subject = subject.with_theory_only(flag);
            }
            let hierarchy = taxonomy.add_subject(&class_id, subject, is_admin).await?;
            let Some(class) = hierarchy.class(&class_id) else {
                bail!("Class not found: {}", class_id);
            };
            formatter.subjects(class)
        }

        Command::AddDocument(args) => {
            let document = manage.register(register_input(args, is_admin)).await?;
            formatter.document(&document)
        }

        Command::SetVisibility { id, visible } => {
            let document = manage
                .set_visibility(DocumentId::new(id), visible, is_admin)
                .await?;
            formatter.document(&document)
        }
    };

    Ok(output)
}

fn register_input(args: AddDocumentArgs, is_admin: bool) -> RegisterDocumentInput {
    RegisterDocumentInput {
        class_id: ClassId::new(args.class),
        subject_id: SubjectId::new(args.subject),
        exam_type: args.exam_type,
        year: args.year,
        metadata: DocumentMetadata {
            title: args.title,
            description: args.description.filter(|d| !d.trim().is_empty()),
            file_ref: args.file,
            size: args.size,
        },
        visible: !args.hidden,
        is_admin,
    }
}
