//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON output
    Json,
}

/// CLI arguments for exam-catalog
#[derive(Parser, Debug)]
#[command(name = "exam-catalog")]
#[command(author, version, about = "Browse and manage a catalog of past exam papers")]
#[command(long_about = r#"
exam-catalog organizes uploaded exam papers by class, subject and exam type.

Navigation follows the portal layout:
1. classes                         Pick a class
2. subjects <class>                Pick a subject
3. menu <class> <subject>          Pick an exam category or type
4. browse <class> <subject> [slug] List the matching papers

Configuration files are loaded from (in priority order):
1. EXAM_CATALOG_* environment variables
2. --config <path>         Explicit config file
3. ./exam-catalog.toml     Project-level config
4. ~/.config/exam-catalog/config.toml   Global config

Example:
  exam-catalog browse 10 maths unit-test
  exam-catalog --admin set-visibility 12 false
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format from config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Act as administrator: show hidden papers and allow changes
    #[arg(long, global = true)]
    pub admin: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List classes with their subject counts
    Classes,

    /// List the subjects of a class
    Subjects {
        /// Class id (e.g. 10)
        class: String,
    },

    /// Show a subject's exam menu with paper counts
    Menu {
        class: String,
        subject: String,
    },

    /// List papers for a class and subject, optionally narrowed by exam slug
    Browse {
        class: String,
        subject: String,
        /// Exam category or type slug (e.g. unit-test, unit-test-1)
        slug: Option<String>,
    },

    /// Show one paper
    Show {
        id: u64,
    },

    /// List every exam type offered when registering a paper
    ExamTypes,

    /// Add a subject to a class (admin)
    AddSubject {
        class: String,
        /// Subject id used in navigation paths
        id: String,
        /// Display name
        name: String,
        /// The subject has no practical exam
        #[arg(long, conflicts_with = "practical")]
        theory_only: bool,
        /// The subject has a practical exam
        #[arg(long)]
        practical: bool,
    },

    /// Register an uploaded paper (admin)
    AddDocument(AddDocumentArgs),

    /// Publish or hide a paper (admin)
    SetVisibility {
        id: u64,
        #[arg(action = clap::ArgAction::Set)]
        visible: bool,
    },
}

impl Command {
    /// Whether the command changes stored data.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::AddSubject { .. } | Command::AddDocument(_) | Command::SetVisibility { .. }
        )
    }
}

#[derive(Args, Debug)]
pub struct AddDocumentArgs {
    #[arg(long)]
    pub class: String,

    #[arg(long)]
    pub subject: String,

    /// Exam type label (e.g. "Unit Test 1")
    #[arg(long)]
    pub exam_type: String,

    #[arg(long)]
    pub year: String,

    /// Display title
    #[arg(long)]
    pub title: String,

    /// Stored file reference
    #[arg(long)]
    pub file: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Human-readable size label (e.g. "1.2 MB")
    #[arg(long)]
    pub size: Option<String>,

    /// Register the paper without publishing it
    #[arg(long)]
    pub hidden: bool,
}

/// Classification requested by `add-subject` flags: `Some(true)` for
/// `--theory-only`, `Some(false)` for `--practical`, `None` to derive it
/// from the subject name.
pub fn theory_only_flag(theory_only: bool, practical: bool) -> Option<bool> {
    match (theory_only, practical) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
