//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use qa_domain::OutputFormat;
use std::path::PathBuf;

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human readable, colored output
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for nlc-qa
#[derive(Parser, Debug)]
#[command(name = "nlc-qa")]
#[command(author, version, about = "Answer questions with a text classifier and a document store")]
#[command(long_about = r#"
nlc-qa answers free-text questions by classifying them with a hosted
natural language classifier and looking up the answer stored under the
top class name in a CouchDB-compatible database.

Configuration files are loaded from (in priority order):
1. NLC_QA_<SECTION>__<KEY>   Environment variables
2. --config <path>           Explicit config file
3. ./nlc-qa.toml             Project-level config
4. ~/.config/nlc-qa/config.toml   Global config

Example:
  nlc-qa ask "What are your opening hours?"
  nlc-qa ask --top 3 "How do I reset my password?"
  nlc-qa setup --data answers.json
  nlc-qa train --data training.csv
  nlc-qa chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this classifier instead of resolving the newest available one
    #[arg(long, global = true, value_name = "ID")]
    pub classifier_id: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write operation logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append every answered question to this JSONL file
    #[arg(long, global = true, value_name = "PATH")]
    pub answer_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Answer a question
    Ask {
        /// The question text
        question: String,

        /// Answer with the N best matching classes (1-10)
        #[arg(short = 'n', long, value_name = "N")]
        top: Option<usize>,
    },

    /// Show the answer stored for a class name
    AskClass {
        /// Class name (answer document id)
        class_name: String,
    },

    /// Classify text without looking up answers
    Classify {
        /// The text to classify
        text: String,

        /// Number of ranked classes to show (1-10)
        #[arg(short = 'n', long, value_name = "N")]
        top: Option<usize>,
    },

    /// Show the classifier that questions are sent to
    Resolve,

    /// Show the application settings stored in the answer database
    Settings,

    /// Create the answer database, register its view and load answers
    Setup {
        /// JSON file with answer documents (an array, or an object with "docs")
        #[arg(short, long, value_name = "PATH")]
        data: Option<PathBuf>,

        /// JavaScript file replacing the map function of the list view
        #[arg(long, value_name = "PATH")]
        map: Option<PathBuf>,
    },

    /// List the answers stored in the answer database
    List,

    /// Train a new classifier from CSV data
    Train {
        /// CSV training data (text,class_name per line)
        #[arg(short, long, value_name = "PATH")]
        data: PathBuf,

        /// Classifier name
        #[arg(long, default_value = "classifier")]
        name: String,

        /// Training data language
        #[arg(long, default_value = "ja")]
        language: String,

        /// Create a classifier even if some already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Start an interactive question and answer session
    Chat,
}
