//! CLI entrypoint for nlc-qa
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use qa_application::{
    CreateClassifierRequest, QaModel, SetupInput, SetupStoreUseCase, TrainClassifierUseCase,
};
use qa_domain::{ClassifierId, OutputFormat};
use qa_infrastructure::{
    ConfigLoader, CouchAnswerRepository, FileConfig, JsonlAnswerLog, NlcClassifierGateway,
};
use qa_presentation::{ChatRepl, Cli, Command, ConsoleFormatter, ProgressReporter};
use serde_json::Value;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting nlc-qa");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
    }

    let config = load_config(&cli)?;

    if cli.show_config {
        println!(
            "{}",
            toml::to_string_pretty(&config.redacted()).context("Failed to render configuration")?
        );
        return Ok(());
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.output.map(Into::into).unwrap_or(config.output.format);
    let show_progress = !cli.quiet && format == OutputFormat::Text;

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cancel = CancellationToken::new();
    if command != Command::Chat {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        });
    }

    // === Dependency Injection ===
    let gateway = Arc::new(
        NlcClassifierGateway::from_config(&config.classifier)
            .context("Failed to create classifier gateway")?,
    );
    let repository = Arc::new(
        CouchAnswerRepository::from_config(&config.store)
            .context("Failed to create answer repository")?,
    );

    let mut params = config.qa_params()?;
    if let Some(id) = cli.classifier_id.as_deref() {
        params = params.with_classifier_id(ClassifierId::from_optional(Some(id)));
    }
    let default_top_n = params.top_n.get();

    let mut model = QaModel::new(Arc::clone(&gateway), Arc::clone(&repository), params)
        .with_cancellation(cancel.clone());
    if let Some(path) = &cli.answer_log {
        let log = JsonlAnswerLog::open(path)
            .with_context(|| format!("Failed to open answer log {}", path.display()))?;
        info!("Logging answers to {}", log.path().display());
        model = model.with_answer_log(Arc::new(log));
    }

    match command {
        Command::Ask { question, top } => {
            let top_n = top.unwrap_or(default_top_n);
            if top_n == 1 {
                let answer = model.ask(&question).await;
                emit(format, &answer, ConsoleFormatter::format_answer(&answer));
            } else {
                let answers = model.ask_top(&question, Some(top_n)).await;
                emit(format, &answers, ConsoleFormatter::format_answers(&answers));
            }
        }

        Command::AskClass { class_name } => {
            let answer = model.ask_class_name(&class_name).await;
            emit(format, &answer, ConsoleFormatter::format_answer(&answer));
        }

        Command::Classify { text, top } => {
            let progress = ProgressReporter::start("Classifying...", show_progress);
            let result = model.classify(&text, top.unwrap_or(default_top_n)).await;
            progress.clear();

            let scores = result?;
            emit(format, &scores, ConsoleFormatter::format_scores(&scores));
        }

        Command::Resolve => {
            let progress = ProgressReporter::start("Resolving classifier...", show_progress);
            let result = model.ensure_classifier_id().await;
            progress.clear();

            let id = result?;
            emit(
                format,
                &serde_json::json!({ "classifier_id": id }),
                ConsoleFormatter::format_classifier_id(id.as_ref()),
            );
        }

        Command::Settings => {
            let settings = model.app_settings().await;
            emit(format, &settings, ConsoleFormatter::format_settings(&settings));
        }

        Command::Setup { data, map } => {
            let mut input = SetupInput::default();
            if let Some(path) = &data {
                input = input.with_documents(read_documents(path)?);
            }
            if let Some(path) = &map {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                input = input.with_map_override(source);
            }

            let progress = ProgressReporter::start(
                format!("Preparing database {}...", repository.database()),
                show_progress,
            );
            let use_case = SetupStoreUseCase::new(Arc::clone(&repository));
            let result = until_cancelled(&cancel, use_case.execute(input)).await;
            progress.clear();

            let output = result??;
            emit(format, &output, ConsoleFormatter::format_setup(&output));
        }

        Command::List => {
            let use_case = SetupStoreUseCase::new(Arc::clone(&repository));
            let documents = until_cancelled(&cancel, use_case.list_answers()).await??;
            emit(
                format,
                &documents,
                ConsoleFormatter::format_documents(&documents),
            );
        }

        Command::Train {
            data,
            name,
            language,
            force,
        } => {
            let training_data = std::fs::read(&data)
                .with_context(|| format!("Failed to read {}", data.display()))?;
            let request = CreateClassifierRequest::new(training_data)
                .with_name(name)
                .with_language(language);

            let progress = ProgressReporter::start("Submitting training data...", show_progress);
            let use_case = TrainClassifierUseCase::new(Arc::clone(&gateway));
            let result = until_cancelled(&cancel, use_case.execute(request, force)).await;
            progress.clear();

            let outcome = result??;
            emit(format, &outcome, ConsoleFormatter::format_train(&outcome));
        }

        Command::Chat => {
            ChatRepl::new(model)
                .with_format(format)
                .with_top_n(default_top_n)
                .run()
                .await?;
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr, or to `log_file` through a non-blocking writer.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let Some(path) = log_file else {
        builder.with_writer(std::io::stderr).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    builder.with_writer(writer).with_ansi(false).init();

    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Read answer documents for `setup`: a JSON array, or an object with `docs`.
fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    match value {
        Value::Array(docs) => Ok(docs),
        Value::Object(mut object) => match object.remove("docs") {
            Some(Value::Array(docs)) => Ok(docs),
            _ => bail!("{}: expected an array or an object with \"docs\"", path.display()),
        },
        _ => bail!("{}: expected an array or an object with \"docs\"", path.display()),
    }
}

/// Race `future` against `cancel`.
async fn until_cancelled<T>(cancel: &CancellationToken, future: impl Future<Output = T>) -> Result<T> {
    tokio::select! {
        output = future => Ok(output),
        _ = cancel.cancelled() => bail!("Request cancelled."),
    }
}

fn emit<T: serde::Serialize + ?Sized>(format: OutputFormat, value: &T, text: String) {
    match format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(value)),
        OutputFormat::Text => print!("{}", text),
    }
}
