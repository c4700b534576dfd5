//! Console output formatter for answers and administrative results

use colored::Colorize;
use qa_application::{DatabaseStatus, DesignStatus, SetupOutput, TrainOutcome};
use qa_domain::{Answer, AnswerDocument, AppSettings, ClassScore, ClassifierId};
use serde::Serialize;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a single answer
    pub fn format_answer(answer: &Answer) -> String {
        if answer.is_error() {
            return format!("{} {}\n", "Error:".red().bold(), answer.message);
        }

        let mut output = format!(
            "{}\n{} {} ({})\n",
            answer.message,
            "Class:".dimmed(),
            answer.class_name.cyan(),
            Self::confidence(answer.confidence)
        );

        if let Some(option) = &answer.option {
            output.push_str(&format!("{} {}\n", "Option:".dimmed(), option));
        }

        output
    }

    /// Format ranked answers, best first
    pub fn format_answers(answers: &[Answer]) -> String {
        if let [single] = answers
            && single.is_error()
        {
            return Self::format_answer(single);
        }

        let mut output = String::new();
        for (rank, answer) in answers.iter().enumerate() {
            output.push_str(&format!(
                "{} {}\n",
                format!("#{}", rank + 1).yellow().bold(),
                answer.class_name.cyan()
            ));
            output.push_str(&Self::indent(&Self::format_answer(answer), "   "));
            output.push('\n');
        }
        output
    }

    /// Format ranked classification scores
    pub fn format_scores(scores: &[ClassScore]) -> String {
        let width = scores
            .iter()
            .map(|s| s.class_name.chars().count())
            .max()
            .unwrap_or(0);

        scores
            .iter()
            .enumerate()
            .map(|(rank, score)| {
                format!(
                    "{:>2}. {:<width$}  {}\n",
                    rank + 1,
                    score.class_name,
                    Self::confidence(score.confidence),
                    width = width
                )
            })
            .collect()
    }

    pub fn format_classifier_id(id: Option<&ClassifierId>) -> String {
        match id {
            Some(id) => format!("{} {}\n", "Classifier:".cyan().bold(), id),
            None => format!(
                "{} no available classifier\n",
                "Classifier:".yellow().bold()
            ),
        }
    }

    pub fn format_settings(settings: &AppSettings) -> String {
        format!("{} {}\n", "Name:".cyan().bold(), settings.name)
    }

    /// Format the stored answer documents
    pub fn format_documents(documents: &[AnswerDocument]) -> String {
        if documents.is_empty() {
            return format!("{}\n", "No answers stored.".dimmed());
        }

        let mut output = Self::section_header(&format!("Answers ({})", documents.len()));
        for doc in documents {
            output.push_str(&format!("\n{}\n", doc.id.yellow().bold()));
            output.push_str(&Self::indent(&doc.message, "  "));
            output.push('\n');
            for question in &doc.questions {
                output.push_str(&format!("  {} {}\n", "?".dimmed(), question));
            }
        }
        output
    }

    pub fn format_setup(result: &SetupOutput) -> String {
        let database = match result.database {
            DatabaseStatus::Created => "created".green(),
            DatabaseStatus::AlreadyExists => "already exists".dimmed(),
        };
        let design = match result.design {
            DesignStatus::Registered => "registered".green(),
            DesignStatus::AlreadyRegistered => "already registered".dimmed(),
        };

        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Database:".cyan().bold(), database));
        output.push_str(&format!("{} {}\n", "View:".cyan().bold(), design));

        let failed: Vec<_> = result.failed_documents().collect();
        output.push_str(&format!(
            "{} {} loaded, {} failed\n",
            "Documents:".cyan().bold(),
            result.inserted.len() - failed.len(),
            failed.len()
        ));
        for failure in failed {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "x".red(),
                failure.id,
                failure
                    .reason
                    .as_deref()
                    .or(failure.error.as_deref())
                    .unwrap_or("unknown error")
            ));
        }
        output
    }

    pub fn format_train(outcome: &TrainOutcome) -> String {
        match outcome {
            TrainOutcome::Created { classifier } => {
                let mut output = format!(
                    "{} {} ({})\n",
                    "Created classifier:".green().bold(),
                    classifier.classifier_id,
                    classifier.status
                );
                if let Some(description) = &classifier.status_description {
                    output.push_str(&format!("  {}\n", description.dimmed()));
                }
                output
            }
            TrainOutcome::Skipped { existing } => {
                let mut output = format!(
                    "{} {} classifier(s) already exist, use --force to create another\n",
                    "Skipped:".yellow().bold(),
                    existing.len()
                );
                for summary in existing {
                    output.push_str(&format!(
                        "  - {} {} {}\n",
                        summary.classifier_id,
                        summary.name.as_deref().unwrap_or("-"),
                        summary.created.to_rfc3339().dimmed()
                    ));
                }
                output
            }
        }
    }

    /// Format any result as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn confidence(confidence: f64) -> String {
        format!("{:.1}%", confidence * 100.0)
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
