//! REPL (Read-Eval-Print Loop) for interactive question answering

use crate::ConsoleFormatter;
use qa_application::{AnswerRepository, ClassifierGateway, QaModel};
use qa_domain::{OutputFormat, TopN};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    /// Forget the cached classifier so the next question resolves again
    Reset,
    /// Show the classifier in use
    Classifier,
    /// Look up the answer stored for a class name
    Class(String),
    /// Answer with the N best classes from now on
    Top(usize),
    Settings,
    /// Malformed command; carries the usage line
    Usage(&'static str),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (name, arg) {
            ("/quit" | "/exit" | "/q", _) => Self::Quit,
            ("/help" | "/h" | "/?", _) => Self::Help,
            ("/reset", _) => Self::Reset,
            ("/classifier", _) => Self::Classifier,
            ("/settings", _) => Self::Settings,
            ("/class", Some(class_name)) => Self::Class(class_name.to_string()),
            ("/class", None) => Self::Usage("/class <class_name>"),
            ("/top", Some(n)) => match n.parse::<usize>().ok().and_then(|n| TopN::new(n).ok()) {
                Some(top) => Self::Top(top.get()),
                None => Self::Usage("/top <1-10>"),
            },
            ("/top", None) => Self::Usage("/top <1-10>"),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl<G: ClassifierGateway + 'static, R: AnswerRepository + 'static> {
    model: QaModel<G, R>,
    format: OutputFormat,
    top_n: usize,
}

impl<G: ClassifierGateway + 'static, R: AnswerRepository + 'static> ChatRepl<G, R> {
    /// Create a new ChatRepl
    pub fn new(model: QaModel<G, R>) -> Self {
        Self {
            model,
            format: OutputFormat::Text,
            top_n: 1,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Number of ranked answers shown per question
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("nlc-qa").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome().await;

        loop {
            match rl.readline("Q> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)).await {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn print_welcome(&self) {
        let settings = self.model.app_settings().await;
        let title = format!("{} - Chat Mode", settings.name);
        let width = title.chars().count() + 4;

        println!();
        println!("╭{}╮", "─".repeat(width));
        println!("│  {}  │", title);
        println!("╰{}╯", "─".repeat(width));
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /class <name>      - Show the answer stored for a class");
        println!("  /top <1-10>        - Answer with the N best classes");
        println!("  /classifier        - Show the classifier in use");
        println!("  /reset             - Resolve the classifier again");
        println!("  /settings          - Show application settings");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Reset => {
                self.model.reset_classifier().await;
                println!("Classifier will be resolved again on the next question.");
            }
            ReplCommand::Classifier => {
                match self.model.ensure_classifier_id().await {
                    Ok(id) => print!("{}", ConsoleFormatter::format_classifier_id(id.as_ref())),
                    Err(e) => println!("{}", e),
                }
            }
            ReplCommand::Class(class_name) => {
                let answer = self.model.ask_class_name(&class_name).await;
                self.print(&answer, ConsoleFormatter::format_answer(&answer));
            }
            ReplCommand::Top(n) => {
                self.top_n = n;
                println!("Showing the {} best answer(s).", n);
            }
            ReplCommand::Settings => {
                let settings = self.model.app_settings().await;
                self.print(&settings, ConsoleFormatter::format_settings(&settings));
            }
            ReplCommand::Usage(usage) => {
                println!("Usage: {}", usage);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&self, question: &str) {
        println!();
        if self.top_n > 1 {
            let answers = self.model.ask_top(question, Some(self.top_n)).await;
            self.print(&answers, ConsoleFormatter::format_answers(&answers));
        } else {
            let answer = self.model.ask(question).await;
            self.print(&answer, ConsoleFormatter::format_answer(&answer));
        }
        println!();
    }

    fn print<T: serde::Serialize + ?Sized>(&self, value: &T, text: String) {
        match self.format {
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(value)),
            OutputFormat::Text => print!("{}", text),
        }
    }
}
