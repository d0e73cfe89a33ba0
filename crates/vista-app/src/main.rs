//! Vista application binary: interactive terminal chat.
//!
//! 1. Load configuration from TOML
//! 2. Initialize tracing (RUST_LOG overrides the configured level)
//! 3. Build the conversation orchestrator with a terminal observer
//! 4. Read lines from stdin and run one turn per line

mod cli;

use std::io::Write;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use vista_action::{ActionError, Directive};
use vista_chat::{
    ConversationObserver, ConversationOrchestrator, Message, Sender, TokioTimer, TurnOutcome,
};
use vista_core::{ChatConfig, VistaConfig};
use vista_widget::WidgetDescriptor;

use cli::CliArgs;

const HELP: &str = "Commands: /reset clears the chat, /widget prints the current widget, \
/show <json> applies a directive, /quit exits.";

/// How much of the current assistant message has been printed.
#[derive(Default)]
struct Printed {
    index: Option<usize>,
    chars: usize,
    finished: bool,
}

/// Writes the streamed conversation to stdout.
#[derive(Default)]
struct TerminalObserver {
    printed: Mutex<Printed>,
}

impl TerminalObserver {
    fn print_delta(printed: &mut Printed, index: usize, message: &Message) {
        let mut out = std::io::stdout().lock();
        if printed.index != Some(index) {
            if printed.index.is_some() && !printed.finished {
                let _ = writeln!(out);
            }
            *printed = Printed {
                index: Some(index),
                ..Printed::default()
            };
            let _ = write!(out, "vista [{}]: ", message.format_time());
        }
        if printed.finished {
            return;
        }

        let visible = message.visible_text();
        let delta: String = visible.chars().skip(printed.chars).collect();
        printed.chars += delta.chars().count();
        let _ = write!(out, "{}", delta);

        if !message.streaming {
            printed.finished = true;
            let _ = writeln!(out);
        }
        let _ = out.flush();
    }
}

impl ConversationObserver for TerminalObserver {
    fn messages_changed(&self, messages: &[Message]) {
        let Ok(mut printed) = self.printed.lock() else {
            return;
        };
        if messages.is_empty() {
            *printed = Printed::default();
            return;
        }
        let index = messages.len() - 1;
        let last = &messages[index];
        if last.sender == Sender::Assistant {
            Self::print_delta(&mut printed, index, last);
        }
    }

    fn message_updated(&self, index: usize, message: &Message) {
        if message.sender != Sender::Assistant {
            return;
        }
        if let Ok(mut printed) = self.printed.lock() {
            Self::print_delta(&mut printed, index, message);
        }
    }

    fn busy_changed(&self, busy: bool) {
        tracing::debug!(busy, "Busy indicator changed");
    }

    fn directive_applied(&self, directive: &Directive) {
        if let Some(descriptor) = WidgetDescriptor::from_directive(directive) {
            let title = descriptor
                .props
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or_default();
            println!("  [{}] {}", descriptor.component_name, title);
        }
    }
}

fn print_widget(orchestrator: &ConversationOrchestrator) {
    match orchestrator.current_widget() {
        Ok(Some(descriptor)) => match serde_json::to_string_pretty(&descriptor) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize widget"),
        },
        Ok(None) => println!("No widget is shown."),
        Err(e) => tracing::error!(error = %e, "Failed to read widget state"),
    }
}

fn show_json(orchestrator: &ConversationOrchestrator, json: &str) {
    let directive: Directive = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(e) => {
            let err = ActionError::processing(Some("directive JSON"), Some(Box::new(e)));
            eprintln!("{} ({})", err, err.code());
            return;
        }
    };
    if let Err(e) = orchestrator.show_directive(directive) {
        eprintln!("{} ({})", e, e.code());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = VistaConfig::load_or_default(&config_file);

    // Tracing, on stderr so it does not interleave with the chat.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Vista v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = %config_file.display(),
        found = config_file.exists(),
        "Configuration loaded"
    );

    let chat_config = if args.no_delay {
        ChatConfig {
            max_message_length: config.chat.max_message_length,
            ..ChatConfig::instant()
        }
    } else {
        config.chat.clone()
    };

    let orchestrator = ConversationOrchestrator::new(chat_config, Arc::new(TokioTimer))
        .with_observer(Arc::new(TerminalObserver::default()));
    tracing::info!(
        widgets = ?orchestrator.registry().registered_names(),
        "Orchestrator ready"
    );

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                None
            }
        };
        let Some(line) = line else {
            break;
        };
        let input = line.trim();

        match input {
            "/quit" => break,
            "/reset" => {
                orchestrator.reset()?;
                println!("Chat cleared.");
            }
            "/widget" => print_widget(&orchestrator),
            _ if input.starts_with("/show ") => show_json(&orchestrator, &input["/show ".len()..]),
            _ => match orchestrator.submit_turn(input).await {
                TurnOutcome::Rejected(e) => eprintln!("{}", e),
                outcome => tracing::debug!(outcome = ?outcome, "Turn done"),
            },
        }
    }

    tracing::info!("Vista shut down");
    Ok(())
}
