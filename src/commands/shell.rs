use crate::commands::render::print_modal;
use crate::error::AppError;
use crate::models::analysis_types::Completion;
use crate::services::fs_service;
use crate::services::orchestrator::RequestOrchestrator;
use crate::services::presentation::PresentationStateMachine;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "commands: select <path> | analyze | close | status | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Select(PathBuf),
    Analyze,
    Close,
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match verb.to_lowercase().as_str() {
        "select" | "open" => {
            if rest.is_empty() {
                return Err("select needs a path".to_string());
            }
            ShellCommand::Select(PathBuf::from(rest))
        }
        "analyze" | "a" => ShellCommand::Analyze,
        "close" | "c" => ShellCommand::Close,
        "status" | "s" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

async fn apply(machine: &mut PresentationStateMachine, command: ShellCommand) {
    match command {
        ShellCommand::Select(path) => match fs_service::load_selected_file(&path).await {
            Ok(file) => {
                if !file.looks_like_image() {
                    tracing::warn!(file = %file.name, mime = %file.mime_type, "file does not look like an image");
                }
                if file.is_empty() {
                    tracing::warn!(file = %file.name, "file is empty, the server will likely reject it");
                }
                println!("selected {} ({} bytes)", file.name, file.len());
                machine.select_file(file);
            }
            Err(err) => eprintln!("{}", err),
        },
        ShellCommand::Analyze => {
            if machine.begin_analyze().is_some() {
                print_modal(machine.modal());
            } else {
                eprintln!("nothing to analyze (state: {})", machine.state().name());
            }
        }
        ShellCommand::Close => {
            machine.close();
            println!("closed");
        }
        ShellCommand::Status => {
            let file = machine.selected_file_name().unwrap_or("-");
            println!("state: {}  file: {}", machine.state().name(), file);
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }
}

/// Line-driven stand-in for the browser page. A completion can land while
/// the user is typing; both are handled on this one task.
pub async fn run_shell(orchestrator: RequestOrchestrator) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut machine = PresentationStateMachine::new(orchestrator, tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(command)) => apply(&mut machine, command).await,
                    Ok(None) => {}
                    Err(msg) => eprintln!("{}", msg),
                }
            }
            Some(done) = rx.recv() => {
                if machine.resolve(done) {
                    print_modal(machine.modal());
                }
            }
        }
    }

    machine.close();
    Ok(())
}
