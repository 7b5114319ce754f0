use crate::models::analysis_types::AnalysisResult;
use crate::models::ui_types::{format_confidence, ModalView};

pub const PROGRESS_TEXT: &str = "Analyzing your image...";

/// The modal as terminal text.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalText {
    Progress(String),
    Outcome(Vec<String>),
    Error(String),
}

pub fn render_modal(view: ModalView<'_>) -> Option<ModalText> {
    match view {
        ModalView::Hidden => None,
        ModalView::Progress => Some(ModalText::Progress(PROGRESS_TEXT.to_string())),
        ModalView::Outcome(AnalysisResult::Success {
            prediction,
            confidence,
        }) => Some(ModalText::Outcome(vec![
            prediction.clone(),
            format!("Confidence: {}", format_confidence(*confidence)),
        ])),
        ModalView::Outcome(AnalysisResult::Failure { message }) => {
            Some(ModalText::Error(message.clone()))
        }
    }
}

/// Errors go to stderr, everything else to stdout.
pub fn print_modal(view: ModalView<'_>) {
    match render_modal(view) {
        None => {}
        Some(ModalText::Progress(text)) => println!("{}", text),
        Some(ModalText::Outcome(lines)) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Some(ModalText::Error(message)) => eprintln!("{}", message),
    }
}
