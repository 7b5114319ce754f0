use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

// reqwest hides the useful part ("connection refused", "dns error") in the
// source chain, so flatten it into the message.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError {
            message: error_chain(&err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError { message: msg }
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError {
            message: msg.to_string(),
        }
    }
}

/// Joins an error and its sources with `": "`, skipping sources whose text
/// is already contained in what came before.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Why a request was abandoned before it produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    DeadlineElapsed(Duration),
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::DeadlineElapsed(after) => {
                write!(f, "Request timed out after {} ms", after.as_millis())
            }
            AbortReason::Cancelled => write!(f, "Request was cancelled"),
        }
    }
}

/// The server answered, but not with something we can show as a prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    Status(u16),
    NonJson,
    Rejected(String),
    ConfidenceOutOfRange(f64),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Status(code) => write!(f, "Server responded with status {}", code),
            ProtocolError::NonJson => write!(f, "Server returned non-JSON response"),
            ProtocolError::Rejected(reason) => write!(f, "{}", reason),
            ProtocolError::ConfidenceOutOfRange(value) => {
                write!(f, "Server returned confidence outside [0, 1]: {}", value)
            }
        }
    }
}

/// Every way a single analysis can fail. None of these leave the
/// orchestrator; they are folded into `AnalysisResult::Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    Aborted(AbortReason),
    Network(String),
    Protocol(ProtocolError),
    Parse(String),
}

impl AnalyzeError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Aborted(AbortReason::DeadlineElapsed(_)) => "timeout",
            AnalyzeError::Aborted(AbortReason::Cancelled) => "cancelled",
            AnalyzeError::Network(_) => "network",
            AnalyzeError::Protocol(_) => "protocol",
            AnalyzeError::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Aborted(reason) => write!(f, "{}", reason),
            AnalyzeError::Network(text) => write!(f, "{}", text),
            AnalyzeError::Protocol(err) => write!(f, "{}", err),
            AnalyzeError::Parse(text) => write!(f, "{}", text),
        }
    }
}

impl StdError for AnalyzeError {}

impl From<AppError> for AnalyzeError {
    fn from(err: AppError) -> Self {
        AnalyzeError::Network(err.message)
    }
}

impl From<ProtocolError> for AnalyzeError {
    fn from(err: ProtocolError) -> Self {
        AnalyzeError::Protocol(err)
    }
}
