use serde::{Deserialize, Serialize, Serializer};

pub const FAILURE_PREFIX: &str = "Failed to analyze image: ";

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success { prediction: String, confidence: f64 },
    Failure { message: String },
}

impl AnalysisResult {
    pub fn failure(cause: impl std::fmt::Display) -> Self {
        AnalysisResult::Failure {
            message: format!("{}{}", FAILURE_PREFIX, cause),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }
}

// Same shapes the server speaks: `{prediction, confidence, success: true}`
// on success, `{error, success: false}` for locally built failures.
#[derive(Serialize)]
#[serde(untagged)]
enum WireResult<'a> {
    Success {
        prediction: &'a str,
        confidence: f64,
        success: bool,
    },
    Failure {
        error: &'a str,
        success: bool,
    },
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            AnalysisResult::Success {
                prediction,
                confidence,
            } => WireResult::Success {
                prediction,
                confidence: *confidence,
                success: true,
            },
            AnalysisResult::Failure { message } => WireResult::Failure {
                error: message,
                success: false,
            },
        };
        wire.serialize(serializer)
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionBody {
    pub prediction: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    #[serde(default)]
    pub success: bool,
}

/// What a transport hands back before any classification happens.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub request_id: u64,
    pub result: AnalysisResult,
}
