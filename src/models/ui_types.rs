use super::analysis_types::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileChosen,
    Analyzing,
    Result(AnalysisResult),
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::FileChosen => "file-chosen",
            UiState::Analyzing => "analyzing",
            UiState::Result(_) => "result",
        }
    }
}

/// What the modal shows. Derived from `UiState`, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalView<'a> {
    Hidden,
    Progress,
    Outcome(&'a AnalysisResult),
}

impl<'a> ModalView<'a> {
    pub fn of(state: &'a UiState) -> Self {
        match state {
            UiState::Idle | UiState::FileChosen => ModalView::Hidden,
            UiState::Analyzing => ModalView::Progress,
            UiState::Result(result) => ModalView::Outcome(result),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, ModalView::Hidden)
    }
}

/// `0.87` -> `"87.0%"`. Input is clamped to [0, 1] so the text stays in [0, 100].
pub fn format_confidence(confidence: f64) -> String {
    let clamped = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("{:.1}%", clamped * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_renders_one_decimal() {
        assert_eq!(format_confidence(0.87), "87.0%");
        assert_eq!(format_confidence(0.9534), "95.3%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.0), "0.0%");
    }

    #[test]
    fn confidence_never_leaves_percent_range() {
        assert_eq!(format_confidence(1.7), "100.0%");
        assert_eq!(format_confidence(-0.2), "0.0%");
        assert_eq!(format_confidence(f64::NAN), "0.0%");
    }

    #[test]
    fn modal_visible_only_while_analyzing_or_showing_result() {
        let result = UiState::Result(AnalysisResult::failure("boom"));
        assert!(!ModalView::of(&UiState::Idle).is_visible());
        assert!(!ModalView::of(&UiState::FileChosen).is_visible());
        assert_eq!(ModalView::of(&UiState::Analyzing), ModalView::Progress);
        assert!(ModalView::of(&result).is_visible());
    }
}
