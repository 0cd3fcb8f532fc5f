use serde::{Deserialize, Serialize};

/// Shown in place of a subject the user never picked.
pub const SUBJECT_PLACEHOLDER: &str = "선택된 과목 없음";
/// Shown in place of an empty dream on the profile.
pub const DREAM_PLACEHOLDER: &str = "선택된 꿈 없음";
/// Shown when no target university has both a name and a major.
pub const UNIVERSITY_PLACEHOLDER: &str = "선택된 대학 없음";

/// The steps of the guided purchase flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStep {
    Subject,
    ExplorationDetail,
    Universities,
    PassSelection,
    Complete,
}

impl FlowStep {
    /// 1-based position shown by the step indicator. `Complete` has none.
    pub fn number(&self) -> Option<u8> {
        match self {
            FlowStep::Subject => Some(1),
            FlowStep::ExplorationDetail => Some(2),
            FlowStep::Universities => Some(3),
            FlowStep::PassSelection => Some(4),
            FlowStep::Complete => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FlowStep::Subject => "탐구할 과목을 선택해주세요",
            FlowStep::ExplorationDetail => "탐구 내용을 확인해주세요",
            FlowStep::Universities => "목표 대학과 학과를 입력해주세요",
            FlowStep::PassSelection => "주제 추천시 사용할 이용권을 선택해주세요",
            FlowStep::Complete => "결제 페이지로 이동합니다",
        }
    }

    /// The following step; `None` from `PassSelection` (completion is not a
    /// plain move) and from `Complete`.
    pub fn next(&self) -> Option<FlowStep> {
        match self {
            FlowStep::Subject => Some(FlowStep::ExplorationDetail),
            FlowStep::ExplorationDetail => Some(FlowStep::Universities),
            FlowStep::Universities => Some(FlowStep::PassSelection),
            FlowStep::PassSelection | FlowStep::Complete => None,
        }
    }

    pub fn previous(&self) -> Option<FlowStep> {
        match self {
            FlowStep::Subject | FlowStep::Complete => None,
            FlowStep::ExplorationDetail => Some(FlowStep::Subject),
            FlowStep::Universities => Some(FlowStep::ExplorationDetail),
            FlowStep::PassSelection => Some(FlowStep::Universities),
        }
    }
}

/// A target university and the major applied for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetUniversity {
    pub name: String,
    pub major: String,
}

impl TargetUniversity {
    pub fn new(
        name: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            major: major.into(),
        }
    }

    /// `"{name} - {major}"`, or `None` if either part is blank.
    pub fn label(&self) -> Option<String> {
        let name = self.name.trim();
        let major = self.major.trim();
        if name.is_empty() || major.is_empty() {
            None
        } else {
            Some(format!("{name} - {major}"))
        }
    }
}

/// Choices accumulated across the steps of one guided flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    pub selected_subject: String,
    pub target_universities: Vec<TargetUniversity>,
    pub selected_pass: Option<u32>,
}

impl FlowState {
    pub fn subject_or_placeholder(&self) -> &str {
        let subject = self.selected_subject.trim();
        if subject.is_empty() {
            SUBJECT_PLACEHOLDER
        } else {
            subject
        }
    }

    /// Complete university/major pairs joined with `", "`.
    pub fn universities_or_placeholder(&self) -> String {
        let labels: Vec<String> = self
            .target_universities
            .iter()
            .filter_map(TargetUniversity::label)
            .collect();
        if labels.is_empty() {
            UNIVERSITY_PLACEHOLDER.to_string()
        } else {
            labels.join(", ")
        }
    }

    /// Description lines for the synthesized checkout line:
    /// subject, dream, universities.
    pub fn describe(
        &self,
        dream: Option<&str>,
    ) -> Vec<String> {
        let dream = dream
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DREAM_PLACEHOLDER);
        vec![
            self.subject_or_placeholder().to_string(),
            dream.to_string(),
            self.universities_or_placeholder(),
        ]
    }
}
