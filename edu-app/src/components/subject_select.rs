use edu_core::SubjectCategory;
use tracing::warn;

use super::Modal;

/// Subject picker: one detail subject out of the subject catalog.
///
/// The last saved subject is preselected when the picker opens again.
#[derive(Debug, Clone)]
pub struct SubjectSelectModal {
    categories: Vec<SubjectCategory>,
    open: bool,
    saved: Option<String>,
    draft: Option<String>,
}

impl SubjectSelectModal {
    pub fn new(categories: Vec<SubjectCategory>) -> Self {
        Self {
            categories,
            open: false,
            saved: None,
            draft: None,
        }
    }

    /// Rows of the picker table, one per subject area.
    pub fn categories(&self) -> &[SubjectCategory] {
        &self.categories
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn is_selected(
        &self,
        detail: &str,
    ) -> bool {
        self.draft.as_deref() == Some(detail)
    }

    /// Marks `detail` as the draft. Subjects outside the catalog are
    /// ignored and `false` is returned.
    pub fn select(
        &mut self,
        detail: &str,
    ) -> bool {
        if !self.open {
            return false;
        }
        if !self.categories.iter().any(|c| c.contains(detail)) {
            warn!(detail, "subject is not in the catalog");
            return false;
        }
        self.draft = Some(detail.to_string());
        true
    }
}

impl Modal for SubjectSelectModal {
    type Value = String;

    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) {
        self.draft = self.saved.clone();
        self.open = true;
    }

    fn can_save(&self) -> bool {
        self.open && self.draft.is_some()
    }

    fn save(&mut self) -> Option<String> {
        if !self.can_save() {
            return None;
        }
        let subject = self.draft.take()?;
        self.saved = Some(subject.clone());
        self.open = false;
        Some(subject)
    }

    fn cancel(&mut self) {
        self.draft = None;
        self.open = false;
    }
}
