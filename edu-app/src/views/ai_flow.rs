//! Page driver for the guided "AI pass" purchase flow.
//!
//! Wraps [`GuidedFlow`] with the pieces a page needs: the subject picker,
//! the dream read from the stored profile, user-facing status messages and
//! the hand-off to a [`Navigator`].

use edu_core::flow::{FlowState, FlowStep, GuidedFlow, TargetUniversity, Transition};
use edu_core::navigation::{Navigator, Route};
use edu_core::{PassIcon, UserProfile};
use edu_data::Catalog;
use tracing::debug;

use crate::components::{Modal, SubjectSelectModal};
use crate::state::StatusMessage;

/// One selectable card on the pass step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub is_best: bool,
    pub icon: PassIcon,
    pub selected: bool,
}

pub struct AiPassFlow {
    flow: GuidedFlow,
    subject_picker: SubjectSelectModal,
    status: Option<StatusMessage>,
}

impl AiPassFlow {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            flow: GuidedFlow::new(catalog.passes.clone(), catalog.services.clone()),
            subject_picker: SubjectSelectModal::new(catalog.subjects.clone()),
            status: None,
        }
    }

    /// Takes the dream from the stored profile. A missing profile or an
    /// empty dream leaves the placeholder in the checkout description.
    pub fn load_dream(
        &mut self,
        profile: Option<&UserProfile>,
    ) {
        let dream = profile.map(|p| p.dream.as_str()).unwrap_or_default();
        self.flow.set_dream(dream);
    }

    pub fn step(&self) -> FlowStep {
        self.flow.step()
    }

    pub fn state(&self) -> &FlowState {
        self.flow.state()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn subject_picker(&self) -> &SubjectSelectModal {
        &self.subject_picker
    }

    pub fn open_subject_picker(&mut self) {
        self.subject_picker.open();
    }

    pub fn pick_subject(
        &mut self,
        detail: &str,
    ) -> bool {
        self.subject_picker.select(detail)
    }

    /// Saves the picker's choice into the flow. `false` when nothing was
    /// chosen; the picker stays open.
    pub fn confirm_subject(&mut self) -> bool {
        match self.subject_picker.save() {
            Some(subject) => {
                debug!(subject = %subject, "subject selected");
                self.flow.select_subject(subject);
                true
            }
            None => false,
        }
    }

    pub fn cancel_subject(&mut self) {
        self.subject_picker.cancel();
    }

    pub fn add_university(
        &mut self,
        name: impl Into<String>,
        major: impl Into<String>,
    ) {
        self.flow.add_university(TargetUniversity::new(name, major));
    }

    pub fn select_pass(
        &mut self,
        pass_id: u32,
    ) -> bool {
        match self.flow.select_pass(pass_id) {
            Ok(()) => {
                self.status = None;
                true
            }
            Err(e) => {
                self.status = Some(StatusMessage::from_flow_error(&e));
                false
            }
        }
    }

    pub fn pass_cards(&self) -> Vec<PassCard> {
        let selected = self.flow.state().selected_pass;
        self.flow
            .passes()
            .iter()
            .map(|pass| PassCard {
                id: pass.id,
                title: pass.title.clone(),
                description: pass.description.clone(),
                benefits: pass.benefits.clone(),
                is_best: pass.is_best,
                icon: pass.icon,
                selected: selected == Some(pass.id),
            })
            .collect()
    }

    /// "다음". On the pass step this completes the flow and navigates to
    /// the purchase page. Failures are left in [`Self::status`] and `None`
    /// is returned.
    pub fn next(
        &mut self,
        navigator: &mut dyn Navigator,
    ) -> Option<FlowStep> {
        let result = self.flow.next();
        self.apply(result, navigator)
    }

    /// "이전". On the first step this leaves the flow for the home page.
    pub fn previous(
        &mut self,
        navigator: &mut dyn Navigator,
    ) -> Option<FlowStep> {
        let result = self.flow.previous();
        self.apply(result, navigator)
    }

    fn apply(
        &mut self,
        result: Result<Transition, edu_core::flow::FlowError>,
        navigator: &mut dyn Navigator,
    ) -> Option<FlowStep> {
        match result {
            Ok(Transition::Moved(step)) => {
                self.status = None;
                Some(step)
            }
            Ok(Transition::Exited) => {
                self.status = None;
                navigator.navigate(Route::Home);
                None
            }
            Ok(Transition::Checkout(purchase)) => {
                self.status = None;
                navigator.navigate(Route::Purchase(purchase));
                Some(self.flow.step())
            }
            Err(e) => {
                self.status = Some(StatusMessage::from_flow_error(&e));
                None
            }
        }
    }
}
