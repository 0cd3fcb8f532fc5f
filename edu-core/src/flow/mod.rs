//! The guided "AI pass" purchase flow.
//!
//! A linear four-step wizard:
//!
//! | Step | Collects |
//! |------|----------|
//! | 1. `Subject` | subject to explore |
//! | 2. `ExplorationDetail` | nothing; confirms the exploration topic |
//! | 3. `Universities` | target university / major pairs |
//! | 4. `PassSelection` | one of the three passes |
//!
//! Each step moves only to its neighbour. Leaving `PassSelection` forward
//! requires a pass and produces a single [`CheckoutLine`] for the purchase
//! screen. Missing subject or dream never block progress; they are replaced
//! by placeholder text in the checkout description.
//!
//! # Example
//!
//! ```
//! use edu_core::flow::{GuidedFlow, TargetUniversity, Transition};
//! # use edu_core::{Pass, PassIcon, Service};
//! # use rust_decimal_macros::dec;
//! # let passes: Vec<Pass> = (1..=3).map(|id| Pass {
//! #     id, title: format!("pass {id}"), description: String::new(),
//! #     benefits: vec![], is_best: id == 1, icon: PassIcon::Blue,
//! # }).collect();
//! # let services: Vec<Service> = (1..=6).map(|id| Service {
//! #     id, title: format!("service {id}"), description: String::new(),
//! #     price: "10,000".to_string(), discount: dec!(0.1),
//! # }).collect();
//!
//! let mut flow = GuidedFlow::new(passes, services);
//! flow.select_subject("물리학");
//! flow.next().unwrap();
//! flow.next().unwrap();
//! flow.add_university(TargetUniversity::new("서울대", "의예과"));
//! flow.next().unwrap();
//! flow.set_dream("의사");
//! flow.select_pass(1).unwrap();
//!
//! let Transition::Checkout(purchase) = flow.next().unwrap() else {
//!     panic!("expected checkout");
//! };
//! let line = &purchase.selected_cart_items[0];
//! assert_eq!(line.service.id, 4);
//! assert_eq!(line.description, vec!["물리학", "의사", "서울대 - 의예과"]);
//! ```

mod state;

pub use state::{
    DREAM_PLACEHOLDER, FlowState, FlowStep, SUBJECT_PLACEHOLDER, TargetUniversity,
    UNIVERSITY_PLACEHOLDER,
};

use thiserror::Error;
use tracing::{error, info};

use crate::error::ErrorClass;
use crate::models::{CheckoutLine, Pass, Service};
use crate::navigation::PurchaseState;

/// Fixed pass → service associations.
///
/// | Pass | Service |
/// |------|---------|
/// | 1 종합 성장 패스 | 4 |
/// | 2 진로 성장 패스 | 5 |
/// | 3 학업 탐구 패스 | 6 |
pub const PASS_SERVICE_MAP: [(u32, u32); 3] = [(1, 4), (2, 5), (3, 6)];

/// Looks up the service sold under `pass_id`.
pub fn service_for_pass(pass_id: u32) -> Option<u32> {
    PASS_SERVICE_MAP
        .iter()
        .find(|(pass, _)| *pass == pass_id)
        .map(|(_, service)| *service)
}

/// Errors raised while driving the guided flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// "Next" was pressed on the pass step without choosing a pass.
    #[error("pass required")]
    PassRequired,

    /// The pass id is not offered by the pass catalog.
    #[error("pass {0} is not offered")]
    UnknownPass(u32),

    /// The pass id has no entry in [`PASS_SERVICE_MAP`].
    #[error("pass {0} has no service mapping")]
    UnmappedPass(u32),

    /// The mapped service is missing from the service catalog.
    #[error("service {service_id} for pass {pass_id} is missing from the catalog")]
    ServiceMissing { pass_id: u32, service_id: u32 },

    /// The flow already handed off to checkout.
    #[error("flow is already complete")]
    Finished,
}

impl FlowError {
    pub fn class(&self) -> ErrorClass {
        match self {
            FlowError::PassRequired | FlowError::UnknownPass(_) | FlowError::Finished => {
                ErrorClass::Validation
            }
            FlowError::ServiceMissing { .. } => ErrorClass::Data,
            FlowError::UnmappedPass(_) => ErrorClass::InvariantViolation,
        }
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            FlowError::PassRequired => "패스를 선택해주세요.",
            FlowError::UnknownPass(_) => "선택할 수 없는 패스입니다.",
            FlowError::UnmappedPass(_) | FlowError::ServiceMissing { .. } => {
                "해당 패스에 맞는 서비스를 찾을 수 없습니다."
            }
            FlowError::Finished => "이미 완료된 단계입니다.",
        }
    }
}

/// Outcome of a successful step change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The flow is now on the given step.
    Moved(FlowStep),
    /// "Previous" on the first step; the caller should leave the flow and
    /// drop it.
    Exited,
    /// The flow completed; hand this to the purchase screen.
    Checkout(PurchaseState),
}

/// Step machine plus the state collected along the way.
#[derive(Debug, Clone)]
pub struct GuidedFlow {
    step: FlowStep,
    state: FlowState,
    dream: Option<String>,
    passes: Vec<Pass>,
    services: Vec<Service>,
}

impl GuidedFlow {
    /// Starts a flow at `Subject` with empty state.
    pub fn new(
        passes: Vec<Pass>,
        services: Vec<Service>,
    ) -> Self {
        Self::with_state(FlowStep::Subject, FlowState::default(), passes, services)
    }

    /// Resumes a flow at `step` with previously collected `state`.
    pub fn with_state(
        step: FlowStep,
        state: FlowState,
        passes: Vec<Pass>,
        services: Vec<Service>,
    ) -> Self {
        Self {
            step,
            state,
            dream: None,
            passes,
            services,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn is_complete(&self) -> bool {
        self.step == FlowStep::Complete
    }

    pub fn select_subject(
        &mut self,
        subject: impl Into<String>,
    ) {
        self.state.selected_subject = subject.into();
    }

    pub fn set_universities(
        &mut self,
        universities: Vec<TargetUniversity>,
    ) {
        self.state.target_universities = universities;
    }

    pub fn add_university(
        &mut self,
        university: TargetUniversity,
    ) {
        self.state.target_universities.push(university);
    }

    /// The dream shown in the checkout description. Read from the profile
    /// when the pass step is shown; not part of [`FlowState`].
    pub fn set_dream(
        &mut self,
        dream: impl Into<String>,
    ) {
        self.dream = Some(dream.into());
    }

    /// Chooses a pass offered by the pass catalog.
    ///
    /// # Errors
    ///
    /// [`FlowError::UnknownPass`] if no pass has this id; the current choice
    /// is kept.
    pub fn select_pass(
        &mut self,
        pass_id: u32,
    ) -> Result<(), FlowError> {
        if !self.passes.iter().any(|p| p.id == pass_id) {
            return Err(FlowError::UnknownPass(pass_id));
        }
        self.state.selected_pass = Some(pass_id);
        Ok(())
    }

    /// Moves forward one step, completing the flow from `PassSelection`.
    ///
    /// # Errors
    ///
    /// * [`FlowError::PassRequired`] on `PassSelection` with no pass chosen;
    ///   step and state are unchanged.
    /// * [`FlowError::UnmappedPass`] if the chosen pass has no service
    ///   mapping; the choice is cleared and the flow stays on
    ///   `PassSelection`.
    /// * [`FlowError::ServiceMissing`] if the mapped service is not in the
    ///   catalog.
    /// * [`FlowError::Finished`] once the flow is complete.
    pub fn next(&mut self) -> Result<Transition, FlowError> {
        match self.step {
            FlowStep::Complete => Err(FlowError::Finished),
            FlowStep::PassSelection => self.complete(),
            step => {
                // `next()` is `Some` for every step before PassSelection.
                let next = step.next().ok_or(FlowError::Finished)?;
                self.step = next;
                Ok(Transition::Moved(next))
            }
        }
    }

    /// Moves back one step; leaves the flow from `Subject`.
    pub fn previous(&mut self) -> Result<Transition, FlowError> {
        match self.step {
            FlowStep::Complete => Err(FlowError::Finished),
            FlowStep::Subject => Ok(Transition::Exited),
            step => {
                let prev = step.previous().ok_or(FlowError::Finished)?;
                self.step = prev;
                Ok(Transition::Moved(prev))
            }
        }
    }

    fn complete(&mut self) -> Result<Transition, FlowError> {
        let pass_id = self.state.selected_pass.ok_or(FlowError::PassRequired)?;

        let Some(service_id) = service_for_pass(pass_id) else {
            error!(pass_id, "pass has no service mapping, aborting checkout");
            self.state.selected_pass = None;
            return Err(FlowError::UnmappedPass(pass_id));
        };

        let service = self
            .services
            .iter()
            .find(|s| s.id == service_id)
            .cloned()
            .ok_or(FlowError::ServiceMissing {
                pass_id,
                service_id,
            })?;

        let line = CheckoutLine {
            id: service.id,
            service,
            description: self.state.describe(self.dream.as_deref()),
        };

        info!(pass_id, service_id, "guided flow complete");
        self.step = FlowStep::Complete;
        Ok(Transition::Checkout(PurchaseState::single(line)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::PassIcon;

    fn passes(ids: &[u32]) -> Vec<Pass> {
        ids.iter()
            .map(|&id| Pass {
                id,
                title: format!("pass {id}"),
                description: String::new(),
                benefits: vec![],
                is_best: false,
                icon: PassIcon::Green,
            })
            .collect()
    }

    fn services() -> Vec<Service> {
        (1..=6)
            .map(|id| Service {
                id,
                title: format!("service {id}"),
                description: String::new(),
                price: "100,000".to_string(),
                discount: dec!(0.1),
            })
            .collect()
    }

    fn flow_at_pass_step() -> GuidedFlow {
        GuidedFlow::with_state(
            FlowStep::PassSelection,
            FlowState::default(),
            passes(&[1, 2, 3]),
            services(),
        )
    }

    // =========================================================================
    // mapping tests
    // =========================================================================

    #[test]
    fn pass_map_covers_three_passes() {
        assert_eq!(service_for_pass(1), Some(4));
        assert_eq!(service_for_pass(2), Some(5));
        assert_eq!(service_for_pass(3), Some(6));
        assert_eq!(service_for_pass(4), None);
    }

    // =========================================================================
    // navigation tests
    // =========================================================================

    #[test]
    fn next_walks_to_pass_selection() {
        let mut flow = GuidedFlow::new(passes(&[1, 2, 3]), services());

        assert_eq!(flow.next(), Ok(Transition::Moved(FlowStep::ExplorationDetail)));
        assert_eq!(flow.next(), Ok(Transition::Moved(FlowStep::Universities)));
        assert_eq!(flow.next(), Ok(Transition::Moved(FlowStep::PassSelection)));
        assert_eq!(flow.step(), FlowStep::PassSelection);
    }

    #[test]
    fn previous_returns_to_prior_step_only() {
        let mut flow = flow_at_pass_step();

        assert_eq!(flow.previous(), Ok(Transition::Moved(FlowStep::Universities)));
        assert_eq!(flow.previous(), Ok(Transition::Moved(FlowStep::ExplorationDetail)));
        assert_eq!(flow.previous(), Ok(Transition::Moved(FlowStep::Subject)));
        assert_eq!(flow.previous(), Ok(Transition::Exited));
        assert_eq!(flow.step(), FlowStep::Subject);
    }

    #[test]
    fn going_back_keeps_collected_state() {
        let mut flow = GuidedFlow::new(passes(&[1, 2, 3]), services());
        flow.select_subject("생명과학");
        flow.next().unwrap();
        flow.previous().unwrap();

        assert_eq!(flow.state().selected_subject, "생명과학");
    }

    // =========================================================================
    // pass selection tests
    // =========================================================================

    #[test]
    fn next_without_pass_stays_and_keeps_state() {
        let mut flow = flow_at_pass_step();
        let before = flow.state().clone();

        let err = flow.next().unwrap_err();

        assert_eq!(err, FlowError::PassRequired);
        assert_eq!(err.class(), ErrorClass::Validation);
        assert_eq!(flow.step(), FlowStep::PassSelection);
        assert_eq!(flow.state(), &before);
    }

    #[test]
    fn select_unknown_pass_is_rejected() {
        let mut flow = flow_at_pass_step();
        flow.select_pass(2).unwrap();

        assert_eq!(flow.select_pass(9), Err(FlowError::UnknownPass(9)));
        assert_eq!(flow.state().selected_pass, Some(2));
    }

    #[test]
    fn unmapped_pass_is_an_invariant_violation() {
        let mut flow = GuidedFlow::with_state(
            FlowStep::PassSelection,
            FlowState::default(),
            passes(&[1, 2, 3, 4]),
            services(),
        );
        flow.select_pass(4).unwrap();

        let err = flow.next().unwrap_err();

        assert_eq!(err, FlowError::UnmappedPass(4));
        assert!(err.class().is_fatal());
        assert_eq!(flow.step(), FlowStep::PassSelection);
        assert_eq!(flow.state().selected_pass, None);
    }

    #[test]
    fn missing_service_is_a_data_error() {
        let mut flow = GuidedFlow::with_state(
            FlowStep::PassSelection,
            FlowState::default(),
            passes(&[1, 2, 3]),
            services().into_iter().filter(|s| s.id != 5).collect(),
        );
        flow.select_pass(2).unwrap();

        let err = flow.next().unwrap_err();

        assert_eq!(
            err,
            FlowError::ServiceMissing {
                pass_id: 2,
                service_id: 5
            }
        );
        assert_eq!(err.class(), ErrorClass::Data);
        assert_eq!(flow.step(), FlowStep::PassSelection);
    }

    // =========================================================================
    // completion tests
    // =========================================================================

    #[test]
    fn completion_synthesizes_checkout_line() {
        let mut flow = flow_at_pass_step();
        flow.select_subject("물리학");
        flow.set_universities(vec![TargetUniversity::new("서울대", "의예과")]);
        flow.set_dream("의사");
        flow.select_pass(1).unwrap();

        let transition = flow.next().unwrap();

        let Transition::Checkout(purchase) = transition else {
            panic!("expected checkout, got {transition:?}");
        };
        assert_eq!(purchase.selected_cart_items.len(), 1);
        let line = &purchase.selected_cart_items[0];
        assert_eq!(line.id, 4);
        assert_eq!(line.service.id, 4);
        assert_eq!(line.description, vec!["물리학", "의사", "서울대 - 의예과"]);
        assert!(flow.is_complete());
    }

    #[test]
    fn completion_without_subject_uses_placeholder() {
        let mut flow = flow_at_pass_step();
        flow.select_pass(3).unwrap();

        let Ok(Transition::Checkout(purchase)) = flow.next() else {
            panic!("expected checkout");
        };

        let line = &purchase.selected_cart_items[0];
        assert_eq!(line.service.id, 6);
        assert_eq!(
            line.description,
            vec![SUBJECT_PLACEHOLDER, DREAM_PLACEHOLDER, UNIVERSITY_PLACEHOLDER]
        );
    }

    #[test]
    fn complete_flow_rejects_further_moves() {
        let mut flow = flow_at_pass_step();
        flow.select_pass(2).unwrap();
        flow.next().unwrap();

        assert_eq!(flow.next(), Err(FlowError::Finished));
        assert_eq!(flow.previous(), Err(FlowError::Finished));
    }
}
