use edu_core::navigation::{Navigator, PurchaseState, Route};
use tracing::info;

/// In-process [`Navigator`] that records every route.
///
/// The purchase page reads its carried state with
/// [`HistoryNavigator::take_purchase_state`]; the state is handed out once.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Vec<Route>,
    pending_purchase: Option<PurchaseState>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Consumes the state carried by the most recent purchase navigation.
    pub fn take_purchase_state(&mut self) -> Option<PurchaseState> {
        self.pending_purchase.take()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(
        &mut self,
        route: Route,
    ) {
        info!(path = route.path(), "navigate");
        if let Route::Purchase(state) = &route {
            self.pending_purchase = Some(state.clone());
        }
        self.history.push(route);
    }
}
