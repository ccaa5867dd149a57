use crate::session::Session;

/// Screen group the UI is about to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Ride screens; need a full session.
    Protected,
    /// Login and registration screens.
    Onboarding,
    /// Confirmation-code screen.
    Confirm,
}

/// Entry point the UI is sent to instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect(Route),
}

impl GateDecision {
    #[must_use]
    pub fn redirect_target(self) -> Option<Route> {
        match self {
            Self::Proceed => None,
            Self::Redirect(route) => Some(route),
        }
    }
}

/// Pure routing table; the controller handles the stale-key cleanup.
pub(super) fn decide(session: &Session, destination: Destination) -> GateDecision {
    match (destination, session) {
        (Destination::Protected, Session::Authenticated { .. }) => GateDecision::Proceed,
        (Destination::Protected, _) => GateDecision::Redirect(Route::Login),

        (Destination::Onboarding, Session::Authenticated { .. })
        | (Destination::Confirm, Session::Authenticated { .. }) => {
            GateDecision::Redirect(Route::Home)
        }
        (Destination::Onboarding, Session::Pending { .. }) => {
            GateDecision::Redirect(Route::Confirm)
        }
        (Destination::Onboarding, Session::Empty) => GateDecision::Proceed,

        (Destination::Confirm, Session::Pending { .. }) => GateDecision::Proceed,
        (Destination::Confirm, Session::Empty) => GateDecision::Redirect(Route::Login),
    }
}
