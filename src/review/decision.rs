use crate::review::{ReviewError, Role, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Role(Role),
    Done,
}

/// Maps the step after a role ran to the next role, or `Done`.
///
/// `Input` and `Review` have no route: coder is always followed directly by peer.
pub fn decide_next(step: Step) -> Result<Route, ReviewError> {
    match step {
        Step::Improvisation => Ok(Route::Role(Role::Coder)),
        Step::Approval => Ok(Route::Role(Role::Manager)),
        Step::Approved => Ok(Route::Done),
        Step::Input | Step::Review => Err(ReviewError::UnroutableStep { step }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_each_peer_decision() {
        assert_eq!(
            decide_next(Step::Improvisation),
            Ok(Route::Role(Role::Coder))
        );
        assert_eq!(decide_next(Step::Approval), Ok(Route::Role(Role::Manager)));
        assert_eq!(decide_next(Step::Approved), Ok(Route::Done));
    }

    #[test]
    fn intermediate_steps_are_rejected() {
        for step in [Step::Input, Step::Review] {
            assert_eq!(
                decide_next(step),
                Err(ReviewError::UnroutableStep { step })
            );
        }
    }
}
