pub mod decision;
pub mod error;
pub mod log;
pub mod roles;
pub mod runner;
pub mod state;

pub use decision::{decide_next, Route};
pub use error::ReviewError;
pub use log::ReviewLog;
pub use roles::{
    classify_peer_decision, coder, manager, parse_peer_decision, peer, InvocationOutcome,
    RoleContext, PEER_DECISIONS, PEER_DECISION_FALLBACK,
};
pub use runner::{ReviewOutcome, ReviewRunner, RoleInvocation, RunLimits};
pub use state::{ReviewState, Role, Step};
