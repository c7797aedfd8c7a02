//! Authorization gate.
//!
//! Every guarded operation passes through [`AuthorizationGate::evaluate`]
//! before it touches a repository or storage. The gate is a small per-call
//! state machine:
//!
//! ```text
//! Unauthenticated ──(no principal)──────────────────────────► Rejected
//!        │
//!   (principal)
//!        ▼
//! Authenticated ──(build ability)──► Evaluating ──(any handler false)──► Rejected
//!                                        │
//!                                 (all handlers true)
//!                                        ▼
//!                                     Allowed
//! ```
//!
//! Decisions are pure: the same principal, operation and target always give
//! the same outcome, and nothing is retried or cached between calls.

use crate::domain::authorization::{
    Ability, AbilityBuilder, AuthorizationError, PolicyHandler, RuleTable, SubjectRef,
};
use crate::domain::foundation::Principal;

/// Whether an operation reads or changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Command,
}

/// An operation together with the policy handlers it requires.
///
/// Declared once as a constant (see `application::operations`), never
/// computed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardedOperation {
    pub name: &'static str,
    pub kind: OperationKind,
    pub policies: &'static [PolicyHandler],
}

impl GuardedOperation {
    pub const fn query(name: &'static str, policies: &'static [PolicyHandler]) -> Self {
        Self {
            name,
            kind: OperationKind::Query,
            policies,
        }
    }

    pub const fn command(name: &'static str, policies: &'static [PolicyHandler]) -> Self {
        Self {
            name,
            kind: OperationKind::Command,
            policies,
        }
    }
}

/// States of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    Authenticated,
    Evaluating,
    Allowed,
    Rejected,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Allowed | GateState::Rejected)
    }
}

/// Outcome of one evaluation, with the states it passed through.
#[derive(Debug, Clone)]
pub struct GateDecision {
    operation: &'static str,
    trail: Vec<GateState>,
    outcome: Result<Ability, AuthorizationError>,
}

impl GateDecision {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Terminal state reached.
    pub fn state(&self) -> GateState {
        self.trail.last().copied().unwrap_or(GateState::Rejected)
    }

    /// Every state visited, in order.
    pub fn trail(&self) -> &[GateState] {
        &self.trail
    }

    pub fn is_allowed(&self) -> bool {
        self.state() == GateState::Allowed
    }

    pub fn error(&self) -> Option<&AuthorizationError> {
        self.outcome.as_ref().err()
    }

    /// The ability on `Allowed`, the rejection otherwise.
    pub fn into_result(self) -> Result<Ability, AuthorizationError> {
        self.outcome
    }
}

/// Evaluates guarded operations against the rule table.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationGate {
    builder: AbilityBuilder<'static>,
}

impl AuthorizationGate {
    /// Gate over the process-wide rule table.
    pub fn new() -> Self {
        Self {
            builder: AbilityBuilder::new(),
        }
    }

    pub fn with_table(table: &'static RuleTable) -> Self {
        Self {
            builder: AbilityBuilder::with_table(table),
        }
    }

    /// Runs the gate state machine for one call.
    ///
    /// `target` is the concrete record the operation acts on, when there is
    /// one; handlers for that record's kind are checked against it so
    /// ownership conditions apply.
    pub fn evaluate(
        &self,
        principal: Option<&Principal>,
        operation: &GuardedOperation,
        target: Option<&SubjectRef>,
    ) -> GateDecision {
        let mut trail = vec![GateState::Unauthenticated];

        let Some(principal) = principal else {
            trail.push(GateState::Rejected);
            return GateDecision {
                operation: operation.name,
                trail,
                outcome: Err(AuthorizationError::NotAuthenticated {
                    operation: operation.name,
                }),
            };
        };

        trail.push(GateState::Authenticated);
        let ability = self.builder.build(principal);
        trail.push(GateState::Evaluating);

        let failed = operation.policies.iter().find(|policy| match target {
            Some(target) => !policy.handle_for(&ability, target),
            None => !policy.handle(&ability),
        });

        let outcome = match failed {
            Some(policy) => {
                trail.push(GateState::Rejected);
                Err(AuthorizationError::Forbidden {
                    operation: operation.name,
                    policy: *policy,
                })
            }
            None => {
                trail.push(GateState::Allowed);
                Ok(ability)
            }
        };

        GateDecision {
            operation: operation.name,
            trail,
            outcome,
        }
    }

    /// Shorthand for `evaluate(..).into_result()`.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        operation: &GuardedOperation,
        target: Option<&SubjectRef>,
    ) -> Result<Ability, AuthorizationError> {
        self.evaluate(principal, operation, target).into_result()
    }
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new()
    }
}
