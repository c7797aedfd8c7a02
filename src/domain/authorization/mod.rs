//! Role-based authorization.
//!
//! A static [`RuleTable`] maps roles to grants and denies. For each request
//! the [`AbilityBuilder`] projects the table onto one [`Principal`],
//! producing an [`Ability`] that answers `can(action, subject)`. Operations
//! name the checks they need as [`PolicyHandler`] values; the gate in
//! `application::authorization` evaluates them.
//!
//! ```text
//! Principal ──► AbilityBuilder ──► Ability ──► PolicyHandler::handle ──► bool
//!                    ▲
//!               RULE_TABLE
//! ```
//!
//! [`Principal`]: crate::domain::foundation::Principal

mod ability;
mod action;
mod error;
mod policy_handler;
mod rule;
mod rule_table;
mod subject;

pub use ability::{Ability, AbilityBuilder};
pub use action::Action;
pub use error::AuthorizationError;
pub use policy_handler::PolicyHandler;
pub use rule::{Condition, Rule, RuleKind, RuleSubject};
pub use rule_table::{RuleTable, RULE_TABLE};
pub use subject::{Subject, SubjectRef, SubjectType};
