//! Single grant/deny entries of the rule table.

use std::fmt;

use crate::domain::foundation::Role;

use super::{Action, SubjectRef, SubjectType};

/// Whether a matching rule grants or denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Allow,
    Deny,
}

/// Subject scope of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSubject {
    All,
    Type(SubjectType),
}

/// Instance-level restriction attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `instance.id == principal.id`
    OwnedByPrincipal,
}

/// One role -> action -> subject entry, optionally scoped by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub role: Role,
    pub kind: RuleKind,
    pub action: Action,
    pub subject: RuleSubject,
    pub condition: Option<Condition>,
}

impl Rule {
    pub const fn allow(role: Role, action: Action, subject: RuleSubject) -> Self {
        Self {
            role,
            kind: RuleKind::Allow,
            action,
            subject,
            condition: None,
        }
    }

    pub const fn deny(role: Role, action: Action, subject: RuleSubject) -> Self {
        Self {
            role,
            kind: RuleKind::Deny,
            action,
            subject,
            condition: None,
        }
    }

    /// Restricts the rule to records owned by the principal.
    pub const fn owned(self) -> Self {
        Self {
            condition: Some(Condition::OwnedByPrincipal),
            ..self
        }
    }

    pub fn is_deny(&self) -> bool {
        self.kind == RuleKind::Deny
    }

    /// Whether this rule applies to the query.
    ///
    /// - An allow rule on `Manage` covers every action; a deny rule on
    ///   `Manage` only covers `Manage` itself.
    /// - A rule on `all` covers every subject; a query on `all` is only
    ///   covered by rules on `all`.
    /// - Conditions are evaluated on instance queries. On type-level queries
    ///   a conditional allow applies and a conditional deny does not.
    pub fn matches(&self, action: Action, subject: &SubjectRef, principal_id: &str) -> bool {
        self.matches_action(action)
            && self.matches_subject(subject)
            && self.matches_condition(subject, principal_id)
    }

    fn matches_action(&self, action: Action) -> bool {
        match self.kind {
            RuleKind::Allow => self.action == Action::Manage || self.action == action,
            RuleKind::Deny => self.action == action,
        }
    }

    fn matches_subject(&self, subject: &SubjectRef) -> bool {
        match (self.subject, subject.subject_type()) {
            (RuleSubject::All, _) => true,
            (RuleSubject::Type(rule_type), Some(query_type)) => rule_type == query_type,
            (RuleSubject::Type(_), None) => false,
        }
    }

    fn matches_condition(&self, subject: &SubjectRef, principal_id: &str) -> bool {
        match (self.condition, subject.instance_id()) {
            (None, _) => true,
            (Some(Condition::OwnedByPrincipal), Some(id)) => id == principal_id,
            (Some(_), None) => self.kind == RuleKind::Allow,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            RuleKind::Allow => "can",
            RuleKind::Deny => "cannot",
        };
        let subject = match self.subject {
            RuleSubject::All => "all".to_string(),
            RuleSubject::Type(t) => t.to_string(),
        };
        write!(f, "{} {} {} {}", self.role, verb, self.action, subject)?;
        if self.condition.is_some() {
            f.write_str(" (own)")?;
        }
        Ok(())
    }
}
