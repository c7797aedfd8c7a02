//! The static policy rule table.
//!
//! Rules are listed per role in evaluation order. Later rules win over
//! earlier ones, so narrow denies follow the broad grants they carve into.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::foundation::Role;

use super::rule::{Rule, RuleSubject};
use super::{Action, SubjectType};

const fn on(subject: SubjectType) -> RuleSubject {
    RuleSubject::Type(subject)
}

const ALL: RuleSubject = RuleSubject::All;

const RULES: &[Rule] = &[
    // ADMIN
    Rule::allow(Role::Admin, Action::Manage, ALL),
    Rule::allow(Role::Admin, Action::Update, on(SubjectType::Admin)).owned(),
    Rule::allow(Role::Admin, Action::Delete, on(SubjectType::Admin)).owned(),
    // USER
    Rule::allow(Role::User, Action::Read, ALL),
    Rule::allow(Role::User, Action::Create, on(SubjectType::Customer)),
    Rule::allow(Role::User, Action::Update, on(SubjectType::Customer)).owned(),
    Rule::allow(Role::User, Action::Delete, on(SubjectType::Customer)).owned(),
    Rule::deny(Role::User, Action::Create, on(SubjectType::Admin)),
    Rule::deny(Role::User, Action::Create, on(SubjectType::Product)),
    Rule::deny(Role::User, Action::Update, on(SubjectType::Admin)),
    Rule::deny(Role::User, Action::Update, on(SubjectType::Product)),
    Rule::deny(Role::User, Action::Delete, on(SubjectType::Admin)),
    Rule::deny(Role::User, Action::Delete, on(SubjectType::Product)),
    // Matches only `Manage` queries, so reading employees stays allowed.
    Rule::deny(Role::User, Action::Manage, on(SubjectType::Employee)),
    // anything else
    Rule::allow(Role::Unrecognized, Action::Read, ALL),
    Rule::deny(Role::Unrecognized, Action::Manage, ALL),
];

/// Process-wide rule table, built on first use and never mutated.
pub static RULE_TABLE: Lazy<RuleTable> = Lazy::new(|| RuleTable::from_rules(RULES));

/// Rules indexed by role, each list kept in declaration order.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    by_role: HashMap<Role, Vec<Rule>>,
}

impl RuleTable {
    pub fn from_rules(rules: &[Rule]) -> Self {
        let mut by_role: HashMap<Role, Vec<Rule>> = HashMap::new();
        for rule in rules {
            by_role.entry(rule.role).or_default().push(*rule);
        }
        Self {
            rules: rules.to_vec(),
            by_role,
        }
    }

    /// Every rule, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules that apply to `role`; empty when the role has none.
    pub fn for_role(&self, role: Role) -> &[Rule] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::rule::{Condition, RuleKind};
    use crate::domain::authorization::AbilityBuilder;
    use crate::domain::foundation::Principal;

    #[test]
    fn every_role_has_rules() {
        for role in [Role::Admin, Role::User, Role::Unrecognized] {
            assert!(!RULE_TABLE.for_role(role).is_empty(), "{} has no rules", role);
        }
    }

    #[test]
    fn per_role_lists_keep_declaration_order() {
        let user = RULE_TABLE.for_role(Role::User);
        assert_eq!(user.first().map(|r| r.action), Some(Action::Read));
        let first_deny = user.iter().position(Rule::is_deny).unwrap();
        assert!(user[first_deny..].iter().all(Rule::is_deny));
    }

    #[test]
    fn ownership_conditions_only_scope_account_updates_and_deletes() {
        for rule in RULE_TABLE.rules() {
            if rule.condition == Some(Condition::OwnedByPrincipal) {
                assert!(matches!(rule.action, Action::Update | Action::Delete));
                assert!(matches!(
                    rule.subject,
                    RuleSubject::Type(SubjectType::Admin) | RuleSubject::Type(SubjectType::Customer)
                ));
                assert_eq!(rule.kind, RuleKind::Allow);
            }
        }
    }

    #[test]
    fn table_covers_all_declared_rules() {
        let indexed: usize = [Role::Admin, Role::User, Role::Unrecognized]
            .iter()
            .map(|r| RULE_TABLE.for_role(*r).len())
            .sum();
        assert_eq!(indexed, RULE_TABLE.rules().len());
    }

    #[test]
    fn employee_manage_deny_leaves_user_reads_open() {
        let ability = AbilityBuilder::new().build(&Principal::new("42", Role::User));

        // Users see staff listings and sale attributions; the deny only
        // removes the wildcard.
        assert!(ability.can(Action::Read, SubjectType::Employee));
        assert!(ability.cannot(Action::Manage, SubjectType::Employee));
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(ability.cannot(action, SubjectType::Employee), "{:?}", action);
        }
    }

    #[test]
    fn empty_table_yields_no_rules() {
        let table = RuleTable::from_rules(&[]);
        assert!(table.for_role(Role::Admin).is_empty());
    }
}
