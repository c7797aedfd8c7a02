//! Per-principal abilities and the builder that produces them.

use crate::domain::foundation::{Principal, Role};

use super::rule::{Rule, RuleKind};
use super::rule_table::{RuleTable, RULE_TABLE};
use super::{Action, SubjectRef};

/// The rules that apply to one principal, ready to be queried.
///
/// Built fresh for every request and dropped afterwards.
#[derive(Debug, Clone)]
pub struct Ability {
    principal_id: String,
    role: Role,
    rules: Vec<Rule>,
}

impl Ability {
    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether `action` is permitted on `subject`.
    ///
    /// The last matching rule decides; no matching rule means deny.
    pub fn can(&self, action: Action, subject: impl Into<SubjectRef>) -> bool {
        let subject = subject.into();
        match self.relevant_rule(action, &subject) {
            Some(rule) => rule.kind == RuleKind::Allow,
            None => false,
        }
    }

    pub fn cannot(&self, action: Action, subject: impl Into<SubjectRef>) -> bool {
        !self.can(action, subject)
    }

    /// The rule that decides the query, if any.
    pub fn relevant_rule(&self, action: Action, subject: &SubjectRef) -> Option<&Rule> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(action, subject, &self.principal_id))
    }
}

/// Turns a principal into an [`Ability`] using a rule table.
#[derive(Debug, Clone, Copy)]
pub struct AbilityBuilder<'t> {
    table: &'t RuleTable,
}

impl AbilityBuilder<'static> {
    /// Builder over the process-wide rule table.
    pub fn new() -> Self {
        Self { table: &RULE_TABLE }
    }
}

impl Default for AbilityBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> AbilityBuilder<'t> {
    pub fn with_table(table: &'t RuleTable) -> Self {
        Self { table }
    }

    pub fn build(&self, principal: &Principal) -> Ability {
        Ability {
            principal_id: principal.id.clone(),
            role: principal.role,
            rules: self.table.for_role(principal.role).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::rule::RuleSubject;
    use crate::domain::authorization::SubjectType;
    use proptest::prelude::*;

    fn ability_for(id: &str, role: &str) -> Ability {
        let principal = Principal::from_claims(id, Some(role)).unwrap();
        AbilityBuilder::new().build(&principal)
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop::sample::select(Action::ALL.to_vec())
    }

    fn any_subject_type() -> impl Strategy<Value = SubjectType> {
        prop::sample::select(SubjectType::ALL.to_vec())
    }

    fn any_role() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("ADMIN".to_string()),
            Just("USER".to_string()),
            "[A-Z]{0,8}",
        ]
    }

    #[test]
    fn admin_can_do_everything_on_every_subject() {
        let ability = ability_for("a1", "ADMIN");
        for action in Action::ALL {
            assert!(ability.can(action, SubjectRef::All));
            for subject in SubjectType::ALL {
                assert!(ability.can(action, subject), "{} {}", action, subject);
            }
        }
    }

    #[test]
    fn admin_can_update_other_admins() {
        let ability = ability_for("a1", "ADMIN");
        let other = SubjectRef::instance(SubjectType::Admin, "a2");
        assert!(ability.can(Action::Update, other.clone()));
        assert!(ability.can(Action::Delete, other));
    }

    #[test]
    fn user_ownership_scopes_customer_updates() {
        let ability = ability_for("u1", "USER");
        assert!(ability.can(Action::Update, SubjectRef::instance(SubjectType::Customer, "u1")));
        assert!(!ability.can(Action::Update, SubjectRef::instance(SubjectType::Customer, "u2")));
        assert!(ability.can(Action::Delete, SubjectRef::instance(SubjectType::Customer, "u1")));
        assert!(!ability.can(Action::Delete, SubjectRef::instance(SubjectType::Customer, "u2")));
    }

    #[test]
    fn user_deny_overrides_read_all() {
        let ability = ability_for("u1", "USER");
        assert!(ability.can(Action::Read, SubjectType::Product));
        assert!(ability.cannot(Action::Create, SubjectType::Product));
        assert!(ability.cannot(Action::Update, SubjectType::Product));
        assert!(ability.cannot(Action::Delete, SubjectType::Product));
        assert!(ability.cannot(Action::Create, SubjectType::Admin));
        assert!(ability.cannot(Action::Update, SubjectRef::instance(SubjectType::Admin, "u1")));
        assert!(ability.cannot(Action::Manage, SubjectType::Employee));
    }

    #[test]
    fn user_can_create_customers_only() {
        let ability = ability_for("u1", "USER");
        assert!(ability.can(Action::Create, SubjectType::Customer));
        assert!(ability.cannot(Action::Create, SubjectType::Employee));
        assert!(ability.cannot(Action::Create, SubjectType::Sale));
    }

    #[test]
    fn unrecognized_role_reads_but_cannot_manage() {
        let ability = ability_for("g1", "GUEST");
        assert_eq!(ability.role(), Role::Unrecognized);
        assert!(ability.cannot(Action::Manage, SubjectRef::All));
        for subject in SubjectType::ALL {
            assert!(ability.can(Action::Read, subject));
            assert!(ability.cannot(Action::Update, subject));
        }
    }

    #[test]
    fn relevant_rule_is_the_last_match() {
        let ability = ability_for("u1", "USER");
        let rule = ability
            .relevant_rule(Action::Update, &SubjectType::Product.into())
            .unwrap();
        assert!(rule.is_deny());
    }

    #[test]
    fn rule_order_decides_between_allow_and_deny() {
        let allow = Rule::allow(Role::User, Action::Read, RuleSubject::All);
        let deny = Rule::deny(Role::User, Action::Read, RuleSubject::Type(SubjectType::Sale));
        let principal = Principal::new("u1", Role::User);

        let deny_last = RuleTable::from_rules(&[allow, deny]);
        let allow_last = RuleTable::from_rules(&[deny, allow]);

        assert!(AbilityBuilder::with_table(&deny_last)
            .build(&principal)
            .cannot(Action::Read, SubjectType::Sale));
        assert!(AbilityBuilder::with_table(&allow_last)
            .build(&principal)
            .can(Action::Read, SubjectType::Sale));
    }

    #[test]
    fn role_without_rules_is_denied_everything() {
        let table = RuleTable::from_rules(&[Rule::allow(Role::Admin, Action::Manage, RuleSubject::All)]);
        let ability = AbilityBuilder::with_table(&table).build(&Principal::new("u1", Role::User));
        for action in Action::ALL {
            for subject in SubjectType::ALL {
                assert!(ability.cannot(action, subject));
            }
        }
    }

    proptest! {
        #[test]
        fn admin_is_a_superset(action in any_action(), subject in any_subject_type(), id in "[a-z0-9]{1,12}") {
            let ability = ability_for(&id, "ADMIN");
            prop_assert!(ability.can(action, subject));
            prop_assert!(ability.can(action, SubjectRef::instance(subject, "someone-else")));
        }

        #[test]
        fn building_twice_agrees_on_every_query(
            role in any_role(),
            id in "[a-z0-9]{1,12}",
            other in "[a-z0-9]{1,12}",
            action in any_action(),
            subject in any_subject_type(),
        ) {
            let principal = Principal::from_claims(&id, Some(&role)).unwrap();
            let first = AbilityBuilder::new().build(&principal);
            let second = AbilityBuilder::new().build(&principal);
            prop_assert_eq!(first.can(action, subject), second.can(action, subject));
            prop_assert_eq!(first.can(action, SubjectRef::All), second.can(action, SubjectRef::All));
            let own = SubjectRef::instance(subject, &id);
            let foreign = SubjectRef::instance(subject, &other);
            prop_assert_eq!(first.can(action, own.clone()), second.can(action, own));
            prop_assert_eq!(first.can(action, foreign.clone()), second.can(action, foreign));
        }

        #[test]
        fn no_matching_rule_means_deny(role in any_role(), action in any_action(), subject in any_subject_type()) {
            let principal = Principal::from_claims("p1", Some(&role)).unwrap();
            let ability = AbilityBuilder::new().build(&principal);
            let query = SubjectRef::from(subject);
            if ability.relevant_rule(action, &query).is_none() {
                prop_assert!(ability.cannot(action, query));
            }
        }

        #[test]
        fn users_never_touch_other_customers(id in "[a-z0-9]{1,12}", other in "[a-z0-9]{1,12}") {
            prop_assume!(id != other);
            let ability = ability_for(&id, "USER");
            let foreign = SubjectRef::instance(SubjectType::Customer, &other);
            prop_assert!(ability.cannot(Action::Update, foreign.clone()));
            prop_assert!(ability.cannot(Action::Delete, foreign));
        }
    }
}
