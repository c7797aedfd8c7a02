//! Named single-permission checks attached to operations.

use std::fmt;

use super::{Ability, Action, SubjectRef, SubjectType};

/// A fixed (action, subject type) check.
///
/// Handlers hold no instance context. When an operation targets a concrete
/// record, the gate passes it to [`PolicyHandler::handle_for`] so ownership
/// conditions in the ability can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolicyHandler {
    pub action: Action,
    pub subject: SubjectType,
}

impl PolicyHandler {
    pub const fn new(action: Action, subject: SubjectType) -> Self {
        Self { action, subject }
    }

    pub fn handle(&self, ability: &Ability) -> bool {
        ability.can(self.action, self.subject)
    }

    /// Checks against `target` when it is a record of this handler's kind,
    /// otherwise falls back to the type-level check.
    pub fn handle_for(&self, ability: &Ability, target: &SubjectRef) -> bool {
        if target.subject_type() == Some(self.subject) {
            ability.can(self.action, target.clone())
        } else {
            self.handle(ability)
        }
    }

    // Admin
    pub const CREATE_ADMIN: Self = Self::new(Action::Create, SubjectType::Admin);
    pub const READ_ADMIN: Self = Self::new(Action::Read, SubjectType::Admin);
    pub const UPDATE_ADMIN: Self = Self::new(Action::Update, SubjectType::Admin);
    pub const DELETE_ADMIN: Self = Self::new(Action::Delete, SubjectType::Admin);

    // Customer
    pub const CREATE_CUSTOMER: Self = Self::new(Action::Create, SubjectType::Customer);
    pub const READ_CUSTOMER: Self = Self::new(Action::Read, SubjectType::Customer);
    pub const UPDATE_CUSTOMER: Self = Self::new(Action::Update, SubjectType::Customer);
    pub const DELETE_CUSTOMER: Self = Self::new(Action::Delete, SubjectType::Customer);

    // Cart
    pub const READ_CART: Self = Self::new(Action::Read, SubjectType::Cart);

    // Product
    pub const CREATE_PRODUCT: Self = Self::new(Action::Create, SubjectType::Product);
    pub const READ_PRODUCT: Self = Self::new(Action::Read, SubjectType::Product);
    pub const UPDATE_PRODUCT: Self = Self::new(Action::Update, SubjectType::Product);
    pub const DELETE_PRODUCT: Self = Self::new(Action::Delete, SubjectType::Product);

    // Employee
    pub const CREATE_EMPLOYEE: Self = Self::new(Action::Create, SubjectType::Employee);
    pub const READ_EMPLOYEE: Self = Self::new(Action::Read, SubjectType::Employee);
    pub const UPDATE_EMPLOYEE: Self = Self::new(Action::Update, SubjectType::Employee);
    pub const DELETE_EMPLOYEE: Self = Self::new(Action::Delete, SubjectType::Employee);

    // Attendance
    pub const CREATE_ATTENDANCE: Self = Self::new(Action::Create, SubjectType::Attendance);
    pub const READ_ATTENDANCE: Self = Self::new(Action::Read, SubjectType::Attendance);
    pub const UPDATE_ATTENDANCE: Self = Self::new(Action::Update, SubjectType::Attendance);

    // Sale
    pub const CREATE_SALE: Self = Self::new(Action::Create, SubjectType::Sale);
    pub const READ_SALE: Self = Self::new(Action::Read, SubjectType::Sale);
    pub const UPDATE_SALE: Self = Self::new(Action::Update, SubjectType::Sale);
    pub const DELETE_SALE: Self = Self::new(Action::Delete, SubjectType::Sale);
}

impl fmt::Display for PolicyHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::authorization::AbilityBuilder;
    use crate::domain::foundation::Principal;

    fn ability(id: &str, role: &str) -> Ability {
        AbilityBuilder::new().build(&Principal::from_claims(id, Some(role)).unwrap())
    }

    #[test]
    fn customer_42_walkthrough() {
        let ability = ability("42", "USER");

        assert!(PolicyHandler::READ_PRODUCT.handle(&ability));
        assert!(!PolicyHandler::DELETE_PRODUCT.handle(&ability));

        let own = SubjectRef::instance(SubjectType::Customer, "42");
        let other = SubjectRef::instance(SubjectType::Customer, "99");
        assert!(PolicyHandler::UPDATE_CUSTOMER.handle_for(&ability, &own));
        assert!(!PolicyHandler::UPDATE_CUSTOMER.handle_for(&ability, &other));
    }

    #[test]
    fn type_level_update_passes_for_conditional_grant() {
        let ability = ability("42", "USER");
        assert!(PolicyHandler::UPDATE_CUSTOMER.handle(&ability));
    }

    #[test]
    fn target_of_another_kind_falls_back_to_type_check() {
        let ability = ability("42", "USER");
        let customer = SubjectRef::instance(SubjectType::Customer, "42");
        assert!(PolicyHandler::READ_CART.handle_for(&ability, &customer));
        assert!(!PolicyHandler::UPDATE_PRODUCT.handle_for(&ability, &customer));
    }

    #[test]
    fn admin_passes_every_handler() {
        let ability = ability("a1", "ADMIN");
        let target = SubjectRef::instance(SubjectType::Admin, "a2");
        for handler in [
            PolicyHandler::DELETE_ADMIN,
            PolicyHandler::CREATE_PRODUCT,
            PolicyHandler::DELETE_EMPLOYEE,
            PolicyHandler::UPDATE_SALE,
        ] {
            assert!(handler.handle(&ability));
            assert!(handler.handle_for(&ability, &target));
        }
    }

    #[test]
    fn users_cannot_touch_staff_or_sales() {
        let ability = ability("42", "USER");
        assert!(!PolicyHandler::CREATE_EMPLOYEE.handle(&ability));
        assert!(!PolicyHandler::UPDATE_ATTENDANCE.handle(&ability));
        assert!(!PolicyHandler::CREATE_SALE.handle(&ability));
        assert!(PolicyHandler::READ_SALE.handle(&ability));
    }

    #[test]
    fn displays_action_and_subject() {
        assert_eq!(PolicyHandler::DELETE_PRODUCT.to_string(), "delete ProductModel");
    }
}
