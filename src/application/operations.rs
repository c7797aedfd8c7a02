//! Policy attachment table.
//!
//! Every guarded operation is declared here once, together with the policy
//! handlers the gate must pass before the operation runs. Handlers reference
//! these constants; nothing attaches policies at runtime.
//!
//! Public operations (customer registration, login, logout, social login,
//! product browsing) have no entry. Admin registration is guarded once the
//! first admin exists.

use crate::domain::authorization::PolicyHandler;

use super::authorization::GuardedOperation;

// Admin accounts
/// Only the very first admin may register without a principal.
pub const REGISTER_ADMIN: GuardedOperation =
    GuardedOperation::command("register_admin", &[PolicyHandler::CREATE_ADMIN]);
pub const LIST_ADMINS: GuardedOperation =
    GuardedOperation::query("list_admins", &[PolicyHandler::READ_ADMIN]);
pub const GET_ADMIN: GuardedOperation =
    GuardedOperation::query("get_admin", &[PolicyHandler::READ_ADMIN]);
pub const GET_ADMIN_PROFILE: GuardedOperation =
    GuardedOperation::query("get_admin_profile", &[PolicyHandler::READ_ADMIN]);
pub const UPDATE_ADMIN: GuardedOperation =
    GuardedOperation::command("update_admin", &[PolicyHandler::UPDATE_ADMIN]);
pub const RESET_ADMIN_PASSWORD: GuardedOperation =
    GuardedOperation::command("reset_admin_password", &[PolicyHandler::UPDATE_ADMIN]);
pub const UPDATE_ADMIN_AVATAR: GuardedOperation =
    GuardedOperation::command("update_admin_avatar", &[PolicyHandler::UPDATE_ADMIN]);
pub const DELETE_ADMIN_AVATAR: GuardedOperation =
    GuardedOperation::command("delete_admin_avatar", &[PolicyHandler::UPDATE_ADMIN]);
pub const DELETE_ADMIN: GuardedOperation =
    GuardedOperation::command("delete_admin", &[PolicyHandler::DELETE_ADMIN]);

// Customer accounts
pub const LIST_CUSTOMERS: GuardedOperation =
    GuardedOperation::query("list_customers", &[PolicyHandler::READ_CUSTOMER]);
pub const GET_CUSTOMER: GuardedOperation =
    GuardedOperation::query("get_customer", &[PolicyHandler::READ_CUSTOMER]);
pub const GET_CUSTOMER_PROFILE: GuardedOperation =
    GuardedOperation::query("get_customer_profile", &[PolicyHandler::READ_CUSTOMER]);
pub const UPDATE_CUSTOMER: GuardedOperation =
    GuardedOperation::command("update_customer", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const RESET_CUSTOMER_PASSWORD: GuardedOperation =
    GuardedOperation::command("reset_customer_password", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const UPDATE_CUSTOMER_AVATAR: GuardedOperation =
    GuardedOperation::command("update_customer_avatar", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const DELETE_CUSTOMER_AVATAR: GuardedOperation =
    GuardedOperation::command("delete_customer_avatar", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const DELETE_CUSTOMER: GuardedOperation =
    GuardedOperation::command("delete_customer", &[PolicyHandler::DELETE_CUSTOMER]);

// Carts (target: the owning customer)
pub const VIEW_CART: GuardedOperation = GuardedOperation::query(
    "view_cart",
    &[PolicyHandler::READ_CART, PolicyHandler::UPDATE_CUSTOMER],
);
pub const ADD_TO_CART: GuardedOperation =
    GuardedOperation::command("add_to_cart", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const UPDATE_CART_ITEM: GuardedOperation =
    GuardedOperation::command("update_cart_item", &[PolicyHandler::UPDATE_CUSTOMER]);
pub const REMOVE_FROM_CART: GuardedOperation =
    GuardedOperation::command("remove_from_cart", &[PolicyHandler::UPDATE_CUSTOMER]);

// Products
pub const CREATE_PRODUCT: GuardedOperation =
    GuardedOperation::command("create_product", &[PolicyHandler::CREATE_PRODUCT]);
pub const UPDATE_PRODUCT: GuardedOperation =
    GuardedOperation::command("update_product", &[PolicyHandler::UPDATE_PRODUCT]);
pub const UPLOAD_PRODUCT_IMAGE: GuardedOperation =
    GuardedOperation::command("upload_product_image", &[PolicyHandler::UPDATE_PRODUCT]);
pub const DELETE_PRODUCT_IMAGE: GuardedOperation =
    GuardedOperation::command("delete_product_image", &[PolicyHandler::UPDATE_PRODUCT]);
pub const DELETE_PRODUCT: GuardedOperation =
    GuardedOperation::command("delete_product", &[PolicyHandler::DELETE_PRODUCT]);

// Employees
pub const CREATE_EMPLOYEE: GuardedOperation =
    GuardedOperation::command("create_employee", &[PolicyHandler::CREATE_EMPLOYEE]);
pub const LIST_EMPLOYEES: GuardedOperation =
    GuardedOperation::query("list_employees", &[PolicyHandler::READ_EMPLOYEE]);
pub const GET_EMPLOYEE: GuardedOperation =
    GuardedOperation::query("get_employee", &[PolicyHandler::READ_EMPLOYEE]);
pub const UPDATE_EMPLOYEE: GuardedOperation =
    GuardedOperation::command("update_employee", &[PolicyHandler::UPDATE_EMPLOYEE]);
pub const UPDATE_EMPLOYEE_AVATAR: GuardedOperation =
    GuardedOperation::command("update_employee_avatar", &[PolicyHandler::UPDATE_EMPLOYEE]);
pub const DELETE_EMPLOYEE_AVATAR: GuardedOperation =
    GuardedOperation::command("delete_employee_avatar", &[PolicyHandler::UPDATE_EMPLOYEE]);
pub const DELETE_EMPLOYEE: GuardedOperation =
    GuardedOperation::command("delete_employee", &[PolicyHandler::DELETE_EMPLOYEE]);

// Attendance
pub const CLOCK_IN: GuardedOperation =
    GuardedOperation::command("clock_in", &[PolicyHandler::CREATE_ATTENDANCE]);
pub const CLOCK_OUT: GuardedOperation =
    GuardedOperation::command("clock_out", &[PolicyHandler::UPDATE_ATTENDANCE]);
pub const LIST_ATTENDANCE: GuardedOperation =
    GuardedOperation::query("list_attendance", &[PolicyHandler::READ_ATTENDANCE]);
pub const GET_ATTENDANCE: GuardedOperation =
    GuardedOperation::query("get_attendance", &[PolicyHandler::READ_ATTENDANCE]);

// Sales
pub const RECORD_SALE: GuardedOperation =
    GuardedOperation::command("record_sale", &[PolicyHandler::CREATE_SALE]);
pub const LIST_SALES: GuardedOperation =
    GuardedOperation::query("list_sales", &[PolicyHandler::READ_SALE]);
pub const GET_SALE: GuardedOperation =
    GuardedOperation::query("get_sale", &[PolicyHandler::READ_SALE]);
pub const LIST_EMPLOYEE_SALES: GuardedOperation =
    GuardedOperation::query("list_employee_sales", &[PolicyHandler::READ_SALE]);
pub const UPDATE_SALE: GuardedOperation =
    GuardedOperation::command("update_sale", &[PolicyHandler::UPDATE_SALE]);
pub const DELETE_SALE: GuardedOperation =
    GuardedOperation::command("delete_sale", &[PolicyHandler::DELETE_SALE]);

/// Every guarded operation.
pub const ALL: &[GuardedOperation] = &[
    REGISTER_ADMIN,
    LIST_ADMINS,
    GET_ADMIN,
    GET_ADMIN_PROFILE,
    UPDATE_ADMIN,
    RESET_ADMIN_PASSWORD,
    UPDATE_ADMIN_AVATAR,
    DELETE_ADMIN_AVATAR,
    DELETE_ADMIN,
    LIST_CUSTOMERS,
    GET_CUSTOMER,
    GET_CUSTOMER_PROFILE,
    UPDATE_CUSTOMER,
    RESET_CUSTOMER_PASSWORD,
    UPDATE_CUSTOMER_AVATAR,
    DELETE_CUSTOMER_AVATAR,
    DELETE_CUSTOMER,
    VIEW_CART,
    ADD_TO_CART,
    UPDATE_CART_ITEM,
    REMOVE_FROM_CART,
    CREATE_PRODUCT,
    UPDATE_PRODUCT,
    UPLOAD_PRODUCT_IMAGE,
    DELETE_PRODUCT_IMAGE,
    DELETE_PRODUCT,
    CREATE_EMPLOYEE,
    LIST_EMPLOYEES,
    GET_EMPLOYEE,
    UPDATE_EMPLOYEE,
    UPDATE_EMPLOYEE_AVATAR,
    DELETE_EMPLOYEE_AVATAR,
    DELETE_EMPLOYEE,
    CLOCK_IN,
    CLOCK_OUT,
    LIST_ATTENDANCE,
    GET_ATTENDANCE,
    RECORD_SALE,
    LIST_SALES,
    GET_SALE,
    LIST_EMPLOYEE_SALES,
    UPDATE_SALE,
    DELETE_SALE,
];

/// Looks up an operation by name.
pub fn find(name: &str) -> Option<&'static GuardedOperation> {
    ALL.iter().find(|op| op.name == name)
}
