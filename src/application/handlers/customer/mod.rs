//! Customer account, sign-in and cart handlers.

mod cart;
mod customer_avatar;
mod customer_queries;
mod delete_customer;
mod register_customer;
mod update_customer;

pub use cart::{
    AddToCartCommand, CartHandler, RemoveFromCartCommand, UpdateCartItemCommand, ViewCartQuery,
};
pub use customer_avatar::{
    DeleteCustomerAvatarCommand, DeleteCustomerAvatarHandler, UpdateCustomerAvatarCommand,
    UpdateCustomerAvatarHandler,
};
pub use customer_queries::{
    GetCustomerHandler, GetCustomerProfileHandler, GetCustomerQuery, ListCustomersHandler,
};
pub use delete_customer::{DeleteCustomerCommand, DeleteCustomerHandler};
pub use register_customer::{
    AuthenticatedCustomer, LoginCustomerCommand, LoginCustomerHandler, RegisterCustomerCommand,
    RegisterCustomerHandler, SocialLoginCommand, SocialLoginHandler,
};
pub use update_customer::{
    ResetCustomerPasswordCommand, ResetCustomerPasswordHandler, UpdateCustomerCommand,
    UpdateCustomerHandler,
};
