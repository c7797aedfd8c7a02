//! Accounts: administrators, customers and customer carts.

mod admin;
mod cart;
mod customer;
mod errors;
mod profile;

pub use admin::Admin;
pub use cart::CartItem;
pub use customer::Customer;
pub use errors::AccountError;
pub use profile::{
    asset_public_id, default_user_name, normalize_email, validate_password, AccountProfile,
    ProfileChanges, DEFAULT_AVATAR_URL, MIN_PASSWORD_LENGTH,
};
