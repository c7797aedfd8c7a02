//! Request and response bodies for admin and customer endpoints.
//!
//! Password hashes never appear in a response.

use serde::{Deserialize, Serialize};

use crate::application::handlers::admin::{
    LoginAdminCommand, RegisterAdminCommand,
};
use crate::application::handlers::customer::{
    LoginCustomerCommand, RegisterCustomerCommand, SocialLoginCommand,
};
use crate::domain::account::{AccountProfile, Admin, CartItem, Customer, ProfileChanges};
use crate::domain::foundation::{ProductId, Role, Timestamp};
use crate::ports::IssuedToken;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<RegisterRequest> for RegisterAdminCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.user_name,
            phone: req.phone,
        }
    }
}

impl From<RegisterRequest> for RegisterCustomerCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.user_name,
            phone: req.phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginAdminCommand {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginRequest> for LoginCustomerCommand {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Profile handed over by a social identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLoginRequest {
    pub social_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<SocialLoginRequest> for SocialLoginCommand {
    fn from(req: SocialLoginRequest) -> Self {
        Self {
            social_id: req.social_id,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            avatar: req.avatar,
        }
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_parts(self) -> (ProfileChanges, Option<String>) {
        let changes = ProfileChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
            phone: self.phone,
        };
        (changes, self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Public view of an admin or customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub phone: Option<String>,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccountResponse {
    fn new(id: String, role: Role, profile: &AccountProfile, created_at: Timestamp, updated_at: Timestamp) -> Self {
        Self {
            id,
            role,
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            user_name: profile.user_name.clone(),
            phone: profile.phone.clone(),
            avatar: profile.avatar.clone(),
            social_id: None,
            created_at,
            updated_at,
        }
    }
}

impl From<&Admin> for AccountResponse {
    fn from(admin: &Admin) -> Self {
        Self::new(
            admin.id().to_string(),
            admin.role(),
            admin.profile(),
            *admin.created_at(),
            *admin.updated_at(),
        )
    }
}

impl From<&Customer> for AccountResponse {
    fn from(customer: &Customer) -> Self {
        let mut response = Self::new(
            customer.id().to_string(),
            customer.role(),
            customer.profile(),
            *customer.created_at(),
            *customer.updated_at(),
        );
        response.social_id = customer.social_id().map(str::to_string);
        response
    }
}

/// Result of registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub expires_at: Timestamp,
    pub account: AccountResponse,
}

impl SessionResponse {
    pub fn new(token: &IssuedToken, account: AccountResponse) -> Self {
        Self {
            access_token: token.token.clone(),
            expires_at: token.expires_at,
            account,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id().to_string(),
            customer_id: item.customer_id().to_string(),
            product_id: item.product_id().to_string(),
            quantity: item.quantity(),
            created_at: *item.created_at(),
            updated_at: *item.updated_at(),
        }
    }
}
