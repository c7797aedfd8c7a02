//! Profile data shared by admin and customer accounts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Avatar assigned to new accounts and restored when an avatar is removed.
pub const DEFAULT_AVATAR_URL: &str =
    "https://res.cloudinary.com/dynasty-urban-style/image/upload/v1701686160/defaults/account_afhqmj.png";

/// Contact and display details of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub phone: Option<String>,
    pub avatar: String,
}

impl AccountProfile {
    /// Builds a validated profile. The user name defaults to "first last".
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: Option<String>,
        phone: Option<String>,
    ) -> Result<Self, ValidationError> {
        let email = normalize_email(&email.into())?;
        let first_name = required("first_name", first_name.into())?;
        let last_name = required("last_name", last_name.into())?;
        let user_name = match user_name.map(|u| u.trim().to_string()) {
            Some(u) if !u.is_empty() => u,
            _ => default_user_name(&first_name, &last_name),
        };

        Ok(Self {
            email,
            first_name,
            last_name,
            user_name,
            phone: phone.filter(|p| !p.trim().is_empty()),
            avatar: DEFAULT_AVATAR_URL.to_string(),
        })
    }

    /// Applies a partial update.
    ///
    /// When either name changes and no explicit user name is supplied, the
    /// user name is recomputed from the merged names.
    pub fn apply(&mut self, changes: ProfileChanges) -> Result<(), ValidationError> {
        let names_changed = changes.first_name.is_some() || changes.last_name.is_some();

        if let Some(first) = changes.first_name {
            self.first_name = required("first_name", first)?;
        }
        if let Some(last) = changes.last_name {
            self.last_name = required("last_name", last)?;
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone).filter(|p| !p.trim().is_empty());
        }

        match changes.user_name {
            Some(user_name) => self.user_name = required("user_name", user_name)?,
            None if names_changed => {
                self.user_name = default_user_name(&self.first_name, &self.last_name)
            }
            None => {}
        }
        Ok(())
    }

    pub fn has_default_avatar(&self) -> bool {
        self.avatar == DEFAULT_AVATAR_URL
    }
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
}

pub fn default_user_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
}

/// Lowercases and checks the basic `local@domain` shape.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid_format("email", "expected local@domain")),
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_small(
            "password",
            MIN_PASSWORD_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(())
}

/// Storage public id of an uploaded asset: the last path segment of its URL
/// without the extension.
pub fn asset_public_id(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let id = match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    };
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AccountProfile {
        AccountProfile::new("Jane@Example.com", "Jane", "Doe", None, None).unwrap()
    }

    #[test]
    fn new_profile_defaults_user_name_and_avatar() {
        let p = profile();
        assert_eq!(p.email, "jane@example.com");
        assert_eq!(p.user_name, "Jane Doe");
        assert!(p.has_default_avatar());
    }

    #[test]
    fn explicit_user_name_is_kept() {
        let p = AccountProfile::new("j@x.io", "Jane", "Doe", Some("jd".into()), None).unwrap();
        assert_eq!(p.user_name, "jd");
    }

    #[test]
    fn name_change_recomputes_user_name() {
        let mut p = profile();
        p.apply(ProfileChanges {
            last_name: Some("Smith".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.user_name, "Jane Smith");
    }

    #[test]
    fn phone_only_change_keeps_user_name() {
        let mut p = AccountProfile::new("j@x.io", "Jane", "Doe", Some("jd".into()), None).unwrap();
        p.apply(ProfileChanges {
            phone: Some("+233 20 000 0000".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.user_name, "jd");
        assert_eq!(p.phone.as_deref(), Some("+233 20 000 0000"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut p = profile();
        let err = p
            .apply(ProfileChanges {
                first_name: Some("  ".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("first_name"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(normalize_email("nope").is_err());
        assert!(normalize_email("@x.io").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }

    #[test]
    fn public_id_strips_path_and_extension() {
        assert_eq!(
            asset_public_id("https://cdn.example.com/dynasty/customer/avatar/abc123.png"),
            Some("abc123".to_string())
        );
        assert_eq!(
            asset_public_id("https://cdn.example.com/x/abc123?v=2"),
            Some("abc123".to_string())
        );
        assert_eq!(asset_public_id(""), None);
    }
}
