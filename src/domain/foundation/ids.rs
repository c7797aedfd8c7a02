//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype with the usual conversions.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for an administrator account.
    AdminId
);
uuid_id!(
    /// Unique identifier for a customer account.
    CustomerId
);
uuid_id!(
    /// Unique identifier for one line in a customer's cart.
    CartItemId
);
uuid_id!(
    /// Unique identifier for a catalog product.
    ProductId
);
uuid_id!(
    /// Unique identifier for an employee.
    EmployeeId
);
uuid_id!(
    /// Unique identifier for an attendance record.
    AttendanceId
);
uuid_id!(
    /// Unique identifier for a recorded sale.
    SaleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(ProductId::new(), ProductId::new());
    }

    #[test]
    fn id_parses_from_its_display_form() {
        let id = CustomerId::new();
        let parsed: CustomerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_non_uuid() {
        assert!("not-a-uuid".parse::<SaleId>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = EmployeeId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
