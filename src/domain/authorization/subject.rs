//! Protected subject kinds and references to them.

use std::fmt;

use serde::Serialize;

/// Closed enumeration of the entity kinds guarded by the ability.
///
/// Adding a kind here forces every exhaustive match over it to be revisited,
/// including the rule table tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubjectType {
    #[serde(rename = "AdminModel")]
    Admin,
    #[serde(rename = "CustomerModel")]
    Customer,
    #[serde(rename = "ProductModel")]
    Product,
    #[serde(rename = "EmployeeModel")]
    Employee,
    #[serde(rename = "AttendanceModel")]
    Attendance,
    #[serde(rename = "CartModel")]
    Cart,
    #[serde(rename = "SaleModel")]
    Sale,
}

impl SubjectType {
    pub const ALL: [SubjectType; 7] = [
        SubjectType::Admin,
        SubjectType::Customer,
        SubjectType::Product,
        SubjectType::Employee,
        SubjectType::Attendance,
        SubjectType::Cart,
        SubjectType::Sale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Admin => "AdminModel",
            SubjectType::Customer => "CustomerModel",
            SubjectType::Product => "ProductModel",
            SubjectType::Employee => "EmployeeModel",
            SubjectType::Attendance => "AttendanceModel",
            SubjectType::Cart => "CartModel",
            SubjectType::Sale => "SaleModel",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an ability query is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectRef {
    /// The `all` wildcard.
    All,
    /// Any record of the given kind.
    Type(SubjectType),
    /// One concrete record.
    Instance { subject_type: SubjectType, id: String },
}

impl SubjectRef {
    pub fn instance(subject_type: SubjectType, id: impl ToString) -> Self {
        SubjectRef::Instance {
            subject_type,
            id: id.to_string(),
        }
    }

    /// The kind this reference points at, `None` for `all`.
    pub fn subject_type(&self) -> Option<SubjectType> {
        match self {
            SubjectRef::All => None,
            SubjectRef::Type(t) => Some(*t),
            SubjectRef::Instance { subject_type, .. } => Some(*subject_type),
        }
    }

    pub fn instance_id(&self) -> Option<&str> {
        match self {
            SubjectRef::Instance { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectRef::All => f.write_str("all"),
            SubjectRef::Type(t) => write!(f, "{}", t),
            SubjectRef::Instance { subject_type, id } => write!(f, "{}({})", subject_type, id),
        }
    }
}

impl From<SubjectType> for SubjectRef {
    fn from(subject_type: SubjectType) -> Self {
        SubjectRef::Type(subject_type)
    }
}

/// Implemented by domain records that can be checked at instance level.
pub trait Subject {
    const SUBJECT_TYPE: SubjectType;

    /// Identifier compared against the principal id by ownership conditions.
    fn subject_id(&self) -> String;

    fn as_subject(&self) -> SubjectRef {
        SubjectRef::instance(Self::SUBJECT_TYPE, self.subject_id())
    }
}

impl<T: Subject> From<&T> for SubjectRef {
    fn from(record: &T) -> Self {
        record.as_subject()
    }
}
