//! Sale repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmployeeId, SaleId};
use crate::domain::sales::Sale;

/// Repository port for the sales ledger.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn save(&self, sale: &Sale) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `SaleNotFound` if the sale doesn't exist
    async fn update(&self, sale: &Sale) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError>;

    /// All sales, newest first.
    async fn list(&self) -> Result<Vec<Sale>, DomainError>;

    async fn list_by_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Sale>, DomainError>;

    /// # Errors
    ///
    /// - `SaleNotFound` if the sale doesn't exist
    async fn delete(&self, id: &SaleId) -> Result<(), DomainError>;
}
