//! In-memory sales ledger.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, SaleId};
use crate::domain::sales::Sale;
use crate::ports::SaleRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemorySaleRepository {
    sales: Arc<RwLock<HashMap<SaleId, Sale>>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn save(&self, sale: &Sale) -> Result<(), DomainError> {
        self.sales.write().await.insert(sale.id(), sale.clone());
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut sales = self.sales.write().await;
        match sales.get_mut(&sale.id()) {
            Some(existing) => {
                *existing = sale.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::SaleNotFound, sale.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        Ok(self.sales.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Sale>, DomainError> {
        let mut sales: Vec<Sale> = self.sales.read().await.values().cloned().collect();
        sales.sort_by_key(|s| *s.created_at().as_datetime());
        Ok(sales)
    }

    async fn list_by_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Sale>, DomainError> {
        let mut sales: Vec<Sale> = self
            .sales
            .read()
            .await
            .values()
            .filter(|s| s.employee_id() == *employee_id)
            .cloned()
            .collect();
        sales.sort_by_key(|s| *s.created_at().as_datetime());
        Ok(sales)
    }

    async fn delete(&self, id: &SaleId) -> Result<(), DomainError> {
        match self.sales.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::SaleNotFound, id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProductId;

    #[tokio::test]
    async fn lists_only_the_employees_sales() {
        let repo = InMemorySaleRepository::new();
        let seller = EmployeeId::new();
        let mine = Sale::new(SaleId::new(), ProductId::new(), seller, "GHS", 120.0, 1).unwrap();
        let theirs =
            Sale::new(SaleId::new(), ProductId::new(), EmployeeId::new(), "GHS", 80.0, 2).unwrap();
        repo.save(&mine).await.unwrap();
        repo.save(&theirs).await.unwrap();

        let listed = repo.list_by_employee(&seller).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), mine.id());
    }

    #[tokio::test]
    async fn updating_unknown_sale_is_not_found() {
        let repo = InMemorySaleRepository::new();
        let sale = Sale::new(SaleId::new(), ProductId::new(), EmployeeId::new(), "USD", 1.0, 1).unwrap();
        let err = repo.update(&sale).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SaleNotFound);
    }
}
