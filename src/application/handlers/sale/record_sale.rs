//! Recording and amending sales.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{DELETE_SALE, RECORD_SALE, UPDATE_SALE};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{EmployeeId, Principal, ProductId, SaleId};
use crate::domain::sales::{Sale, SaleChanges, SaleError};
use crate::ports::{EmployeeRepository, ProductRepository, SaleRepository};

#[derive(Debug, Clone)]
pub struct RecordSaleCommand {
    pub product_id: ProductId,
    pub employee_id: EmployeeId,
    pub currency: String,
    pub amount: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct UpdateSaleCommand {
    pub sale_id: SaleId,
    pub changes: SaleChanges,
}

#[derive(Debug, Clone)]
pub struct DeleteSaleCommand {
    pub sale_id: SaleId,
}

/// Write side of the sales ledger.
pub struct SaleCommands {
    sales: Arc<dyn SaleRepository>,
    employees: Arc<dyn EmployeeRepository>,
    products: Arc<dyn ProductRepository>,
    gate: AuthorizationGate,
}

impl SaleCommands {
    pub fn new(
        sales: Arc<dyn SaleRepository>,
        employees: Arc<dyn EmployeeRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            sales,
            employees,
            products,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn record(
        &self,
        cmd: RecordSaleCommand,
        principal: Option<&Principal>,
    ) -> Result<Sale, SaleError> {
        self.gate.authorize(principal, &RECORD_SALE, None)?;

        let sale = Sale::new(
            SaleId::new(),
            cmd.product_id,
            cmd.employee_id,
            &cmd.currency,
            cmd.amount,
            cmd.quantity,
        )?;
        self.check_references(Some(cmd.employee_id), Some(cmd.product_id))
            .await?;
        self.sales.save(&sale).await?;

        tracing::info!(
            sale_id = %sale.id(),
            employee_id = %sale.employee_id(),
            amount = sale.amount(),
            currency = %sale.currency(),
            "Sale recorded"
        );
        Ok(sale)
    }

    pub async fn update(
        &self,
        cmd: UpdateSaleCommand,
        principal: Option<&Principal>,
    ) -> Result<Sale, SaleError> {
        let target = SubjectRef::instance(SubjectType::Sale, cmd.sale_id);
        self.gate.authorize(principal, &UPDATE_SALE, Some(&target))?;

        let mut sale = self
            .sales
            .find_by_id(&cmd.sale_id)
            .await?
            .ok_or_else(|| SaleError::NotFound(cmd.sale_id.to_string()))?;
        self.check_references(cmd.changes.employee_id, cmd.changes.product_id)
            .await?;
        sale.apply(cmd.changes)?;
        self.sales.update(&sale).await?;
        Ok(sale)
    }

    pub async fn delete(
        &self,
        cmd: DeleteSaleCommand,
        principal: Option<&Principal>,
    ) -> Result<(), SaleError> {
        let target = SubjectRef::instance(SubjectType::Sale, cmd.sale_id);
        self.gate.authorize(principal, &DELETE_SALE, Some(&target))?;

        self.sales.delete(&cmd.sale_id).await?;
        tracing::info!(sale_id = %cmd.sale_id, "Sale deleted");
        Ok(())
    }

    async fn check_references(
        &self,
        employee_id: Option<EmployeeId>,
        product_id: Option<ProductId>,
    ) -> Result<(), SaleError> {
        if let Some(id) = employee_id {
            if !self.employees.exists(&id).await? {
                return Err(SaleError::EmployeeNotFound(id.to_string()));
            }
        }
        if let Some(id) = product_id {
            if !self.products.exists(&id).await? {
                return Err(SaleError::ProductNotFound(id.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEmployeeRepository, InMemoryProductRepository, InMemorySaleRepository,
    };
    use crate::application::handlers::test_support::{admin_principal, user_principal};
    use crate::domain::catalog::{sample_details, Product};
    use crate::domain::foundation::{CustomerId, ErrorCode};
    use crate::domain::staff::{sample_employee_details, Employee};

    struct Fixture {
        commands: SaleCommands,
        sales: Arc<InMemorySaleRepository>,
        employee: Employee,
        product: Product,
    }

    async fn fixture() -> Fixture {
        let sales = Arc::new(InMemorySaleRepository::new());
        let employees = Arc::new(InMemoryEmployeeRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let employee = Employee::new(EmployeeId::new(), sample_employee_details(), None).unwrap();
        employees.save(&employee).await.unwrap();
        let product = Product::new(ProductId::new(), sample_details("Agbada")).unwrap();
        products.save(&product).await.unwrap();

        Fixture {
            commands: SaleCommands::new(sales.clone(), employees, products),
            sales,
            employee,
            product,
        }
    }

    fn record(f: &Fixture) -> RecordSaleCommand {
        RecordSaleCommand {
            product_id: f.product.id(),
            employee_id: f.employee.id(),
            currency: "ghs".into(),
            amount: 450.0,
            quantity: 2,
        }
    }

    #[tokio::test]
    async fn records_a_sale() {
        let f = fixture().await;
        let sale = f.commands.record(record(&f), Some(&admin_principal())).await.unwrap();
        assert_eq!(sale.currency(), "GHS");
        assert_eq!(f.sales.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_employee_or_product_is_rejected() {
        let f = fixture().await;
        let mut cmd = record(&f);
        cmd.employee_id = EmployeeId::new();
        let err = f.commands.record(cmd, Some(&admin_principal())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeNotFound);

        let mut cmd = record(&f);
        cmd.product_id = ProductId::new();
        let err = f.commands.record(cmd, Some(&admin_principal())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
        assert!(f.sales.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_values_fail_validation() {
        let f = fixture().await;
        let mut cmd = record(&f);
        cmd.quantity = 0;
        let err = f.commands.record(cmd, Some(&admin_principal())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);

        let mut cmd = record(&f);
        cmd.amount = -1.0;
        let err = f.commands.record(cmd, Some(&admin_principal())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let f = fixture().await;
        let admin = admin_principal();
        let sale = f.commands.record(record(&f), Some(&admin)).await.unwrap();

        let updated = f
            .commands
            .update(
                UpdateSaleCommand {
                    sale_id: sale.id(),
                    changes: SaleChanges {
                        quantity: Some(5),
                        ..Default::default()
                    },
                },
                Some(&admin),
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity(), 5);

        f.commands
            .delete(DeleteSaleCommand { sale_id: sale.id() }, Some(&admin))
            .await
            .unwrap();
        let err = f
            .commands
            .delete(DeleteSaleCommand { sale_id: sale.id() }, Some(&admin))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SaleNotFound);
    }

    #[tokio::test]
    async fn reassigning_to_missing_employee_is_rejected() {
        let f = fixture().await;
        let admin = admin_principal();
        let sale = f.commands.record(record(&f), Some(&admin)).await.unwrap();
        let err = f
            .commands
            .update(
                UpdateSaleCommand {
                    sale_id: sale.id(),
                    changes: SaleChanges {
                        employee_id: Some(EmployeeId::new()),
                        ..Default::default()
                    },
                },
                Some(&admin),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn customers_cannot_record_sales() {
        let f = fixture().await;
        let err = f
            .commands
            .record(record(&f), Some(&user_principal(CustomerId::new())))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
