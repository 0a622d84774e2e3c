//! Port for food listings and their remaining stock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::Food;

use super::define_port_error;

define_port_error! {
    /// Errors raised by stock ledger adapters.
    pub enum StockLedgerError {
        /// Repository connection could not be established.
        Connection { message: String } => "stock ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "stock ledger query failed: {message}",
    }
}

/// Port for reading and maintaining food listings.
///
/// Reads never return soft-deleted foods.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Live foods, newest first.
    async fn list_active(&self, page: PageRequest) -> Result<Page<Food>, StockLedgerError>;

    /// A single live food.
    async fn find_active(&self, id_food: &Uuid) -> Result<Option<Food>, StockLedgerError>;

    /// Live foods owned by a user, newest first.
    async fn list_by_owner(
        &self,
        id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Food>, StockLedgerError>;

    /// Insert a new food.
    async fn create(&self, food: &Food) -> Result<(), StockLedgerError>;

    /// Persist the owner-editable columns of a live food.
    async fn update(&self, food: &Food) -> Result<(), StockLedgerError>;

    /// Soft-delete a live food. Returns whether a row changed.
    async fn soft_delete(
        &self,
        id_food: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, StockLedgerError>;
}

/// Fixture implementation for running without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStockLedger;

#[async_trait]
impl StockLedger for FixtureStockLedger {
    async fn list_active(&self, page: PageRequest) -> Result<Page<Food>, StockLedgerError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn find_active(&self, _id_food: &Uuid) -> Result<Option<Food>, StockLedgerError> {
        Ok(None)
    }

    async fn list_by_owner(
        &self,
        _id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Food>, StockLedgerError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn create(&self, _food: &Food) -> Result<(), StockLedgerError> {
        Ok(())
    }

    async fn update(&self, _food: &Food) -> Result<(), StockLedgerError> {
        Ok(())
    }

    async fn soft_delete(
        &self,
        _id_food: &Uuid,
        _at: DateTime<Utc>,
    ) -> Result<bool, StockLedgerError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let ledger = FixtureStockLedger;
        let found = ledger
            .find_active(&Uuid::new_v4())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_list_keeps_requested_page() {
        let ledger = FixtureStockLedger;
        let request = PageRequest::from_query(Some(3), Some(5));
        let page = ledger.list_active(request).await.expect("fixture list");
        assert_eq!(page.pagination().page(), 3);
        assert_eq!(page.pagination().limit(), 5);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_soft_delete_changes_nothing() {
        let ledger = FixtureStockLedger;
        let changed = ledger
            .soft_delete(&Uuid::new_v4(), Utc::now())
            .await
            .expect("fixture delete");
        assert!(!changed);
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = StockLedgerError::connection("pool timed out");
        assert!(err.to_string().contains("pool timed out"));
    }
}
