//! Quotes Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    database::Db,
    domain::quotes::{
        data::NewQuote,
        errors::{PersistenceError, StorageError},
        models::{Quote, QuoteNumber},
        repository::SqliteQuotesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteQuotesService {
    db: Db,
    repository: SqliteQuotesRepository,
}

impl SqliteQuotesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteQuotesRepository::new(),
        }
    }

    async fn insert_quote(
        &self,
        quote_number: QuoteNumber,
        quote: &NewQuote,
    ) -> Result<(), PersistenceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .create_quote(&mut tx, quote_number, quote, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl QuotesService for SqliteQuotesService {
    #[tracing::instrument(
        name = "quotes.service.save_quote",
        skip(self, quote),
        fields(client_name = %quote.client_name, item_count = quote.items.len()),
        err
    )]
    async fn save_quote(&self, quote: NewQuote) -> Result<QuoteNumber, PersistenceError> {
        if quote.client_name.trim().is_empty() || quote.items.is_empty() {
            return Err(PersistenceError::MissingRequiredData);
        }

        let quote_number = QuoteNumber::new();

        self.insert_quote(quote_number, &quote)
            .await
            .inspect_err(|error| warn!(%quote_number, %error, "failed to save quote"))?;

        info!(%quote_number, total_cost = %quote.total_cost, "saved quote");

        Ok(quote_number)
    }

    #[tracing::instrument(name = "quotes.service.find_quote", skip(self), err)]
    async fn find_quote(&self, quote_number: QuoteNumber) -> Result<Option<Quote>, StorageError> {
        let mut tx = self.db.begin_transaction().await?;

        let quote = self.repository.get_quote(&mut tx, quote_number).await?;

        tx.commit().await?;

        debug!(found = quote.is_some(), "looked up quote");

        Ok(quote)
    }

    #[tracing::instrument(name = "quotes.service.find_quotes_by_client", skip(self), err)]
    async fn find_quotes_by_client(&self, client_name: &str) -> Result<Vec<Quote>, StorageError> {
        let mut tx = self.db.begin_transaction().await?;

        let quotes = self
            .repository
            .list_quotes_by_client(&mut tx, client_name)
            .await?;

        tx.commit().await?;

        debug!(count = quotes.len(), "listed quotes for client");

        Ok(quotes)
    }
}

#[automock]
#[async_trait]
pub trait QuotesService: Send + Sync {
    /// Persist a new quote and return its freshly generated quote number.
    ///
    /// The quote is written in a single transaction; on error nothing is stored.
    async fn save_quote(&self, quote: NewQuote) -> Result<QuoteNumber, PersistenceError>;

    /// Retrieve the quote with the given number, or `None` if there is none.
    async fn find_quote(&self, quote_number: QuoteNumber) -> Result<Option<Quote>, StorageError>;

    /// Retrieve every quote for a client (exact, case-sensitive match), oldest first.
    async fn find_quotes_by_client(&self, client_name: &str) -> Result<Vec<Quote>, StorageError>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use decimal_percentage::Percentage;
    use rust_decimal::Decimal;
    use sqlx::{query, query_scalar};
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{keychain, new_quote, save_quote, with_discount},
    };

    use super::*;

    async fn count_rows(ctx: &TestContext) -> Result<i64, sqlx::Error> {
        query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(ctx.db.pool())
            .await
    }

    #[tokio::test]
    async fn save_quote_returns_distinct_numbers_for_identical_quotes() -> TestResult {
        let ctx = TestContext::new().await;

        let first = save_quote(&ctx, "Alice").await?;
        let second = save_quote(&ctx, "Alice").await?;

        assert_ne!(first, second);
        assert_eq!(count_rows(&ctx).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn find_quote_returns_saved_quote() -> TestResult {
        let ctx = TestContext::new().await;
        let input = new_quote("Alice");

        let before = Timestamp::now();
        let quote_number = ctx.quotes.save_quote(input.clone()).await?;

        let quote = ctx
            .quotes
            .find_quote(quote_number)
            .await?
            .ok_or("saved quote not found")?;

        assert_eq!(quote.quote_number, quote_number);
        assert_eq!(quote.client_name, input.client_name);
        assert_eq!(quote.quote_date, input.quote_date);
        assert_eq!(quote.items, input.items);
        assert_eq!(quote.shipping_cost, input.shipping_cost);
        assert_eq!(quote.total_cost, input.total_cost);
        assert_eq!(quote.shipping_time, input.shipping_time);
        assert_eq!(quote.shipping_method, input.shipping_method);
        assert_eq!(quote.remarks, input.remarks);
        assert_eq!(quote.discount, input.discount);
        assert!(quote.created_at >= before);

        Ok(())
    }

    #[tokio::test]
    async fn saved_total_cost_matches_items_discount_and_shipping() -> TestResult {
        let ctx = TestContext::new().await;

        let quote_number = save_quote(&ctx, "Alice").await?;

        let quote = ctx
            .quotes
            .find_quote(quote_number)
            .await?
            .ok_or("saved quote not found")?;

        // (100 * 1.25 + 500 * 0.15) * 0.9 + 45.50
        assert_eq!(quote.total_cost, Decimal::new(22550, 2));
        assert_eq!(quote.details().total_cost()?, quote.total_cost);

        Ok(())
    }

    #[tokio::test]
    async fn find_quote_returns_none_for_unknown_number() -> TestResult {
        let ctx = TestContext::new().await;

        save_quote(&ctx, "Alice").await?;

        let quote = ctx.quotes.find_quote(QuoteNumber::new()).await?;

        assert!(quote.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn find_quotes_by_client_returns_only_that_client_in_insertion_order() -> TestResult {
        let ctx = TestContext::new().await;

        let first = save_quote(&ctx, "Alice").await?;
        let bob = save_quote(&ctx, "Bob").await?;
        let second = save_quote(&ctx, "Alice").await?;
        let third = save_quote(&ctx, "Alice").await?;

        let quotes = ctx.quotes.find_quotes_by_client("Alice").await?;

        let numbers: Vec<QuoteNumber> = quotes.iter().map(|quote| quote.quote_number).collect();

        assert_eq!(numbers, vec![first, second, third]);
        assert!(!numbers.contains(&bob));

        Ok(())
    }

    #[tokio::test]
    async fn find_quotes_by_client_is_exact_and_case_sensitive() -> TestResult {
        let ctx = TestContext::new().await;

        save_quote(&ctx, "Alice").await?;

        assert!(ctx.quotes.find_quotes_by_client("alice").await?.is_empty());
        assert!(ctx.quotes.find_quotes_by_client("Ali").await?.is_empty());
        assert!(ctx.quotes.find_quotes_by_client("Carol").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn save_quote_rejects_empty_client_name() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.quotes.save_quote(new_quote("  ")).await;

        assert!(
            matches!(result, Err(PersistenceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
        assert_eq!(count_rows(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn save_quote_rejects_quote_without_items() -> TestResult {
        let ctx = TestContext::new().await;

        let quote = NewQuote {
            items: Vec::new(),
            ..new_quote("Alice")
        };

        let result = ctx.quotes.save_quote(quote).await;

        assert!(
            matches!(result, Err(PersistenceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
        assert_eq!(count_rows(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn save_quote_keeps_discount_and_missing_remarks() -> TestResult {
        let ctx = TestContext::new().await;

        let quote = NewQuote {
            remarks: None,
            ..with_discount(new_quote("Alice"), Percentage::from(Decimal::ZERO))
        };

        let quote_number = ctx.quotes.save_quote(quote).await?;

        let stored = ctx
            .quotes
            .find_quote(quote_number)
            .await?
            .ok_or("saved quote not found")?;

        assert_eq!(stored.discount, Percentage::from(Decimal::ZERO));
        assert_eq!(stored.remarks, None);

        Ok(())
    }

    #[tokio::test]
    async fn save_quote_keeps_exact_decimal_amounts() -> TestResult {
        let ctx = TestContext::new().await;

        let quote = NewQuote {
            items: vec![keychain(3, Decimal::new(3333, 3))],
            shipping_cost: Decimal::new(1, 2),
            ..new_quote("Alice")
        };

        let quote_number = ctx.quotes.save_quote(quote).await?;

        let stored = ctx
            .quotes
            .find_quote(quote_number)
            .await?
            .ok_or("saved quote not found")?;

        let item = stored.items.first().ok_or("stored quote has no items")?;

        assert_eq!(item.unit_price, Decimal::new(3333, 3));
        assert_eq!(stored.shipping_cost, Decimal::new(1, 2));

        Ok(())
    }

    #[tokio::test]
    async fn save_quote_reports_storage_failure_without_writing() -> TestResult {
        let ctx = TestContext::new().await;

        query("DROP TABLE quotes").execute(ctx.db.pool()).await?;

        let result = save_quote(&ctx, "Alice").await;

        assert!(
            matches!(result, Err(PersistenceError::Sql(_))),
            "expected Sql, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_quote_reports_undecodable_items() -> TestResult {
        let ctx = TestContext::new().await;

        let quote_number = save_quote(&ctx, "Alice").await?;

        query("UPDATE quotes SET items = 'not json' WHERE quote_number = ?1")
            .bind(quote_number.to_string())
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.quotes.find_quote(quote_number).await;

        assert!(
            matches!(&result, Err(StorageError::Decode { column, .. }) if column == "items"),
            "expected Decode error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_quote_reads_string_wrapped_items_and_numeric_amounts() -> TestResult {
        let ctx = TestContext::new().await;

        let quote_number = save_quote(&ctx, "Alice").await?;

        let items = r#""[{\"Item\": \"keychain\", \"Specifications\": \"acrylic\", \"Size\": \"50mm\", \"Qty\": 100, \"Unit price($)\": 1.2, \"Total price($)\": 120.0}]""#;

        query("UPDATE quotes SET items = ?1, shipping_cost = ?2 WHERE quote_number = ?3")
            .bind(items)
            .bind(45.5_f64)
            .bind(quote_number.to_string())
            .execute(ctx.db.pool())
            .await?;

        let quote = ctx
            .quotes
            .find_quote(quote_number)
            .await?
            .ok_or("saved quote not found")?;

        let [item] = quote.items.as_slice() else {
            return Err(format!("expected one item, got {:?}", quote.items).into());
        };

        assert_eq!(item.specification, "acrylic");
        assert_eq!(item.quantity, Decimal::from(100));
        assert_eq!(item.unit_price, Decimal::new(12, 1));
        assert_eq!(quote.shipping_cost, Decimal::new(455, 1));

        Ok(())
    }

    #[tokio::test]
    async fn find_quotes_by_client_reports_undecodable_amounts() -> TestResult {
        let ctx = TestContext::new().await;

        save_quote(&ctx, "Alice").await?;

        query("UPDATE quotes SET total_cost = 'lots'")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.quotes.find_quotes_by_client("Alice").await;

        assert!(
            matches!(&result, Err(StorageError::Decode { column, .. }) if column == "total_cost"),
            "expected Decode error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn lookups_report_missing_table_as_storage_error() -> TestResult {
        let ctx = TestContext::new().await;

        query("DROP TABLE quotes").execute(ctx.db.pool()).await?;

        let found = ctx.quotes.find_quote(QuoteNumber::new()).await;
        let listed = ctx.quotes.find_quotes_by_client("Alice").await;

        assert!(matches!(found, Err(StorageError::Sql(_))), "got {found:?}");
        assert!(matches!(listed, Err(StorageError::Sql(_))), "got {listed:?}");

        Ok(())
    }

    #[tokio::test]
    async fn reused_quote_number_is_rejected_as_already_existing() -> TestResult {
        let ctx = TestContext::new().await;
        let quote_number = QuoteNumber::new();
        let quote = new_quote("Alice");

        ctx.quotes.insert_quote(quote_number, &quote).await?;

        let result = ctx.quotes.insert_quote(quote_number, &quote).await;

        assert!(
            matches!(result, Err(PersistenceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(count_rows(&ctx).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn quote_numbers_stay_unique_across_many_saves() -> TestResult {
        let ctx = TestContext::new().await;

        let mut numbers = HashSet::new();

        for _ in 0..20 {
            numbers.insert(save_quote(&ctx, "Alice").await?);
        }

        assert_eq!(numbers.len(), 20);

        Ok(())
    }
}
