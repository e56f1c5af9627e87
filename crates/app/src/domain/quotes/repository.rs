//! Quotes Repository

use std::{error::Error as StdError, str::FromStr};

use decimal_percentage::Percentage;
use jiff::Timestamp;
use quotation::discounts::fraction;
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::quotes::{
    data::NewQuote,
    items::{decode_items, encode_items},
    models::{Quote, QuoteNumber},
};

const CREATE_QUOTE_SQL: &str = include_str!("sql/create_quote.sql");
const GET_QUOTE_SQL: &str = include_str!("sql/get_quote.sql");
const LIST_QUOTES_BY_CLIENT_SQL: &str = include_str!("sql/list_quotes_by_client.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteQuotesRepository;

impl SqliteQuotesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote_number: QuoteNumber,
        quote: &NewQuote,
        created_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        let items = encode_items(&quote.items).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_QUOTE_SQL)
            .bind(quote_number.to_string())
            .bind(quote.client_name.as_str())
            .bind(quote.quote_date.to_string())
            .bind(items)
            .bind(quote.shipping_cost.to_string())
            .bind(quote.total_cost.to_string())
            .bind(quote.shipping_time.as_str())
            .bind(quote.shipping_method.as_str())
            .bind(quote.remarks.as_deref())
            .bind(fraction(&quote.discount).to_string())
            .bind(created_at.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote_number: QuoteNumber,
    ) -> Result<Option<Quote>, sqlx::Error> {
        query_as::<Sqlite, Quote>(GET_QUOTE_SQL)
            .bind(quote_number.to_string())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_quotes_by_client(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        client_name: &str,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        query_as::<Sqlite, Quote>(LIST_QUOTES_BY_CLIENT_SQL)
            .bind(client_name)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Read a text column and parse it, reporting parse failures as column decode errors.
fn try_get_parsed<T>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let text: String = row.try_get(column)?;

    text.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, SqliteRow> for Quote {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let items: String = row.try_get("items")?;

        let items = decode_items(&items).map_err(|e| sqlx::Error::ColumnDecode {
            index: "items".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            quote_number: try_get_parsed(row, "quote_number")?,
            client_name: row.try_get("client_name")?,
            quote_date: try_get_parsed(row, "quote_date")?,
            items,
            shipping_cost: try_get_parsed(row, "shipping_cost")?,
            total_cost: try_get_parsed(row, "total_cost")?,
            shipping_time: row.try_get("shipping_time")?,
            shipping_method: row.try_get("shipping_method")?,
            remarks: row.try_get("remarks")?,
            discount: Percentage::from(try_get_parsed::<Decimal>(row, "discount")?),
            created_at: try_get_parsed(row, "created_at")?,
        })
    }
}
