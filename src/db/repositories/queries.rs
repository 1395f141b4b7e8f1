use crate::entities::{prelude::*, queries};
use crate::models::NewQueryRecord;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

pub struct QueryRepository {
    conn: DatabaseConnection,
}

impl QueryRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Single insert; sqlite autocommits it.
    pub async fn append(&self, record: NewQueryRecord) -> Result<i64> {
        let NewQueryRecord {
            query,
            query_time,
            raw_response,
            status,
        } = record;

        let active_model = queries::ActiveModel {
            case_type: Set(query.case_type),
            case_number: Set(query.case_number),
            filing_year: Set(query.filing_year),
            query_time: Set(query_time),
            raw_response: Set(Some(raw_response)),
            status: Set(status.as_str().to_string()),
            ..Default::default()
        };

        let result = Queries::insert(active_model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    pub async fn recent(&self, limit: u64, status: Option<&str>) -> Result<Vec<queries::Model>> {
        let mut query = Queries::find().order_by_desc(queries::Column::Id);

        if let Some(status) = status {
            query = query.filter(queries::Column::Status.eq(status));
        }

        let items = query.limit(limit).all(&self.conn).await?;
        Ok(items)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Queries::find().count(&self.conn).await?)
    }
}
