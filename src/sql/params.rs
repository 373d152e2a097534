//! Typed values bound to PostgreSQL statements.

use chrono::NaiveDateTime;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// One bound parameter. Every variant is nullable so absent fields bind as typed NULLs.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(Option<i32>),
    Float(Option<f32>),
    Bool(Option<bool>),
    Text(Option<String>),
    Bytes(Option<Vec<u8>>),
    Timestamp(Option<NaiveDateTime>),
}

impl BindValue {
    pub fn is_null(&self) -> bool {
        match self {
            BindValue::Int(v) => v.is_none(),
            BindValue::Float(v) => v.is_none(),
            BindValue::Bool(v) => v.is_none(),
            BindValue::Text(v) => v.is_none(),
            BindValue::Bytes(v) => v.is_none(),
            BindValue::Timestamp(v) => v.is_none(),
        }
    }
}

/// Bind `value` with its native PostgreSQL type.
pub fn bind_value<'q>(query: Query<'q, Postgres, PgArguments>, value: BindValue) -> Query<'q, Postgres, PgArguments> {
    match value {
        BindValue::Int(v) => query.bind(v),
        BindValue::Float(v) => query.bind(v),
        BindValue::Bool(v) => query.bind(v),
        BindValue::Text(v) => query.bind(v),
        BindValue::Bytes(v) => query.bind(v),
        BindValue::Timestamp(v) => query.bind(v),
    }
}

/// Bind all params in order.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: Vec<BindValue>,
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = bind_value(query, p);
    }
    query
}
