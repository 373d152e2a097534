//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from an entity definition.

use crate::config::{EntityDef, ID_COLUMN};
use crate::sql::BindValue;

/// Quote identifier for PostgreSQL (safe: only from the static model).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `"id"` followed by every data column, in model order.
fn select_column_list(entity: &EntityDef) -> String {
    std::iter::once(ID_COLUMN)
        .chain(entity.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Caller binds the id as the sole param.
pub fn select_by_id(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(entity),
        quoted(entity.table),
        quoted(ID_COLUMN)
    )
}

/// SELECT the whole table ordered by id.
pub fn select_list(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity),
        quoted(entity.table),
        quoted(ID_COLUMN)
    )
}

/// INSERT every data column (never the id) and return the generated id.
/// `values` must line up with `entity.columns`.
pub fn insert(entity: &EntityDef, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), entity.columns.len());
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(entity.columns.len());
    let mut placeholders = Vec::with_capacity(entity.columns.len());
    for (c, v) in entity.columns.iter().zip(values) {
        let n = q.push_param(v);
        cols.push(quoted(c.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(entity.table),
            quoted(ID_COLUMN)
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(entity.table),
            cols.join(", "),
            placeholders.join(", "),
            quoted(ID_COLUMN)
        )
    };
    q
}

/// Full-row UPDATE keyed by id: every data column is SET, the id is the last param.
pub fn update(entity: &EntityDef, id: i32, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), entity.columns.len());
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(entity.columns.len());
    for (c, v) in entity.columns.iter().zip(values) {
        let n = q.push_param(v);
        sets.push(format!("{} = ${}", quoted(c.name), n));
    }
    let id_param = q.push_param(BindValue::Int(Some(id)));
    if sets.is_empty() {
        // Nothing to replace; still report whether the row exists.
        q.sql = format!(
            "UPDATE {} SET {} = {} WHERE {} = ${}",
            quoted(entity.table),
            quoted(ID_COLUMN),
            quoted(ID_COLUMN),
            quoted(ID_COLUMN),
            id_param
        );
        return q;
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(entity.table),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param
    );
    q
}

/// DELETE by id. Caller binds the id as the sole param.
pub fn delete(entity: &EntityDef) -> String {
    format!("DELETE FROM {} WHERE {} = $1", quoted(entity.table), quoted(ID_COLUMN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnDef, ColumnKind};

    const BOOK: EntityDef = EntityDef {
        table: "book",
        path_segment: "book",
        columns: &[
            ColumnDef { name: "title", kind: ColumnKind::Text, references: None },
            ColumnDef { name: "shelf_id", kind: ColumnKind::Int, references: Some("shelf") },
        ],
    };

    #[test]
    fn select_by_id_lists_columns_and_binds_id() {
        assert_eq!(
            select_by_id(&BOOK),
            r#"SELECT "id", "title", "shelf_id" FROM "book" WHERE "id" = $1"#
        );
    }

    #[test]
    fn select_list_is_ordered_full_scan() {
        assert_eq!(
            select_list(&BOOK),
            r#"SELECT "id", "title", "shelf_id" FROM "book" ORDER BY "id""#
        );
    }

    #[test]
    fn insert_skips_id_and_returns_generated_key() {
        let q = insert(
            &BOOK,
            vec![BindValue::Text(Some("Psalms".into())), BindValue::Int(None)],
        );
        assert_eq!(
            q.sql,
            r#"INSERT INTO "book" ("title", "shelf_id") VALUES ($1, $2) RETURNING "id""#
        );
        assert_eq!(q.params.len(), 2);
        assert_eq!(q.params[1], BindValue::Int(None));
    }

    #[test]
    fn update_sets_every_column_and_keys_on_last_param() {
        let q = update(
            &BOOK,
            9,
            vec![BindValue::Text(None), BindValue::Int(Some(3))],
        );
        assert_eq!(
            q.sql,
            r#"UPDATE "book" SET "title" = $1, "shelf_id" = $2 WHERE "id" = $3"#
        );
        assert_eq!(q.params.last(), Some(&BindValue::Int(Some(9))));
    }

    #[test]
    fn delete_by_id() {
        assert_eq!(delete(&BOOK), r#"DELETE FROM "book" WHERE "id" = $1"#);
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn caller_values_never_reach_sql_text() {
        let q = insert(
            &BOOK,
            vec![BindValue::Text(Some("'); DROP TABLE book; --".into())), BindValue::Int(None)],
        );
        assert!(!q.sql.contains("DROP"));
    }
}
