//! Static entity model: one definition per table, consumed by the SQL builder, migrations and routes.

/// Primary-key column shared by every entity table.
pub const ID_COLUMN: &str = "id";

/// Storage kind of a data column. Determines the SQL type and how values bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
    Bytes,
    Timestamp,
}

impl ColumnKind {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Int => "INTEGER",
            ColumnKind::Float => "REAL",
            ColumnKind::Bool => "BOOLEAN",
            ColumnKind::Text => "TEXT",
            ColumnKind::Bytes => "BYTEA",
            ColumnKind::Timestamp => "TIMESTAMP",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Table whose `id` this column points at. Enforced by the schema only.
    pub references: Option<&'static str>,
}

#[derive(Clone, Copy, Debug)]
pub struct EntityDef {
    /// Table name, also the stem of the legacy creation envelope (`question_choice` -> `questionChoiceId`).
    pub table: &'static str,
    pub path_segment: &'static str,
    /// Data columns in bind order. The `id` column is implicit.
    pub columns: &'static [ColumnDef],
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|table| (c.name, table)))
    }
}

/// Picks the single element of `names`, or `fallback` when empty. Used by the record macro
/// for optional column renames and foreign-key targets.
pub const fn first_or(names: &'static [&'static str], fallback: &'static str) -> &'static str {
    match names {
        [name, ..] => *name,
        [] => fallback,
    }
}

pub const fn first(names: &'static [&'static str]) -> Option<&'static str> {
    match names {
        [name, ..] => Some(*name),
        [] => None,
    }
}
