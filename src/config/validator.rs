//! Model validation: identifier safety, uniqueness and foreign-key ordering.

use crate::config::{EntityDef, ID_COLUMN};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("static pattern"))
}

fn path_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("static pattern"))
}

fn check_identifier(name: &str) -> Result<(), ConfigError> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(name.to_string()))
    }
}

/// Validate the entity list. Entities must be in dependency order: a foreign key may only
/// reference a table defined earlier (or its own table), so DDL can be applied front to back.
pub fn validate(entities: &[&EntityDef]) -> Result<(), ConfigError> {
    let mut tables = HashSet::new();
    let mut path_segments = HashSet::new();

    for entity in entities {
        check_identifier(entity.table)?;
        if !path_segment_re().is_match(entity.path_segment) {
            return Err(ConfigError::InvalidIdentifier(entity.path_segment.to_string()));
        }
        if !tables.insert(entity.table) {
            return Err(ConfigError::DuplicateTable(entity.table.to_string()));
        }
        if !path_segments.insert(entity.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(entity.path_segment.to_string()));
        }

        let mut columns = HashSet::new();
        for column in entity.columns {
            check_identifier(column.name)?;
            if column.name == ID_COLUMN {
                return Err(ConfigError::ReservedColumn {
                    table: entity.table.to_string(),
                    column: ID_COLUMN,
                });
            }
            if !columns.insert(column.name) {
                return Err(ConfigError::DuplicateColumn {
                    table: entity.table.to_string(),
                    column: column.name.to_string(),
                });
            }
        }

        for (column, target) in entity.foreign_keys() {
            if !tables.contains(target) {
                return Err(ConfigError::MissingReference {
                    kind: "table",
                    id: format!("{} (from {}.{})", target, entity.table, column),
                });
            }
        }
    }

    Ok(())
}
