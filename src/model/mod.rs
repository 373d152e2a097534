//! Typed catalog records and the row mapper behind them.

mod entities;
mod record;

pub use entities::*;
pub use record::{null_as_default, ColumnValue, Record};

use crate::config::EntityDef;

/// Every entity definition, in foreign-key dependency order.
pub fn all() -> Vec<&'static EntityDef> {
    vec![
        Organization::entity(),
        Personality::entity(),
        Translation::entity(),
        Scripture::entity(),
        Passage::entity(),
        Commentary::entity(),
        QuestionCategory::entity(),
        QuestionChoice::entity(),
        Question::entity(),
        Category::entity(),
        Pastor::entity(),
    ]
}
