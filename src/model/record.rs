//! Record mapper: typed records to bind values, and rows back to records.

use crate::config::{ColumnKind, EntityDef};
use crate::sql::BindValue;
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// One row of an entity table.
pub trait Record: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    fn entity() -> &'static EntityDef;
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    /// Data column values in `entity().columns` order.
    fn bind_values(&self) -> Vec<BindValue>;
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}

/// Field types a record may carry. Plain numbers and flags read NULL as their zero value.
pub trait ColumnValue: Sized {
    const KIND: ColumnKind;
    fn to_bind(&self) -> BindValue;
    fn read(row: &PgRow, column: &str) -> Result<Self, sqlx::Error>;
}

macro_rules! column_value {
    ($ty:ty, $kind:ident, $variant:ident, plain) => {
        impl ColumnValue for $ty {
            const KIND: ColumnKind = ColumnKind::$kind;
            fn to_bind(&self) -> BindValue {
                BindValue::$variant(Some(self.clone()))
            }
            fn read(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
                Ok(row.try_get::<Option<$ty>, _>(column)?.unwrap_or_default())
            }
        }
    };
    ($ty:ty, $kind:ident, $variant:ident, optional) => {
        impl ColumnValue for Option<$ty> {
            const KIND: ColumnKind = ColumnKind::$kind;
            fn to_bind(&self) -> BindValue {
                BindValue::$variant(self.clone())
            }
            fn read(row: &PgRow, column: &str) -> Result<Self, sqlx::Error> {
                row.try_get::<Option<$ty>, _>(column)
            }
        }
    };
}

column_value!(i32, Int, Int, plain);
column_value!(i32, Int, Int, optional);
column_value!(f32, Float, Float, plain);
column_value!(bool, Bool, Bool, plain);
column_value!(String, Text, Text, optional);
column_value!(Vec<u8>, Bytes, Bytes, optional);
column_value!(NaiveDateTime, Timestamp, Timestamp, optional);

/// Field deserializer used by [`record!`]: JSON `null` yields the field's default, so
/// `"yearStarted": null` reads as 0 rather than failing.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Declare an entity record: the struct, its serde wire shape (camelCase, every field
/// defaulted when absent or null), its table definition and its [`Record`] impl.
///
/// Columns are written `field: Type`, optionally `field as "column": Type` to rename the
/// column, and `=> "table"` to declare a foreign key.
macro_rules! record {
    (
        $(#[$meta:meta])*
        $name:ident {
            table: $table:literal,
            path: $path:literal,
            columns: {
                $(
                    $(#[$fmeta:meta])*
                    $field:ident $(as $col:literal)? : $ty:ty $(=> $refs:literal)?
                ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            #[serde(deserialize_with = "crate::model::null_as_default")]
            pub id: i32,
            $(
                $(#[$fmeta])*
                #[serde(deserialize_with = "crate::model::null_as_default")]
                pub $field: $ty,
            )*
        }

        impl $crate::model::Record for $name {
            fn entity() -> &'static $crate::config::EntityDef {
                static ENTITY: $crate::config::EntityDef = $crate::config::EntityDef {
                    table: $table,
                    path_segment: $path,
                    columns: &[
                        $(
                            $crate::config::ColumnDef {
                                name: $crate::config::first_or(&[$($col)?], stringify!($field)),
                                kind: <$ty as $crate::model::ColumnValue>::KIND,
                                references: $crate::config::first(&[$($refs)?]),
                            },
                        )*
                    ],
                };
                &ENTITY
            }

            fn id(&self) -> i32 {
                self.id
            }

            fn set_id(&mut self, id: i32) {
                self.id = id;
            }

            fn bind_values(&self) -> Vec<$crate::sql::BindValue> {
                vec![$( $crate::model::ColumnValue::to_bind(&self.$field) ),*]
            }

            fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
                Ok($name {
                    id: <i32 as $crate::model::ColumnValue>::read(row, $crate::config::ID_COLUMN)?,
                    $(
                        $field: <$ty as $crate::model::ColumnValue>::read(
                            row,
                            $crate::config::first_or(&[$($col)?], stringify!($field)),
                        )?,
                    )*
                })
            }
        }
    };
}

pub(crate) use record;
