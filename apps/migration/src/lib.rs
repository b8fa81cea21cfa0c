//! Schema migrations for the `blog` and `reply` tables.

pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm;

mod m20240101_000001_create_blog_table;
mod m20240101_000002_create_reply_table;

pub struct Migrator;

/// Auto-increment `i64` primary key. SQLite only allows AUTOINCREMENT on an
/// `integer` column, which is 64-bit there anyway.
pub(crate) fn auto_id<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let mut column = ColumnDef::new(name);
    if manager.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
        column.integer();
    } else {
        column.big_integer();
    }
    column.not_null().auto_increment().primary_key().to_owned()
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_blog_table::Migration),
            Box::new(m20240101_000002_create_reply_table::Migration),
        ]
    }
}
