use crate::common::*;
use quarry::core::{ConflictPolicy, Constraint, ForeignKey, ForeignKeyAction};
use quarry::prelude::*;
use quarry::sqlite::{ColumnType, create_table_sql};

#[test]
fn plain_table_ddl() {
    assert_eq!(
        create_table_sql::<Object>(false),
        "CREATE TABLE `objects` (\
         `id` INTEGER NOT NULL ON CONFLICT ABORT PRIMARY KEY ON CONFLICT ABORT, \
         `text` TEXT NOT NULL ON CONFLICT ABORT, \
         `n` INTEGER NOT NULL ON CONFLICT ABORT)"
    );
}

#[test]
fn unique_and_nullable_columns() {
    assert_eq!(
        create_table_sql::<Person>(false),
        "CREATE TABLE `people` (\
         `id` INTEGER NOT NULL ON CONFLICT ABORT PRIMARY KEY ON CONFLICT ABORT, \
         `name` TEXT NOT NULL ON CONFLICT ABORT UNIQUE ON CONFLICT ABORT, \
         `age` INTEGER, \
         `nickname` TEXT)"
    );
}

#[test]
fn strict_table_with_foreign_key() {
    assert_eq!(
        create_table_sql::<Pet>(false),
        "CREATE TABLE `pets` (\
         `id` INTEGER NOT NULL ON CONFLICT ABORT PRIMARY KEY ON CONFLICT ABORT, \
         `name` TEXT NOT NULL ON CONFLICT ABORT, \
         `owner` INTEGER REFERENCES `people` (`id`) ON UPDATE NO ACTION ON DELETE CASCADE) STRICT"
    );
}

#[test]
fn without_rowid_if_not_exists() {
    assert_eq!(
        create_table_sql::<Country>(true),
        "CREATE TABLE IF NOT EXISTS `countries` (\
         `code` TEXT NOT NULL ON CONFLICT ABORT PRIMARY KEY ON CONFLICT ABORT, \
         `name` TEXT NOT NULL ON CONFLICT ABORT COLLATE NOCASE, \
         `population` INTEGER) WITHOUT ROWID"
    );
}

#[test]
fn default_name_and_renamed_column() {
    assert_eq!(
        create_table_sql::<EventLog>(false),
        "CREATE TABLE `event_log` (\
         `message` TEXT NOT NULL ON CONFLICT ABORT, \
         `payload` BLOB NOT NULL ON CONFLICT ABORT)"
    );
    assert_eq!(<EventLog as SQLiteTable>::NAME, "event_log");
    assert_eq!(<EventLogData as SQLiteColumn>::NAME, "payload");
}

#[test]
fn default_value_is_quoted() {
    let sql = create_table_sql::<Account>(false);
    assert!(
        sql.contains("`balance` REAL NOT NULL ON CONFLICT ABORT DEFAULT '0'"),
        "{sql}"
    );
}

#[test]
fn column_metadata() {
    let columns = <Pet as SQLiteTable>::COLUMNS;
    assert_eq!(columns.len(), 3);

    let id = &columns[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.column_type, ColumnType::Integer);
    assert!(id.primary_key);
    assert!(id.auto_increment);
    assert!(!id.nullable);

    let owner = &columns[2];
    assert!(owner.nullable);
    assert_eq!(
        owner.constraints,
        &[Constraint::ForeignKey(ForeignKey {
            table: "people",
            columns: &["id"],
            on_update: ForeignKeyAction::NoAction,
            on_delete: ForeignKeyAction::Cascade,
        })]
    );

    assert_eq!(<Pet as SQLiteTable>::PRIMARY_KEY, Some(0));
    assert!(<Pet as SQLiteTable>::STRICT);
    assert_eq!(<EventLog as SQLiteTable>::PRIMARY_KEY, None);
}

#[test]
fn text_key_is_never_auto_increment() {
    let code = &<Country as SQLiteTable>::COLUMNS[0];
    assert!(code.primary_key);
    assert!(!code.auto_increment);
    assert_eq!(
        code.constraints,
        &[Constraint::PrimaryKey {
            on_conflict: ConflictPolicy::Abort,
            order: None,
        }]
    );
    assert!(<Country as SQLiteTable>::WITHOUT_ROWID);
}

#[test]
fn descending_integer_key_is_not_auto_increment() {
    assert_eq!(
        create_table_sql::<Ranked>(false),
        "CREATE TABLE `ranked` (\
         `id` INTEGER NOT NULL ON CONFLICT ABORT PRIMARY KEY DESC ON CONFLICT ABORT, \
         `label` TEXT NOT NULL ON CONFLICT ABORT)"
    );
    let id = &<Ranked as SQLiteTable>::COLUMNS[0];
    assert!(id.primary_key);
    assert!(!id.auto_increment);
}

#[test]
fn create_table_if_not_exists_is_idempotent() -> Result<()> {
    let db = setup_db();
    db.create_table::<Object>(true)?;
    assert!(db.create_table::<Object>(false).is_err());
    Ok(())
}
