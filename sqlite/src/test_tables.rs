//! Hand-written table descriptors for unit tests, shaped like the output of
//! `#[SQLiteTable]`.

use quarry_core::{ConflictPolicy, Constraint, ForeignKey, ForeignKeyAction, Result};
use rusqlite::Row;
use smallvec::smallvec;

use crate::traits::{
    ColumnInfo, HasPrimaryKey, RowValues, SQLiteColumn, SQLiteTable, assign_rowid,
};
use crate::types::{ColumnType, SQLiteType};

const PK: Constraint = Constraint::PrimaryKey {
    on_conflict: ConflictPolicy::Abort,
    order: None,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub owner: Option<i64>,
}

/// A table without a primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub label: String,
}

macro_rules! column {
    ($name:ident, $table:ty, $field:ident: $value:ty, $sql:literal, $index:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl SQLiteColumn for $name {
            type Table = $table;
            type Value = $value;
            const NAME: &'static str = $sql;
            const INDEX: usize = $index;

            fn get(record: &$table) -> $value {
                record.$field.clone()
            }

            fn set(record: &mut $table, value: $value) {
                record.$field = value;
            }
        }

        crate::impl_column_selection!($name);
    };
}

column!(UserId, User, id: i64, "id", 0);
column!(UserName, User, name: String, "name", 1);
column!(UserAge, User, age: Option<i32>, "age", 2);
column!(PetId, Pet, id: i64, "id", 0);
column!(PetName, Pet, name: String, "name", 1);
column!(PetOwner, Pet, owner: Option<i64>, "owner", 2);
column!(TagLabel, Tag, label: String, "label", 0);

impl SQLiteTable for User {
    const NAME: &'static str = "users";
    const COLUMNS: &'static [ColumnInfo] = &[
        ColumnInfo {
            name: "id",
            column_type: ColumnType::Integer,
            nullable: false,
            primary_key: true,
            auto_increment: true,
            constraints: &[PK],
        },
        ColumnInfo {
            name: "name",
            column_type: ColumnType::Text,
            nullable: false,
            primary_key: false,
            auto_increment: false,
            constraints: &[Constraint::Unique(ConflictPolicy::Abort)],
        },
        ColumnInfo {
            name: "age",
            column_type: ColumnType::Integer,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            constraints: &[],
        },
    ];
    const PRIMARY_KEY: Option<usize> = Some(0);

    fn values(&self) -> RowValues<'_> {
        smallvec![self.id.to_value(), self.name.to_value(), self.age.to_value()]
    }

    fn from_row_at(row: &Row<'_>, offset: usize) -> Result<Self> {
        let mut record = Self::default();
        UserId::read_into(&mut record, row, offset)?;
        UserName::read_into(&mut record, row, offset)?;
        UserAge::read_into(&mut record, row, offset)?;
        Ok(record)
    }

    fn assign_rowid(&mut self, rowid: i64) -> Result<()> {
        assign_rowid(self, rowid)
    }
}

impl HasPrimaryKey for User {
    type PrimaryKey = UserId;
}

impl SQLiteTable for Pet {
    const NAME: &'static str = "pets";
    const COLUMNS: &'static [ColumnInfo] = &[
        ColumnInfo {
            name: "id",
            column_type: ColumnType::Integer,
            nullable: false,
            primary_key: true,
            auto_increment: true,
            constraints: &[PK],
        },
        ColumnInfo {
            name: "name",
            column_type: ColumnType::Text,
            nullable: false,
            primary_key: false,
            auto_increment: false,
            constraints: &[Constraint::Collate("NOCASE")],
        },
        ColumnInfo {
            name: "owner",
            column_type: ColumnType::Integer,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            constraints: &[Constraint::ForeignKey(ForeignKey {
                table: "users",
                columns: &["id"],
                on_update: ForeignKeyAction::NoAction,
                on_delete: ForeignKeyAction::Cascade,
            })],
        },
    ];
    const STRICT: bool = true;
    const PRIMARY_KEY: Option<usize> = Some(0);

    fn values(&self) -> RowValues<'_> {
        smallvec![self.id.to_value(), self.name.to_value(), self.owner.to_value()]
    }

    fn from_row_at(row: &Row<'_>, offset: usize) -> Result<Self> {
        let mut record = Self::default();
        PetId::read_into(&mut record, row, offset)?;
        PetName::read_into(&mut record, row, offset)?;
        PetOwner::read_into(&mut record, row, offset)?;
        Ok(record)
    }

    fn assign_rowid(&mut self, rowid: i64) -> Result<()> {
        assign_rowid(self, rowid)
    }
}

impl HasPrimaryKey for Pet {
    type PrimaryKey = PetId;
}

impl SQLiteTable for Tag {
    const NAME: &'static str = "tags";
    const COLUMNS: &'static [ColumnInfo] = &[ColumnInfo {
        name: "label",
        column_type: ColumnType::Text,
        nullable: false,
        primary_key: false,
        auto_increment: false,
        constraints: &[],
    }];
    const WITHOUT_ROWID: bool = false;

    fn values(&self) -> RowValues<'_> {
        smallvec![self.label.to_value()]
    }

    fn from_row_at(row: &Row<'_>, offset: usize) -> Result<Self> {
        let mut record = Self::default();
        TagLabel::read_into(&mut record, row, offset)?;
        Ok(record)
    }
}

crate::impl_record_selection!(User);
crate::impl_record_selection!(Pet);
crate::impl_record_selection!(Tag);
