//! Column constraints and their DDL rendering.

use core::mem::discriminant;
use std::fmt::{self, Display, Write};

use smallvec::SmallVec;

use crate::OrderBy;

/// Conflict resolution clause attached to NOT NULL, UNIQUE and PRIMARY KEY.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConflictPolicy {
    #[default]
    Abort,
    Rollback,
    Fail,
    Ignore,
    Replace,
}

impl ConflictPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConflictPolicy::Abort => "ABORT",
            ConflictPolicy::Rollback => "ROLLBACK",
            ConflictPolicy::Fail => "FAIL",
            ConflictPolicy::Ignore => "IGNORE",
            ConflictPolicy::Replace => "REPLACE",
        }
    }
}

/// Referential action for `ON UPDATE` / `ON DELETE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForeignKeyAction {
    #[default]
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

impl ForeignKeyAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            ForeignKeyAction::NoAction => "NO ACTION",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Cascade => "CASCADE",
        }
    }
}

/// A column-level `REFERENCES` clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub on_update: ForeignKeyAction,
    pub on_delete: ForeignKeyAction,
}

/// A declarative column constraint.
///
/// Each variant renders to its DDL fragment from its own fields alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    NotNull(ConflictPolicy),
    PrimaryKey {
        on_conflict: ConflictPolicy,
        order: Option<OrderBy>,
    },
    Unique(ConflictPolicy),
    ForeignKey(ForeignKey),
    Default(&'static str),
    Collate(&'static str),
}

impl Constraint {
    /// Two constraints of the same kind never both apply to one column.
    pub fn same_kind(&self, other: &Constraint) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NotNull(policy) => {
                write!(f, "NOT NULL ON CONFLICT {}", policy.as_str())
            }
            Constraint::PrimaryKey { on_conflict, order } => {
                f.write_str("PRIMARY KEY")?;
                if let Some(order) = order {
                    write!(f, " {}", order.as_str())?;
                }
                write!(f, " ON CONFLICT {}", on_conflict.as_str())
            }
            Constraint::Unique(policy) => write!(f, "UNIQUE ON CONFLICT {}", policy.as_str()),
            Constraint::ForeignKey(fk) => {
                write!(f, "REFERENCES `{}` (", fk.table)?;
                for (i, column) in fk.columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "`{column}`")?;
                }
                write!(
                    f,
                    ") ON UPDATE {} ON DELETE {}",
                    fk.on_update.as_str(),
                    fk.on_delete.as_str()
                )
            }
            Constraint::Default(value) => {
                f.write_str("DEFAULT '")?;
                for c in value.chars() {
                    if c == '\'' {
                        f.write_char('\'')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('\'')
            }
            Constraint::Collate(name) => write!(f, "COLLATE {name}"),
        }
    }
}

/// Renders a column's constraint list.
///
/// Duplicates by kind are dropped, keeping the first. A non-nullable column
/// gets a leading `NOT NULL ON CONFLICT ABORT` unless it declares its own.
pub fn render_constraints(nullable: bool, declared: &[Constraint]) -> String {
    const IMPLICIT_NOT_NULL: Constraint = Constraint::NotNull(ConflictPolicy::Abort);
    let mut effective: SmallVec<[&Constraint; 6]> = SmallVec::new();

    if !nullable && !declared.iter().any(|c| c.same_kind(&IMPLICIT_NOT_NULL)) {
        effective.push(&IMPLICIT_NOT_NULL);
    }
    for constraint in declared {
        if !effective.iter().any(|seen| seen.same_kind(constraint)) {
            effective.push(constraint);
        }
    }

    let mut out = String::new();
    for (i, constraint) in effective.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{constraint}");
    }
    out
}
