mod param;
mod to_sql;
pub mod type_set;

pub use param::*;
pub use to_sql::*;
pub use type_set::{Concat, Cons, Contains, Here, Nil, SubsetOf, There, TypeSet};
