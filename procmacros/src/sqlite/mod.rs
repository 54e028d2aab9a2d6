pub mod field;
pub mod table;
