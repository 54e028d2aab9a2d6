mod attributes;
mod insert;
mod schema;
mod select;
