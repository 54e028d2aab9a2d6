pub mod schema;

pub use schema::*;

use quarry::Quarry;

pub fn setup_db() -> Quarry {
    let db = Quarry::open_in_memory().expect("Failed to create in-memory database");
    db.connection()
        .execute_batch("PRAGMA foreign_keys = ON")
        .expect("Failed to enable foreign keys");
    create_tables(&db);
    db
}

fn create_tables(db: &Quarry) {
    db.create_table::<Object>(false)
        .expect("Failed to create objects table");
    db.create_table::<Person>(false)
        .expect("Failed to create people table");
    db.create_table::<Pet>(false)
        .expect("Failed to create pets table");
    db.create_table::<Country>(false)
        .expect("Failed to create countries table");
    db.create_table::<Ranked>(false)
        .expect("Failed to create ranked table");
    db.create_table::<Account>(false)
        .expect("Failed to create accounts table");
    db.create_table::<EventLog>(false)
        .expect("Failed to create event_log table");
}

pub fn object(text: &str, n: i64) -> Object {
    Object {
        id: 0,
        text: text.to_string(),
        n,
    }
}

pub fn person(name: &str, age: Option<i32>) -> Person {
    Person {
        id: 0,
        name: name.to_string(),
        age,
        nickname: None,
    }
}

pub fn pet(name: &str, owner: Option<i64>) -> Pet {
    Pet {
        id: 0,
        name: name.to_string(),
        owner,
    }
}

/// Inserts one object per entry of `values`, texts "a", "b", ...
pub fn seed_objects(db: &Quarry, values: impl IntoIterator<Item = i64>) -> Vec<Object> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, n)| {
            let text = char::from(b'a' + (i % 26) as u8).to_string();
            let mut record = object(&text, n);
            db.insert_record(&mut record).expect("Failed to insert object");
            record
        })
        .collect()
}
