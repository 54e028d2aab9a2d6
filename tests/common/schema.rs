use quarry::prelude::*;

#[SQLiteTable(name = "objects")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    #[column(primary)]
    pub id: i64,
    pub text: String,
    pub n: i64,
}

#[SQLiteTable(name = "people")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    #[column(primary)]
    pub id: i64,
    #[column(unique)]
    pub name: String,
    pub age: Option<i32>,
    pub nickname: Option<String>,
}

#[SQLiteTable(name = "pets", strict)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pet {
    #[column(primary)]
    pub id: i64,
    pub name: String,
    #[column(references(people, id), on_delete = "cascade")]
    pub owner: Option<i64>,
}

/// Keyed by ISO code; the engine never assigns the key.
#[SQLiteTable(name = "countries", without_rowid)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    #[column(primary)]
    pub code: String,
    #[column(collate = "NOCASE")]
    pub name: String,
    pub population: Option<i64>,
}

/// A descending integer key is stored as written, never assigned.
#[SQLiteTable(name = "ranked")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranked {
    #[column(primary = "desc")]
    pub id: i64,
    pub label: String,
}

/// Emails are written lowercased through the getter.
#[SQLiteTable(name = "accounts")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    #[column(primary)]
    pub id: i64,
    #[column(get = email, set = set_email)]
    email: String,
    #[column(default = 0)]
    pub balance: f64,
}

impl Account {
    pub fn new(email: &str, balance: f64) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            balance,
        }
    }

    pub fn email(&self) -> String {
        self.email.to_lowercase()
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn raw_email(&self) -> &str {
        &self.email
    }
}

/// No primary key; table name derived from the struct name.
#[SQLiteTable]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    pub message: String,
    #[column(name = "payload")]
    pub data: Vec<u8>,
}
