use crate::common::*;
use quarry::prelude::*;

#[test]
fn getter_feeds_writes_and_setter_feeds_reads() -> Result<()> {
    let db = setup_db();

    let mut account = Account::new("Ann@Example.COM", 12.5);
    db.insert_record(&mut account)?;
    assert_eq!(account.raw_email(), "Ann@Example.COM");

    let stored: String = db
        .connection()
        .query_row("SELECT email FROM accounts WHERE id = ?1", [account.id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, "ann@example.com");

    let found = db.find_record::<Account, _>(account.id)?.unwrap();
    assert_eq!(found.raw_email(), "ann@example.com");
    assert_eq!(found.balance, 12.5);
    Ok(())
}

#[test]
fn accessor_columns_filter_and_select() -> Result<()> {
    let db = setup_db();
    db.insert_record(&mut Account::new("B@x.io", 1.0))?;
    db.insert_record(&mut Account::new("c@x.io", 2.0))?;

    let emails: Vec<String> = db
        .select_query::<AccountEmail>()
        .r#where(AccountEmail.like("b@%"))
        .many()?
        .to_vec()?;
    assert_eq!(emails, vec!["b@x.io".to_string()]);

    let record = Account::new("MiXeD@x.io", 0.0);
    assert_eq!(AccountEmail::get(&record), "mixed@x.io");
    Ok(())
}

#[test]
fn update_goes_through_getter() -> Result<()> {
    let db = setup_db();
    let mut account = Account::new("first@x.io", 3.0);
    db.insert_record(&mut account)?;

    account.set_email("SECOND@X.IO".to_string());
    account.balance = 4.0;
    assert_eq!(db.update_record(&account)?, 1);

    let found = db.find_record::<Account, _>(account.id)?.unwrap();
    assert_eq!(found.email(), "second@x.io");
    assert_eq!(found.balance, 4.0);
    Ok(())
}

#[test]
fn real_column_accepts_integer_comparisons() -> Result<()> {
    let db = setup_db();
    db.insert_record(&mut Account::new("a@x.io", 1.5))?;
    db.insert_record(&mut Account::new("b@x.io", 7.0))?;

    let rich: Vec<f64> = db
        .select_query::<AccountBalance>()
        .r#where(AccountBalance.gt(2))
        .many()?
        .to_vec()?;
    assert_eq!(rich, vec![7.0]);
    Ok(())
}
