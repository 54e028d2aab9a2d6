use crate::common::*;
use quarry::error::QuarryError;
use quarry::prelude::*;

#[test]
fn insert_many_keeps_order() -> Result<()> {
    let db = setup_db();
    let records = vec![object("x", 3), object("y", 1), object("z", 2)];
    db.insert_many_records(&records)?;

    let found: Vec<(i64, String)> = db
        .select_query::<(ObjectId, ObjectText)>()
        .order_by(ObjectId, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(
        found,
        vec![
            (1, "x".to_string()),
            (2, "y".to_string()),
            (3, "z".to_string())
        ]
    );
    Ok(())
}

#[test]
fn insert_many_mixes_explicit_and_assigned_keys() -> Result<()> {
    let db = setup_db();
    let records = vec![
        object("a", 0),
        Object {
            id: 10,
            ..object("b", 0)
        },
        object("c", 0),
    ];

    let query = db.insert_query(&records);
    let statements: Vec<String> = query.to_sql().iter().map(|sql| sql.sql()).collect();
    assert_eq!(
        statements,
        vec![
            "INSERT INTO `objects` (`text`, `n`) VALUES (?, ?)",
            "INSERT INTO `objects` (`id`, `text`, `n`) VALUES (?, ?, ?)",
            "INSERT INTO `objects` (`text`, `n`) VALUES (?, ?)",
        ]
    );
    assert_eq!(query.exec()?, 3);

    let ids: Vec<i64> = db
        .select_query::<ObjectId>()
        .order_by(ObjectId, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(ids, vec![1, 10, 11]);
    Ok(())
}

#[test]
fn insert_many_empty_is_noop() -> Result<()> {
    let db = setup_db();
    db.insert_many_records::<Object>(&[])?;
    assert_eq!(db.insert_query::<Object>(&[]).exec()?, 0);
    assert!(db.insert_query::<Object>(&[]).to_sql().is_empty());
    Ok(())
}

#[test]
fn failed_batch_rolls_back_everything() {
    let db = setup_db();
    let records = vec![
        person("ann", None),
        person("bo", None),
        Person {
            id: 9,
            ..person("ann", None)
        },
    ];

    let err = db.insert_many_records(&records).unwrap_err();
    assert!(matches!(err, QuarryError::Execution { .. }));

    let count = db.select_query::<PersonId>().many().unwrap().count();
    assert_eq!(count, 0);

    // The rolled back transaction is closed, so the next batch can open one.
    db.insert_many_records(&[person("cy", None)]).unwrap();
    let count = db.select_query::<PersonId>().many().unwrap().count();
    assert_eq!(count, 1);
}

#[test]
fn foreign_key_violation_is_reported() {
    let db = setup_db();
    let err = db.insert_record(&mut pet("lost", Some(42))).unwrap_err();
    assert!(matches!(err, QuarryError::Execution { code: Some(_), .. }));
    assert!(!err.is_busy());
}

#[test]
fn table_without_primary_key() -> Result<()> {
    let db = setup_db();
    let mut first = EventLog {
        message: "boot".to_string(),
        data: vec![0, 1, 2],
    };
    let mut second = EventLog {
        message: "halt".to_string(),
        data: Vec::new(),
    };
    db.insert_record(&mut first)?;
    db.insert_record(&mut second)?;

    let logs = db.select_query::<EventLog>().many()?.to_vec()?;
    assert_eq!(logs, vec![first, second]);

    let payloads: Vec<Vec<u8>> = db
        .select_query::<EventLogData>()
        .r#where(EventLogMessage.eq("boot"))
        .many()?
        .to_vec()?;
    assert_eq!(payloads, vec![vec![0, 1, 2]]);

    assert_eq!(db.truncate::<EventLog>()?, 2);
    Ok(())
}
