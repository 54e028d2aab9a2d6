use crate::common::*;
use quarry::error::QuarryError;
use quarry::prelude::*;
use quarry::sqlite::expression::TablesOf;

fn ns(objects: &[Object]) -> Vec<i64> {
    objects.iter().map(|object| object.n).collect()
}

#[test]
fn and_of_not_equals_skips_both_rows() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [0, 1, 2, 3]);

    let found = db
        .select_query::<Object>()
        .r#where(ObjectN.ne(0).and(ObjectId.ne(2)))
        .many()?
        .to_vec()?;

    assert_eq!(found.len(), 2);
    assert_eq!(ns(&found), vec![2, 3]);
    Ok(())
}

#[test]
fn each_comparison_selects_its_subset() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, 0..10);

    assert_eq!(matching(&db, ObjectN.eq(4))?, vec![4]);
    assert_eq!(matching(&db, ObjectN.ne(4))?, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
    assert_eq!(matching(&db, ObjectN.lt(3))?, vec![0, 1, 2]);
    assert_eq!(matching(&db, ObjectN.lte(3))?, vec![0, 1, 2, 3]);
    assert_eq!(matching(&db, ObjectN.gt(7))?, vec![8, 9]);
    assert_eq!(matching(&db, ObjectN.gte(7))?, vec![7, 8, 9]);
    Ok(())
}

fn matching(db: &Quarry, condition: Condition<TablesOf<ObjectN>>) -> Result<Vec<i64>> {
    db.select_query::<ObjectN>()
        .r#where(condition)
        .order_by(ObjectN, OrderBy::Asc)
        .many()?
        .to_vec()
}

#[test]
fn or_and_nesting() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, 0..10);

    let found: Vec<i64> = db
        .select_query::<ObjectN>()
        .r#where(
            ObjectN
                .lt(2)
                .or(ObjectN.gt(7))
                .and(ObjectText.ne("a")),
        )
        .order_by(ObjectN, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(found, vec![1, 8, 9]);
    Ok(())
}

#[test]
fn where_replaces_previous_filter() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, 0..5);

    let found: Vec<i64> = db
        .select_query::<ObjectN>()
        .r#where(ObjectN.eq(1))
        .r#where(ObjectN.eq(3))
        .many()?
        .to_vec()?;
    assert_eq!(found, vec![3]);
    Ok(())
}

#[test]
fn order_by_desc_with_limit() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [4, 9, 1, 7, 3, 8]);

    let top = db
        .select_query::<Object>()
        .order_by(ObjectN, OrderBy::Desc)
        .limit(3)
        .many()?
        .to_vec()?;
    assert_eq!(ns(&top), vec![9, 8, 7]);
    Ok(())
}

#[test]
fn limit_offset_returns_window() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, 0..10);

    let window: Vec<i64> = db
        .select_query::<ObjectN>()
        .order_by(ObjectN, OrderBy::Asc)
        .limit_offset(3, 4)
        .many()?
        .to_vec()?;
    assert_eq!(window, vec![4, 5, 6]);

    let tail: Vec<i64> = db
        .select_query::<ObjectN>()
        .order_by(ObjectN, OrderBy::Asc)
        .offset(8)
        .many()?
        .to_vec()?;
    assert_eq!(tail, vec![8, 9]);
    Ok(())
}

#[test]
fn order_by_appends_keys() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [2, 1, 2, 1]);

    let ids: Vec<i64> = db
        .select_query::<ObjectId>()
        .order_by(ObjectN, OrderBy::Asc)
        .order_by(ObjectId, OrderBy::Desc)
        .many()?
        .to_vec()?;
    assert_eq!(ids, vec![4, 2, 3, 1]);
    Ok(())
}

#[test]
fn many_records_come_back_in_key_order() -> Result<()> {
    let db = setup_db();
    let records: Vec<Object> = (0..200).map(|i| object(&format!("o{i}"), i * 3)).collect();
    db.insert_many_records(&records)?;

    let found = db.select_query::<Object>().many()?.to_vec()?;
    assert_eq!(found.len(), 200);
    for (i, record) in found.iter().enumerate() {
        assert_eq!(record.id, i as i64 + 1);
        assert_eq!(record.n, i as i64 * 3);
        assert_eq!(record.text, format!("o{i}"));
    }
    Ok(())
}

#[test]
fn reused_query_sees_new_rows() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [1]);

    let newest = db
        .select_query::<Object>()
        .order_by(ObjectId, OrderBy::Desc);
    assert_eq!(newest.one()?.map(|o| o.n), Some(1));

    let mut second = object("z", 2);
    db.insert_record(&mut second)?;
    assert_eq!(newest.one()?, Some(second));
    Ok(())
}

#[test]
fn many_can_run_again_on_the_same_query() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [1, 2]);

    let mut query = db
        .select_query::<ObjectN>()
        .order_by(ObjectN, OrderBy::Asc);
    assert_eq!(query.many()?.to_vec()?, vec![1, 2]);

    db.insert_record(&mut object("c", 3))?;
    assert_eq!(query.many()?.to_vec()?, vec![1, 2, 3]);

    // A partially consumed run does not affect the next one.
    assert_eq!(query.many()?.next().transpose()?, Some(1));
    assert_eq!(query.many()?.count(), 3);
    Ok(())
}

#[test]
fn one_on_empty_result_is_none() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [1, 2]);

    let none = db
        .select_query::<Object>()
        .r#where(ObjectN.gt(100))
        .one()?;
    assert_eq!(none, None);
    Ok(())
}

#[test]
fn one_rejects_explicit_limit() {
    let db = setup_db();

    let err = db.select_query::<Object>().limit(2).one().unwrap_err();
    assert!(matches!(err, QuarryError::Usage(_)));
}

#[test]
fn single_column_and_tuple_selections() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [5, 6]);

    let texts: Vec<String> = db
        .select_query::<ObjectText>()
        .order_by(ObjectId, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(texts, vec!["a".to_string(), "b".to_string()]);

    let pairs: Vec<(i64, String)> = db
        .select_query::<(ObjectId, ObjectText)>()
        .order_by(ObjectId, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(pairs, vec![(1, "a".to_string()), (2, "b".to_string())]);

    let nested = db
        .select_query::<(ObjectN, (ObjectText, Object))>()
        .r#where(ObjectId.eq(2))
        .one()?
        .unwrap();
    assert_eq!(nested.0, 6);
    assert_eq!(nested.1.0, "b");
    assert_eq!(nested.1.1.n, 6);
    Ok(())
}

#[test]
fn in_list_with_borrowed_and_owned_values() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, 0..5);

    let wanted = vec!["a", "c", "missing"];
    let found: Vec<i64> = db
        .select_query::<ObjectN>()
        .r#where(ObjectText.in_list(wanted))
        .order_by(ObjectN, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(found, vec![0, 2]);

    let owned: Vec<String> = vec!["b".to_string(), "e".to_string()];
    let found: Vec<i64> = db
        .select_query::<ObjectN>()
        .r#where(ObjectText.not_in_list(&owned))
        .order_by(ObjectN, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(found, vec![0, 2, 3]);

    let none: Vec<i64> = db
        .select_query::<ObjectN>()
        .r#where(ObjectId.in_list(Vec::<i64>::new()))
        .many()?
        .to_vec()?;
    assert!(none.is_empty());
    Ok(())
}

#[test]
fn like_and_glob_patterns() -> Result<()> {
    let db = setup_db();
    for name in ["alpha", "Alpine", "beta"] {
        db.insert_record(&mut object(name, 0))?;
    }

    let like: Vec<String> = db
        .select_query::<ObjectText>()
        .r#where(ObjectText.like("al%"))
        .order_by(ObjectId, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(like, vec!["alpha".to_string(), "Alpine".to_string()]);

    let glob: Vec<String> = db
        .select_query::<ObjectText>()
        .r#where(ObjectText.glob("al*"))
        .many()?
        .to_vec()?;
    assert_eq!(glob, vec!["alpha".to_string()]);
    Ok(())
}

#[test]
fn null_checks() -> Result<()> {
    let db = setup_db();
    db.insert_record(&mut person("ann", Some(30)))?;
    db.insert_record(&mut person("bo", None))?;

    let unknown: Vec<String> = db
        .select_query::<PersonName>()
        .r#where(PersonAge.is_null())
        .many()?
        .to_vec()?;
    assert_eq!(unknown, vec!["bo".to_string()]);

    let known: Vec<Option<i32>> = db
        .select_query::<PersonAge>()
        .r#where(PersonAge.is_not_null())
        .many()?
        .to_vec()?;
    assert_eq!(known, vec![Some(30)]);
    Ok(())
}

#[test]
fn group_by_collapses_duplicates() -> Result<()> {
    let db = setup_db();
    seed_objects(&db, [3, 1, 3, 2, 1]);

    let groups: Vec<i64> = db
        .select_query::<ObjectN>()
        .group_by(ObjectN)
        .order_by(ObjectN, OrderBy::Asc)
        .many()?
        .to_vec()?;
    assert_eq!(groups, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn collate_nocase_applies_to_comparisons() -> Result<()> {
    let db = setup_db();
    let mut country = Country {
        code: "de".to_string(),
        name: "Germany".to_string(),
        population: None,
    };
    db.insert_record(&mut country)?;

    let found = db
        .select_query::<Country>()
        .r#where(CountryName.eq("GERMANY"))
        .one()?;
    assert_eq!(found, Some(country));
    Ok(())
}

#[test]
fn rendered_sql_is_inspectable() {
    let db = setup_db();
    let query = db
        .select_query::<(ObjectId, ObjectText)>()
        .r#where(ObjectN.gte(2))
        .order_by(ObjectId, OrderBy::Desc)
        .limit(5);
    let sql = query.to_sql();
    assert_eq!(
        sql.sql(),
        "SELECT `objects`.`id`, `objects`.`text` FROM `objects` WHERE `objects`.`n` >= ? \
         ORDER BY `objects`.`id` DESC LIMIT 5"
    );
    assert_eq!(sql.params().len(), 1);
}
