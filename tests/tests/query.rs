use tests::prelude::*;
use tests::prelude::assert_eq;

use arbor::{
    map_with,
    schema::app::{Type, TypeRef},
    Row,
};
use std::collections::BTreeMap;

/// Marker supertype for anything with a name
struct Named;

#[derive(Debug, Clone, PartialEq, Entity)]
#[supertype(Named)]
struct Author {
    #[id]
    id: Option<i64>,
    name: String,
    books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Book {
    title: String,
}

/// Query-only type without entity metadata
#[derive(Debug, PartialEq)]
struct Summary {
    name: String,
    books: i64,
}

impl Field for Summary {
    fn ty() -> Type {
        Type::unmapped(TypeRef::of::<Summary>())
    }

    fn to_value(&self) -> Value {
        Value::record_from_vec(vec![Value::from(self.name.as_str()), Value::I64(self.books)])
    }

    fn load(value: Value) -> arbor::Result<Self> {
        let mut record = value.into_record()?;
        Ok(Summary {
            name: String::load(record.take_checked(0)?)?,
            books: i64::load(record.take_checked(1)?)?,
        })
    }
}

struct Unknown;

impl Field for Unknown {
    fn ty() -> Type {
        Type::unmapped(TypeRef::of::<Unknown>())
    }

    fn to_value(&self) -> Value {
        Value::Null
    }

    fn load(_: Value) -> arbor::Result<Self> {
        Ok(Unknown)
    }
}

const SUMMARY_SQL: &str = r#"SELECT a."name" AS "name", COUNT(b."title") AS "books"
    FROM "author" a LEFT JOIN "book" b ON b."author" = a."id"
    GROUP BY a."id" ORDER BY a."id""#;

fn author(name: &str, titles: &[&str]) -> Author {
    Author {
        id: None,
        name: name.to_string(),
        books: titles
            .iter()
            .map(|title| Book {
                title: title.to_string(),
            })
            .collect(),
    }
}

async fn seed(t: &mut Test) -> Vec<Author> {
    let mut authors = vec![
        author("austen", &["Emma", "Persuasion"]),
        author("herbert", &["Dune"]),
    ];

    for author in &mut authors {
        t.db.save(&mut t.session, author).await.unwrap();
    }
    t.log.clear();

    authors
}

#[tokio::test]
async fn scalar_results() {
    let mut t = Test::new(&mut entities!(Author)).await;
    seed(&mut t).await;

    let count: i64 = t
        .db
        .query(&mut t.session, r#"SELECT COUNT(*) FROM "book""#, vec![])
        .await
        .unwrap();
    assert_eq!(count, 3);

    let names: Vec<String> = t
        .db
        .query(
            &mut t.session,
            r#"SELECT "name" FROM "author" ORDER BY "name" DESC"#,
            vec![],
        )
        .await
        .unwrap();
    assert_eq!(names, ["herbert", "austen"]);

    let missing: Option<String> = t
        .db
        .query(
            &mut t.session,
            r#"SELECT "name" FROM "author" WHERE "id" = ?1"#,
            vec![Value::I64(99)],
        )
        .await
        .unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn row_count_must_match_the_return_type() {
    let mut t = Test::new(&mut entities!(Author)).await;
    seed(&mut t).await;

    let err = t
        .db
        .query::<String>(
            &mut t.session,
            r#"SELECT "name" FROM "author" WHERE "id" = ?1"#,
            vec![Value::I64(99)],
        )
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    let err = t
        .db
        .query::<Option<String>>(&mut t.session, r#"SELECT "name" FROM "author""#, vec![])
        .await
        .unwrap_err();
    assert!(err.is_too_many_records());

    let err = t
        .db
        .query::<BTreeMap<String, String>>(&mut t.session, r#"SELECT "name" FROM "author""#, vec![])
        .await
        .unwrap_err();
    assert!(err.is_invalid_statement());
}

#[tokio::test]
async fn entity_results_load_their_children() {
    let mut t = Test::new(&mut entities!(Author)).await;
    let authors = seed(&mut t).await;

    let found: Vec<Author> = t
        .db
        .query(
            &mut t.session,
            r#"SELECT "id", "name" FROM "author" WHERE "name" LIKE ?1"#,
            vec![Value::from("aus%")],
        )
        .await
        .unwrap();

    assert_eq!(found, authors[..1].to_vec());
    // One query for the roots, one per root for its books
    assert_eq!(t.log.len(), 2);
}

#[tokio::test]
async fn registered_mapper_for_unmapped_type() {
    let mut builder = entities!(Author);
    builder.row_mapper::<Summary>(map_with(|mut row: Row| {
        Ok(Summary {
            name: String::load(row.take("name")?)?,
            books: i64::load(row.take("books")?)?,
        })
    }));

    let mut t = Test::new(&mut builder).await;
    seed(&mut t).await;

    let summaries: Vec<Summary> = t
        .db
        .query(&mut t.session, SUMMARY_SQL, vec![])
        .await
        .unwrap();

    assert_eq!(
        summaries,
        [
            Summary {
                name: "austen".to_string(),
                books: 2,
            },
            Summary {
                name: "herbert".to_string(),
                books: 1,
            },
        ]
    );
}

#[tokio::test]
async fn supertype_mapper_replaces_metadata_loading() {
    let mut builder = entities!(Author);
    builder.row_mapper::<Named>(map_with(|mut row: Row| {
        Ok(Author {
            id: Option::<i64>::load(row.take("id")?)?,
            name: String::load(row.take("name")?)?.to_uppercase(),
            books: vec![],
        })
    }));

    let mut t = Test::new(&mut builder).await;
    seed(&mut t).await;

    let found: Option<Author> = t
        .db
        .query(
            &mut t.session,
            r#"SELECT "id", "name" FROM "author" WHERE "name" = ?1"#,
            vec![Value::from("herbert")],
        )
        .await
        .unwrap();

    assert_eq!(
        found,
        Some(Author {
            id: Some(2),
            name: "HERBERT".to_string(),
            books: vec![],
        })
    );
    // Children are not fetched
    assert_eq!(t.log.len(), 1);
}

#[tokio::test]
async fn unresolved_mapper_fails_before_executing() {
    let mut t = Test::new(&mut entities!(Author)).await;

    let err = t
        .db
        .query::<Vec<Unknown>>(&mut t.session, r#"SELECT 1"#, vec![])
        .await
        .err()
        .unwrap();

    assert!(err.is_unresolved_row_mapper());
    assert!(t.log.is_empty());
}
