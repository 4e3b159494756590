mod common;

use std::path::PathBuf;

use stack_dump_sql::{
    config::{ExtrasSource, RunConfig},
    foreign_keys::{LongestNameMatcher, ParentMatcher},
    generate::convert_dump,
    pipeline::InferenceOptions,
    schema::ColumnType,
};
use common::{DumpWorkspace, stackexchange_dump};

fn config_for(dir: &std::path::Path, dataset: &str, known: bool) -> RunConfig {
    RunConfig {
        input: dir.to_path_buf(),
        dataset: Some(dataset.to_string()),
        known_dataset: known,
        extras: if known {
            ExtrasSource::Bundled
        } else {
            ExtrasSource::None
        },
        options: InferenceOptions::default(),
        input_encoding: None,
    }
}

#[test]
fn script_sections_follow_fixed_order() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");
    let statements = conversion.script.statements();

    assert_eq!(statements[0], "CREATE SCHEMA cooking;");
    assert_eq!(statements[1], "SET search_path TO cooking;");
    assert_eq!(
        statements[2],
        "CREATE TABLE comments(Id INTEGER PRIMARY KEY, PostId INTEGER, Score INTEGER, Text TEXT, UserId INTEGER);"
    );

    let position = |prefix: &str| {
        statements
            .iter()
            .position(|s| s.starts_with(prefix))
            .unwrap_or_else(|| panic!("missing statement starting with {prefix}"))
    };
    let last_insert = statements
        .iter()
        .rposition(|s| s.starts_with("INSERT INTO votes "))
        .expect("votes insert");
    let first_extra = position("CREATE TABLE VoteTypes");
    let first_delete = position("DELETE FROM ");
    assert!(last_insert < first_extra);
    assert!(first_extra < first_delete);

    for (idx, statement) in statements.iter().enumerate() {
        if statement.starts_with("DELETE FROM ") {
            assert!(statements[idx + 1].starts_with("ALTER TABLE "));
        }
    }
}

#[test]
fn tables_are_typed_and_rows_rendered() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");

    let users = conversion
        .tables
        .iter()
        .find(|t| t.name == "users")
        .expect("users table");
    let types = users
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.datatype))
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            ("Id", ColumnType::Integer),
            ("Reputation", ColumnType::Integer),
            ("CreationDate", ColumnType::Timestamp),
            ("DisplayName", ColumnType::Text),
            ("Location", ColumnType::Text),
            ("IsModerator", ColumnType::Boolean),
        ]
    );

    let statements = conversion.script.statements();
    assert!(statements.contains(
        &"INSERT INTO users VALUES(2, 1, '2010-07-19T07:01:12.000', 'Bob O''Neil', NULL, false);"
            .to_string()
    ));
    assert!(statements.contains(
        &"INSERT INTO posts VALUES(1, 1, NULL, '2010-07-19T19:12:12.510', 5, '<p>Why?</p>', 1);"
            .to_string()
    ));
}

#[test]
fn recognized_dataset_links_lookup_tables() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");

    let links = conversion
        .foreign_keys
        .iter()
        .map(|fk| {
            (
                fk.child_table.as_str(),
                fk.child_column.as_str(),
                fk.parent_table.as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        links,
        vec![
            ("comments", "PostId", "posts"),
            ("comments", "UserId", "users"),
            ("posts", "PostTypeId", "posttypes"),
            ("posts", "OwnerUserId", "users"),
            ("votes", "PostId", "posts"),
            ("votes", "VoteTypeId", "votetypes"),
        ]
    );
    assert!(conversion.script.statements().contains(
        &"DELETE FROM comments WHERE PostId NOT IN (SELECT posts.Id FROM posts);".to_string()
    ));
}

#[test]
fn unrecognized_dataset_skips_extras_and_lookup_links() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), "local-export.7z", false);
    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");

    assert_eq!(conversion.foreign_keys.len(), 4);
    let statements = conversion.script.statements();
    assert_eq!(statements[0], "CREATE SCHEMA local_export;");
    assert!(!statements.iter().any(|s| s.contains("VoteTypes")));
    assert!(!statements.iter().any(|s| s.contains("posttypes")));
}

#[test]
fn bad_records_and_empty_tables_do_not_stop_siblings() {
    let dump = DumpWorkspace::new();
    dump.write_table(
        "Tags",
        &[
            r#"<row Id="1" TagName="rust" Count="10" />"#,
            r#"<row Id="2" TagName="broken />"#,
            r#"<row Id="3" TagName="sql" Count="4" />"#,
        ],
    );
    dump.write_table("Badges", &[]);
    dump.write_table(
        "PostTags",
        &[r#"<row Id="1" TagId="1" BadgeId="1" />"#],
    );

    let config = config_for(dump.path(), "tags.example", false);
    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");

    assert_eq!(conversion.reports.len(), 3);
    let skipped = conversion
        .reports
        .iter()
        .map(|r| r.skipped.len())
        .sum::<usize>();
    assert_eq!(skipped, 1);
    assert!(conversion.reports.iter().any(|r| r.empty.is_some()));

    let statements = conversion.script.statements();
    assert!(!statements.iter().any(|s| s.contains("badges")));
    assert_eq!(
        statements
            .iter()
            .filter(|s| s.starts_with("INSERT INTO tags "))
            .count(),
        2
    );

    // Badges has no table, so BadgeId gets no constraint; TagId still links.
    let links = conversion
        .foreign_keys
        .iter()
        .map(|fk| (fk.child_column.as_str(), fk.parent_table.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(links, vec![("TagId", "tags")]);
}

struct NeverMatch;

impl ParentMatcher for NeverMatch {
    fn match_parent<'a>(&self, _column: &str, _parents: &[&'a str]) -> Option<&'a str> {
        None
    }
}

#[test]
fn matcher_is_pluggable() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    let conversion = convert_dump(&config, &NeverMatch).expect("convert");
    assert!(conversion.foreign_keys.is_empty());
    assert!(
        !conversion
            .script
            .statements()
            .iter()
            .any(|s| s.starts_with("ALTER TABLE "))
    );
}

#[test]
fn extras_file_replaces_bundled_statements() {
    let dump = stackexchange_dump();
    let extras = dump.write(
        "extras.sql",
        "-- custom\nCREATE TABLE Notes(Id INTEGER PRIMARY KEY, Body TEXT);\nINSERT INTO Notes VALUES(1, 'a;b');\n",
    );
    let mut config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    config.extras = ExtrasSource::File(PathBuf::from(&extras));

    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");
    let statements = conversion.script.statements();
    assert!(statements.contains(&"INSERT INTO Notes VALUES(1, 'a;b');".to_string()));
    assert!(!statements.iter().any(|s| s.starts_with("CREATE TABLE VoteTypes")));
    assert!(!statements.iter().any(|s| s.contains("REFERENCES votetypes")));
    assert!(!statements.iter().any(|s| s.contains("REFERENCES posttypes")));
}

#[test]
fn skipped_extras_leave_lookup_tables_unreferenced() {
    let dump = stackexchange_dump();
    let mut config = config_for(dump.path(), "cooking.stackexchange.com.7z", true);
    config.extras = ExtrasSource::None;

    let conversion = convert_dump(&config, &LongestNameMatcher).expect("convert");
    assert_eq!(conversion.foreign_keys.len(), 4);
    assert!(
        conversion
            .foreign_keys
            .iter()
            .all(|fk| !["votetypes", "posttypes", "posthistorytypes"].contains(&fk.parent_table.as_str()))
    );
    assert!(
        !conversion
            .script
            .statements()
            .iter()
            .any(|s| s.contains("VoteTypes") || s.contains("votetypes"))
    );
}

#[test]
fn dataset_without_schema_name_is_an_error() {
    let dump = stackexchange_dump();
    let config = config_for(dump.path(), ".7z", false);
    let err = convert_dump(&config, &LongestNameMatcher).unwrap_err();
    assert!(err.to_string().contains("does not yield a schema name"));
}

#[test]
fn missing_dataset_is_an_error() {
    let dump = stackexchange_dump();
    let mut config = config_for(dump.path(), "unused", false);
    config.dataset = None;
    assert!(convert_dump(&config, &LongestNameMatcher).is_err());
}
