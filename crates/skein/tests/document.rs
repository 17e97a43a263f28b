//! Filters, collections and projections loaded from documents.

use skein::document::{from_json, from_yaml, to_json, to_yaml};
use skein::{
    fields, one_of, record, yarn, Clause, Collection, Filter, Limits, Matcher, Pattern,
    Projection, SkeinError, SortOptions,
};

const TASKS: &str = r#"
- { id: 1, entity: WorkItem, state: s1, title: fix login, owner: ada }
- { id: 2, entity: WorkItem, state: s2, title: write docs }
- { id: 3, entity: Note, state: s1, title: fix typo }
- { id: 4, entity: WorkItem, state: s3, title: fix crash, owner: bob }
"#;

fn ids(c: &Collection) -> Vec<&str> {
    c.iter().filter_map(|v| v.get("id").as_atom()).collect()
}

#[test]
fn yaml_filter_over_yaml_collection() {
    let tasks: Collection = from_yaml(TASKS).unwrap();
    let f: Filter = from_yaml(
        r#"
entity: WorkItem
state: [s1, s3]
title: { $regex: "^fix" }
"#,
    )
    .unwrap();

    assert_eq!(ids(&tasks.filter(&f)), ["1", "4"]);
}

#[test]
fn null_in_a_filter_matches_missing_fields() {
    let tasks: Collection = from_yaml(TASKS).unwrap();
    let unowned: Filter = from_yaml("{ entity: WorkItem, owner: null }").unwrap();
    assert_eq!(ids(&tasks.filter(&unowned)), ["2"]);

    let maybe_ada: Filter = from_yaml("{ owner: [null, ada] }").unwrap();
    assert_eq!(ids(&tasks.filter(&maybe_ada)), ["1", "2", "3"]);
}

#[test]
fn decoded_filters_equal_built_ones() {
    let decoded: Filter = from_json(r#"{"entity": "WorkItem", "state": ["s2", "s1"]}"#).unwrap();
    let built = Filter::from(fields! {
        "entity" => "WorkItem",
        "state" => one_of!["s1", "s2"],
    });
    assert_eq!(decoded, built);
}

#[test]
fn numbers_and_booleans_become_text() {
    let v: Collection = from_json(r#"{"count": 3, "done": false}"#).unwrap();
    let f: Filter = from_yaml("{ count: '3', done: false }").unwrap();
    assert!(v.test_any(&f));
}

#[test]
fn projection_document_sorts_collection() {
    let tasks: Collection = from_yaml(TASKS).unwrap();
    let order: Projection<u32> = from_yaml(
        r#"
- when: { state: s3 }
  then: 0
- when: { state: s1 }
  then: 1
"#,
    )
    .unwrap();

    let options: SortOptions = from_json(r#"{"dir": "asc", "unranked": "last"}"#).unwrap();
    assert_eq!(ids(&tasks.sort_by(&order, &options)), ["4", "1", "3", "2"]);

    let options: SortOptions = from_json(r#"{"dir": "desc"}"#).unwrap();
    assert_eq!(ids(&tasks.sort_by(&order, &options)), ["1", "3", "4", "2"]);
}

#[test]
fn projection_rules_reject_unknown_keys() {
    let err = from_yaml::<Projection<u32>>("- { when: a, then: 1, else: 2 }").unwrap_err();
    assert!(matches!(err, SkeinError::Decode(_)));
}

#[test]
fn matcher_from_config() {
    let limits: Limits = from_yaml("max_depth: 3").unwrap();
    let shallow: Filter = from_yaml("{ owner: { name: ada } }").unwrap();
    let deep: Filter = from_yaml("{ a: { b: { c: x } } }").unwrap();

    let matcher = Matcher::with_limits(shallow, limits).unwrap();
    assert!(matcher.matches(&record! { "owner" => record! { "name" => "ada" } }));
    assert!(Matcher::with_limits(deep, limits).is_err());
}

#[test]
fn invalid_documents() {
    assert!(matches!(
        from_json::<Filter>(r#"{"title": {"$regex": "[unclosed"}}"#),
        Err(SkeinError::Decode(_))
    ));
    assert!(matches!(from_json::<Collection>("{"), Err(SkeinError::Decode(_))));
}

#[test]
fn regex_field_names_do_not_change_meaning() {
    let f = Filter::from(fields! { "$regex" => "a" });
    assert!(f.matches(&record! { "$regex" => "a" }));
    assert!(matches!(to_json(&f), Err(SkeinError::Encode(_))));

    let mixed = Filter::from(fields! { "$regex" => "a", "k" => "v" });
    assert!(matches!(to_yaml(&mixed), Err(SkeinError::Encode(_))));

    assert!(matches!(
        from_json::<Filter>(r#"{"k": "v", "$regex": "x"}"#),
        Err(SkeinError::Decode(_))
    ));
}

#[test]
fn filters_survive_a_round_trip() {
    let f = Filter::from(fields! {
        "title" => Pattern::new("^fix").unwrap(),
        "owner" => one_of![Clause::Absent, "ada"],
        "meta" => fields! { "tag" => "x" },
    });
    let back: Filter = from_json(&to_json(&f).unwrap()).unwrap();
    assert_eq!(back, f);

    let back: Filter = from_yaml(&to_yaml(&f).unwrap()).unwrap();
    assert_eq!(back, f);
}

#[test]
fn encode_to_yaml_and_back() {
    let items = yarn![
        record! { "entity" => "WorkItem", "state" => "s1" },
        record! { "entity" => "Note" },
    ];
    let text = to_yaml(&items).unwrap();
    let back: Collection = from_yaml(&text).unwrap();
    assert_eq!(back, items);

    let f = Filter::from(fields! { "owner" => Clause::Absent });
    assert_eq!(to_json(&f).unwrap(), r#"{"owner":null}"#);
}
