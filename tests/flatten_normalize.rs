use propath::{
    copy_properties, denormalize_properties, get_property, normalize_array_properties,
    from_flat_map, normalize_properties, normalize_properties_with_options, ErrorKind, FlatMap,
    Node, NormalizeOptions, Object,
};
use rstest::{fixture, rstest};
use serde_json::{json, Value};

#[fixture]
fn person() -> Value {
    json!({
        "name": {"first": "John", "last": "Smith"},
        "friends": ["Alice", "Bob"],
        "dates": [
            {"type": "birthdate", "date": "1994-03-12"},
            {"type": "graduation", "date": "2012-06-20"}
        ]
    })
}

fn person_flat() -> Value {
    json!({
        "name.first": "John",
        "name.last": "Smith",
        "friends[0]": "Alice",
        "friends[1]": "Bob",
        "dates[0].type": "birthdate",
        "dates[0].date": "1994-03-12",
        "dates[1].type": "graduation",
        "dates[1].date": "2012-06-20"
    })
}

fn flat(value: Value) -> FlatMap {
    serde_json::from_value(value).unwrap()
}

/// `{name, friends: [Alice, <hole>, Bob], dates: [<hole>, birthdate, <hole>, graduation]}`
fn holey_person() -> Node {
    let mut name = Object::new();
    name.insert("first".to_string(), Node::from("John"));
    name.insert("last".to_string(), Node::from("Smith"));

    let friends = vec![Node::from("Alice"), Node::Absent, Node::from("Bob")];
    let dates = vec![
        Node::Absent,
        Node::from(json!({"type": "birthdate", "date": "1994-03-12"})),
        Node::Absent,
        Node::from(json!({"type": "graduation", "date": "2012-06-20"})),
    ];

    let mut root = Object::new();
    root.insert("name".to_string(), Node::Object(name));
    root.insert("friends".to_string(), Node::Array(friends));
    root.insert("dates".to_string(), Node::Array(dates));
    Node::Object(root)
}

#[rstest]
fn denormalize_emits_every_leaf(person: Value) {
    let map = denormalize_properties(&Node::from(person));
    assert_eq!(serde_json::to_value(&map).unwrap(), person_flat());
}

#[rstest]
fn denormalize_small_example() {
    let doc = Node::from(json!({"name": {"first": "John"}, "friends": ["Alice", "Bob"]}));
    let map = denormalize_properties(&doc);
    assert_eq!(
        serde_json::to_value(&map).unwrap(),
        json!({"name.first": "John", "friends[0]": "Alice", "friends[1]": "Bob"})
    );
}

#[rstest]
fn denormalize_keeps_null_leaves() {
    let map = denormalize_properties(&Node::from(json!({"a": null, "b": [null]})));
    assert_eq!(map.get("a"), Some(&Value::Null));
    assert_eq!(map.get("b[0]"), Some(&Value::Null));
}

#[rstest]
fn normalize_rebuilds_tree(person: Value) {
    let doc = normalize_properties(&flat(person_flat()), true).unwrap();
    assert_eq!(Value::from(doc), person);
}

#[rstest]
fn normalize_is_order_independent(person: Value) {
    let mut entries: Vec<(String, Value)> = flat(person_flat()).into_iter().collect();
    entries.reverse();
    let reversed: FlatMap = entries.into_iter().collect();
    let doc = normalize_properties(&reversed, true).unwrap();
    assert_eq!(Value::from(doc), person);
}

#[rstest]
fn normalize_with_options_matches_flag() {
    let map = flat(json!({"a[2]": 1}));
    let kept = normalize_properties_with_options(
        &map,
        &NormalizeOptions::new().with_compact_arrays(false),
    )
    .unwrap();
    assert_eq!(kept["a"].as_array().map(Vec::len), Some(3));
    let compacted = normalize_properties_with_options(&map, &NormalizeOptions::default()).unwrap();
    assert_eq!(Value::from(compacted), json!({"a": [1]}));
}

#[rstest]
fn normalize_root_array_and_scalar() {
    let arr = normalize_properties(&flat(json!({"[0]": "a", "[1]": "b"})), true).unwrap();
    assert_eq!(Value::from(arr), json!(["a", "b"]));

    let scalar = normalize_properties(&flat(json!({"": 42})), true).unwrap();
    assert_eq!(scalar, Node::from(42));
}

#[rstest]
fn hole_made_in_flat_map_is_compacted_away(person: Value) {
    let doc = Node::from(person.clone());
    let mut fields = denormalize_properties(&doc);

    let bob = get_property(&doc, "friends[1]").unwrap().map(Value::from).unwrap();
    fields.insert("friends[8]".to_string(), bob);
    fields.shift_remove("friends[1]");

    let rebuilt = normalize_properties(&fields, true).unwrap();
    let copied = copy_properties(&rebuilt, true).unwrap();
    assert_eq!(Value::from(copied), person);
}

#[rstest]
fn copy_without_compaction_keeps_interior_holes() {
    let original = holey_person();
    let copy = copy_properties(&original, false).unwrap();
    assert_eq!(copy, original);
}

#[rstest]
fn copy_with_compaction_removes_holes(person: Value) {
    let copy = copy_properties(&holey_person(), true).unwrap();
    assert_eq!(Value::from(copy), person);
}

#[rstest]
fn compaction_leaves_objects_alone() {
    let doc = Node::from(json!({"a": {"b": null}, "c": [1, 2]}));
    assert_eq!(normalize_array_properties(doc.clone()), doc);
}

#[rstest]
#[case(json!({"[18446744073709551615]": 1}))]
#[case(json!({"friends[0]": "Alice", "friends[18446744073709551615]": "Bob"}))]
#[case(json!({"items[1048577].id": 7}))]
fn normalize_rejects_oversized_index(#[case] map: Value) {
    let map = flat(map);
    for compact in [true, false] {
        let err = normalize_properties(&map, compact).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexRange);
    }
    let err = from_flat_map::<Value>(&map).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IndexRange);
}
