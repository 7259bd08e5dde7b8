use tomldoc::{
    from_str, to_string, to_string_with_indent, Array, LocalDate, LocalDateTime, LocalTime,
    OffsetDateTime, Table, Value,
};

fn assert_round_trip(input: &str) {
    let doc = from_str(input).unwrap();
    let text = to_string(&doc);
    let reparsed = from_str(&text).unwrap();
    assert_eq!(reparsed, doc, "serialized form was:\n{}", text);
}

#[test]
fn test_flat_document() {
    let doc = from_str("a = 1\nb = \"x\"\n").unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(1));
    assert_eq!(doc.get_as::<String>("b").unwrap().as_deref(), Some("x"));
}

#[test]
fn test_realistic_config() {
    let input = r#"
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [8001, 8001, 8002]
connection_max = 5000
enabled = true

[servers.alpha]
ip = "10.0.0.1"
dc = "eqdc10"

[servers.beta]
ip = "10.0.0.2"
dc = "eqdc10"

[clients]
data = [["gamma", "delta"], ["1", "2"]]
hosts = [
  "alpha",
  "omega"
]

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
color = "gray"
"#;
    let doc = from_str(input).unwrap();

    assert_eq!(
        doc.get_qualified_as::<String>("owner.name").unwrap().as_deref(),
        Some("Tom Preston-Werner")
    );
    let dob = doc
        .get_qualified("owner.dob")
        .unwrap()
        .as_offset_datetime()
        .copied()
        .unwrap();
    assert_eq!(dob.hour_offset, -8);
    assert_eq!(doc.get_qualified_vec::<i64>("database.ports"), Some(vec![8001, 8001, 8002]));
    assert_eq!(doc.get_qualified_as::<bool>("database.enabled").unwrap(), Some(true));
    assert_eq!(
        doc.get_qualified_as::<String>("servers.alpha.ip").unwrap().as_deref(),
        Some("10.0.0.1")
    );

    let products = doc.get_table_array("products").unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(
        products.get(1).unwrap().get_as::<String>("color").unwrap().as_deref(),
        Some("gray")
    );

    assert_round_trip(input);
}

#[test]
fn test_mutate_and_rewrite() {
    let mut doc = from_str("[server]\nport = 8080\n").unwrap();

    if let Some(server) = doc.get_mut("server").and_then(Value::as_table_mut) {
        server.insert("host".to_string(), Value::from("0.0.0.0"));
        server.insert("port".to_string(), Value::from(9090));
    }
    let mut tags = Array::new();
    tags.push(Value::from("web")).unwrap();
    tags.push(Value::from("prod")).unwrap();
    doc.insert("tags".to_string(), Value::Array(tags));

    let text = to_string(&doc);
    let reparsed = from_str(&text).unwrap();
    assert_eq!(reparsed.get_qualified_as::<i64>("server.port").unwrap(), Some(9090));
    assert_eq!(
        reparsed.get_qualified_as::<String>("server.host").unwrap().as_deref(),
        Some("0.0.0.0")
    );
    assert_eq!(
        reparsed.get_vec::<String>("tags"),
        Some(vec!["web".to_string(), "prod".to_string()])
    );
}

#[test]
fn test_string_with_newline_emits_escape() {
    let mut doc = Table::new();
    doc.insert("s".to_string(), Value::from("a\nb"));
    let text = to_string(&doc);
    assert_eq!(text, "s = \"a\\nb\"\n");
    assert_round_trip(&text);
}

#[test]
fn test_datetime_round_trips() {
    let mut doc = Table::new();
    doc.insert("date".to_string(), Value::from(LocalDate::new(1979, 5, 27)));
    doc.insert("time".to_string(), Value::from(LocalTime::new(7, 32, 0, 123_456)));
    doc.insert(
        "dt".to_string(),
        Value::from(LocalDateTime::new(
            LocalDate::new(1979, 5, 27),
            LocalTime::new(7, 32, 0, 0),
        )),
    );
    doc.insert(
        "odt_z".to_string(),
        Value::from(OffsetDateTime::new(
            LocalDateTime::new(LocalDate::new(1979, 5, 27), LocalTime::new(7, 32, 0, 0)),
            0,
            0,
        )),
    );
    doc.insert(
        "odt".to_string(),
        Value::from(OffsetDateTime::new(
            LocalDateTime::new(LocalDate::new(1979, 5, 27), LocalTime::new(0, 32, 0, 500_000)),
            5,
            30,
        )),
    );

    let text = to_string(&doc);
    assert!(text.contains("date = 1979-05-27\n"));
    assert!(text.contains("time = 07:32:00.123456\n"));
    assert!(text.contains("dt = 1979-05-27T07:32:00\n"));
    assert!(text.contains("odt_z = 1979-05-27T07:32:00Z\n"));
    assert!(text.contains("odt = 1979-05-27T00:32:00.5+05:30\n"));
    assert_eq!(from_str(&text).unwrap(), doc);
}

#[test]
fn test_deeply_nested_tables() {
    let input = "[a.b.c.d]\nx = 1\n[a.b.e]\ny = 2\n[a]\nz = 3\n";
    let doc = from_str(input).unwrap();
    assert_eq!(doc.get_qualified_as::<i64>("a.b.c.d.x").unwrap(), Some(1));
    assert_eq!(doc.get_qualified_as::<i64>("a.b.e.y").unwrap(), Some(2));
    assert_eq!(doc.get_qualified_as::<i64>("a.z").unwrap(), Some(3));
    assert_round_trip(input);
}

#[test]
fn test_table_array_with_nested_tables_round_trip() {
    assert_round_trip(
        "[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\nshape = \"round\"\n\
         [[fruit.variety]]\nname = \"red delicious\"\n[[fruit.variety]]\nname = \"granny smith\"\n\
         [[fruit]]\nname = \"banana\"\n[[fruit.variety]]\nname = \"plantain\"\n",
    );
}

#[test]
fn test_array_of_inline_tables_round_trip() {
    let input = "points = [{x = 1, y = 2}, {x = 3, y = 4}]\n";
    let doc = from_str(input).unwrap();
    let text = to_string(&doc);
    // inline table arrays re-serialize in [[header]] form
    assert!(text.contains("[[points]]"));
    assert_eq!(from_str(&text).unwrap(), doc);
}

#[test]
fn test_unicode_content_round_trip() {
    let input = "s = \"h\\u00e9llo \\U0001F600\"\nraw = \"héllo\"\n";
    let doc = from_str(input).unwrap();
    assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("héllo 😀"));
    assert_eq!(doc.get_as::<String>("raw").unwrap().as_deref(), Some("héllo"));
    assert_round_trip(input);
}

#[test]
fn test_control_characters_round_trip() {
    let mut doc = Table::new();
    doc.insert("s".to_string(), Value::from("bell\u{7}tab\tend"));
    assert_round_trip(&to_string(&doc));
    let text = to_string(&doc);
    assert!(text.contains("\\u0007"));
    assert!(text.contains("\\t"));
}

#[test]
fn test_custom_indent_round_trip() {
    let doc = from_str("[a.b]\nx = 1\n").unwrap();
    let text = to_string_with_indent(&doc, "    ");
    assert_eq!(from_str(&text).unwrap(), doc);
}

#[test]
fn test_clone_independence() {
    let original = from_str("[t]\nx = 1\narr = [1, 2]\n").unwrap();
    let mut copy = original.clone();

    copy.get_mut("t")
        .and_then(Value::as_table_mut)
        .unwrap()
        .insert("x".to_string(), Value::from(99));

    assert_eq!(original.get_qualified_as::<i64>("t.x").unwrap(), Some(1));
    assert_eq!(copy.get_qualified_as::<i64>("t.x").unwrap(), Some(99));
    assert_ne!(original, copy);
}

#[test]
fn test_key_uniqueness_after_parse() {
    // structural: a Table cannot hold two entries with one key
    let doc = from_str("a = 1\n[t]\na = 2\n").unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get_table("t").unwrap().len(), 1);
}

#[test]
fn test_homogeneity_of_parsed_arrays() {
    let doc = from_str("a = [1, 2, 3]\nb = [[1], [\"x\"], [1.5]]\nc = []\n").unwrap();
    for key in ["a", "b", "c"] {
        let arr = doc.get_array(key).unwrap();
        if let Some(kind) = arr.element_kind() {
            assert!(arr.iter().all(|v| v.kind() == kind));
        }
    }
}

#[test]
fn test_serde_serialization_to_json() {
    let doc = from_str(
        "a = 1\npi = 0.5\nok = true\ndob = 1979-05-27T07:32:00Z\n[t]\nxs = [1, 2]\n[[p]]\nn = 1\n",
    )
    .unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["a"], serde_json::json!(1));
    assert_eq!(json["pi"], serde_json::json!(0.5));
    assert_eq!(json["ok"], serde_json::json!(true));
    assert_eq!(json["dob"], serde_json::json!("1979-05-27T07:32:00Z"));
    assert_eq!(json["t"]["xs"], serde_json::json!([1, 2]));
    assert_eq!(json["p"], serde_json::json!([{"n": 1}]));
}

#[test]
fn test_serde_deserialization_from_json() {
    let json = r#"{"name": "demo", "count": 3, "tags": ["a", "b"], "nested": {"on": true}}"#;
    let value: Value = serde_json::from_str(json).unwrap();
    let table = value.as_table().unwrap();
    assert_eq!(table.get_as::<String>("name").unwrap().as_deref(), Some("demo"));
    assert_eq!(table.get_as::<i64>("count").unwrap(), Some(3));
    assert_eq!(
        table.get_vec::<String>("tags"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(table.get_qualified_as::<bool>("nested.on").unwrap(), Some(true));

    // heterogeneous JSON arrays have no TOML representation
    let err = serde_json::from_str::<Value>(r#"[1, "two"]"#).unwrap_err();
    assert!(err.to_string().contains("homogeneous"));
}
