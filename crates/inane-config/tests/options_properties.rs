//! Behavioral properties of the options container.

use inane_config::{IndexMap, OptionKey, OptionValue, Options, OptionsError, Scalar, Value, options};
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::NULL),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

fn arb_key() -> impl Strategy<Value = OptionKey> {
    prop_oneof![
        (0i64..20).prop_map(OptionKey::Index),
        "[a-z]{1,6}".prop_map(OptionKey::from),
    ]
}

fn arb_map() -> impl Strategy<Value = IndexMap<OptionKey, Value>> {
    let value = arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop::collection::vec((arb_key(), inner), 0..6)
            .prop_map(|entries| Value::Map(entries.into_iter().collect()))
    });
    prop::collection::vec((arb_key(), value), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

fn scalar(value: impl Into<Scalar>) -> OptionValue {
    OptionValue::Scalar(value.into())
}

proptest! {
    #[test]
    fn round_trip_preserves_structure_and_order(map in arb_map()) {
        let options = Options::from(map.clone());
        prop_assert_eq!(options.to_map(), map.clone());

        // map equality ignores order; the serialized form does not
        let expected = serde_json::to_string(&Value::Map(map.clone())).unwrap();
        prop_assert_eq!(serde_json::to_string(&options).unwrap(), expected);
        prop_assert_eq!(options.into_map(), map);
    }

    #[test]
    fn merge_never_drops_incoming_entries(a in arb_map(), b in arb_map()) {
        let mut merged = Options::from(a.clone());
        merged.merge(&Options::from(b.clone())).unwrap();

        let appended = b.keys().filter(|k| k.is_index()).count();
        let added_names = b
            .keys()
            .filter(|k| !k.is_index() && !a.contains_key(*k))
            .count();
        prop_assert_eq!(merged.len(), a.len() + appended + added_names);

        for key in b.keys().filter(|k| !k.is_index()) {
            prop_assert!(merged.contains_key(key));
        }
    }

    #[test]
    fn lock_rejects_every_mutation(map in arb_map(), key in arb_key()) {
        let mut options = Options::from(map);
        options.lock();

        prop_assert!(options.set(key.clone(), 1).unwrap_err().is_read_only());
        prop_assert!(options.unset(key).unwrap_err().is_read_only());
        prop_assert!(options.push(1).unwrap_err().is_read_only());
    }
}

#[test]
fn iteration_follows_insertion_order() {
    let options = Options::from(options! { "b" => 1, "a" => 2 });
    let keys: Vec<String> = options.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn get_default() {
    let options = Options::default();
    let fallback = scalar("fallback");
    assert_eq!(options.get_or("missing", &fallback), &fallback);
    assert_eq!(options.get("missing"), None);
}

#[test]
fn lock_reaches_existing_children() {
    let mut root = Options::from(options! { "child" => options! { "k" => "v" } });
    root.lock();

    assert!(root.node("child").unwrap().is_locked());
    assert!(root.node_mut("child").is_none());
    assert_eq!(root.get_path(&["child", "k"]), Some(&scalar("v")));
}

#[test]
fn lock_prevents_replacing_children() {
    let mut root = Options::from(options! { "db" => options! { "host" => "prod" } });
    root.lock();

    if let Some(db) = root.node_mut("db") {
        *db = Options::from(options! { "host" => "elsewhere" });
    }
    if let Some(db) = root.node_mut("db") {
        let _ = std::mem::take(db);
    }

    assert_eq!(root.get_path(&["db", "host"]), Some(&scalar("prod")));
    assert!(root.node("db").unwrap().is_locked());
}

#[test]
fn merge_refuses_to_overwrite_last_index() {
    let mut a = Options::from(options! { i64::MAX => "x" });
    let err = a.merge(&Options::from(options! { i64::MAX => "y" })).unwrap_err();

    assert!(!err.is_read_only());
    assert_eq!(a.len(), 1);
    assert_eq!(a.get(i64::MAX), Some(&scalar("x")));
}

#[test]
fn merge_appends_integer_keys() {
    let mut a = Options::from(options! { 0 => "x", 1 => "y" });
    a.merge(&Options::from(options! { 0 => "z" })).unwrap();

    let json = serde_json::to_string(&a).unwrap();
    insta::assert_snapshot!(json, @r#"{"0":"x","1":"y","2":"z"}"#);
}

#[test]
fn merge_recurses_into_string_keys() {
    let mut a = Options::from(options! { "k" => options! { "a" => 1 } });
    a.merge(&Options::from(options! { "k" => options! { "b" => 2 } })).unwrap();

    let json = serde_json::to_string(&a).unwrap();
    insta::assert_snapshot!(json, @r#"{"k":{"a":1,"b":2}}"#);
}

#[test]
fn defaults_backfills_nested_configuration() {
    let mut input = Options::from(options! {
        "db" => options! { "host" => "", "port" => 5432 },
        "debug" => (),
    });
    let model = Options::from(options! {
        "db" => options! { "host" => "localhost", "port" => 9999 },
        "debug" => true,
    });
    input.defaults(&[&model]).unwrap();

    let json = serde_json::to_string(&input).unwrap();
    insta::assert_snapshot!(json, @r#"{"db":{"host":"localhost","port":5432},"debug":true}"#);
}

#[test]
fn defaults_prefers_first_model() {
    let mut options = Options::default();
    let model1 = Options::from(options! { "theme" => "dark" });
    let model2 = Options::from(options! { "theme" => "light", "lang" => "en" });
    options.defaults(&[&model1, &model2]).unwrap();

    assert_eq!(options.get("theme"), Some(&scalar("dark")));
    assert_eq!(options.get("lang"), Some(&scalar("en")));
}

#[test]
fn chained_mutations() -> Result<(), OptionsError> {
    let mut options = Options::default();
    options
        .set("name", "svc")?
        .set("limits", options! { "cpu" => 2 })?
        .push("first")?
        .push("second")?
        .unset("name")?;

    assert_eq!(
        options.to_value(),
        Value::Map(options! {
            "limits" => options! { "cpu" => 2 },
            0 => "first",
            1 => "second",
        })
    );
    Ok(())
}
