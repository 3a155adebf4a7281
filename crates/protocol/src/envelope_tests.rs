use super::*;

#[test]
fn touch_sets_action_and_keeps_subjects_in_order() {
    let env = Envelope::touch(&["b", "a", "c"]);
    assert_eq!(env.action, ACTION_TOUCH);
    assert_eq!(env.entities, vec!["b", "a", "c"]);
}

#[test]
fn touch_does_not_validate_or_dedupe() {
    let subjects = vec![String::new(), "x".to_owned(), "x".to_owned()];
    let env = Envelope::touch(&subjects);
    assert_eq!(env.entities, subjects);
}

#[test]
fn touch_accepts_empty_batch() {
    let env = Envelope::touch::<&str>(&[]);
    assert!(env.entities.is_empty());
    assert_eq!(env.to_json().unwrap(), r#"{"Action":"touch","Entities":[]}"#);
}

#[test]
fn json_uses_pascal_case_field_names() {
    let env = Envelope::touch(&["http://example.com/person/1", "s2"]);
    assert_eq!(
        env.to_json().unwrap(),
        r#"{"Action":"touch","Entities":["http://example.com/person/1","s2"]}"#
    );
}

#[test]
fn building_twice_serializes_identically() {
    let chunk: Vec<String> = (1..=50).map(|i| format!("s{i}")).collect();
    let first = Envelope::touch(&chunk).to_json().unwrap();
    let second = Envelope::touch(&chunk).to_json().unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn subjects_with_quotes_and_unicode_are_escaped() {
    let env = Envelope::touch(&["say \"hi\"", "caf\u{e9}"]);
    let body = env.to_json().unwrap();
    assert_eq!(Envelope::from_json(&body).unwrap(), env);
    assert!(body.contains(r#"say \"hi\""#));
}

#[test]
fn from_json_rejects_lowercase_fields() {
    assert!(Envelope::from_json(r#"{"action":"touch","entities":[]}"#).is_err());
}
