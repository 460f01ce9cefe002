#[cfg(test)]
use super::*;
#[cfg(test)]
use serde_json::json;

#[test]
fn test_token_stream_for_field_map() {
    let input = r#"{:input text, :label "Description"}"#;
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::LBrace,
        Token::Keyword("input".into()),
        Token::Symbol("text".into()),
        Token::Keyword("label".into()),
        Token::String("Description".into()),
        Token::RBrace,
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        println!("{:?}", tok);
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_commas_and_comments_are_whitespace() {
    let input = "; header comment\n[1, 2,,3] ; trailing";
    let raw = read_str(input).expect("Failed to read vector");
    assert_eq!(raw, json!([1.0, 2.0, 3.0]));
}

#[test]
fn test_tag_and_set_tokens() {
    let input = r#"#ui/base #{a b}"#;
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Tag("ui/base".into()),
        Token::SetOpen,
        Token::Symbol("a".into()),
        Token::Symbol("b".into()),
        Token::RBrace,
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_bare_hash_string_is_anonymous_tag() {
    let raw = read_str(r##"#"output""##).expect("Failed to read reference");
    assert_eq!(raw, json!({ "tag": "", "val": "output" }));
}

#[test]
fn test_star_and_slash_symbols() {
    let raw = read_str(r#"["Amount" * "Days" ui/group]"#).unwrap();
    assert_eq!(
        raw,
        json!(["Amount", { "sym": "*" }, "Days", { "sym": "ui/group" }])
    );
}

#[test]
fn test_wrapper_shapes() {
    assert_eq!(read_str("(1 2)").unwrap(), json!({ "list": [1.0, 2.0] }));
    assert_eq!(read_str(":foo").unwrap(), json!({ "key": "foo" }));
    assert_eq!(read_str("nil").unwrap(), json!(null));
    assert_eq!(read_str("true").unwrap(), json!(true));
    assert_eq!(
        read_str("#{1 2}").unwrap(),
        json!({ "set": [1.0, 2.0] })
    );
    assert_eq!(
        read_str("#tag [1]").unwrap(),
        json!({ "tag": "tag", "val": [1.0] })
    );
}

#[test]
fn test_map_reads_as_ordered_pairs() {
    let raw = read_str(r#"{:when {"Amount" 1} :then {"output" 5000}}"#).unwrap();
    assert_eq!(
        raw,
        json!({ "map": [
            [{ "key": "when" }, { "map": [["Amount", 1.0]] }],
            [{ "key": "then" }, { "map": [["output", 5000.0]] }],
        ]})
    );
}

#[test]
fn test_negative_and_float_numbers() {
    assert_eq!(read_str("-12").unwrap(), json!(-12.0));
    assert_eq!(read_str("3.25").unwrap(), json!(3.25));
    assert_eq!(read_str("1e3").unwrap(), json!(1000.0));
    // '-' not followed by a digit is a symbol
    assert_eq!(read_str("-").unwrap(), json!({ "sym": "-" }));
}

#[test]
fn test_string_escapes() {
    let raw = read_str(r#""line\none\ttab \"q\"""#).unwrap();
    assert_eq!(raw, json!("line\none\ttab \"q\""));
}

#[test]
fn test_unclosed_string_error() {
    let err = read_str(r#""never ends"#).unwrap_err();
    assert!(matches!(err, EdnError::UnclosedString { .. }));
}

#[test]
fn test_unclosed_vector_error() {
    let err = read_str("[1 2").unwrap_err();
    assert!(matches!(err, EdnError::UnexpectedEof { .. }));
}

#[test]
fn test_odd_map_literal_error() {
    let err = read_str("{:a}").unwrap_err();
    assert!(matches!(err, EdnError::SyntaxError { .. }));
}

#[test]
fn test_trailing_form_error() {
    let err = read_str("1 2").unwrap_err();
    assert!(matches!(err, EdnError::SyntaxError { .. }));
}

#[test]
fn test_unexpected_character_error() {
    let err = read_str("@foo").unwrap_err();
    assert!(matches!(err, EdnError::UnexpectedCharacter { character: '@', .. }));
}

#[test]
fn test_definition_fixture_reads() {
    let input = r#"
    ; example
    #ui/definition [
      #ui/base [
        ui/group
        {:input text, :label "Description"}
      ]
    ]
    "#;

    let raw = read_str(input).expect("Failed to read definition");
    assert_eq!(raw["tag"], "ui/definition");
    assert_eq!(raw["val"][0]["tag"], "ui/base");
    assert_eq!(raw["val"][0]["val"][0], json!({ "sym": "ui/group" }));
}
