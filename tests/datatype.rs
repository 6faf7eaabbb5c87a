//! Type expressions: tokenizer stream, parser results, rendering round-trips, and pin specs.

use appgraph::{
    parse_pin_spec, parse_type, DataType, DirectedPin, Direction, PinKind, Record, TokenKind,
    Tokenizer,
};

fn samples() -> Vec<DataType> {
    vec![
        DataType::String,
        DataType::Int,
        DataType::Bool,
        DataType::list(DataType::Bool),
        DataType::list(DataType::list(DataType::Bool)),
        DataType::map(DataType::Int, DataType::Bool),
        DataType::map(DataType::String, DataType::list(DataType::map(DataType::Int, DataType::Int))),
        DataType::record([("a", DataType::Int), ("b", DataType::list(DataType::Bool))]),
        DataType::record([
            ("id", DataType::Int),
            ("tags", DataType::list(DataType::String)),
            ("meta", DataType::record([("owner", DataType::String), ("live", DataType::Bool)])),
        ]),
        DataType::Record(Record::new()),
    ]
}

// ==================== Tokenizer ====================

#[test]
fn tokenizer_stream_then_end_forever() {
    let mut t = Tokenizer::new("list<map<string,string>>");
    let expected = [
        (TokenKind::Identifier, "list"),
        (TokenKind::OpenAngle, "<"),
        (TokenKind::Identifier, "map"),
        (TokenKind::OpenAngle, "<"),
        (TokenKind::Identifier, "string"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "string"),
        (TokenKind::CloseAngle, ">"),
        (TokenKind::CloseAngle, ">"),
    ];
    for (kind, text) in expected {
        let token = t.read();
        assert_eq!((token.kind, token.text.as_str()), (kind, text));
    }
    for _ in 0..5 {
        assert_eq!(t.read().kind, TokenKind::EndOfInput);
    }
}

#[test]
fn tokenizer_leading_digit_is_error_token() {
    let token = Tokenizer::new("0").read();
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.text, "0");
}

// ==================== Parser ====================

#[test]
fn parse_documented_examples() {
    assert_eq!(
        parse_type("list<list<bool>>").expect("parse"),
        DataType::list(DataType::list(DataType::Bool))
    );
    assert_eq!(
        parse_type("map<int, bool>").expect("parse"),
        DataType::map(DataType::Int, DataType::Bool)
    );
    assert_eq!(
        parse_type("record<int a, list<bool> b>").expect("parse"),
        DataType::record([("b", DataType::list(DataType::Bool)), ("a", DataType::Int)])
    );
}

#[test]
fn parse_whitespace_insignificant() {
    assert_eq!(
        parse_type("\trecord <\n  int a ,\n  map < string , int > b\n>").expect("parse"),
        parse_type("record<int a,map<string,int> b>").expect("parse")
    );
}

#[test]
fn parse_errors_name_offending_text() {
    let err = parse_type("map<int; bool>").unwrap_err();
    assert_eq!(err.message, "Unexpected token: ;");
    assert_eq!((err.line, err.column), (1, 8));

    let err = parse_type("record<int a, widget b>").unwrap_err();
    assert_eq!(err.message, "Unknown type widget");
}

#[test]
fn from_str_matches_parse_type() {
    let t: DataType = "list<string>".parse().expect("parse");
    assert_eq!(t, DataType::list(DataType::String));
    assert!("list<".parse::<DataType>().is_err());
}

// ==================== Rendering ====================

#[test]
fn rendering_reparses_equal() {
    for data_type in samples() {
        let text = data_type.to_string();
        let reparsed = parse_type(&text).unwrap_or_else(|e| panic!("{}: {}", text, e));
        assert_eq!(reparsed, data_type, "rendered as {}", text);
    }
}

#[test]
fn record_rendering_is_some_permutation() {
    let record = DataType::record([("a", DataType::Int), ("b", DataType::list(DataType::Bool))]);
    let text = record.to_string();
    let inner = text
        .strip_prefix("record<")
        .and_then(|s| s.strip_suffix('>'))
        .expect("record<...>");
    let mut fields: Vec<&str> = inner.split(", ").collect();
    fields.sort_unstable();
    assert_eq!(fields, ["int a", "list<bool> b"]);
}

// ==================== Pin specs ====================

#[test]
fn pin_spec_publish_signal() {
    assert_eq!(
        parse_pin_spec("publish-signal(string)").expect("parse"),
        DirectedPin::new(Direction::Sends, PinKind::signal(DataType::String))
    );
}

#[test]
fn pin_spec_typo_is_named() {
    let err = parse_pin_spec("plubish-signal(string)").unwrap_err();
    assert!(err.message.contains("plubish-signal"), "{}", err);
}

#[test]
fn pin_spec_command_payload_not_interpreted() {
    let pin = parse_pin_spec("receive-command(record<int a>)").expect("parse");
    assert_eq!(pin.direction, Direction::Receives);
    match pin.kind {
        PinKind::Command {
            arguments,
            progress,
            result,
        } => {
            assert!(arguments.is_empty() && progress.is_empty() && result.is_empty());
        }
        other => panic!("expected command pin, got {:?}", other),
    }
}
