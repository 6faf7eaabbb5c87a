//! Recursive-descent parser for type expressions.
//!
//! ```text
//! type   := "int" | "bool" | "string" | list | map | record
//! list   := "list" "<" type ">"
//! map    := "map" "<" type "," type ">"
//! record := "record" "<" [ field ("," field)* ] ">"
//! field  := type identifier
//! ```

use std::collections::HashMap;

use crate::datatype::{DataType, Record};
use crate::error::{ManifestError, Result};
use crate::tokenizer::{unexpected, TokenKind, Tokenizer};

/// Deepest allowed nesting of `list`, `map` and `record`.
pub const MAX_TYPE_DEPTH: usize = 128;

/// Parse a complete type expression; trailing input is an error.
pub fn parse_type(source: &str) -> Result<DataType> {
    let mut tokens = Tokenizer::new(source);
    let data_type = parse_from_tokens(&mut tokens)?;
    tokens.expect(&[TokenKind::EndOfInput])?;
    Ok(data_type)
}

/// Parse one type from the token stream, leaving the rest unread.
pub fn parse_from_tokens(tokens: &mut Tokenizer<'_>) -> Result<DataType> {
    parse_nested(tokens, 0)
}

fn parse_nested(tokens: &mut Tokenizer<'_>, depth: usize) -> Result<DataType> {
    match parse_until(tokens, &[], depth)? {
        Some(data_type) => Ok(data_type),
        // empty stop set: parse_until never returns None
        None => Err(ManifestError::new("Unexpected token: end of input")),
    }
}

/// Parse a type, or return `None` when the first token is in `stop` (the token is consumed).
/// `depth` counts the containers already open around this type.
fn parse_until(
    tokens: &mut Tokenizer<'_>,
    stop: &[TokenKind],
    depth: usize,
) -> Result<Option<DataType>> {
    let token = tokens.read();
    if stop.contains(&token.kind) {
        return Ok(None);
    }
    if token.kind != TokenKind::Identifier {
        return Err(unexpected(&token));
    }
    if matches!(token.text.as_str(), "list" | "map" | "record") && depth >= MAX_TYPE_DEPTH {
        return Err(ManifestError::at(
            format!("Type expression nested deeper than {}", MAX_TYPE_DEPTH),
            token.position,
        ));
    }
    let data_type = match token.text.as_str() {
        "int" => DataType::Int,
        "bool" => DataType::Bool,
        "string" => DataType::String,
        "list" => build_list(tokens, depth + 1)?,
        "map" => build_map(tokens, depth + 1)?,
        "record" => DataType::Record(build_record(tokens, depth + 1)?),
        other => {
            return Err(ManifestError::at(
                format!("Unknown type {}", other),
                token.position,
            ))
        }
    };
    Ok(Some(data_type))
}

fn build_list(tokens: &mut Tokenizer<'_>, depth: usize) -> Result<DataType> {
    tokens.expect(&[TokenKind::OpenAngle])?;
    let element = parse_nested(tokens, depth)?;
    tokens.expect(&[TokenKind::CloseAngle])?;
    Ok(DataType::list(element))
}

fn build_map(tokens: &mut Tokenizer<'_>, depth: usize) -> Result<DataType> {
    tokens.expect(&[TokenKind::OpenAngle])?;
    let key = parse_nested(tokens, depth)?;
    tokens.expect(&[TokenKind::Comma])?;
    let value = parse_nested(tokens, depth)?;
    tokens.expect(&[TokenKind::CloseAngle])?;
    Ok(DataType::map(key, value))
}

fn build_record(tokens: &mut Tokenizer<'_>, depth: usize) -> Result<Record> {
    tokens.expect(&[TokenKind::OpenAngle])?;
    let mut fields = HashMap::new();
    // `>` in place of the first field type closes an empty record
    let mut stop: &[TokenKind] = &[TokenKind::CloseAngle];
    loop {
        let Some(field_type) = parse_until(tokens, stop, depth)? else {
            break;
        };
        let name = tokens.expect(&[TokenKind::Identifier])?;
        if fields.contains_key(&name.text) {
            return Err(ManifestError::at(
                format!("Duplicate record field: {}", name.text),
                name.position,
            ));
        }
        fields.insert(name.text, field_type);
        let separator = tokens.expect(&[TokenKind::Comma, TokenKind::CloseAngle])?;
        if separator.kind == TokenKind::CloseAngle {
            break;
        }
        stop = &[];
    }
    Ok(Record { fields })
}
