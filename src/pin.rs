//! Parse pin spec strings such as `publish-signal(list<string>)` into a direction and pin kind.

use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::ast::{Direction, DirectedPin, PinKind};
use crate::error::{ManifestError, Position, Result};
use crate::parser::parse_type;

#[derive(PestParser)]
#[grammar = "pin.pest"]
struct PinSpecParser;

/// Parse a pin spec. Signal payloads are type expressions; command payloads are not
/// interpreted yet and always produce empty records.
pub fn parse_pin_spec(source: &str) -> Result<DirectedPin> {
    let pairs = PinSpecParser::parse(Rule::pin_spec, source).map_err(|e| malformed(source, &e))?;
    let mut keyword = None;
    let mut payload = None;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::keyword => keyword = Some(pair.as_str()),
            Rule::payload => {
                let (line, column) = pair.as_span().start_pos().line_col();
                payload = Some((pair.as_str(), Position::new(line, column)));
            }
            _ => {}
        }
    }
    let keyword = keyword.ok_or_else(|| ManifestError::new(format!("Malformed pin spec `{}`", source)))?;
    let (payload, origin) = payload.unwrap_or(("", Position::new(1, keyword.len() + 2)));

    let signal = |direction| -> Result<DirectedPin> {
        let data_type = parse_type(payload).map_err(|e| e.shifted(origin))?;
        Ok(DirectedPin::new(direction, PinKind::signal(data_type)))
    };
    match keyword {
        "publish-signal" => signal(Direction::Sends),
        "consume-signal" => signal(Direction::Receives),
        // TODO: parse command argument/progress/result records once their syntax is settled
        "send-command" => Ok(DirectedPin::new(Direction::Sends, PinKind::empty_command())),
        "receive-command" => Ok(DirectedPin::new(Direction::Receives, PinKind::empty_command())),
        other => Err(ManifestError::at(
            format!("Unknown pin type: {}", other),
            Position::new(1, 1),
        )),
    }
}

fn malformed(source: &str, e: &pest::error::Error<Rule>) -> ManifestError {
    let (line, column) = match e.line_col {
        pest::error::LineColLocation::Pos(pos) => pos,
        pest::error::LineColLocation::Span(start, _) => start,
    };
    let expected = match &e.variant {
        pest::error::ErrorVariant::ParsingError { positives, .. } if positives.contains(&Rule::keyword) => {
            "expected a pin keyword".to_string()
        }
        pest::error::ErrorVariant::ParsingError { .. } => "expected `<keyword>(<payload>)`".to_string(),
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
    };
    ManifestError::at(
        format!("Malformed pin spec `{}`: {}", source, expected),
        Position::new(line, column),
    )
}
