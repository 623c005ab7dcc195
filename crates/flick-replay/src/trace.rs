//! Recorded pointer traces.
//!
//! One command per line: `reset`, or a delta as two numbers separated by
//! whitespace or a comma. Blank lines and `#` comments are skipped.

use flick_core::geometry::Vec2;
use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceCommand {
    Reset,
    Delta(Vec2),
}

#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    #[error("line {line}: expected `reset` or `<dx> <dy>`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("line {line}: {source}")]
    Number {
        line: usize,
        #[source]
        source: ParseFloatError,
    },
}

fn parse_pair(line: usize, text: &str) -> Result<Vec2, TraceError> {
    let fields: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    let [dx, dy] = fields.as_slice() else {
        return Err(TraceError::Malformed {
            line,
            text: text.to_owned(),
        });
    };
    let number = |f: &str| {
        f.parse::<f64>()
            .map_err(|source| TraceError::Number { line, source })
    };
    Ok(Vec2::new(number(dx)?, number(dy)?))
}

/// Parses a single `dx,dy` argument.
pub fn parse_delta(text: &str) -> Result<Vec2, TraceError> {
    parse_pair(1, text)
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceCommand>, TraceError> {
    let mut commands = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("reset") {
            commands.push(TraceCommand::Reset);
        } else {
            commands.push(TraceCommand::Delta(parse_pair(i + 1, line)?));
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace() {
        let text = "\
# descend into 6U
1000 0
0,-400

reset   # start over
-400.5 , 12
";
        let commands = parse_trace(text).unwrap();
        assert_eq!(
            commands,
            vec![
                TraceCommand::Delta(Vec2::new(1000.0, 0.0)),
                TraceCommand::Delta(Vec2::new(0.0, -400.0)),
                TraceCommand::Reset,
                TraceCommand::Delta(Vec2::new(-400.5, 12.0)),
            ]
        );
    }

    #[test]
    fn test_errors_report_line_numbers() {
        let err = parse_trace("1 2\n\n3\n").unwrap_err();
        assert_eq!(
            err,
            TraceError::Malformed {
                line: 3,
                text: "3".to_owned()
            }
        );

        let err = parse_trace("1 2\n1 x\n").unwrap_err();
        assert!(matches!(err, TraceError::Number { line: 2, .. }));
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("-400,0").unwrap(), Vec2::new(-400.0, 0.0));
        assert!(parse_delta("1,2,3").is_err());
        assert!(parse_delta("").is_err());
    }
}
