//! Reader for PHP files that `return` an array literal.
//!
//! Magento keeps its deployment configuration in `app/etc/env.php` and
//! `app/etc/config.php`, both of the form `<?php return [ ... ];`. The file
//! is parsed with `mago-syntax` and the returned expression is converted to
//! a `serde_json::Value`. Only literals are accepted: short and long array
//! syntax, quoted strings, integers, floats, booleans and `null`. Anything
//! else is a parse error.

use std::path::Path;

use bumpalo::Bump;
use mago_database::file::FileId;
use mago_span::{HasSpan, Span};
use mago_syntax::ast::*;
use mago_syntax::parser::parse_file_content;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Arrays nested deeper than this are rejected.
const MAX_DEPTH: usize = 64;

/// Reads and parses a PHP array file.
pub fn parse_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content).map_err(|(line, message)| Error::PhpParse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parses PHP source text, returning `(line, message)` on failure.
pub fn parse_str(source: &str) -> std::result::Result<Value, (usize, String)> {
    let arena = Bump::new();
    let content = arena.alloc_str(source);
    let (program, error) = parse_file_content(&arena, FileId::zero(), content);

    if let Some(err) = error {
        let line = line_at(content, err.span().start.offset as usize);
        return Err((line, format!("{:?}", err)));
    }

    for statement in program.statements.iter() {
        if let Statement::Return(ret) = statement {
            let walker = Walker { source: content };
            return match ret.value.as_ref() {
                Some(value) => walker.convert(value, 0),
                None => Err((walker.line_of(ret.span()), "empty return".to_string())),
            };
        }
    }

    Err((1, "expected 'return'".to_string()))
}

fn line_at(source: &str, offset: usize) -> usize {
    source
        .as_bytes()
        .iter()
        .take(offset)
        .filter(|b| **b == b'\n')
        .count()
        + 1
}

struct Walker<'s> {
    source: &'s str,
}

impl Walker<'_> {
    fn line_of(&self, span: Span) -> usize {
        line_at(self.source, span.start.offset as usize)
    }

    fn fail(&self, span: Span, message: &str) -> (usize, String) {
        (self.line_of(span), message.to_string())
    }

    fn convert(&self, expression: &Expression, depth: usize) -> std::result::Result<Value, (usize, String)> {
        if depth > MAX_DEPTH {
            return Err(self.fail(expression.span(), "array nesting too deep"));
        }

        match expression {
            Expression::Array(array) => {
                let elements: Vec<&ArrayElement> = array.elements.iter().collect();
                self.convert_elements(&elements, depth)
            }
            Expression::LegacyArray(array) => {
                let elements: Vec<&ArrayElement> = array.elements.iter().collect();
                self.convert_elements(&elements, depth)
            }
            Expression::Parenthesized(inner) => self.convert(&inner.expression, depth),
            Expression::Literal(literal) => self.convert_literal(literal),
            _ => Err(self.fail(expression.span(), "unsupported expression")),
        }
    }

    fn convert_literal(&self, literal: &Literal) -> std::result::Result<Value, (usize, String)> {
        match literal {
            Literal::String(s) => unquote(s.raw)
                .map(Value::String)
                .ok_or_else(|| self.fail(literal.span(), "unsupported string literal")),
            Literal::Integer(i) => parse_integer(i.raw)
                .map(|n| Value::Number(Number::from(n)))
                .ok_or_else(|| self.fail(literal.span(), "invalid integer literal")),
            Literal::Float(f) => f
                .raw
                .replace('_', "")
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| self.fail(literal.span(), "invalid float literal")),
            Literal::True(_) => Ok(Value::Bool(true)),
            Literal::False(_) => Ok(Value::Bool(false)),
            Literal::Null(_) => Ok(Value::Null),
            _ => Err(self.fail(literal.span(), "unsupported literal")),
        }
    }

    /// Converts array entries. A non-empty list without keys becomes a JSON
    /// array; anything keyed, and the empty array, becomes an object with
    /// PHP's implicit integer keys.
    fn convert_elements(
        &self,
        elements: &[&ArrayElement],
        depth: usize,
    ) -> std::result::Result<Value, (usize, String)> {
        let mut entries: Vec<(Option<String>, Value)> = Vec::with_capacity(elements.len());

        for element in elements {
            match element {
                ArrayElement::KeyValue(kv) => {
                    let key = self.convert_key(&kv.key)?;
                    let value = self.convert(&kv.value, depth + 1)?;
                    entries.push((Some(key), value));
                }
                ArrayElement::Value(v) => {
                    let value = self.convert(&v.value, depth + 1)?;
                    entries.push((None, value));
                }
                _ => return Err(self.fail(element.span(), "unsupported array element")),
            }
        }

        if !entries.is_empty() && entries.iter().all(|(key, _)| key.is_none()) {
            return Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()));
        }

        let mut map = Map::new();
        let mut next_index: i64 = 0;
        for (key, value) in entries {
            let key = match key {
                Some(k) => {
                    if let Ok(i) = k.parse::<i64>() {
                        next_index = next_index.max(i + 1);
                    }
                    k
                }
                None => {
                    let k = next_index.to_string();
                    next_index += 1;
                    k
                }
            };
            map.insert(key, value);
        }
        debug!("Converted PHP array with {} keys", map.len());
        Ok(Value::Object(map))
    }

    fn convert_key(&self, expression: &Expression) -> std::result::Result<String, (usize, String)> {
        match self.convert(expression, 0)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok((b as u8).to_string()),
            Value::Null => Ok(String::new()),
            _ => Err(self.fail(expression.span(), "array keys must be scalars")),
        }
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        i64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}

/// Strips the quotes of a string literal and resolves its escapes.
fn unquote(raw: &str) -> Option<String> {
    let quote = raw.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = raw.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match (quote, chars.next()) {
            (_, Some('\\')) => out.push('\\'),
            (q, Some(e)) if q == e => out.push(e),
            ('"', Some('n')) => out.push('\n'),
            ('"', Some('t')) => out.push('\t'),
            ('"', Some('r')) => out.push('\r'),
            ('"', Some('$')) => out.push('$'),
            (_, Some(e)) => {
                out.push('\\');
                out.push(e);
            }
            (_, None) => out.push('\\'),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nested_short_arrays() {
        let source = r#"<?php
return [
    'backend' => ['frontName' => 'admin_x'],
    'MAGE_MODE' => 'developer',
];
"#;
        let value = parse_str(source).unwrap();
        assert_eq!(value["backend"]["frontName"], "admin_x");
        assert_eq!(value["MAGE_MODE"], "developer");
    }

    #[test]
    fn test_parses_long_array_syntax_and_scalars() {
        let source = "<?php return array('a' => 1, 'b' => false, 'c' => null, 'd' => 1.5);";
        let value = parse_str(source).unwrap();
        assert_eq!(value["a"], 1);
        assert_eq!(value["b"], false);
        assert!(value["c"].is_null());
        assert_eq!(value["d"], 1.5);
    }

    #[test]
    fn test_list_becomes_json_array() {
        let value = parse_str("<?php return ['x', 'y'];").unwrap();
        assert_eq!(value, serde_json::json!(["x", "y"]));
    }

    #[test]
    fn test_empty_array_becomes_object() {
        let value = parse_str("<?php return ['cache_types' => [], 'list' => array()];").unwrap();
        assert_eq!(value["cache_types"], serde_json::json!({}));
        assert_eq!(value["list"], serde_json::json!({}));
    }

    #[test]
    fn test_mixed_keys_use_implicit_indexes() {
        let value = parse_str("<?php return [5 => 'a', 'b', 'k' => 'c'];").unwrap();
        assert_eq!(value["5"], "a");
        assert_eq!(value["6"], "b");
        assert_eq!(value["k"], "c");
    }

    #[test]
    fn test_skips_comments() {
        let source = "<?php\n// header\n/* block */ return [ # trailing\n 'k' => 'v' ];";
        let value = parse_str(source).unwrap();
        assert_eq!(value["k"], "v");
    }

    #[test]
    fn test_string_escapes() {
        let value = parse_str(r#"<?php return ['a' => 'it\'s', 'b' => "tab\there"];"#).unwrap();
        assert_eq!(value["a"], "it's");
        assert_eq!(value["b"], "tab\there");
    }

    #[test]
    fn test_reports_line_of_error() {
        let err = parse_str("<?php\nreturn [\n 'k' => foo(),\n];").unwrap_err();
        assert_eq!(err.0, 3);
    }

    #[test]
    fn test_rejects_missing_return() {
        assert!(parse_str("<?php $x = [];").is_err());
    }

    #[test]
    fn test_rejects_deep_nesting() {
        let depth = MAX_DEPTH + 10;
        let source = format!("<?php return {}1{};", "[".repeat(depth), "]".repeat(depth));
        let err = parse_str(&source).unwrap_err();
        assert!(err.1.contains("too deep"));
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0x1F"), Some(31));
        assert_eq!(parse_integer("0"), Some(0));
    }
}
