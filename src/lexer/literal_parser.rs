//! リテラル値の解析
//!
//! トークナイザーが決めるのはリテラルの終わりだけ。ここでは
//! [`TokenType::StringLiteral`](super::TokenType::StringLiteral)や
//! [`TokenType::Number`](super::TokenType::Number)のテキストを値に変換する。

use serde::Serialize;

use crate::error::LiteralError;

/// 引用符を含む文字列リテラルのテキストをデコード
///
/// バックスラッシュのエスケープ、4〜5桁の16進数による`\u`、
/// `{0xHEX}`形式のコードポイントを扱う。
pub fn decode_string(text: &str) -> Result<String, LiteralError> {
    let body = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LiteralError::NotAString(text.to_owned()))?;

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('v') => result.push('\u{000B}'),
                Some('f') => result.push('\u{000C}'),
                Some('t') => result.push('\t'),
                Some('{') => result.push('{'),
                Some('}') => result.push('}'),
                Some('u') => {
                    let mut hex = String::new();
                    while hex.len() < 5 {
                        match chars.peek() {
                            Some(c) if c.is_ascii_hexdigit() => {
                                hex.push(*c);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    if hex.len() < 4 {
                        return Err(LiteralError::InvalidEscape(format!("\\u{}", hex)));
                    }
                    result.push(code_point(&hex)?);
                }
                Some(c) => return Err(LiteralError::InvalidEscape(format!("\\{}", c))),
                None => return Err(LiteralError::InvalidEscape("\\".to_owned())),
            },
            '{' => {
                let mut content = String::new();
                let mut depth = 1;
                for c in chars.by_ref() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    content.push(c);
                }
                let hex = content
                    .strip_prefix("0x")
                    .filter(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .ok_or_else(|| LiteralError::InvalidBraceContent(content.clone()))?;
                result.push(code_point(hex)?);
            }
            c => result.push(c),
        }
    }

    Ok(result)
}

fn code_point(hex: &str) -> Result<char, LiteralError> {
    let value = u32::from_str_radix(hex, 16)
        .map_err(|_| LiteralError::InvalidEscape(hex.to_owned()))?;
    char::from_u32(value).ok_or(LiteralError::InvalidCodePoint(value))
}

/// 数値リテラルの値
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NumberValue {
    Integer(i128),
    Float(f64),
}

/// 数値リテラルのテキストを解析
pub fn parse_number(text: &str) -> Result<NumberValue, LiteralError> {
    let invalid = || LiteralError::InvalidNumber(text.to_owned());
    let digits: String = text.chars().filter(|c| *c != '_').collect();

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        return i128::from_str_radix(&digits[2..], radix)
            .map(NumberValue::Integer)
            .map_err(|_| invalid());
    }

    if digits.contains(['.', 'e', 'E']) {
        digits
            .parse::<f64>()
            .map(NumberValue::Float)
            .map_err(|_| invalid())
    } else {
        digits
            .parse::<i128>()
            .map(NumberValue::Integer)
            .map_err(|_| invalid())
    }
}
