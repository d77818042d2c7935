//! 生のトークナイザー
//!
//! 残りの入力の先頭から字句を一つずつ切り出す。空白とコメント、および
//! 波括弧のネストとエスケープを単一のパターンで表せない文字列リテラルは、
//! 規則表より先に処理する。コメントは別のコレクションに記録され、
//! トークン列には現れない。

use logos::Logos;
use serde::Serialize;

use super::position::{Position, Span};
use super::token::{Token, TokenType};

/// 字句解析中に記録したコメント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comment<'src> {
    pub text: &'src str,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriviaKind {
    Whitespace,
    LineComment,
    BlockComment,
}

/// トークンを生成しない消費済みテキスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trivia<'src> {
    pub kind: TriviaKind,
    pub text: &'src str,
    pub span: Span,
}

/// トークナイザーの1ステップ分の結果（空白・コメントを含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanned<'src> {
    Trivia(Trivia<'src>),
    Token(Token<'src>),
}

impl<'src> Scanned<'src> {
    pub fn text(&self) -> &'src str {
        match self {
            Scanned::Trivia(trivia) => trivia.text,
            Scanned::Token(token) => token.text,
        }
    }
}

/// 一つの入力文字列に対するトークナイザー
///
/// 失敗はしない。不正な入力は該当テキストを持つ[`TokenType::Invalid`]として返す。
#[derive(Debug, Clone)]
pub struct RawTokenizer<'src> {
    input: &'src str,
    offset: usize,
    position: Position,
    comments: Vec<Comment<'src>>,
}

impl<'src> RawTokenizer<'src> {
    pub fn new(input: &'src str) -> Self {
        RawTokenizer {
            input,
            offset: 0,
            position: Position::new(),
            comments: Vec::new(),
        }
    }

    /// `input`で再開し、位置とコメントの状態をすべて破棄
    pub fn set_input(&mut self, input: &'src str) {
        *self = RawTokenizer::new(input);
    }

    /// これまでに消費したテキスト（空白・コメントを含む）
    pub fn consumed(&self) -> &'src str {
        &self.input[..self.offset]
    }

    /// まだ消費していないテキスト
    pub fn remaining(&self) -> &'src str {
        &self.input[self.offset..]
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn comments(&self) -> &[Comment<'src>] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment<'src>> {
        std::mem::take(&mut self.comments)
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// 次のトークンを取得
    /// 入力を使い切った後は何度呼んでも[`TokenType::EndOfInput`]を返す
    pub fn next_token(&mut self) -> Token<'src> {
        loop {
            if let Scanned::Token(token) = self.next_scanned() {
                return token;
            }
        }
    }

    /// 空白・コメントを含む次の字句
    pub fn next_scanned(&mut self) -> Scanned<'src> {
        let rest = self.remaining();
        let first = match rest.chars().next() {
            Some(c) => c,
            None => {
                return Scanned::Token(Token::new(
                    TokenType::EndOfInput,
                    "",
                    Span::point(self.position),
                ))
            }
        };

        if first.is_whitespace() {
            let len = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            return self.trivia(TriviaKind::Whitespace, len);
        }

        if first == '"' {
            let (kind, len) = scan_string_literal(rest);
            return self.token(kind, len);
        }

        if rest.starts_with("//") {
            let len = rest.find('\n').unwrap_or(rest.len());
            return self.trivia(TriviaKind::LineComment, len);
        }

        if rest.starts_with("/*") {
            return match rest[2..].find("*/") {
                Some(end) => self.trivia(TriviaKind::BlockComment, end + 4),
                None => self.token(TokenType::Invalid, rest.len()),
            };
        }

        let mut table = TokenType::lexer(rest);
        match table.next() {
            Some(Ok(kind)) => {
                // より長い規則のマッチ失敗分までスライスが伸びることがあるため、固定テキストの長さで切る
                let len = kind.fixed_text().map_or(table.span().end, str::len);
                self.token(kind, len)
            }
            // どの規則にもマッチしない場合、残りの入力全体を不正トークンとする
            _ => self.token(TokenType::Invalid, rest.len()),
        }
    }

    /// 直前に消費したものの一部として、もう1文字消費
    pub(crate) fn bump_char(&mut self) -> Option<char> {
        let ch = self.remaining().chars().next()?;
        self.offset += ch.len_utf8();
        self.position.advance(ch);
        Some(ch)
    }

    fn consume(&mut self, len: usize) -> (&'src str, Span) {
        let text = &self.input[self.offset..self.offset + len];
        let span = Span::covering(self.position, text);
        self.offset += len;
        self.position = span.last;
        (text, span)
    }

    fn token(&mut self, kind: TokenType, len: usize) -> Scanned<'src> {
        let (text, span) = self.consume(len);
        Scanned::Token(Token::new(kind, text, span))
    }

    fn trivia(&mut self, kind: TriviaKind, len: usize) -> Scanned<'src> {
        let (text, span) = self.consume(len);
        if kind != TriviaKind::Whitespace {
            self.comments.push(Comment {
                text,
                position: span.first,
            });
        }
        Scanned::Trivia(Trivia { kind, text, span })
    }
}

impl<'src> Iterator for RawTokenizer<'src> {
    type Item = Token<'src>;

    /// 入力終端の手前までのトークンを返す
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is_end()).then_some(token)
    }
}

/// 入力全体をトークン化（コメントは捨てる）
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    RawTokenizer::new(input).collect()
}

fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// `"`で始まる`rest`の先頭にある文字列リテラルの型と長さ
fn scan_string_literal(rest: &str) -> (TokenType, usize) {
    let mut depth: i32 = 0;
    let mut chars = rest.char_indices().skip(1).peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, '\\' | '"' | 'n' | 'r' | 'v' | 'f' | 't' | '{' | '}')) => {}
                Some((_, 'u')) => {
                    let mut digits = 0;
                    while digits < 5 {
                        match chars.peek() {
                            Some(&(_, c)) if c.is_ascii_hexdigit() => {
                                chars.next();
                                digits += 1;
                            }
                            _ => break,
                        }
                    }
                    if digits < 4 {
                        let end = chars
                            .next()
                            .map_or(rest.len(), |(j, c)| j + c.len_utf8());
                        return (TokenType::Invalid, end);
                    }
                }
                Some((j, c)) => return (TokenType::Invalid, j + c.len_utf8()),
                None => return (TokenType::Invalid, rest.len()),
            },
            c if is_line_terminator(c) => return (TokenType::Invalid, i),
            '{' => depth += 1,
            '}' => depth -= 1,
            '"' if depth == 0 => return (TokenType::StringLiteral, i + 1),
            _ => {}
        }
    }

    (TokenType::Invalid, rest.len())
}
