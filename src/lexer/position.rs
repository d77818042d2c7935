//! トークナイザーの行・列管理
//!
//! 追跡するのは行と列の組だけで、ソース内のバイトオフセットや文字オフセットは
//! [`Span`]に含めない。

use serde::Serialize;
use std::fmt;

/// ソーステキスト上の位置
///
/// `line`は1始まり、`column`は0始まりで文字単位で数える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// 入力の先頭（1行目、0列目）
    pub fn new() -> Self {
        Position { line: 1, column: 0 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// `text`の各文字を順に進める
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch);
        }
    }

    /// ここから`text`を消費した後の位置
    pub fn after(mut self, text: &str) -> Self {
        self.advance_str(text);
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// トークン一つ分の範囲
///
/// `last`はトークンの最後の文字の直後の位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub first: Position,
    pub last: Position,
}

impl Span {
    pub fn new(first: Position, last: Position) -> Self {
        Span { first, last }
    }

    /// `at`にある空の範囲
    pub fn point(at: Position) -> Self {
        Span { first: at, last: at }
    }

    /// `first`から始まる`text`を覆う範囲
    pub fn covering(first: Position, text: &str) -> Self {
        Span {
            first,
            last: first.after(text),
        }
    }

    pub fn first_line(&self) -> usize {
        self.first.line
    }

    pub fn first_column(&self) -> usize {
        self.first.column
    }

    pub fn last_line(&self) -> usize {
        self.last.line
    }

    pub fn last_column(&self) -> usize {
        self.last.column
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}
