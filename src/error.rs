//! エラー型
//!
//! トークナイザー自体は失敗せず、不正な入力は[`TokenType::Invalid`]トークンとして
//! 返される。[`LexError`]はそれらのトークンに名前と診断情報を与え、
//! 深刻さの判断を呼び出し側に委ねる。

use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::Files;
use thiserror::Error;

use crate::lexer::{Position, RawTokenizer, Span, Token, TokenType};

/// 不正トークンから復元した字句解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("未終了の文字列リテラル")]
    UnterminatedString { text: String, span: Span },

    #[error("未終了のブロックコメント")]
    UnterminatedComment { text: String, span: Span },

    #[error("認識できない文字: {:?}", first_char(.text))]
    UnrecognizedLexeme { text: String, span: Span },
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or_default()
}

impl LexError {
    /// 不正トークンを分類。それ以外のトークンには`None`を返す
    pub fn from_token(token: &Token<'_>) -> Option<Self> {
        if token.kind != TokenType::Invalid {
            return None;
        }

        let text = token.text.to_owned();
        let span = token.span;
        Some(if token.text.starts_with('"') {
            LexError::UnterminatedString { text, span }
        } else if token.text.starts_with("/*") {
            LexError::UnterminatedComment { text, span }
        } else {
            LexError::UnrecognizedLexeme { text, span }
        })
    }

    /// `input`中のすべての字句解析エラー（出現順）
    pub fn collect(input: &str) -> Vec<LexError> {
        RawTokenizer::new(input)
            .filter_map(|token| LexError::from_token(&token))
            .collect()
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span, .. }
            | LexError::UnterminatedComment { span, .. }
            | LexError::UnrecognizedLexeme { span, .. } => *span,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            LexError::UnterminatedString { text, .. }
            | LexError::UnterminatedComment { text, .. }
            | LexError::UnrecognizedLexeme { text, .. } => text,
        }
    }

    /// codespan-reportingの診断情報に変換
    ///
    /// スパンは行と列しか持たないため、ラベルの範囲は`files`の行インデックスから
    /// 求める。求められない場合はラベルなしの診断になる。
    pub fn to_diagnostic<'a, F>(&self, files: &'a F, file_id: F::FileId) -> Diagnostic<F::FileId>
    where
        F: Files<'a>,
    {
        let span = self.span();
        let label_message = match self {
            LexError::UnterminatedString { .. } => "ここから始まる文字列が閉じられていません",
            LexError::UnterminatedComment { .. } => "ここから始まるコメントが閉じられていません",
            LexError::UnrecognizedLexeme { .. } => "この文字で始まるトークンはありません",
        };

        let range = match self {
            // 問題の文字だけを指す
            LexError::UnrecognizedLexeme { text, .. } => {
                let width = first_char(text).len_utf8();
                label_range(files, file_id, span.first)
                    .map(|start| start.start..start.start + width)
            }
            _ => label_range(files, file_id, span.first).and_then(|start| {
                label_range(files, file_id, span.last).map(|end| start.start..end.start)
            }),
        };

        let labels = range
            .map(|range| vec![Label::primary(file_id, range).with_message(label_message)])
            .unwrap_or_default();

        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(labels)
            .with_notes(vec![format!("{}行目、{}列目", span.first.line, span.first.column)])
    }
}

/// ファイルの行インデックスから求めた`at`位置の空のバイト範囲
fn label_range<'a, F>(files: &'a F, file_id: F::FileId, at: Position) -> Option<Range<usize>>
where
    F: Files<'a>,
{
    let source = files.source(file_id).ok()?;
    let source = source.as_ref();
    let line = match files.line_range(file_id, at.line - 1) {
        Ok(line) => line,
        // 末尾の改行の直後
        Err(_) => return Some(source.len()..source.len()),
    };

    let line_text = source.get(line.clone())?;
    let column = line_text
        .char_indices()
        .nth(at.column)
        .map_or(line_text.len(), |(offset, _)| offset);
    let offset = line.start + column;
    Some(offset..offset)
}

/// リテラルトークンの値のデコード失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("文字列リテラルではありません: {0}")]
    NotAString(String),

    #[error("不正なエスケープシーケンス: '{0}'")]
    InvalidEscape(String),

    #[error("不正なコードポイント: {0:#x}")]
    InvalidCodePoint(u32),

    #[error("波括弧内の内容に対応していません: '{{{0}}}'")]
    InvalidBraceContent(String),

    #[error("不正な数値リテラル: '{0}'")]
    InvalidNumber(String),
}
