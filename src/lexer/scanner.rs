//! パーサーに渡すスキャナー
//!
//! `set_input`の時点で入力全体を一度トークン化し、[`generic_call_brackets`]が
//! すべてのトークン型を参照できるようにする。本走査では必要に応じて再度
//! トークン化し、記録された`<`を[`TokenType::GenericLt`]に付け替える。
//! 両方の走査は同じ[`RawTokenizer`]を通るため、トークンの位置は常に一致する。

use std::collections::BTreeSet;

use super::disambiguate::generic_call_brackets;
use super::position::{Position, Span};
use super::token::{Token, TokenType};
use super::tokenizer::{Comment, RawTokenizer};

/// 診断用ヘルパーがカーソルの前後に表示する最大文字数
pub const CONTEXT_WIDTH: usize = 20;

const ELLIPSIS: &str = "...";

/// 入力全体のトークン型（入力終端を除く）
pub fn token_types(input: &str) -> Vec<TokenType> {
    RawTokenizer::new(input).map(|token| token.kind).collect()
}

#[derive(Debug, Clone)]
pub struct ProductionScanner<'src> {
    source: &'src str,
    tokenizer: RawTokenizer<'src>,
    generic_brackets: BTreeSet<usize>,
    emitted: usize,
    current: Option<Token<'src>>,
    current_index: Option<usize>,
    text_start: usize,
}

impl<'src> ProductionScanner<'src> {
    pub fn new(input: &'src str) -> Self {
        let mut scanner = ProductionScanner {
            source: input,
            tokenizer: RawTokenizer::new(input),
            generic_brackets: BTreeSet::new(),
            emitted: 0,
            current: None,
            current_index: None,
            text_start: 0,
        };
        scanner.set_input(input);
        scanner
    }

    /// `input`の先頭から再開
    pub fn set_input(&mut self, input: &'src str) {
        let types = token_types(input);
        self.generic_brackets = generic_call_brackets(&types);
        log::debug!(
            "scanner input: {} tokens, {} generic invocation brackets",
            types.len(),
            self.generic_brackets.len()
        );

        self.source = input;
        self.tokenizer.set_input(input);
        self.emitted = 0;
        self.current = None;
        self.current_index = None;
        self.text_start = 0;
    }

    /// 次のトークンに進み、その型を返す
    ///
    /// 一度入力終端を返した後は常に入力終端を返し、状態も変化しない。
    pub fn lex(&mut self) -> TokenType {
        if self.current.is_some_and(|token| token.is_end()) {
            return TokenType::EndOfInput;
        }

        let mut token = self.tokenizer.next_token();
        if token.is_end() {
            self.current_index = None;
        } else {
            let index = self.emitted;
            self.emitted += 1;
            self.current_index = Some(index);

            if token.kind == TokenType::Lt && self.generic_brackets.contains(&index) {
                log::trace!("relabeling '<' at {} as a type-argument opener", token.span.first);
                token.kind = TokenType::GenericLt;
            }
        }

        self.text_start = self.tokenizer.offset() - token.text.len();
        log::trace!("{:?} {:?} at {}", token.kind, token.text, token.span);
        self.current = Some(token);
        token.kind
    }

    /// 直前に返したトークン
    pub fn token(&self) -> Option<Token<'src>> {
        self.current
    }

    /// 現在のトークンのテキスト
    pub fn text(&self) -> &'src str {
        self.current.map_or("", |token| token.text)
    }

    /// 現在のトークンのテキストの長さ（文字数）
    pub fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    pub fn location(&self) -> Span {
        self.current
            .map_or_else(|| Span::point(Position::new()), |token| token.span)
    }

    /// 現在のトークンの開始行
    pub fn line(&self) -> usize {
        self.location().first_line()
    }

    /// これまでに返したトークンの中での現在のトークンの番号
    pub fn token_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn generic_brackets(&self) -> &BTreeSet<usize> {
        &self.generic_brackets
    }

    pub fn comments(&self) -> &[Comment<'src>] {
        self.tokenizer.comments()
    }

    /// 生の1文字を消費して現在のトークンに追加
    pub fn input(&mut self) -> Option<char> {
        let ch = self.tokenizer.bump_char()?;
        let source = self.source;
        let text = &source[self.text_start..self.tokenizer.offset()];
        let last = self.tokenizer.position();

        match &mut self.current {
            Some(token) => {
                token.text = text;
                token.span.last = last;
            }
            None => {
                self.current = Some(Token::new(
                    TokenType::Invalid,
                    text,
                    Span::new(Position::new(), last),
                ));
            }
        }
        Some(ch)
    }

    /// 現在のトークンより前のテキスト（エラーメッセージ用）
    pub fn past_input(&self) -> String {
        let past = collapse_whitespace(&self.source[..self.text_start]);
        let len = past.chars().count();
        if len > CONTEXT_WIDTH {
            let tail: String = past.chars().skip(len - CONTEXT_WIDTH).collect();
            format!("{}{}", ELLIPSIS, tail)
        } else {
            past
        }
    }

    /// 現在のトークンとそれ以降のテキスト（エラーメッセージ用）
    pub fn upcoming_input(&self) -> String {
        let upcoming = collapse_whitespace(&self.source[self.text_start..]);
        if upcoming.chars().count() > CONTEXT_WIDTH {
            let head: String = upcoming.chars().take(CONTEXT_WIDTH).collect();
            format!("{}{}", head, ELLIPSIS)
        } else {
            upcoming
        }
    }

    /// 現在のトークンの下にキャレットを置いた文脈行
    pub fn show_position(&self) -> String {
        let past = self.past_input();
        let dashes = "-".repeat(past.chars().count());
        format!("{}{}\n{}^", past, self.upcoming_input(), dashes)
    }
}

impl<'src> Iterator for ProductionScanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lex() {
            TokenType::EndOfInput => None,
            _ => self.current,
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(ch);
            in_whitespace = false;
        }
    }
    collapsed
}
