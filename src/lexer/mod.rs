//! Tessera言語の字句解析モジュール
//!
//! ソーステキストは[`RawTokenizer`]によって[`Token`]の列に変換されます。
//! [`ProductionScanner`]はパーサー向けのラッパーで、まず入力全体を一度
//! 走査してジェネリック呼び出しの型引数を開く`<`を特定し、その後トークンを
//! 一つずつ返しながら該当する`<`を[`TokenType::GenericLt`]に付け替えます。
//!
//! ```
//! use tessera::lexer::{ProductionScanner, TokenType};
//!
//! let mut scanner = ProductionScanner::new("list.map<Text>(show)");
//! let types: Vec<_> = std::iter::from_fn(|| match scanner.lex() {
//!     TokenType::EndOfInput => None,
//!     kind => Some(kind),
//! })
//! .collect();
//! assert_eq!(types[3], TokenType::GenericLt);
//! ```

pub mod disambiguate;
pub mod literal_parser;
pub mod position;
pub mod scanner;
pub mod token;
pub mod tokenizer;

pub use disambiguate::generic_call_brackets;
pub use literal_parser::{decode_string, parse_number, NumberValue};
pub use position::{Position, Span};
pub use scanner::{token_types, ProductionScanner, CONTEXT_WIDTH};
pub use token::{Token, TokenType};
pub use tokenizer::{tokenize, Comment, RawTokenizer, Scanned, Trivia, TriviaKind};
