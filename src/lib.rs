//! Tesseraフロントエンドライブラリ
//!
//! Tessera言語の字句解析段階を提供します。

pub mod error;
pub mod lexer;

// よく使用される型を再エクスポート
pub use error::{LexError, LiteralError};
pub use lexer::{ProductionScanner, RawTokenizer, Token, TokenType};
