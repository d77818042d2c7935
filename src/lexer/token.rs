//! トークンの定義
//!
//! [`TokenType`]はトークンの語彙そのものであり、`logos`のderiveを通じて、
//! 空白・コメント・文字列リテラル以外のすべての字句に対してトークナイザーが
//! 参照する規則表にもなっている。

use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

use super::position::Span;

/// フロントエンドが生成するトークンの種類
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    // Java系の祖先から引き継いだ予約語
    #[token("abstract")]
    Abstract,
    #[token("boolean")]
    Boolean,
    #[token("break")]
    Break,
    #[token("byte")]
    Byte,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("char")]
    Char,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("float")]
    Float,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("instanceof")]
    Instanceof,
    #[token("int")]
    Int,
    #[token("interface")]
    Interface,
    #[token("long")]
    Long,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("static")]
    Static,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("try")]
    Try,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Tessera固有の予約語
    #[token("and")]
    And,
    #[token("as")]
    As,
    #[token("async")]
    Async,
    #[token("await")]
    Await,
    #[token("elif")]
    Elif,
    #[token("export")]
    Export,
    #[token("func")]
    Func,
    #[token("in")]
    In,
    #[token("is")]
    Is,
    #[token("let")]
    Let,
    #[token("loop")]
    Loop,
    #[token("match")]
    Match,
    #[token("module")]
    Module,
    #[token("mut")]
    Mut,
    #[token("not")]
    Not,
    #[token("of")]
    Of,
    #[token("operator")]
    Operator,
    #[token("or")]
    Or,
    #[token("override")]
    Override,
    #[token("self")]
    SelfValue,
    #[token("Self")]
    SelfType,
    #[token("then")]
    Then,
    #[token("trait")]
    Trait,
    #[token("type")]
    Type,
    #[token("unless")]
    Unless,
    #[token("until")]
    Until,
    #[token("val")]
    Val,
    #[token("var")]
    Var,
    #[token("yield")]
    Yield,

    // 文脈キーワード（特定の構文位置でのみ予約される）
    #[token("get")]
    Get,
    #[token("set")]
    Set,
    #[token("step")]
    Step,
    #[token("every")]
    EveryKw,
    #[token("some")]
    SomeKw,
    #[token("initialized")]
    Initialized,

    // 区切り文字
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,

    // 代入
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("**=")]
    StarStarAssign,

    // 論理・比較
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("~=")]
    ApproxEq,
    #[token("!~=")]
    NotApproxEq,

    // 範囲チェック
    #[token("...")]
    RangeExclusive,
    #[token("..=")]
    RangeInclusiveEnd,
    #[token("=..")]
    RangeInclusiveStart,
    #[token("=.=")]
    RangeInclusive,

    // 算術
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,

    // null許容・生ジェネリックの記号
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("!<")]
    BangLt,
    #[token("@")]
    At,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,

    #[regex(r"`[^`\r\n]+`")]
    EscapedIdentifier,

    #[regex(r"[0-9]", lex_number)]
    Number,

    #[regex(r"'([^'\\\r\n]|\\[^\r\n])*'")]
    CharLiteral,

    /// 文字列スキャナーが生成する。規則表からは出てこない
    StringLiteral,

    /// 入力終端。ソースを使い切った後は常にこれを返す
    EndOfInput,

    /// 未終了のリテラルやコメント、認識できないテキスト
    Invalid,

    /// ジェネリック呼び出しの型引数リストを開く`<`
    /// 通常の[`TokenType::Lt`]を付け替えることでのみ現れる
    GenericLt,
}

impl TokenType {
    /// 固定テキストのトークンのソース上の文字列
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokenType::*;
        let text = match self {
            Abstract => "abstract",
            Boolean => "boolean",
            Break => "break",
            Byte => "byte",
            Case => "case",
            Catch => "catch",
            Char => "char",
            Class => "class",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Do => "do",
            Double => "double",
            Else => "else",
            Enum => "enum",
            Extends => "extends",
            Final => "final",
            Finally => "finally",
            Float => "float",
            For => "for",
            Goto => "goto",
            If => "if",
            Implements => "implements",
            Import => "import",
            Instanceof => "instanceof",
            Int => "int",
            Interface => "interface",
            Long => "long",
            Native => "native",
            New => "new",
            Package => "package",
            Private => "private",
            Protected => "protected",
            Public => "public",
            Return => "return",
            Short => "short",
            Static => "static",
            Super => "super",
            Switch => "switch",
            Synchronized => "synchronized",
            This => "this",
            Throw => "throw",
            Throws => "throws",
            Transient => "transient",
            Try => "try",
            Void => "void",
            Volatile => "volatile",
            While => "while",
            True => "true",
            False => "false",
            Null => "null",
            And => "and",
            As => "as",
            Async => "async",
            Await => "await",
            Elif => "elif",
            Export => "export",
            Func => "func",
            In => "in",
            Is => "is",
            Let => "let",
            Loop => "loop",
            Match => "match",
            Module => "module",
            Mut => "mut",
            Not => "not",
            Of => "of",
            Operator => "operator",
            Or => "or",
            Override => "override",
            SelfValue => "self",
            SelfType => "Self",
            Then => "then",
            Trait => "trait",
            Type => "type",
            Unless => "unless",
            Until => "until",
            Val => "val",
            Var => "var",
            Yield => "yield",
            Get => "get",
            Set => "set",
            Step => "step",
            EveryKw => "every",
            SomeKw => "some",
            Initialized => "initialized",
            LeftParen => "(",
            RightParen => ")",
            LeftBrace => "{",
            RightBrace => "}",
            LeftBracket => "[",
            RightBracket => "]",
            Semicolon => ";",
            Comma => ",",
            Dot => ".",
            Hash => "#",
            Ampersand => "&",
            Pipe => "|",
            Colon => ":",
            Assign => "=",
            PlusAssign => "+=",
            MinusAssign => "-=",
            StarAssign => "*=",
            SlashAssign => "/=",
            PercentAssign => "%=",
            StarStarAssign => "**=",
            AndAnd => "&&",
            OrOr => "||",
            EqEq => "==",
            NotEq => "!=",
            Lt | GenericLt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            ApproxEq => "~=",
            NotApproxEq => "!~=",
            RangeExclusive => "...",
            RangeInclusiveEnd => "..=",
            RangeInclusiveStart => "=..",
            RangeInclusive => "=.=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            StarStar => "**",
            Question => "?",
            Bang => "!",
            BangLt => "!<",
            At => "@",
            Identifier | EscapedIdentifier | Number | CharLiteral | StringLiteral | EndOfInput
            | Invalid => return None,
        };
        Some(text)
    }

    /// いずれかのキーワード集合に属する予約語
    pub fn is_reserved(self) -> bool {
        self.fixed_text()
            .is_some_and(|text| text.starts_with(|c: char| c.is_ascii_alphabetic()))
            && !self.is_contextual_keyword()
    }

    /// 特定の構文位置でのみキーワードとして働く語
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            TokenType::Get
                | TokenType::Set
                | TokenType::Step
                | TokenType::EveryKw
                | TokenType::SomeKw
                | TokenType::Initialized
        )
    }

    /// 型からテキストが決まらないトークン
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenType::Identifier
                | TokenType::EscapedIdentifier
                | TokenType::Number
                | TokenType::CharLiteral
                | TokenType::StringLiteral
        )
    }

    /// 規則表からは出てこない番兵（入力終端と不正トークン）
    pub fn is_sentinel(self) -> bool {
        matches!(self, TokenType::EndOfInput | TokenType::Invalid)
    }
}

/// マッチした1桁目から数値リテラルの残りを読み進める
/// 基数接頭辞・小数部・指数部は、後ろに数字が続く場合にのみ取り込む
fn lex_number(lex: &mut Lexer<TokenType>) -> bool {
    let text = &lex.source().as_bytes()[lex.span().start..];
    let len = radix_literal(text).unwrap_or_else(|| decimal_literal(text));
    lex.bump(len - 1);
    true
}

fn radix_literal(text: &[u8]) -> Option<usize> {
    if text.first() != Some(&b'0') {
        return None;
    }
    let is_digit: fn(&u8) -> bool = match text.get(1)? {
        b'x' | b'X' => u8::is_ascii_hexdigit,
        b'o' | b'O' => |b: &u8| matches!(b, b'0'..=b'7'),
        b'b' | b'B' => |b: &u8| matches!(b, b'0' | b'1'),
        _ => return None,
    };
    match digit_run(&text[2..], is_digit) {
        0 => None,
        digits => Some(2 + digits),
    }
}

fn decimal_literal(text: &[u8]) -> usize {
    let mut len = digit_run(text, u8::is_ascii_digit);

    if text.get(len) == Some(&b'.') {
        let digits = digit_run(&text[len + 1..], u8::is_ascii_digit);
        if digits > 0 {
            len += 1 + digits;
        }
    }

    if matches!(text.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(text.get(len + 1), Some(b'+' | b'-')));
        let digits = digit_run(&text[len + 1 + sign..], u8::is_ascii_digit);
        if digits > 0 {
            len += 1 + sign + digits;
        }
    }

    len
}

/// `bytes`先頭の`d(_?d)*`の長さ。数字がなければ0
fn digit_run(bytes: &[u8], is_digit: fn(&u8) -> bool) -> usize {
    let mut len = 0;
    while let Some(b) = bytes.get(len) {
        if is_digit(b) {
            len += 1;
        } else if *b == b'_' && len > 0 && bytes.get(len + 1).is_some_and(is_digit) {
            len += 2;
        } else {
            break;
        }
    }
    len
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::EscapedIdentifier => write!(f, "escaped identifier"),
            TokenType::Number => write!(f, "number"),
            TokenType::CharLiteral => write!(f, "character literal"),
            TokenType::StringLiteral => write!(f, "string literal"),
            TokenType::EndOfInput => write!(f, "end of input"),
            TokenType::Invalid => write!(f, "invalid token"),
            TokenType::GenericLt => write!(f, "'<' (type arguments)"),
            other => match other.fixed_text() {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

/// トークンとそのマッチ元のテキスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenType, text: &'src str, span: Span) -> Self {
        Token { kind, text, span }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenType::EndOfInput
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == TokenType::Invalid
    }
}
