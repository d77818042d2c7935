//! レキサーテスト
//!
//! 生のトークナイザーのテスト。キーワード、演算子、リテラル、コメント、
//! 位置情報、不正トークンを扱う。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tessera::lexer::{tokenize, Position, RawTokenizer, Token, TokenType};

    /// トークンの型のみを比較するヘルパー関数
    fn extract_tokens(source: &str) -> Vec<TokenType> {
        tokenize(source).into_iter().map(|token| token.kind).collect()
    }

    fn extract_tokens_with_position(source: &str) -> Vec<Token<'_>> {
        tokenize(source)
    }

    #[test]
    fn test_inherited_keywords() {
        let source = "class extends implements interface new this super instanceof null";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::Class,
            TokenType::Extends,
            TokenType::Implements,
            TokenType::Interface,
            TokenType::New,
            TokenType::This,
            TokenType::Super,
            TokenType::Instanceof,
            TokenType::Null,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_native_keywords() {
        let source = "func let var val is as match trait Self self yield";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::Func,
            TokenType::Let,
            TokenType::Var,
            TokenType::Val,
            TokenType::Is,
            TokenType::As,
            TokenType::Match,
            TokenType::Trait,
            TokenType::SelfType,
            TokenType::SelfValue,
            TokenType::Yield,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_contextual_keywords() {
        let source = "get set step every some initialized";
        let tokens = extract_tokens(source);

        assert!(tokens.iter().all(|t| t.is_contextual_keyword()));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_assignment_operators() {
        let source = "= += -= *= /= %= **=";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::Assign,
            TokenType::PlusAssign,
            TokenType::MinusAssign,
            TokenType::StarAssign,
            TokenType::SlashAssign,
            TokenType::PercentAssign,
            TokenType::StarStarAssign,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_comparison_and_range_operators() {
        let source = "== != < > <= >= ~= !~= && || ... ..= =.. =.=";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::EqEq,
            TokenType::NotEq,
            TokenType::Lt,
            TokenType::Gt,
            TokenType::LtEq,
            TokenType::GtEq,
            TokenType::ApproxEq,
            TokenType::NotApproxEq,
            TokenType::AndAnd,
            TokenType::OrOr,
            TokenType::RangeExclusive,
            TokenType::RangeInclusiveEnd,
            TokenType::RangeInclusiveStart,
            TokenType::RangeInclusive,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_delimiters_and_markers() {
        let source = "( ) { } [ ] ; , . # & | : ? ! !< @ + - * / % **";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::LeftBrace,
            TokenType::RightBrace,
            TokenType::LeftBracket,
            TokenType::RightBracket,
            TokenType::Semicolon,
            TokenType::Comma,
            TokenType::Dot,
            TokenType::Hash,
            TokenType::Ampersand,
            TokenType::Pipe,
            TokenType::Colon,
            TokenType::Question,
            TokenType::Bang,
            TokenType::BangLt,
            TokenType::At,
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Percent,
            TokenType::StarStar,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_raw_invocation_tokens() {
        // `<!>`は3トークン。`!>`や`!<`にはならない
        assert_eq!(
            extract_tokens("f<!>(x)"),
            vec![
                TokenType::Identifier,
                TokenType::Lt,
                TokenType::Bang,
                TokenType::Gt,
                TokenType::LeftParen,
                TokenType::Identifier,
                TokenType::RightParen,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let source = "count `with space` 42 0x2A 'c' \"text\"";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::Identifier,
            TokenType::EscapedIdentifier,
            TokenType::Number,
            TokenType::Number,
            TokenType::CharLiteral,
            TokenType::StringLiteral,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_string_with_code_point_escape() {
        let tokens = extract_tokens_with_position(r#""a{0x41}b""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::StringLiteral);
        assert_eq!(tokens[0].text, r#""a{0x41}b""#);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = extract_tokens_with_position("\"unterminated");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Invalid);
        assert_eq!(tokens[0].text, "\"unterminated");
    }

    #[test]
    fn test_illegal_escape() {
        let tokens: Vec<_> = extract_tokens_with_position(r#""a\qb""#)
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect();

        // 不正なエスケープの直後から字句解析を再開する
        assert_eq!(
            tokens,
            vec![
                (TokenType::Invalid, r#""a\q"#),
                (TokenType::Identifier, "b"),
                (TokenType::Invalid, "\""),
            ]
        );
    }

    #[test]
    fn test_comment_extraction() {
        let mut tokenizer = RawTokenizer::new("// hi\nx");
        let token = tokenizer.next_token();

        assert_eq!(tokenizer.comments().len(), 1);
        assert_eq!(tokenizer.comments()[0].text, "// hi");
        assert_eq!(tokenizer.comments()[0].position.line, 1);
        assert_eq!(token.text, "x");
        assert_eq!(token.span.first, Position { line: 2, column: 0 });
    }

    #[test]
    fn test_comments_are_not_tokens() {
        let source = "func main() { // line\n    let x = 42; /* block */ }";
        let tokens = extract_tokens(source);

        let expected = vec![
            TokenType::Func,
            TokenType::Identifier,
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::LeftBrace,
            TokenType::Let,
            TokenType::Identifier,
            TokenType::Assign,
            TokenType::Number,
            TokenType::Semicolon,
            TokenType::RightBrace,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_position_tracking() {
        let source = "func main() {\n    let x = 42;\n}";
        let tokens = extract_tokens_with_position(source);

        assert_eq!(tokens[0].span.first, Position { line: 1, column: 0 }); // func
        assert_eq!(tokens[0].span.last, Position { line: 1, column: 4 });
        assert_eq!(tokens[1].span.first, Position { line: 1, column: 5 }); // main
        assert_eq!(tokens[5].span.first, Position { line: 2, column: 4 }); // let
        assert_eq!(tokens[10].span.first, Position { line: 3, column: 0 }); // }
    }

    #[test]
    fn test_unrecognized_character() {
        let tokens = extract_tokens_with_position("let x = $y;\nlet z;");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenType::Invalid);
        assert_eq!(last.text, "$y;\nlet z;");
        assert_eq!(last.span.first, Position { line: 1, column: 8 });
        assert_eq!(last.span.last, Position { line: 2, column: 6 });
    }

    #[test]
    fn test_complete_example() {
        let source = r#"package geometry;

class Point {
    val x: float;
    val y: float;

    func length(): float {
        return (this.x ** 2 + this.y ** 2) ** 0.5;
    }

    get norm: float { return this.length(); }
}

func main() {
    let p = new Point(3, 4);
    let ps = List.of<Point>(p, p);
    if p.length() ~= 5.0 and every ps.map<float>(norm) { print("ok\n"); }
}
"#;

        let tokens = extract_tokens(source);

        assert!(tokens.iter().all(|t| *t != TokenType::Invalid));
        assert_eq!(tokens[0], TokenType::Package);
        assert!(tokens.contains(&TokenType::StarStar));
        assert!(tokens.contains(&TokenType::ApproxEq));
        assert!(tokens.contains(&TokenType::Get));
        assert!(tokens.contains(&TokenType::StringLiteral));
    }
}
