//! スキャナーテスト
//!
//! パーサーから見たジェネリック呼び出しの山括弧の付け替えと、
//! エラーメッセージで使う参照用・診断用ヘルパーのテスト。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tessera::lexer::{Position, ProductionScanner, Span, TokenType};
    use test_case::test_case;

    /// 入力終端までのトークン型をすべて取り出す
    fn lex_all(source: &str) -> Vec<TokenType> {
        let mut scanner = ProductionScanner::new(source);
        let mut types = Vec::new();
        loop {
            match scanner.lex() {
                TokenType::EndOfInput => return types,
                kind => types.push(kind),
            }
        }
    }

    /// 付け替えられた山括弧の位置
    fn generic_positions(source: &str) -> Vec<usize> {
        lex_all(source)
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == TokenType::GenericLt)
            .map(|(i, _)| i)
            .collect()
    }

    #[test_case("a.b<Number>(1)", vec![3]; "simple call")]
    #[test_case("a.b<Map<K, V>>(x)", vec![3]; "nested type argument")]
    #[test_case("a.b<Map<K, List<V>>>(x)", vec![3]; "deeply nested type argument")]
    #[test_case("x.f<A, B>(1).g<C>(2)", vec![3, 13]; "chained calls")]
    #[test_case("a < b", vec![]; "comparison")]
    #[test_case("a < b > (c)", vec![1]; "comparison chain before parenthesis")]
    #[test_case("a.b<!>(x)", vec![]; "raw invocation")]
    #[test_case("a > (b)", vec![]; "unmatched close")]
    fn test_generic_brackets(source: &str, expected: Vec<usize>) {
        assert_eq!(generic_positions(source), expected);
    }

    #[test]
    fn test_only_lt_tokens_are_relabeled() {
        let source = "if a < b and c.d<E<F>>(g) < h { i<!>(j); }";
        let raw: Vec<_> = tessera::lexer::token_types(source);
        let live = lex_all(source);

        assert_eq!(raw.len(), live.len());
        for (raw, live) in raw.iter().zip(&live) {
            if raw != live {
                assert_eq!(*raw, TokenType::Lt);
                assert_eq!(*live, TokenType::GenericLt);
            }
        }
        assert_eq!(live.iter().filter(|t| **t == TokenType::GenericLt).count(), 1);
    }

    #[test]
    fn test_introspection() {
        let mut scanner = ProductionScanner::new("let  total\n  = sum<Int>(xs);");

        assert_eq!(scanner.lex(), TokenType::Let);
        assert_eq!(scanner.lex(), TokenType::Identifier);
        assert_eq!(scanner.text(), "total");
        assert_eq!(scanner.text_len(), 5);
        assert_eq!(scanner.token_index(), Some(1));
        assert_eq!(
            scanner.location(),
            Span::new(Position { line: 1, column: 5 }, Position { line: 1, column: 10 })
        );

        assert_eq!(scanner.lex(), TokenType::Assign);
        assert_eq!(scanner.line(), 2);
        assert_eq!(scanner.location().first_column(), 2);

        assert_eq!(scanner.lex(), TokenType::Identifier);
        assert_eq!(scanner.lex(), TokenType::GenericLt);
        assert_eq!(scanner.text(), "<");
    }

    #[test]
    fn test_end_of_input_is_stable() {
        let mut scanner = ProductionScanner::new("x\n");
        assert_eq!(scanner.lex(), TokenType::Identifier);
        assert_eq!(scanner.lex(), TokenType::EndOfInput);

        let location = scanner.location();
        let past = scanner.past_input();
        for _ in 0..3 {
            assert_eq!(scanner.lex(), TokenType::EndOfInput);
            assert_eq!(scanner.location(), location);
            assert_eq!(scanner.past_input(), past);
        }
        assert_eq!(location.first, Position { line: 2, column: 0 });
        assert_eq!(scanner.text(), "");
    }

    #[test]
    fn test_input_appends_to_current_token() {
        let mut scanner = ProductionScanner::new("ab\ncd");
        assert_eq!(scanner.lex(), TokenType::Identifier);

        assert_eq!(scanner.input(), Some('\n'));
        assert_eq!(scanner.text(), "ab\n");
        assert_eq!(scanner.location().last, Position { line: 2, column: 0 });

        assert_eq!(scanner.input(), Some('c'));
        assert_eq!(scanner.text(), "ab\nc");

        assert_eq!(scanner.lex(), TokenType::Identifier);
        assert_eq!(scanner.text(), "d");
        assert_eq!(scanner.location().first, Position { line: 2, column: 1 });
        assert_eq!(scanner.input(), None);
    }

    #[test]
    fn test_past_and_upcoming_input() {
        let source = "let first = 1;\nlet second = first + oops;";
        let mut scanner = ProductionScanner::new(source);
        while scanner.text() != "oops" {
            scanner.lex();
        }

        // 改行は空白にまとめられ、末尾20文字だけが残る
        assert_eq!(scanner.past_input(), "...et second = first + ");
        assert_eq!(scanner.upcoming_input(), "oops;");
    }

    #[test]
    fn test_upcoming_input_truncates() {
        let mut scanner = ProductionScanner::new("a   bbbbbbbbbb\n\n cccccccccc dddd");
        scanner.lex();
        assert_eq!(scanner.past_input(), "");
        assert_eq!(scanner.upcoming_input(), "a bbbbbbbbbb ccccccc...");
    }

    #[test]
    fn test_show_position() {
        let mut scanner = ProductionScanner::new("x = y $ z");
        while scanner.lex() != TokenType::Invalid {}

        assert_eq!(scanner.show_position(), "x = y $ z\n------^");
    }

    #[test]
    fn test_set_input_restarts() {
        let mut scanner = ProductionScanner::new("a.b<C>(d)");
        scanner.lex();
        scanner.lex();

        scanner.set_input("e < f");
        assert_eq!(scanner.token_index(), None);
        assert!(scanner.generic_brackets().is_empty());
        assert_eq!(lex_all("e < f"), vec![TokenType::Identifier, TokenType::Lt, TokenType::Identifier]);
        assert_eq!(scanner.lex(), TokenType::Identifier);
        assert_eq!(scanner.location().first, Position::new());
    }

    #[test]
    fn test_comments_are_side_channel() {
        let mut scanner = ProductionScanner::new("/* doc */ f<T>(x) // trailing");
        let tokens: Vec<_> = scanner.by_ref().collect();

        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[1].kind, TokenType::GenericLt);
        let texts: Vec<_> = scanner.comments().iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["/* doc */", "// trailing"]);
    }
}
