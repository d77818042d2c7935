//! ジェネリック呼び出しの山括弧の判定
//!
//! `receiver.method<A, B>(args)`と`a < b`はどちらも`式 <`で始まり、
//! 1トークンの先読みでは区別できない。構文解析の前にトークン型の列全体を
//! 後ろから一度走査し、直後に`(`が続く`>`を探して、それと対応する`<`を
//! 型引数リストの開き括弧として記録する。それ以外の`<`は演算子のまま。
//!
//! 判定はトークン型だけを見る。`w < x > (y)`は型引数付き呼び出しと
//! 全く同じ形なので、呼び出しとして記録される。

use std::collections::BTreeSet;

use super::token::TokenType;

/// `types`のうち、ジェネリック呼び出しの型引数リストを開く`<`の位置
///
/// 生の呼び出し形式`<!>(`は対象外。対応する`<`が列の先頭までに
/// 見つからない`>(`は何も記録しない。
pub fn generic_call_brackets(types: &[TokenType]) -> BTreeSet<usize> {
    let mut flagged = BTreeSet::new();
    if types.len() < 2 {
        return flagged;
    }

    let mut i = types.len() - 1;
    while i >= 1 {
        if i >= 3 && is_raw_invocation(&types[i - 3..=i]) {
            match i.checked_sub(4) {
                Some(next) => i = next,
                None => break,
            }
            continue;
        }

        if types[i - 1] == TokenType::Gt && types[i] == TokenType::LeftParen {
            match matching_open(types, i - 1) {
                Some(open) => {
                    log::trace!("generic invocation bracket at token {}", open);
                    flagged.insert(open);
                    match open.checked_sub(1) {
                        Some(next) => i = next,
                        None => break,
                    }
                }
                None => i -= 1,
            }
            continue;
        }

        i -= 1;
    }

    flagged
}

fn is_raw_invocation(window: &[TokenType]) -> bool {
    window
        == [
            TokenType::Lt,
            TokenType::Bang,
            TokenType::Gt,
            TokenType::LeftParen,
        ]
}

/// `close`位置の`>`から、対応する`<`まで後ろ向きにたどる
fn matching_open(types: &[TokenType], close: usize) -> Option<usize> {
    let mut depth = 1usize;
    for j in (0..close).rev() {
        match types[j] {
            TokenType::Lt => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            TokenType::Gt => depth += 1,
            _ => {}
        }
    }
    None
}
