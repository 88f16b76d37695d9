use compact_str::{CompactString, ToCompactString};

/// Lexeme standing for the `1/x` reciprocal key
pub const RECIPROCAL: char = '$';
/// Lexeme for unary negation, written after its operand
pub const NEGATE: char = '~';

/// Splits raw input into lexemes: numbers, single-character operators,
/// parentheses, the reciprocal marker `$` and the postfix negate `~`.
///
/// The passes run in a fixed order: case folding and whitespace removal,
/// `1/x` macro-expansion, number/operator splitting, unary-minus rewrite.
/// `1/x` is expanded before numbers are split, so `11/x` reads as `1`
/// followed by the reciprocal marker.
pub fn tokenize(raw: &str) -> Vec<CompactString> {
    let folded = fold(raw);
    rewrite_unary_minus(split(&folded))
}

/// Lowercase, drop whitespace, and replace every literal `1/x` run with
/// the reciprocal marker.
fn fold(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars().filter(|c| !c.is_whitespace()) {
        folded.push(c.to_ascii_lowercase());
    }

    let mut expanded = String::with_capacity(folded.len());
    let mut rest = folded.as_str();
    while let Some(at) = rest.find("1/x") {
        expanded.push_str(&rest[..at]);
        expanded.push(RECIPROCAL);
        rest = &rest[at + 3..];
    }
    expanded.push_str(rest);
    expanded
}

fn is_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '!' | '(' | ')') || c == RECIPROCAL
}

/// Split the folded text into lexemes. A number is a maximal digit run
/// with at most one decimal point, and the point must be followed by a
/// digit. Anything that is neither a number nor a known symbol is glued
/// into an opaque lexeme; the converter skips those.
fn split(input: &str) -> Vec<CompactString> {
    let chars: Vec<char> = input.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let mut number = c.to_compact_string();
            let mut in_fraction = false;
            i += 1;
            while i < chars.len() {
                match chars[i] {
                    d if d.is_ascii_digit() => {
                        number.push(d);
                        i += 1;
                    }
                    '.' if !in_fraction
                        && chars.get(i + 1).is_some_and(char::is_ascii_digit) =>
                    {
                        in_fraction = true;
                        number.push('.');
                        number.push(chars[i + 1]);
                        i += 2;
                    }
                    _ => break,
                }
            }
            lexemes.push(number);
        } else if is_symbol(c) {
            lexemes.push(c.to_compact_string());
            i += 1;
        } else {
            let mut junk = c.to_compact_string();
            i += 1;
            while i < chars.len() && !chars[i].is_ascii_digit() && !is_symbol(chars[i]) {
                junk.push(chars[i]);
                i += 1;
            }
            lexemes.push(junk);
        }
    }

    lexemes
}

/// A minus is unary when a number follows it and either nothing precedes
/// it or the preceding lexeme is `(`, `+`, `*`, `/`, `-` or the
/// reciprocal marker. Unary minuses move behind their operand as `~` so
/// the evaluator can apply them like any other postfix operator.
fn rewrite_unary_minus(lexemes: Vec<CompactString>) -> Vec<CompactString> {
    let mut rewritten: Vec<CompactString> = Vec::with_capacity(lexemes.len());
    let mut pending = lexemes.into_iter().peekable();

    while let Some(lexeme) = pending.next() {
        let unary = lexeme == "-"
            && pending
                .peek()
                .is_some_and(|next| next.parse::<f64>().is_ok())
            && rewritten.last().map_or(true, |prev| {
                matches!(prev.as_str(), "(" | "+" | "*" | "/" | "-" | "$")
            });

        if unary {
            // Consume the operand and attach the negate after it
            rewritten.push(pending.next().unwrap_or_default());
            rewritten.push(NEGATE.to_compact_string());
        } else {
            rewritten.push(lexeme);
        }
    }

    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn lex(expr: &str) -> Vec<String> {
        tokenize(expr).into_iter().map(|l| l.to_string()).collect()
    }

    #[test_case("12+3" => vec!["12", "+", "3"] ; "numbers split around operators")]
    #[test_case("1--3" => vec!["1", "-", "3", "~"] ; "binary minus before a negated number")]
    #[test_case("11/x" => vec!["1", "$"] ; "reciprocal expansion wins over number splitting")]
    #[test_case("-3" => vec!["3", "~"] ; "leading minus is unary")]
    #[test_case("--3" => vec!["-", "3", "~"] ; "only the minus next to the number is unary")]
    #[test_case("5*-2-3" => vec!["5", "*", "2", "~", "-", "3"] ; "unary after multiply then binary")]
    #[test_case("(-3)" => vec!["(", "3", "~", ")"] ; "unary after open parenthesis")]
    #[test_case("3!-2" => vec!["3", "!", "-", "2"] ; "minus after factorial stays binary")]
    #[test_case("(1+2-3)!1/x" => vec!["(", "1", "+", "2", "-", "3", ")", "!", "$"] ; "parenthesised factorial and reciprocal")]
    #[test_case("1.25*2" => vec!["1.25", "*", "2"] ; "decimal numbers stay whole")]
    #[test_case("1.2.3" => vec!["1.2", ".", "3"] ; "second decimal point starts a stray lexeme")]
    #[test_case(" 1 +  2 " => vec!["1", "+", "2"] ; "whitespace is stripped")]
    #[test_case("21/X" => vec!["2", "$"] ; "reciprocal key folds to lowercase")]
    #[test_case("2x3" => vec!["2", "x", "3"] ; "stray x isolates between numbers")]
    #[test_case("xx+1" => vec!["xx", "+", "1"] ; "stray characters glue together")]
    fn lexes(expr: &str) -> Vec<String> {
        lex(expr)
    }

    #[test]
    fn empty_input_has_no_lexemes() {
        assert!(lex("").is_empty());
        assert!(lex("   ").is_empty());
    }
}
