// Operand tokenizing shared by every decode shape.
use crate::riscv::errors::InterpError;

/// Drops a trailing `#` comment and surrounding whitespace.
pub(crate) fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or(line).trim()
}

/// Splits a leading `name:` off a line, returning the label name and the
/// (possibly empty) instruction text after the colon.
pub(crate) fn split_label(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = strip_comment(line).split_once(':')?;
    let name = name.trim();
    is_label(name).then_some((name, rest.trim()))
}

pub(crate) fn split_operands(rest: &str) -> Vec<&str> {
    if rest.trim().is_empty() {
        return Vec::new();
    }
    rest.split(',').map(str::trim).collect()
}

/// `[A-Za-z0-9_]+`
pub(crate) fn is_word(tok: &str) -> bool {
    !tok.is_empty() && tok.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A word with an optional leading `.`, e.g. `loop` or `.L2`.
pub(crate) fn is_label(tok: &str) -> bool {
    is_word(tok.strip_prefix('.').unwrap_or(tok))
}

/// A label or number, optionally preceded by `-`; used for immediates and
/// targets.
pub(crate) fn is_value(tok: &str) -> bool {
    is_label(tok.strip_prefix('-').unwrap_or(tok))
}

/// Base-10 signed 32-bit immediate.
pub(crate) fn parse_imm(tok: &str) -> Result<i32, InterpError> {
    tok.parse::<i32>()
        .map_err(|_| InterpError::InvalidImmediate(tok.to_string()))
}

/// Splits `imm(base)` into its two halves if the operand has that shape.
/// The offset must be `-?[0-9]+`; the base must be a word.
pub(crate) fn split_memop(op: &str) -> Option<(&str, &str)> {
    let (imm, rest) = op.split_once('(')?;
    let base = rest.strip_suffix(')')?.trim();
    let imm = imm.trim();
    let digits = imm.strip_prefix('-').unwrap_or(imm);
    let ok = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && is_word(base);
    ok.then_some((imm, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_need_an_identifier() {
        assert_eq!(split_label("main:"), Some(("main", "")));
        assert_eq!(split_label("  loop_2:   # top"), Some(("loop_2", "")));
        assert_eq!(split_label(".L2:"), Some((".L2", "")));
        assert_eq!(split_label("main: li x1, 1"), Some(("main", "li x1, 1")));
        assert_eq!(split_label(":"), None);
        assert_eq!(split_label("a b: nop"), None);
        assert_eq!(split_label("li x1, 1"), None);
        assert_eq!(split_label("li x1, 1 # note: ignored"), None);
    }

    #[test]
    fn values_accept_dot_labels() {
        assert!(is_value(".Lend"));
        assert!(is_value("-12"));
        assert!(!is_value(".."));
        assert!(!is_value("a.b"));
    }

    #[test]
    fn memop_shape() {
        assert_eq!(split_memop("-8(sp)"), Some(("-8", "sp")));
        assert_eq!(split_memop(" 4 ( x0 )"), Some(("4", "x0")));
        assert_eq!(split_memop("(sp)"), None);
        assert_eq!(split_memop("a(sp)"), None);
        assert_eq!(split_memop("4(sp"), None);
    }

    #[test]
    fn operands_split_on_commas() {
        assert_eq!(split_operands(" x1 ,x2,  -3 "), vec!["x1", "x2", "-3"]);
        assert!(split_operands("   ").is_empty());
        assert_eq!(split_operands("x1,,x2"), vec!["x1", "", "x2"]);
    }
}
