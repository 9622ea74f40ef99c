//! Pattern compiler: mask pattern string -> immutable token program.

use crate::mask::alphabet::{SENTINEL, TokenKind};
use crate::mask::matcher::{ExtractPipeline, UnmaskMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskItem {
    /// Fixed char that must appear verbatim in the masked output.
    Literal(char),
    /// Editable slot accepting one char of the token's class.
    Token(TokenKind),
}

/// A compiled mask pattern. Immutable once built; fully determines masking,
/// unmasking and the cursor skeletons. Must be rebuilt whenever the source
/// pattern or the fill char changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    items: Vec<MaskItem>,
    marked: Vec<char>,
    filled: String,
    fill: char,
    unmask: UnmaskMatcher,
    extract: ExtractPipeline,
}

impl Program {
    /// Compiles an already name-resolved pattern. `fill` is the single fill
    /// char used for the filled skeleton and for trailing-fill extraction.
    pub fn compile(pattern: &str, fill: char) -> Self {
        let items = tokenize(pattern);

        let marked: Vec<char> = items
            .iter()
            .map(|item| match item {
                MaskItem::Literal(ch) => *ch,
                MaskItem::Token(_) => SENTINEL,
            })
            .collect();
        let filled: String = marked
            .iter()
            .map(|ch| if *ch == SENTINEL { fill } else { *ch })
            .collect();

        let stops = items
            .iter()
            .filter_map(|item| match item {
                MaskItem::Literal(ch) => Some(*ch),
                MaskItem::Token(_) => None,
            })
            .collect();
        let steps = items
            .iter()
            .filter_map(|item| match item {
                MaskItem::Literal(_) => None,
                MaskItem::Token(kind) => Some(kind.class()),
            })
            .collect();

        log::trace!(
            "compiled mask pattern {pattern:?}: {} items, fill {fill:?}",
            items.len()
        );

        Self {
            items,
            marked,
            filled,
            fill,
            unmask: UnmaskMatcher::new(stops),
            extract: ExtractPipeline::new(steps, fill),
        }
    }

    pub fn items(&self) -> &[MaskItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Skeleton with literals verbatim and the sentinel at token positions.
    /// Cursor math only; never shown to the user.
    pub fn marked_skeleton(&self) -> &[char] {
        &self.marked
    }

    /// Skeleton with the fill char substituted for every sentinel; the fully
    /// padded masked value.
    pub fn filled_skeleton(&self) -> &str {
        &self.filled
    }

    pub fn fill_char(&self) -> char {
        self.fill
    }

    pub(crate) fn unmask_matcher(&self) -> &UnmaskMatcher {
        &self.unmask
    }

    pub(crate) fn extract_pipeline(&self) -> &ExtractPipeline {
        &self.extract
    }
}

/// Left-to-right tokenization. A backslash escapes the next char into a
/// literal (a lone trailing backslash is a literal backslash); alphabet
/// symbols become tokens; everything else is a plain literal.
fn tokenize(pattern: &str) -> Vec<MaskItem> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut items = Vec::with_capacity(chars.len());
    let mut idx = 0usize;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '\\' {
            if let Some(next) = chars.get(idx + 1) {
                items.push(MaskItem::Literal(*next));
                idx += 2;
            } else {
                items.push(MaskItem::Literal('\\'));
                idx += 1;
            }
            continue;
        }
        if let Some(kind) = TokenKind::from_symbol(ch) {
            items.push(MaskItem::Token(kind));
            idx += 1;
            continue;
        }
        items.push(MaskItem::Literal(ch));
        idx += 1;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::alphabet::SENTINEL;

    #[test]
    fn phone_pattern_compiles_to_expected_items() {
        let program = Program::compile("(###) ### - ####", '_');
        assert_eq!(program.len(), 16);
        assert_eq!(program.items()[0], MaskItem::Literal('('));
        assert_eq!(program.items()[1], MaskItem::Token(TokenKind::Digit));
        assert_eq!(program.items()[4], MaskItem::Literal(')'));
        assert_eq!(program.items()[10], MaskItem::Literal('-'));
        assert_eq!(program.items()[15], MaskItem::Token(TokenKind::Digit));
    }

    #[test]
    fn skeletons_mark_and_fill_token_positions() {
        let program = Program::compile("##-##", '_');
        assert_eq!(
            program.marked_skeleton(),
            &[SENTINEL, SENTINEL, '-', SENTINEL, SENTINEL]
        );
        assert_eq!(program.filled_skeleton(), "__-__");

        let starred = Program::compile("##-##", '*');
        assert_eq!(starred.filled_skeleton(), "**-**");
    }

    #[test]
    fn backslash_escapes_token_symbols_into_literals() {
        let program = Program::compile(r"\##", '_');
        assert_eq!(
            program.items(),
            &[MaskItem::Literal('#'), MaskItem::Token(TokenKind::Digit)]
        );
    }

    #[test]
    fn trailing_backslash_is_a_literal_backslash() {
        let program = Program::compile(r"##\", '_');
        assert_eq!(program.items()[2], MaskItem::Literal('\\'));
    }

    #[test]
    fn regex_metacharacters_are_plain_literals() {
        let program = Program::compile("(#+#)*", '_');
        assert_eq!(
            program.items(),
            &[
                MaskItem::Literal('('),
                MaskItem::Token(TokenKind::Digit),
                MaskItem::Literal('+'),
                MaskItem::Token(TokenKind::Digit),
                MaskItem::Literal(')'),
                MaskItem::Literal('*'),
            ]
        );
    }

    #[test]
    fn empty_pattern_compiles_to_empty_program() {
        let program = Program::compile("", '_');
        assert!(program.is_empty());
        assert_eq!(program.filled_skeleton(), "");
    }

    #[test]
    fn mixed_token_kinds_map_to_their_classes() {
        let program = Program::compile("Aa-Xx-SN", '_');
        assert_eq!(program.items()[0], MaskItem::Token(TokenKind::UpperLetter));
        assert_eq!(program.items()[1], MaskItem::Token(TokenKind::LowerLetter));
        assert_eq!(
            program.items()[3],
            MaskItem::Token(TokenKind::UpperAlphanumeric)
        );
        assert_eq!(
            program.items()[4],
            MaskItem::Token(TokenKind::LowerAlphanumeric)
        );
        assert_eq!(program.items()[6], MaskItem::Token(TokenKind::Letter));
        assert_eq!(program.items()[7], MaskItem::Token(TokenKind::Alphanumeric));
    }
}
