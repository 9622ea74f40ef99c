//! Value transformer: raw text -> masked text, masked text -> logical value,
//! partial masked value -> padded masked value.

use crate::mask::compiler::{MaskItem, Program};
use crate::text_edit;

/// Walks the program left to right, consuming input one char at a time.
/// Literals are always emitted; the input char is consumed only when it
/// already equals the literal, so separators are never duplicated on edit.
/// A token that fails its class stops the walk (partial masking, no
/// look-ahead or backtracking).
pub fn mask_value(program: &Program, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let input: Vec<char> = value.chars().collect();
    let mut output = String::with_capacity(program.len());
    let mut val_idx = 0usize;

    for item in program.items() {
        let val_char = input.get(val_idx).copied();
        match item {
            MaskItem::Literal(lit) => {
                output.push(*lit);
                if val_char == Some(*lit) {
                    val_idx += 1;
                }
            }
            MaskItem::Token(kind) => match val_char {
                Some(ch) if kind.accepts(ch) => {
                    output.push(kind.transform(ch));
                    val_idx += 1;
                }
                _ => return output,
            },
        }
    }

    output
}

/// Recovers the logical value. The exact unmask matcher strips literals
/// over at most one char more than the program length; the extraction
/// pipeline then runs over its output (or over the full input when junk
/// past the trailing literal run defeats the matcher), dropping garbage,
/// fill chars and any excess past the token count. A pattern with no token
/// positions returns the stripped value unchanged.
pub fn unmask_value(program: &Program, value: &str) -> String {
    let limited: Vec<char> = value.chars().take(program.len() + 1).collect();
    let stripped = match program.unmask_matcher().apply(&limited) {
        Some(exact) => exact,
        None => value.to_string(),
    };

    let chars: Vec<char> = stripped.chars().collect();
    match program.extract_pipeline().apply(&chars) {
        Some(extracted) => extracted,
        None => stripped,
    }
}

/// Pads a partial masked value out to the full filled skeleton. Values at or
/// beyond the skeleton length come back unchanged.
pub fn fill_with_mask(program: &Program, value: &str) -> String {
    let skeleton = program.filled_skeleton();
    let value_len = text_edit::char_count(value);
    if text_edit::char_count(skeleton) <= value_len {
        return value.to_string();
    }

    let mut out = String::with_capacity(skeleton.len());
    out.push_str(value);
    out.push_str(text_edit::suffix(skeleton, value_len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_input_masks_and_unmasks() {
        let program = Program::compile("(###) ### - ####", '_');
        let masked = mask_value(&program, "5551234567");
        assert_eq!(masked, "(555) 123 - 4567");
        assert_eq!(unmask_value(&program, &masked), "5551234567");
    }

    #[test]
    fn date_input_masks_with_separators() {
        let program = Program::compile("####/##/##", '_');
        assert_eq!(mask_value(&program, "20240102"), "2024/01/02");
        assert_eq!(unmask_value(&program, "2024/01/02"), "20240102");
    }

    #[test]
    fn masking_stops_at_first_rejected_char() {
        let program = Program::compile("(###) ### - ####", '_');
        assert_eq!(mask_value(&program, "55x"), "(55");
        assert_eq!(mask_value(&program, ""), "");
    }

    #[test]
    fn literals_before_next_token_are_emitted_past_input_end() {
        let program = Program::compile("(###) ### - ####", '_');
        assert_eq!(mask_value(&program, "555"), "(555) ");
        assert_eq!(mask_value(&program, "5551"), "(555) 1");
    }

    #[test]
    fn existing_separators_are_consumed_not_duplicated() {
        let program = Program::compile("##-##", '_');
        assert_eq!(mask_value(&program, "12-34"), "12-34");
        assert_eq!(mask_value(&program, "1234"), "12-34");
    }

    #[test]
    fn case_transform_tokens_rewrite_output() {
        let program = Program::compile("AA-##", '_');
        assert_eq!(mask_value(&program, "ab12"), "AB-12");

        let lower = Program::compile("aa-##", '_');
        assert_eq!(mask_value(&lower, "AB12"), "ab-12");
    }

    #[test]
    fn unmask_strips_fill_chars_from_fill_mode_values() {
        let program = Program::compile("##-##", '_');
        assert_eq!(unmask_value(&program, "1_-__"), "1");
        assert_eq!(unmask_value(&program, "12-3_"), "123");
        assert_eq!(unmask_value(&program, "__-__"), "");
    }

    #[test]
    fn unmask_falls_back_to_extraction_when_the_matcher_fails() {
        let program = Program::compile("##-##", '_');
        // The doubled literal defeats the exact matcher; the pipeline
        // recovers the digits from the full input.
        assert_eq!(unmask_value(&program, "1--34"), "134");
    }

    #[test]
    fn unmask_of_overlong_input_is_bounded_by_program_length() {
        let program = Program::compile("##-##", '_');
        assert_eq!(unmask_value(&program, "12-34"), "1234");
        // Only program_len + 1 chars feed the exact matcher, so the junk
        // tail never reaches it.
        assert_eq!(unmask_value(&program, "12-34-5"), "1234");
        // Class chars past the token count are dropped by extraction.
        assert_eq!(unmask_value(&program, "12-345"), "1234");
    }

    #[test]
    fn fill_with_mask_pads_to_skeleton_length() {
        let program = Program::compile("##-##", '_');
        assert_eq!(fill_with_mask(&program, "1"), "1_-__");
        assert_eq!(fill_with_mask(&program, ""), "__-__");
        assert_eq!(fill_with_mask(&program, "12-34"), "12-34");
        assert_eq!(fill_with_mask(&program, "12-345"), "12-345");
    }

    #[test]
    fn mask_unmask_round_trip_for_valid_inputs() {
        let cases = [
            ("(###) ### - ####", "5551234567"),
            ("####/##/##", "20240102"),
            ("##:##", "0930"),
            ("SS-##", "ab12"),
        ];
        for (pattern, input) in cases {
            let program = Program::compile(pattern, '_');
            let masked = mask_value(&program, input);
            assert_eq!(
                unmask_value(&program, &masked),
                input,
                "round trip failed for {pattern}"
            );
        }
    }

    #[test]
    fn masking_is_idempotent_over_unmask() {
        let program = Program::compile("(###) ### - ####", '_');
        for input in ["5551234567", "555", "", "5551"] {
            let masked = mask_value(&program, input);
            let again = mask_value(&program, &unmask_value(&program, &masked));
            assert_eq!(again, masked, "idempotence failed for {input:?}");
        }
    }
}
