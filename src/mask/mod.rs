//! The masking engine.
//!
//! A [`MaskedField`] owns the per-field masking state: the compiled pattern
//! program, the current masked value, the last reported logical value and
//! the shift-selection anchor. The field collaborator feeds it raw text and
//! key events; it answers with plain result values ([`EditOutcome`],
//! [`NavOutcome`]) and never touches the field itself.

pub mod alphabet;
pub mod compiler;
pub mod cursor;
mod matcher;
pub mod options;
pub mod transform;

use crate::event::{KeyCode, KeyEvent, KeyModifiers, Selection, SelectionDirection};
use crate::text_edit;
use compiler::Program;
use options::MaskOptions;

/// Result of applying a text edit or a configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Text the collaborator should put into the field.
    pub masked: String,
    /// Value the collaborator reports externally (masked or unmasked form,
    /// per configuration).
    pub logical: String,
    /// False when the logical value did not move; the collaborator should
    /// skip re-emitting. A first-ever empty value is not a change.
    pub changed: bool,
    /// Deferred caret placement; `None` when masking is disabled. Redeem
    /// via [`MaskedField::redeem_caret`] after the field has re-rendered.
    pub caret: Option<CaretTicket>,
}

/// A caret placement that must be applied only after the field re-renders
/// the new text. Stale tickets (another edit happened first) and unfocused
/// fields redeem to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretTicket {
    offset: usize,
    generation: u64,
}

impl CaretTicket {
    pub fn offset(self) -> usize {
        self.offset
    }
}

/// Result of a navigation key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    /// True when the engine owns the key; the collaborator must suppress
    /// the default behavior.
    pub handled: bool,
    /// Selection to apply immediately, when present. Backspace/delete set
    /// this with `handled == false`: the default edit still runs, against
    /// the widened selection.
    pub selection: Option<Selection>,
}

impl NavOutcome {
    fn pass() -> Self {
        Self {
            handled: false,
            selection: None,
        }
    }

    fn handled(selection: Selection) -> Self {
        Self {
            handled: true,
            selection: Some(selection),
        }
    }

    fn adjusted(selection: Selection) -> Self {
        Self {
            handled: false,
            selection: Some(selection),
        }
    }
}

pub struct MaskedField {
    options: MaskOptions,
    program: Option<Program>,
    value: String,
    last_reported: Option<String>,
    selection_anchor: Option<usize>,
    generation: u64,
    needs_recompile: bool,
}

impl MaskedField {
    pub fn new(options: MaskOptions) -> Self {
        let mut field = Self {
            options,
            program: None,
            value: String::new(),
            last_reported: None,
            selection_anchor: None,
            generation: 0,
            needs_recompile: false,
        };
        field.recompile();
        field
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.program.is_some()
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Current masked value, as last produced by an edit.
    pub fn masked_value(&self) -> &str {
        &self.value
    }

    pub fn mask(&self, value: &str) -> String {
        match &self.program {
            Some(program) => transform::mask_value(program, value),
            None => value.to_string(),
        }
    }

    pub fn unmask(&self, value: &str) -> String {
        match &self.program {
            Some(program) => transform::unmask_value(program, value),
            None => value.to_string(),
        }
    }

    /// Swaps in a new configuration and re-derives the current value under
    /// it. The old program unmasks the value before the new one remasks it,
    /// so a fill-char change cannot leak old fill chars into the content.
    pub fn configure(&mut self, options: MaskOptions) -> EditOutcome {
        let current = self.value.clone();
        let caret_end = text_edit::char_count(&current);
        self.options = options;
        self.needs_recompile = true;
        self.apply_edit(&current, caret_end)
    }

    /// Programmatic value set; the caret lands after the remasked content.
    pub fn set_value(&mut self, raw: &str) -> EditOutcome {
        self.apply_edit(raw, text_edit::char_count(raw))
    }

    /// Processes the field's new raw text. `caret_end` is the selection end
    /// the field reported with the edit.
    pub fn apply_edit(&mut self, raw: &str, caret_end: usize) -> EditOutcome {
        self.generation = self.generation.wrapping_add(1);

        // Unmask under the previous program before any pending recompile:
        // the old fill char must drive extraction of the old value.
        let unmasked = match &self.program {
            Some(program) => transform::unmask_value(program, raw),
            None => raw.to_string(),
        };
        if self.needs_recompile {
            self.recompile();
        }

        let (masked, caret_offset, logical) = {
            let Some(program) = self.program.as_ref() else {
                // Masking just got disabled: keep the content, not the mask.
                return self.pass_through(&unmasked);
            };
            let pre_masked = transform::mask_value(program, &unmasked);
            let masked = if self.options.fill_mask.is_on() {
                transform::fill_with_mask(program, &pre_masked)
            } else {
                pre_masked
            };

            // A value that collapsed to the bare skeleton means the field is
            // empty; park the caret at the start instead of the text end.
            let caret_offset = if masked == program.filled_skeleton() {
                0
            } else {
                cursor::caret_after_edit(
                    program.marked_skeleton(),
                    text_edit::char_count(&masked),
                    caret_end,
                )
            };

            let logical = if self.options.unmasked_value {
                transform::unmask_value(program, &masked)
            } else {
                masked.clone()
            };
            (masked, caret_offset, logical)
        };

        self.value = masked.clone();
        let changed = self.report(&logical);
        log::trace!(
            "mask edit: raw {raw:?} -> masked {masked:?}, caret {caret_offset}, changed {changed}"
        );

        EditOutcome {
            masked,
            logical,
            changed,
            caret: Some(CaretTicket {
                offset: caret_offset,
                generation: self.generation,
            }),
        }
    }

    /// Deferred caret application. Returns the offset to set, or `None`
    /// when the ticket went stale or the field lost focus in the meantime.
    pub fn redeem_caret(&self, ticket: CaretTicket, focused: bool) -> Option<usize> {
        (focused && ticket.generation == self.generation).then_some(ticket.offset)
    }

    /// Navigation state machine for arrow/backspace/delete keys. `text` is
    /// the field's current text (it may be longer than the mask if the
    /// value overflows it).
    pub fn on_navigation_key(
        &mut self,
        key: KeyEvent,
        text: &str,
        selection: Selection,
    ) -> NavOutcome {
        if self.program.is_none() {
            return NavOutcome::pass();
        }
        if key.is_composing
            || key.modifiers.contains(KeyModifiers::ALT)
            || key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return NavOutcome::pass();
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        if !shift {
            self.selection_anchor = None;
        }

        let len = text_edit::char_count(text);
        let (start, end) = (selection.start, selection.end);

        match key.code {
            KeyCode::Left | KeyCode::Right => {
                if shift && self.selection_anchor.is_none() {
                    self.selection_anchor = Some(match selection.direction {
                        SelectionDirection::Forward => start,
                        SelectionDirection::Backward => end,
                    });
                }
                let from = if self.selection_anchor == Some(start) {
                    end
                } else {
                    start
                };

                let Some(program) = self.program.as_ref() else {
                    return NavOutcome::pass();
                };
                let marked = program.marked_skeleton();
                let (cursor, direction) = match key.code {
                    KeyCode::Right => (
                        cursor::move_right(marked, len, from),
                        SelectionDirection::Forward,
                    ),
                    _ => (
                        cursor::move_left(marked, len, from),
                        SelectionDirection::Backward,
                    ),
                };

                if shift && let Some(anchor) = self.selection_anchor {
                    return NavOutcome::handled(Selection::range(
                        anchor.min(cursor),
                        anchor.max(cursor),
                        SelectionDirection::Forward,
                    ));
                }
                NavOutcome::handled(Selection::range(cursor, cursor, direction))
            }
            KeyCode::Backspace if selection.is_collapsed() => {
                let Some(program) = self.program.as_ref() else {
                    return NavOutcome::pass();
                };
                let cursor = cursor::move_left(program.marked_skeleton(), len, start);
                NavOutcome::adjusted(Selection::range(
                    cursor,
                    end,
                    SelectionDirection::Backward,
                ))
            }
            KeyCode::Delete if selection.is_collapsed() => {
                let Some(program) = self.program.as_ref() else {
                    return NavOutcome::pass();
                };
                let cursor = cursor::right_reverse(program.marked_skeleton(), len, end);
                NavOutcome::adjusted(Selection::range(
                    start,
                    cursor,
                    SelectionDirection::Forward,
                ))
            }
            _ => NavOutcome::pass(),
        }
    }

    fn recompile(&mut self) {
        self.needs_recompile = false;
        if !self.options.masking_enabled() {
            self.program = None;
            return;
        }
        let pattern = self.options.resolve_pattern().to_string();
        let fill = self.options.fill_mask.fill_char();
        log::debug!("recompiling mask {:?} -> pattern {pattern:?}", self.options.mask);
        self.program = Some(Program::compile(&pattern, fill));
    }

    fn pass_through(&mut self, raw: &str) -> EditOutcome {
        self.value = raw.to_string();
        let logical = raw.to_string();
        let changed = self.report(&logical);
        EditOutcome {
            masked: raw.to_string(),
            logical,
            changed,
            caret: None,
        }
    }

    fn report(&mut self, logical: &str) -> bool {
        let changed = match &self.last_reported {
            // A field cleared before ever holding a value is not a change.
            None => !logical.is_empty(),
            Some(prev) => prev != logical,
        };
        if changed {
            self.last_reported = Some(logical.to_string());
        }
        changed
    }
}
