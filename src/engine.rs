//! The reconciliation pass: rebuilds the annotated buffer from the candidate
//! input stream and the compiled slots.
//!
//! The candidate stream is the text with mask scaffolding already stripped:
//! only characters the user actually typed, plus any newly inserted raw
//! characters. The pass walks the slot list once, consuming each candidate
//! at most once, so a pass is O(slots + candidates).

use crate::buffer::{CharTag, MaskedBuffer};
use crate::selection::Selection;
use crate::slot::Slot;

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The rebuilt buffer; its length always equals the slot count.
    pub buffer: MaskedBuffer,
    /// Candidate characters consumed, whether matched or discarded.
    pub consumed: usize,
}

/// Rebuild the buffer by matching candidate characters against the slots.
///
/// Literal slots emit their fixed character without consuming input.
/// Match-class slots consume candidates, discarding any that fail the class
/// test, until one matches or the stream runs dry; a dry stream emits the
/// placeholder character. Candidates left over after the last slot are
/// discarded, so the buffer never grows past the slot count.
pub fn reconcile(input: &str, slots: &[Slot], placeholder: char) -> Reconciled {
    let candidates: Vec<char> = input.chars().collect();
    let mut buffer = MaskedBuffer::with_capacity(slots.len());
    let mut j = 0;

    for slot in slots {
        if let Slot::Literal(ch) = slot {
            buffer.push(*ch, CharTag::Literal);
            continue;
        }

        // Discard mismatches; each candidate is examined exactly once.
        while j < candidates.len() && !slot.matches(candidates[j]) {
            j += 1;
        }

        if j < candidates.len() {
            buffer.push(candidates[j], CharTag::UserInput);
            j += 1;
        } else {
            buffer.push(placeholder, CharTag::Placeholder);
        }
    }

    Reconciled {
        buffer,
        consumed: j,
    }
}

/// Map a selection expressed as candidate-stream anchors back into offsets
/// of the rebuilt buffer.
///
/// An anchor counts the candidate characters that preceded the selection
/// offset before the rebuild. Each anchor resolves to the position just
/// after its corresponding user-input character, then advances past any
/// literals that follow so the caret lands on the next fillable slot. An
/// anchor with no surviving character falls back to the end of the buffer.
pub fn remap_selection(buffer: &MaskedBuffer, anchor_start: usize, anchor_end: usize) -> Selection {
    Selection::new(
        resolve_anchor(buffer, anchor_start),
        resolve_anchor(buffer, anchor_end),
    )
}

fn resolve_anchor(buffer: &MaskedBuffer, anchor: usize) -> usize {
    let chars = buffer.chars();
    let mut pos = 0;

    if anchor > 0 {
        let mut seen = 0;
        let mut resolved = false;
        for (i, mc) in chars.iter().enumerate() {
            if mc.tag == CharTag::UserInput {
                seen += 1;
                if seen == anchor {
                    pos = i + 1;
                    resolved = true;
                    break;
                }
            }
        }
        if !resolved {
            return chars.len();
        }
    }

    while pos < chars.len() && chars[pos].tag == CharTag::Literal {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::compile;

    #[test]
    fn test_literal_slots_do_not_consume() {
        let slots = compile("(9)");
        let result = reconcile("5", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "(5)");
        assert_eq!(result.consumed, 1);
    }

    #[test]
    fn test_placeholder_fill_on_exhausted_stream() {
        let slots = compile("999");
        let result = reconcile("4", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "4__");
        assert_eq!(result.buffer.unmasked_text(), "4");
    }

    #[test]
    fn test_mismatches_are_discarded_not_reexamined() {
        let slots = compile("99");
        // 'a' and 'b' are skipped once each; '1' and '2' land
        let result = reconcile("a1b2", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "12");
        assert_eq!(result.consumed, 4);
    }

    #[test]
    fn test_overflow_is_trimmed() {
        let slots = compile("99");
        let result = reconcile("12345", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "12");
        assert_eq!(result.buffer.len(), slots.len());
        assert_eq!(result.consumed, 2);
    }

    #[test]
    fn test_empty_slots_produce_empty_buffer() {
        let result = reconcile("anything", &[], '_');
        assert!(result.buffer.is_empty());
        assert_eq!(result.consumed, 0);
    }

    #[test]
    fn test_remap_caret_skips_leading_literals() {
        let slots = compile("(999");
        let result = reconcile("", &slots, '_');
        let sel = remap_selection(&result.buffer, 0, 0);
        // Caret starts after the "(" so the first keystroke fills a slot
        assert_eq!(sel, Selection::caret(1));
    }

    #[test]
    fn test_remap_advances_past_trailing_literal() {
        let slots = compile("999-9");
        let result = reconcile("123", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "123-_");
        let sel = remap_selection(&result.buffer, 3, 3);
        // After "123" the caret skips the "-" onto the open slot
        assert_eq!(sel, Selection::caret(4));
    }

    #[test]
    fn test_remap_unresolvable_anchor_falls_back_to_end() {
        let slots = compile("99");
        let result = reconcile("xy", &slots, '_');
        assert_eq!(result.buffer.raw_text(), "__");
        // Both candidates were discarded, so anchor 2 has no counterpart
        let sel = remap_selection(&result.buffer, 2, 2);
        assert_eq!(sel, Selection::caret(2));
    }

    #[test]
    fn test_remap_range_selection() {
        let slots = compile("9999");
        let result = reconcile("1234", &slots, '_');
        let sel = remap_selection(&result.buffer, 1, 3);
        assert_eq!(sel, Selection::new(1, 3));
    }
}
