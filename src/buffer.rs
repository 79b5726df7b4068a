//! The annotated buffer: surface text where every character carries a
//! provenance tag.
//!
//! Tags distinguish what the user actually typed from mask scaffolding
//! (placeholders and literals). The buffer is rebuilt whole on every
//! reconciliation pass; tags are recomputed, never patched in place, so no
//! tag can outlive the pass that produced it.

/// Provenance of one buffer character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharTag {
    /// Typed or pasted by the user and matched a mask slot
    UserInput,
    /// Synthesized because no user character was available for a slot
    Placeholder,
    /// Fixed character required by the mask
    Literal,
}

/// One character of the annotated buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedChar {
    pub ch: char,
    pub tag: CharTag,
}

/// The formatted text currently held by the input surface, with a tag for
/// every character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedBuffer {
    chars: Vec<MaskedChar>,
}

impl MaskedBuffer {
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
        }
    }

    /// Tag every character of `text` as user input. Used when no annotation
    /// history exists for the text (initial content, empty mask).
    pub fn untagged(text: &str) -> Self {
        Self {
            chars: text
                .chars()
                .map(|ch| MaskedChar {
                    ch,
                    tag: CharTag::UserInput,
                })
                .collect(),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[MaskedChar] {
        &self.chars
    }

    pub fn push(&mut self, ch: char, tag: CharTag) {
        self.chars.push(MaskedChar { ch, tag });
    }

    /// Full rendered text, scaffolding included.
    pub fn raw_text(&self) -> String {
        self.chars.iter().map(|mc| mc.ch).collect()
    }

    /// The semantic value: user-input characters only, in order.
    pub fn unmasked_text(&self) -> String {
        self.chars
            .iter()
            .filter(|mc| mc.tag == CharTag::UserInput)
            .map(|mc| mc.ch)
            .collect()
    }

    /// Placeholders stripped, literals retained.
    pub fn text_without_placeholders(&self) -> String {
        self.chars
            .iter()
            .filter(|mc| mc.tag != CharTag::Placeholder)
            .map(|mc| mc.ch)
            .collect()
    }

    /// Number of user-input characters strictly before char `offset`.
    ///
    /// This is the anchor used to remap a selection across a rebuild.
    pub fn candidates_before(&self, offset: usize) -> usize {
        self.chars
            .iter()
            .take(offset)
            .filter(|mc| mc.tag == CharTag::UserInput)
            .count()
    }

    /// Re-derive annotations after a host edit replaced `removed` chars at
    /// `start` with `inserted` new ones. Characters outside the edit region
    /// keep their tags; inserted characters are tagged as user input.
    ///
    /// Falls back to tagging everything as user input when the reported
    /// region does not line up with the old and new lengths.
    pub fn splice(&self, new_text: &str, start: usize, removed: usize, inserted: usize) -> Self {
        let new_chars: Vec<char> = new_text.chars().collect();
        let old_len = self.chars.len();

        let aligned = start + removed <= old_len
            && start + inserted <= new_chars.len()
            && old_len - removed + inserted == new_chars.len();
        if !aligned {
            return Self::untagged(new_text);
        }

        let mut chars = Vec::with_capacity(new_chars.len());
        for (i, &ch) in new_chars.iter().enumerate() {
            let tag = if i < start {
                self.chars[i].tag
            } else if i < start + inserted {
                CharTag::UserInput
            } else {
                self.chars[i - inserted + removed].tag
            };
            chars.push(MaskedChar { ch, tag });
        }
        Self { chars }
    }
}
