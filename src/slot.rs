//! Mask pattern compilation.
//!
//! A mask pattern is a plain string scanned left to right into an ordered
//! list of [`Slot`]s. Four reserved symbols denote match-classes:
//!
//! | Symbol | Slot                | Accepts                  |
//! |--------|---------------------|--------------------------|
//! | `9`    | [`Slot::Digit`]     | Unicode decimal digits   |
//! | `A`    | [`Slot::Letter`]    | Unicode letters          |
//! | `*`    | [`Slot::AlphaNumeric`] | digits or letters     |
//! | `?`    | [`Slot::AnyChar`]   | any character            |
//!
//! Every other character compiles to [`Slot::Literal`]. A backslash marks
//! the next character as a literal even when it is a reserved symbol; the
//! backslash itself emits no slot, and a trailing backslash is dropped.
//! Compilation is total: every input string produces a slot list.

const DIGIT_MASK: char = '9';
const ALPHA_MASK: char = 'A';
const ALPHANUMERIC_MASK: char = '*';
const ANY_CHAR_MASK: char = '?';
const ESCAPE_CHAR: char = '\\';

/// One element of a compiled mask. Slot order is fixed once compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Unicode decimal digit (`9`)
    Digit,
    /// Unicode letter (`A`)
    Letter,
    /// Digit or letter (`*`)
    AlphaNumeric,
    /// Any character (`?`)
    AnyChar,
    /// Fixed character required by the mask at this position
    Literal(char),
}

impl Slot {
    /// Check whether `ch` can fill this slot.
    ///
    /// Literal slots never consume input, so they match nothing.
    pub fn matches(&self, ch: char) -> bool {
        match self {
            Slot::Digit => ch.is_numeric(),
            Slot::Letter => ch.is_alphabetic(),
            Slot::AlphaNumeric => ch.is_alphanumeric(),
            Slot::AnyChar => true,
            Slot::Literal(_) => false,
        }
    }

    /// Check if this is a fixed-character slot
    pub fn is_literal(&self) -> bool {
        matches!(self, Slot::Literal(_))
    }
}

/// Compile a mask pattern into an ordered slot list.
///
/// An empty pattern compiles to an empty slot list, which leaves the
/// reconciliation engine inert.
pub fn compile(pattern: &str) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(pattern.len());
    let mut escaped = false;

    for ch in pattern.chars() {
        if escaped {
            slots.push(Slot::Literal(ch));
            escaped = false;
            continue;
        }
        match ch {
            ESCAPE_CHAR => escaped = true,
            DIGIT_MASK => slots.push(Slot::Digit),
            ALPHA_MASK => slots.push(Slot::Letter),
            ALPHANUMERIC_MASK => slots.push(Slot::AlphaNumeric),
            ANY_CHAR_MASK => slots.push(Slot::AnyChar),
            other => slots.push(Slot::Literal(other)),
        }
    }

    slots
}
