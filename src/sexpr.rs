//! S-Expression representation of the WebAssembly text surface.
//!
//! A `.wast` file is a forest of S-expressions. The external reader turns
//! source text into this tree; every consumer after that only reads it.
//! There are exactly two shapes:
//!
//! - **List**: a parenthesised, ordered sequence of children. `()` is a valid
//!   empty list.
//! - **Atom**: a single token's decoded text, plus whether it was a quoted
//!   string literal and whether decoding its bytes as text was lossy.
//!
//! # Example
//!
//! ```
//! use wast_harness::sexpr::SExpr;
//!
//! let module = SExpr::list(vec![SExpr::symbol("module"), SExpr::list(vec![SExpr::symbol("func")])]);
//! assert!(module.is_list_headed_by("module"));
//! assert_eq!(module.to_string(), "(module (func))");
//! ```

use std::fmt;

// ============================================================================
// S-Expression Types
// ============================================================================

/// An S-expression: either an atom (single token) or a parenthesised list.
///
/// Equality is structural: two nodes are equal iff they are the same variant
/// and their children (or contents and flags) are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SExpr {
    /// A parenthesised list of S-expressions. Order is significant.
    List(Vec<SExpr>),

    /// A single token: keyword, number, identifier, or string literal.
    Atom(Atom),
}

/// The content of a single token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Atom {
    /// Decoded text of the token. String literals have their quotes removed
    /// and escapes resolved.
    pub contents: String,
    /// True if the token was a quoted string literal rather than a bare symbol.
    pub quoted: bool,
    /// True if the original bytes were not faithfully representable as UTF-8
    /// and `contents` was populated one byte per character instead.
    pub has_non_utf8_byte_seqs: bool,
}

impl Atom {
    pub fn new(contents: impl Into<String>, quoted: bool, has_non_utf8_byte_seqs: bool) -> Self {
        Self {
            contents: contents.into(),
            quoted,
            has_non_utf8_byte_seqs,
        }
    }

    /// Recovers the original bytes of an atom whose text was decoded one
    /// byte per character.
    ///
    /// Each `char` is narrowed to its low 8 bits, so the result always has one
    /// byte per character of `contents`. This is only meaningful when
    /// `has_non_utf8_byte_seqs` is set: the reader must have mapped each source
    /// byte to the `char` with the same value. For text produced by genuine
    /// UTF-8 decoding the result is not the original byte sequence.
    ///
    /// ```
    /// use wast_harness::sexpr::Atom;
    ///
    /// let atom = Atom::new("\u{0}asm\u{ff}", true, true);
    /// assert_eq!(atom.raw_content_bytes(), vec![0x00, b'a', b's', b'm', 0xff]);
    /// ```
    pub fn raw_content_bytes(&self) -> Vec<u8> {
        self.contents.chars().map(|c| c as u32 as u8).collect()
    }
}

impl SExpr {
    /// Builds a list from zero or more children.
    pub fn list(items: impl IntoIterator<Item = SExpr>) -> Self {
        SExpr::List(items.into_iter().collect())
    }

    /// Builds an unquoted atom (keyword, number or `$id`).
    pub fn symbol(contents: impl Into<String>) -> Self {
        SExpr::Atom(Atom::new(contents, false, false))
    }

    /// Builds a quoted string atom whose contents decoded cleanly.
    pub fn string(contents: impl Into<String>) -> Self {
        SExpr::Atom(Atom::new(contents, true, false))
    }

    /// Returns the atom if this is an atom.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            SExpr::Atom(atom) => Some(atom),
            SExpr::List(_) => None,
        }
    }

    /// Returns the children if this is a list.
    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::Atom(_) => None,
            SExpr::List(items) => Some(items),
        }
    }

    /// Returns the symbol text if this is an unquoted atom.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            SExpr::Atom(Atom {
                contents,
                quoted: false,
                ..
            }) => Some(contents),
            _ => None,
        }
    }

    /// Returns the symbol at the head of this list, if any.
    ///
    /// This is the most common pattern in WAT: `(keyword ...)`.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.first())
            .and_then(SExpr::as_symbol)
    }

    /// Returns true if this is a list starting with the given keyword.
    pub fn is_list_headed_by(&self, keyword: &str) -> bool {
        self.head_symbol() == Some(keyword)
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.quoted {
            return write!(f, "{}", self.contents);
        }
        write!(f, "\"")?;
        for c in self.contents.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(f, "\\{:02x}", c as u32)?,
                // Byte-per-char atoms render their high bytes as escapes too.
                c if self.has_non_utf8_byte_seqs && (c as u32) > 0x7f => {
                    write!(f, "\\{:02x}", c as u32 as u8)?
                }
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "\"")
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(atom) => write!(f, "{}", atom),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    #[test]
    fn empty_list_is_valid() {
        let sexpr = SExpr::list(vec![]);
        assert_eq!(sexpr.as_list().unwrap().len(), 0);
        assert_eq!(sexpr.head_symbol(), None);
        assert_eq!(sexpr.to_string(), "()");
    }

    #[test]
    fn nested_list_accessors() {
        let sexpr = SExpr::list(vec![
            SExpr::symbol("module"),
            SExpr::list(vec![SExpr::symbol("func"), SExpr::symbol("$add")]),
            SExpr::list(vec![SExpr::symbol("memory"), SExpr::symbol("1")]),
        ]);
        let items = sexpr.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[1].is_list_headed_by("func"));
        assert!(items[2].is_list_headed_by("memory"));
        assert!(!sexpr.is_list_headed_by("func"));
    }

    #[test]
    fn quoted_head_is_not_a_keyword() {
        let sexpr = SExpr::list(vec![SExpr::string("module")]);
        assert_eq!(sexpr.head_symbol(), None);
        assert_eq!(sexpr.as_list().unwrap()[0].as_atom().unwrap().contents, "module");
    }

    // ------------------------------------------------------------------------
    // Equality
    // ------------------------------------------------------------------------

    #[test]
    fn equality_is_structural() {
        let a = SExpr::list(vec![SExpr::symbol("a"), SExpr::list(vec![SExpr::string("b")])]);
        let b = SExpr::list(vec![SExpr::symbol("a"), SExpr::list(vec![SExpr::string("b")])]);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_respects_flags_and_order() {
        assert_ne!(SExpr::symbol("x"), SExpr::string("x"));
        assert_ne!(
            SExpr::Atom(Atom::new("x", true, false)),
            SExpr::Atom(Atom::new("x", true, true))
        );
        assert_ne!(
            SExpr::list(vec![SExpr::symbol("a"), SExpr::symbol("b")]),
            SExpr::list(vec![SExpr::symbol("b"), SExpr::symbol("a")])
        );
        assert_ne!(SExpr::list(vec![]), SExpr::symbol(""));
    }

    // ------------------------------------------------------------------------
    // Raw bytes
    // ------------------------------------------------------------------------

    #[test]
    fn raw_bytes_one_per_char() {
        let contents: String = (0u32..=255).map(|b| std::char::from_u32(b).unwrap()).collect();
        let atom = Atom::new(contents.clone(), true, true);
        let bytes = atom.raw_content_bytes();
        assert_eq!(bytes.len(), contents.chars().count());
        for (i, b) in bytes.iter().enumerate() {
            assert_eq!(*b as usize, i);
        }
    }

    #[test]
    fn raw_bytes_take_low_eight_bits() {
        let atom = Atom::new("\u{100}\u{1ff}", true, true);
        assert_eq!(atom.raw_content_bytes(), vec![0x00, 0xff]);
    }

    // ------------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------------

    #[test]
    fn display_escapes_strings() {
        let sexpr = SExpr::list(vec![
            SExpr::symbol("module"),
            SExpr::symbol("binary"),
            SExpr::Atom(Atom::new("\u{0}asm\"", true, true)),
        ]);
        assert_eq!(sexpr.to_string(), r#"(module binary "\00asm\"")"#);
    }

    #[test]
    fn display_high_bytes_as_escapes() {
        let atom = Atom::new("\u{ff}", true, true);
        assert_eq!(atom.to_string(), r#""\ff""#);

        let utf8 = Atom::new("\u{ff}", true, false);
        assert_eq!(utf8.to_string(), "\"\u{ff}\"");
    }
}
