//! Codepoint access over UTF-16 text.
//!
//! Positions are code-unit offsets in `0..=len`. A lead surrogate followed by
//! a trail surrogate reads as one two-unit codepoint; any other surrogate
//! reads as a one-unit codepoint of its own. Nothing here fails on
//! ill-formed input.

use crate::matcher::{decode_pair, is_lead, is_surrogate, is_trail};

/// One codepoint as it appears in the text: a single code unit, or a
/// surrogate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Codepoint {
    units: [u16; 2],
    len: u8,
}

impl Codepoint {
    pub fn single(unit: u16) -> Self {
        Codepoint { units: [unit, 0], len: 1 }
    }

    pub fn pair(high: u16, low: u16) -> Self {
        debug_assert!(is_lead(high) && is_trail(low));
        Codepoint { units: [high, low], len: 2 }
    }

    pub fn from_char(c: char) -> Self {
        let mut units = [0u16; 2];
        let len = c.encode_utf16(&mut units).len() as u8;
        Codepoint { units, len }
    }

    /// Number of code units, 1 or 2.
    #[inline]
    pub fn len_utf16(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn units(&self) -> &[u16] {
        &self.units[..self.len as usize]
    }

    /// The scalar value, or the surrogate's own value when unpaired.
    pub fn value(&self) -> u32 {
        match self.units() {
            [high, low] => decode_pair(*high, *low),
            _ => self.units[0] as u32,
        }
    }

    pub fn is_lone_surrogate(&self) -> bool {
        self.len == 1 && is_surrogate(self.units[0])
    }

    pub fn to_char(&self) -> Option<char> {
        char::from_u32(self.value())
    }
}

/// Read-only codepoint view of caller-owned UTF-16 text.
#[derive(Clone, Copy, Debug)]
pub struct TextCursor<'a> {
    text: &'a [u16],
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a [u16]) -> Self {
        TextCursor { text }
    }

    pub fn text(&self) -> &'a [u16] {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The code unit at `pos`, or `None` past the end.
    #[inline]
    pub fn read(&self, pos: usize) -> Option<u16> {
        self.text.get(pos).copied()
    }

    #[inline]
    fn read_before(&self, pos: usize) -> Option<u16> {
        pos.checked_sub(1).and_then(|p| self.read(p))
    }

    /// The codepoint starting at `pos`.
    ///
    /// Starting on the trail half of a pair yields the lone trail surrogate.
    pub fn next_codepoint(&self, pos: usize) -> Option<Codepoint> {
        let unit = self.read(pos)?;
        if is_lead(unit) {
            if let Some(low) = self.read(pos + 1).filter(|&u| is_trail(u)) {
                return Some(Codepoint::pair(unit, low));
            }
        }
        Some(Codepoint::single(unit))
    }

    /// The codepoint ending at `pos`.
    ///
    /// Ending on the lead half of a pair yields the lone lead surrogate.
    pub fn prev_codepoint(&self, pos: usize) -> Option<Codepoint> {
        let unit = self.read_before(pos)?;
        if is_trail(unit) {
            if let Some(high) = self.read_before(pos - 1).filter(|&u| is_lead(u)) {
                return Some(Codepoint::pair(high, unit));
            }
        }
        Some(Codepoint::single(unit))
    }

    /// Whether `pos` falls between the two halves of a surrogate pair.
    pub fn is_mid_surrogate(&self, pos: usize) -> bool {
        matches!(
            (self.read_before(pos), self.read(pos)),
            (Some(high), Some(low)) if is_lead(high) && is_trail(low)
        )
    }

    /// Iterate `(offset, codepoint)` from the start of the text.
    pub fn codepoints(&self) -> Codepoints<'a> {
        self.codepoints_from(0)
    }

    pub fn codepoints_from(&self, pos: usize) -> Codepoints<'a> {
        Codepoints { cursor: *self, pos }
    }
}

/// Forward iterator over the codepoints of a [`TextCursor`].
#[derive(Clone, Debug)]
pub struct Codepoints<'a> {
    cursor: TextCursor<'a>,
    pos: usize,
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, Codepoint);

    fn next(&mut self) -> Option<Self::Item> {
        let codepoint = self.cursor.next_codepoint(self.pos)?;
        let at = self.pos;
        self.pos += codepoint.len_utf16();
        Some((at, codepoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn show(codepoint: Option<Codepoint>) -> Option<Vec<u16>> {
        codepoint.map(|c| c.units().to_vec())
    }

    fn u(units: &[u16]) -> Option<Vec<u16>> {
        Some(units.to_vec())
    }

    fn check(text: &[u16], next: &[Option<Vec<u16>>], prev: &[Option<Vec<u16>>]) {
        let cursor = TextCursor::new(text);
        for (pos, expected) in next.iter().enumerate() {
            assert_eq!(&show(cursor.next_codepoint(pos)), expected, "next at {pos}");
        }
        for (pos, expected) in prev.iter().enumerate() {
            assert_eq!(&show(cursor.prev_codepoint(pos)), expected, "prev at {pos}");
        }
    }

    const X: u16 = b'X' as u16;
    const Y: u16 = b'Y' as u16;
    const Z: u16 = b'Z' as u16;
    const W: u16 = b'W' as u16;

    #[test]
    fn test_plain_text() {
        check(
            &units("XYZ"),
            &[u(&[X]), u(&[Y]), u(&[Z]), None],
            &[None, u(&[X]), u(&[Y]), u(&[Z])],
        );
    }

    #[test]
    fn test_surrogate_pair() {
        let text = [X, 0xD800, 0xDC00, Y, Z];
        check(
            &text,
            &[u(&[X]), u(&[0xD800, 0xDC00]), u(&[0xDC00]), u(&[Y]), u(&[Z]), None],
            &[None, u(&[X]), u(&[0xD800]), u(&[0xD800, 0xDC00]), u(&[Y]), u(&[Z])],
        );
    }

    #[test]
    fn test_unpaired_leading() {
        let text = [0xD800, W, X, 0xD800, Y, Z, 0xD800];
        check(
            &text,
            &[
                u(&[0xD800]),
                u(&[W]),
                u(&[X]),
                u(&[0xD800]),
                u(&[Y]),
                u(&[Z]),
                u(&[0xD800]),
                None,
            ],
            &[
                None,
                u(&[0xD800]),
                u(&[W]),
                u(&[X]),
                u(&[0xD800]),
                u(&[Y]),
                u(&[Z]),
                u(&[0xD800]),
            ],
        );
    }

    #[test]
    fn test_unpaired_trailing() {
        let text = [0xDC00, W, X, 0xDC00, Y, Z, 0xDC00];
        check(
            &text,
            &[
                u(&[0xDC00]),
                u(&[W]),
                u(&[X]),
                u(&[0xDC00]),
                u(&[Y]),
                u(&[Z]),
                u(&[0xDC00]),
                None,
            ],
            &[
                None,
                u(&[0xDC00]),
                u(&[W]),
                u(&[X]),
                u(&[0xDC00]),
                u(&[Y]),
                u(&[Z]),
                u(&[0xDC00]),
            ],
        );
    }

    #[test]
    fn test_read_and_mid_surrogate() {
        let text = [X, 0xD800, 0xDC00, 0xDC00, 0xD800];
        let cursor = TextCursor::new(&text);
        assert_eq!(cursor.read(0), Some(X));
        assert_eq!(cursor.read(5), None);
        assert!(cursor.is_mid_surrogate(2));
        assert!(!cursor.is_mid_surrogate(1));
        assert!(!cursor.is_mid_surrogate(3));
        assert!(!cursor.is_mid_surrogate(4));
        assert!(!cursor.is_mid_surrogate(5));
        assert!(!cursor.is_mid_surrogate(0));
        assert_eq!(cursor.len(), 5);
        assert!(!cursor.is_empty());
    }

    #[test]
    fn test_codepoints_iterator() {
        let text = [X, 0xD83D, 0xDE00, 0xDC00, 0xD800];
        let found: Vec<(usize, Vec<u16>)> = TextCursor::new(&text)
            .codepoints()
            .map(|(pos, c)| (pos, c.units().to_vec()))
            .collect();
        assert_eq!(
            found,
            vec![
                (0, vec![X]),
                (1, vec![0xD83D, 0xDE00]),
                (3, vec![0xDC00]),
                (4, vec![0xD800]),
            ]
        );
        assert_eq!(TextCursor::new(&[]).codepoints().count(), 0);
        assert_eq!(TextCursor::new(&text).codepoints_from(2).count(), 3);
    }

    #[test]
    fn test_codepoint_values() {
        let smile = Codepoint::from_char('\u{1F600}');
        assert_eq!(smile.len_utf16(), 2);
        assert_eq!(smile.value(), 0x1F600);
        assert_eq!(smile.to_char(), Some('\u{1F600}'));
        assert!(!smile.is_lone_surrogate());

        let lone = Codepoint::single(0xDC00);
        assert_eq!(lone.value(), 0xDC00);
        assert!(lone.is_lone_surrogate());
        assert_eq!(lone.to_char(), None);

        assert_eq!(Codepoint::from_char('a'), Codepoint::single(0x61));
    }
}
