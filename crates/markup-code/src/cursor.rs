/// A cursor for byte-by-byte scanning of markup input.
///
/// Delimiters are all ASCII, so matching on bytes never splits a multi-byte
/// character: continuation bytes can never equal a delimiter byte.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The markup being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    ///
    /// A pattern longer than the remaining input never matches, which is what
    /// keeps a trailing lone byte literal.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes input up to and including the next `stop` byte.
    ///
    /// Returns the text before `stop` and whether `stop` was found. When it is
    /// not found the cursor ends at EOF and the whole remainder is returned.
    /// `stop` must be ASCII so the returned slice ends on a char boundary.
    pub fn take_until(&mut self, stop: u8) -> (&'a str, bool) {
        let start = self.i.min(self.s.len());
        let rest = &self.s.as_bytes()[start..];
        match rest.iter().position(|&b| b == stop) {
            Some(n) => {
                self.i = start + n + 1;
                (&self.s[start..start + n], true)
            }
            None => {
                self.i = self.s.len();
                (&self.s[start..], false)
            }
        }
    }
}
