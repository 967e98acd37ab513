/// Scanner on a string.
///
/// Provide convenient APIs on character level operation for the lexer.
pub(crate) struct Scanner {
    /// Characters split.
    chars: Vec<char>,

    /// Current position.
    position: usize,
}

impl Scanner {
    pub(crate) fn new(source: &str) -> Scanner {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Check the scanner process reached the end or not.
    pub fn done(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Get character at the current position.
    pub fn curr(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Get the character `offset` positions after the current one, without advancing.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Move the position forward and return the character walked through.
    ///
    /// Return `None` if already finished.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.curr()?;
        self.position += 1;
        Some(ch)
    }

    /// Move the position forward `count` characters, stopping at the end.
    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.chars.len());
    }

    /// Get a string from `start` to `end`, excluding end pos.
    ///
    /// The caller must ensure sizes not out of range.
    pub fn get_range(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
