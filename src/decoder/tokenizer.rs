//! Report tokenizer and the shared token cursor.

/// Ordered tokens of one report with a forward-only read position
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Split a report into non-empty whitespace-separated tokens
    pub fn new(raw: &'a str) -> Self {
        Self {
            tokens: raw.split_whitespace().collect(),
            position: 0,
        }
    }

    /// Token under the cursor, `None` once every token has been consumed
    pub fn current(&self) -> Option<&'a str> {
        self.tokens.get(self.position).copied()
    }

    /// Token following the current one
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.position + 1).copied()
    }

    /// Consume the current token. Never moves past the end.
    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens not consumed by any decoder
    pub fn remaining(&self) -> &[&'a str] {
        &self.tokens[self.position..]
    }
}
