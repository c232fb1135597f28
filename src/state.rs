/// Cursor into the text being parsed. The target string is fixed for the
/// lifetime of one run; every transition copies the state and moves `index`
/// forward, so a failed branch can always retry from the state it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState<'a> {
    pub target: &'a str,
    pub index: usize,
}

impl<'a> ParseState<'a> {
    pub fn new(target: &'a str) -> Self {
        Self { target, index: 0 }
    }

    /// The unconsumed tail of the target.
    pub fn remaining(&self) -> &'a str {
        &self.target[self.index..]
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.target.len()
    }

    pub fn advance(self, by: usize) -> Self {
        Self {
            target: self.target,
            index: self.index + by,
        }
    }
}
