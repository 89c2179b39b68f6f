//! Release section segmentation
//!
//! Level-1 headings are document titles. Every heading of level 2 or deeper
//! opens a release section that runs until the next such heading.

use crate::token::Token;

/// Where the segmenter is relative to release headings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmenterState {
    /// Collecting preamble that belongs to no release
    BeforeFirstRelease,
    /// Collecting the body of the current release
    InRelease,
}

/// Single-pass splitter of a top-level token sequence into release sections
#[derive(Debug)]
pub struct Segmenter {
    state: SegmenterState,
    current: Vec<Token>,
    sections: Vec<Vec<Token>>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self {
            state: SegmenterState::BeforeFirstRelease,
            current: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn state(&self) -> SegmenterState {
        self.state
    }

    /// Feed the next top-level token
    pub fn push(&mut self, token: Token) {
        match token.heading_level() {
            Some(1) => {
                // A title drops whatever was being collected, release or not,
                // and what follows it is preamble until the next release heading
                self.current.clear();
                self.state = SegmenterState::BeforeFirstRelease;
            }
            Some(_) => {
                let previous = std::mem::replace(&mut self.current, vec![token]);
                if self.state == SegmenterState::InRelease && !previous.is_empty() {
                    self.sections.push(previous);
                }
                self.state = SegmenterState::InRelease;
            }
            None => self.current.push(token),
        }
    }

    /// Flush the last release and return all sections in document order
    pub fn finish(mut self) -> Vec<Vec<Token>> {
        if self.state == SegmenterState::InRelease && !self.current.is_empty() {
            self.sections.push(self.current);
        }
        self.sections
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split tokens into release sections, each starting with its heading
pub fn segment(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut segmenter = Segmenter::new();
    for token in tokens {
        segmenter.push(token);
    }
    segmenter.finish()
}
