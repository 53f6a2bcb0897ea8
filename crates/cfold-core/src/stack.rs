//! LIFO of opening-token frames
//!
//! Every detector remembers its openers in one of these and pops exactly
//! one frame per matching closer. Closers seen on an empty stack are
//! ignored; frames still open at the end of a scan are discarded.

use crate::types::Frame;

/// Stack of [`Frame`]s owned by a single detector
#[derive(Debug, Clone)]
pub struct FrameStack<F = bool> {
    frames: Vec<Frame<F>>,
}

impl<F> Default for FrameStack<F> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<F: Copy> FrameStack<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame<F>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame<F>> {
        self.frames.pop()
    }

    /// Oldest frame still open
    pub fn bottom(&self) -> Option<Frame<F>> {
        self.frames.first().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
