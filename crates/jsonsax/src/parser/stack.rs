use alloc::vec::Vec;

/// One entry per open scope. The bottom of the stack is always `Root`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Root,
    Object,
    Array,
}

/// Nesting stack that can never be empty: `Root` is pushed on construction
/// and `pop` refuses to remove it.
#[derive(Debug, Clone)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        let mut frames = Vec::with_capacity(16);
        frames.push(Frame::Root);
        Self { frames }
    }

    pub(crate) fn top(&self) -> Frame {
        self.frames.last().copied().unwrap_or(Frame::Root)
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        debug_assert_ne!(frame, Frame::Root);
        self.frames.push(frame);
    }

    /// Removes the innermost open scope. Returns `None` at the root.
    pub(crate) fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Number of open objects and arrays.
    pub(crate) fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub(crate) fn clear(&mut self) {
        self.frames.truncate(1);
    }
}
