#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use crate::sat::number::Number;
use std::ops::{Index, IndexMut};

/// Bookkeeping of one decision level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The literal opening this level; `None` only on level 0.
    pub decision: Option<Literal>,
    pub relevant: bool,
    pub flipped: bool,
    /// Trail length when the level was opened.
    pub trail: usize,
    /// Nearest lower flipped level, 0 if none.
    pub flipped_below: usize,
    /// Nearest lower relevant level that is not flipped, 0 if none.
    pub open_below: usize,
    /// Models counted under the first side of a flipped decision.
    pub count: Number,
}

impl Frame {
    const fn is_open(&self) -> bool {
        self.relevant && !self.flipped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frames(Vec<Frame>);

impl Default for Frames {
    fn default() -> Self {
        Self(vec![Frame::default()])
    }
}

impl Frames {
    #[must_use]
    pub fn level(&self) -> usize {
        self.0.len() - 1
    }

    pub fn push(&mut self, decision: Literal, relevant: bool, trail: usize) {
        let below = self.0.len() - 1;
        let top = &self.0[below];
        let flipped_below = if top.flipped { below } else { top.flipped_below };
        let open_below = if top.is_open() { below } else { top.open_below };
        self.0.push(Frame {
            decision: Some(decision),
            relevant,
            flipped: false,
            trail,
            flipped_below,
            open_below,
            count: Number::zero(),
        });
    }

    /// Opens a level with the negation of an exhausted decision.
    pub fn push_flipped(&mut self, decision: Literal, trail: usize, count: Number) {
        self.push(decision, true, trail);
        let top = self.top_mut();
        top.flipped = true;
        top.count = count;
    }

    /// Pops every level above `level`.
    pub fn backtrack(&mut self, level: usize) {
        self.0.truncate(level + 1);
    }

    #[must_use]
    pub fn top(&self) -> &Frame {
        &self.0[self.level()]
    }

    pub fn top_mut(&mut self) -> &mut Frame {
        let level = self.level();
        &mut self.0[level]
    }

    /// Highest flipped level, 0 if none.
    #[must_use]
    pub fn top_flipped(&self) -> usize {
        let top = self.top();
        if top.flipped { self.level() } else { top.flipped_below }
    }

    /// Highest relevant level whose decision has not been flipped yet.
    #[must_use]
    pub fn top_open(&self) -> Option<usize> {
        let top = self.top();
        let level = if top.is_open() { self.level() } else { top.open_below };
        (level > 0).then_some(level)
    }

    /// Largest `p` such that levels `1..=p` all carry relevant decisions.
    #[must_use]
    pub fn relevant_prefix(&self) -> usize {
        self.0
            .iter()
            .skip(1)
            .position(|f| !f.relevant)
            .unwrap_or(self.level())
    }

    /// Flipped levels strictly above `level`, top first.
    pub fn flipped_above(&self, level: usize) -> impl Iterator<Item = &Frame> {
        let mut cur = self.top_flipped();
        std::iter::from_fn(move || {
            if cur <= level {
                return None;
            }
            let frame = &self.0[cur];
            cur = frame.flipped_below;
            Some(frame)
        })
    }

    /// The current literals of the decisions on levels `1..=level`.
    pub fn decisions(&self, level: usize) -> impl DoubleEndedIterator<Item = Literal> + '_ {
        self.0[1..=level].iter().filter_map(|f| f.decision)
    }
}

impl Index<usize> for Frames {
    type Output = Frame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Frames {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}
