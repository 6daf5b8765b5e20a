//! Pre-play presentation: a dialogue line, then a numeric countdown
//!
//! The sequence is a flat step list walked by `advance`, one step per
//! scheduler firing, so stages can never overlap.

/// One presentation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Phase dialogue line
    Dialogue,
    /// Countdown number being shown
    Count(u32),
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    steps: Vec<Step>,
    cursor: usize,
}

impl Sequencer {
    /// Dialogue followed by `countdown_steps`, ..., 1
    pub fn new(countdown_steps: u32) -> Self {
        let steps = std::iter::once(Step::Dialogue)
            .chain((1..=countdown_steps).rev().map(Step::Count))
            .collect();
        Self { steps, cursor: 0 }
    }

    /// Step currently on screen, `None` once the sequence is done
    pub fn current(&self) -> Option<Step> {
        self.steps.get(self.cursor).copied()
    }

    /// Move to the next step and return it
    pub fn advance(&mut self) -> Option<Step> {
        if self.cursor < self.steps.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Total steps including the dialogue
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(crate::consts::COUNTDOWN_STEPS)
    }
}
