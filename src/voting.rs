use std::collections::VecDeque;
use tracing::debug;

/// Coerces low-confidence classifications into a neutral class so that noisy
/// frames still count toward the vote instead of being dropped.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceGate {
    threshold: f32,
    fallback_label: usize,
}

impl ConfidenceGate {
    pub fn new(threshold: f32, fallback_label: usize) -> Self {
        Self {
            threshold,
            fallback_label,
        }
    }

    /// The threshold is exclusive: a result exactly at the threshold keeps
    /// its label.
    pub fn effective_label(&self, label_id: usize, confidence: f32) -> usize {
        if confidence < self.threshold {
            self.fallback_label
        } else {
            label_id
        }
    }
}

/// Bounded history of the most recent effective label ids. A sort action
/// fires only when the whole window agrees on one label, which debounces
/// per-frame prediction noise at the cost of K frames of latency.
#[derive(Debug, Clone)]
pub struct VoteBuffer {
    window: usize,
    votes: VecDeque<usize>,
}

impl VoteBuffer {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            votes: VecDeque::with_capacity(window),
        }
    }

    /// Append one vote, evicting the oldest entry once the window is full.
    pub fn record(&mut self, label_id: usize) {
        self.votes.push_back(label_id);

        while self.votes.len() > self.window {
            self.votes.pop_front();
        }
    }

    /// True iff the window is full and every entry holds the same label.
    pub fn is_unanimous(&self) -> bool {
        match self.votes.front() {
            Some(&first) if self.votes.len() == self.window => {
                self.votes.iter().all(|&id| id == first)
            }
            _ => false,
        }
    }

    /// The winning label when the window is unanimous.
    pub fn unanimous_label(&self) -> Option<usize> {
        if self.is_unanimous() {
            self.votes.front().copied()
        } else {
            None
        }
    }

    /// Clear the whole window. Called after a unanimous decision has been
    /// consumed so the next trigger requires K fresh agreeing frames.
    pub fn reset(&mut self) {
        debug!("Resetting vote buffer ({} entries)", self.votes.len());
        self.votes.clear();
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
