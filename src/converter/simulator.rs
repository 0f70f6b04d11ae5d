//! Step simulation: quantizes notes onto the time grid and spreads
//! simultaneous notes over the channels

use super::channel::Channel;
use super::note::Note;
use super::options::{ConvertOptions, OverflowPolicy};
use super::rest::compressed_len;
use crate::error::Result;
use tracing::{debug, trace};

/// Compressed length of every channel that holds at least one note
pub fn estimate_length(channels: &[Channel]) -> usize {
    compressed_len(
        channels
            .iter()
            .filter(|c| c.has_notes())
            .flat_map(|c| c.tokens()),
    )
}

/// Final state of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub channels: Vec<Channel>,
    /// Steps simulated
    pub steps: usize,
    /// Notes written into a channel
    pub assigned: usize,
    /// Notes discarded because every channel was taken
    pub dropped: usize,
    /// Notes still waiting when the length budget ran out
    pub unassigned: usize,
    /// Stopped on the length budget with notes left
    pub truncated: bool,
}

pub struct Simulator<'a> {
    options: &'a ConvertOptions,
    notes: &'a [Note],
    /// Indices into `notes` not consumed yet, in list order
    active: Vec<usize>,
    consumed: Vec<bool>,
    channels: Vec<Channel>,
    clock: u64,
    steps: usize,
    assigned: usize,
    dropped: usize,
}

impl<'a> Simulator<'a> {
    /// Fails on options that would never let the simulation finish
    pub fn new(notes: &'a [Note], options: &'a ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            notes,
            active: (0..notes.len()).collect(),
            consumed: vec![false; notes.len()],
            channels: vec![Channel::new(); options.channel_count],
            clock: 0,
            steps: 0,
            assigned: 0,
            dropped: 0,
        })
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn is_finished(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed[index]
    }

    /// Simulate one step and return how many notes it wrote
    pub fn step(&mut self) -> usize {
        let clock = self.clock;
        let ready: Vec<usize> = self
            .active
            .iter()
            .copied()
            .filter(|&i| self.notes[i].absolute_time <= clock)
            .collect();

        let taken = ready.len().min(self.channels.len());
        let (assigned, overflow) = ready.split_at(taken);

        for (slot, channel) in self.channels.iter_mut().enumerate() {
            match assigned.get(slot) {
                Some(&index) => channel.write_note(
                    &self.notes[index],
                    self.options.note_length,
                    self.options.octave_jump_threshold,
                ),
                None => channel.write_rest(self.options.note_length),
            }
        }

        for &index in assigned {
            self.consumed[index] = true;
        }
        if !overflow.is_empty() {
            match self.options.overflow {
                OverflowPolicy::Delay => {
                    trace!(clock, waiting = overflow.len(), "delaying notes to next step");
                }
                OverflowPolicy::Drop => {
                    debug!(clock, dropped = overflow.len(), "dropping notes without a channel");
                    for &index in overflow {
                        self.consumed[index] = true;
                    }
                    self.dropped += overflow.len();
                }
            }
        }

        let consumed = &self.consumed;
        self.active.retain(|&i| !consumed[i]);

        self.assigned += taken;
        self.steps += 1;
        self.clock += self.options.step_size();
        taken
    }

    /// Step until every note is written or the length budget is exceeded
    pub fn run(mut self) -> SimulationOutcome {
        let mut truncated = false;
        loop {
            self.step();
            if self.is_finished() {
                break;
            }
            let length = estimate_length(&self.channels);
            if length > self.options.max_length {
                debug!(
                    length,
                    max = self.options.max_length,
                    steps = self.steps,
                    "length budget exceeded"
                );
                truncated = true;
                break;
            }
        }

        SimulationOutcome {
            unassigned: self.active.len(),
            channels: self.channels,
            steps: self.steps,
            assigned: self.assigned,
            dropped: self.dropped,
            truncated,
        }
    }
}
