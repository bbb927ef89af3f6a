//! Edge-triggered input capture.
//!
//! Encoder and IR handlers run in interrupt context and only ever *raise*
//! flags. The control loop calls [`InputLatch::take`] exactly once per poll
//! cycle, which snapshots and clears every flag inside one critical section:
//! an edge raised while the controller is processing the snapshot lands in
//! the next cycle and is never lost or counted twice.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Every raw input edge the hardware can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Channel knob clockwise
    ChannelCw,
    /// Channel knob counter-clockwise
    ChannelCcw,
    /// Volume knob clockwise
    VolumeCw,
    /// Volume knob counter-clockwise
    VolumeCcw,
    /// Power button
    Power,
    /// IR remote channel up
    IrChannelUp,
    /// IR remote channel down
    IrChannelDown,
    /// IR remote volume up
    IrVolumeUp,
    /// IR remote volume down
    IrVolumeDown,
    /// IR remote mute
    IrMute,
    /// IR remote power
    IrPower,
}

impl InputEvent {
    /// All events, in bit order.
    pub const ALL: [Self; 11] = [
        Self::ChannelCw,
        Self::ChannelCcw,
        Self::VolumeCw,
        Self::VolumeCcw,
        Self::Power,
        Self::IrChannelUp,
        Self::IrChannelDown,
        Self::IrVolumeUp,
        Self::IrVolumeDown,
        Self::IrMute,
        Self::IrPower,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of input edges observed since the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFlags(u16);

impl InputFlags {
    /// No events.
    pub const NONE: Self = Self(0);

    /// A set containing only `event`.
    #[must_use]
    pub const fn only(event: InputEvent) -> Self {
        Self(event.bit())
    }

    /// Add `event` to the set.
    pub fn raise(&mut self, event: InputEvent) {
        self.0 |= event.bit();
    }

    /// Returns `true` if `event` occurred.
    #[must_use]
    pub const fn contains(self, event: InputEvent) -> bool {
        self.0 & event.bit() != 0
    }

    /// Returns `true` if either event occurred.
    #[must_use]
    pub const fn any_of(self, a: InputEvent, b: InputEvent) -> bool {
        self.0 & (a.bit() | b.bit()) != 0
    }

    /// Returns `true` if no event occurred.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the events in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = InputEvent> {
        InputEvent::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}

impl From<InputEvent> for InputFlags {
    fn from(event: InputEvent) -> Self {
        Self::only(event)
    }
}

impl FromIterator<InputEvent> for InputFlags {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        let mut flags = Self::NONE;
        for e in iter {
            flags.raise(e);
        }
        flags
    }
}

/// ISR-shared latch of pending input edges.
///
/// Place in a `static` and call [`raise`](Self::raise) from the encoder and
/// IR handlers.
pub struct InputLatch {
    pending: Mutex<CriticalSectionRawMutex, Cell<InputFlags>>,
}

impl InputLatch {
    /// Create an empty latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(InputFlags::NONE)),
        }
    }

    /// Record an edge. Safe to call from interrupt context.
    pub fn raise(&self, event: InputEvent) {
        self.pending.lock(|cell| {
            let mut flags = cell.get();
            flags.raise(event);
            cell.set(flags);
        });
    }

    /// Snapshot and clear all pending edges as one atomic step.
    pub fn take(&self) -> InputFlags {
        self.pending.lock(|cell| cell.replace(InputFlags::NONE))
    }

    /// Look at pending edges without consuming them.
    pub fn peek(&self) -> InputFlags {
        self.pending.lock(Cell::get)
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}
