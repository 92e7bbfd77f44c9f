//! Five-way joystick events.
//!
//! The Sense HAT joystick is exposed by Linux as an evdev keyboard. The
//! adapter reads raw `input_event` records and [`decode`] turns the key
//! records into [`StickEvent`]s; everything else (sync, misc) is dropped.
//!
//! | evdev code | key        | direction |
//! |-----------|------------|-----------|
//! | 103       | KEY_UP     | Up        |
//! | 108       | KEY_DOWN   | Down      |
//! | 105       | KEY_LEFT   | Left      |
//! | 106       | KEY_RIGHT  | Right     |
//! | 28        | KEY_ENTER  | Middle    |

use heapless::Deque;

const EV_KEY: u16 = 0x01;
const KEY_ENTER: u16 = 28;
const KEY_UP: u16 = 103;
const KEY_LEFT: u16 = 105;
const KEY_RIGHT: u16 = 106;
const KEY_DOWN: u16 = 108;

/// Maximum number of undelivered events kept between polls.
pub const QUEUE_CAP: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Middle,
}

impl Direction {
    /// Every direction, in display order.
    pub const ALL: [Self; 5] = [Self::Up, Self::Down, Self::Left, Self::Right, Self::Middle];

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        }
    }

    fn from_key(code: u16) -> Option<Self> {
        match code {
            KEY_UP => Some(Self::Up),
            KEY_DOWN => Some(Self::Down),
            KEY_LEFT => Some(Self::Left),
            KEY_RIGHT => Some(Self::Right),
            KEY_ENTER => Some(Self::Middle),
            _ => None,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pressed,
    Released,
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickEvent {
    pub direction: Direction,
    pub action: Action,
}

impl StickEvent {
    pub const fn pressed(direction: Direction) -> Self {
        Self {
            direction,
            action: Action::Pressed,
        }
    }

    pub fn is_press(&self) -> bool {
        self.action == Action::Pressed
    }
}

/// Decode one evdev record (`type`, `code`, `value`) into a joystick event.
pub fn decode(ev_type: u16, code: u16, value: i32) -> Option<StickEvent> {
    if ev_type != EV_KEY {
        return None;
    }
    let direction = Direction::from_key(code)?;
    let action = match value {
        0 => Action::Released,
        1 => Action::Pressed,
        2 => Action::Held,
        _ => return None,
    };
    Some(StickEvent { direction, action })
}

/// Bounded FIFO of undelivered events. When full, the oldest event is
/// dropped so the most recent input always survives.
pub struct StickEventQueue {
    inner: Deque<StickEvent, QUEUE_CAP>,
    dropped: u32,
}

impl Default for StickEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl StickEventQueue {
    pub fn new() -> Self {
        Self {
            inner: Deque::new(),
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: StickEvent) {
        if self.inner.is_full() {
            let _ = self.inner.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.inner.push_back(event);
    }

    /// Remove and return every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<StickEvent> {
        let mut out = Vec::with_capacity(self.inner.len());
        while let Some(ev) = self.inner.pop_front() {
            out.push(ev);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Events discarded because the queue overflowed.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
