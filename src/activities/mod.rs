//! The classroom activities.
//!
//! Each one is a small [`Activity`](crate::app::runner::Activity): read an
//! input, compare it with a fixed rule, show something, sleep, repeat.
//! They are generic over the board so the same code runs on the HAT and on
//! the simulated board.

pub mod alarm;
pub mod boot_ip;
pub mod camera;
pub mod dice;
pub mod environment;
pub mod hello;
pub mod joystick;
pub mod reaction;
pub mod spirit_level;

use core::time::Duration;

use crate::app::events::ActivityEvent;
use crate::app::ports::{Clock, Joystick, LedMatrix};
use crate::app::runner::Session;
use crate::display::scroll::show_message;
use crate::display::{Rgb, BLUE, GREEN, MAGENTA, OFF, RED, YELLOW};
use crate::error::Result;
use crate::stick::{Direction, StickEvent};

/// Colour shown for each joystick direction.
pub fn direction_colour(direction: Direction) -> Rgb {
    match direction {
        Direction::Up => RED,
        Direction::Down => BLUE,
        Direction::Left => GREEN,
        Direction::Right => YELLOW,
        Direction::Middle => MAGENTA,
    }
}

/// One countdown tick: fill with `fill`, scroll the digit, then pause.
pub(crate) fn countdown_tick<H>(
    hw: &mut H,
    session: &mut Session<'_>,
    remaining: u32,
    fill: Rgb,
    digit: Rgb,
    scroll: Duration,
    pause: Duration,
) -> Result<()>
where
    H: LedMatrix + Clock + ?Sized,
{
    session.emit(ActivityEvent::Countdown { remaining });
    hw.clear(fill)?;
    show_message(hw, &remaining.to_string(), scroll, digit, OFF)?;
    session.pause(hw, pause)
}

/// Alternate `colour` and dark `times` times, `period` per half.
pub(crate) fn flash<H>(
    hw: &mut H,
    session: &Session<'_>,
    colour: Rgb,
    times: u32,
    period: Duration,
) -> Result<()>
where
    H: LedMatrix + Clock + ?Sized,
{
    for _ in 0..times {
        hw.clear(colour)?;
        session.pause(hw, period)?;
        hw.clear(OFF)?;
        session.pause(hw, period)?;
    }
    Ok(())
}

/// Discard queued joystick events and return the first press among them.
pub(crate) fn first_press<J: Joystick + ?Sized>(stick: &mut J) -> Result<Option<Direction>> {
    Ok(stick
        .poll_events()?
        .into_iter()
        .find(StickEvent::is_press)
        .map(|e| e.direction))
}
