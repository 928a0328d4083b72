//local shortcuts

//third-party shortcuts
use wasm_timer::Instant;

//standard shortcuts
use std::time::Duration;

//-------------------------------------------------------------------------------------------------------------------

/// A non-renewable time budget measured from the moment it was created.
#[derive(Debug, Copy, Clone)]
pub struct Deadline
{
    /// timer
    start: Instant,
    /// total budget
    timeout: Duration,
}

impl Deadline
{
    /// Start a new deadline.
    pub fn new(timeout: Duration) -> Deadline
    {
        Deadline{ start: Instant::now(), timeout }
    }

    /// Total budget of this deadline.
    pub fn timeout(&self) -> Duration
    {
        self.timeout
    }

    /// Time spent since the deadline started.
    pub fn elapsed(&self) -> Duration
    {
        self.start.elapsed()
    }

    /// Time remaining until the deadline.
    /// - Returns `None` once nothing is left. A zero remainder counts as expired.
    pub fn remaining(&self) -> Option<Duration>
    {
        let remaining = self.timeout.checked_sub(self.elapsed())?;
        if remaining.is_zero() { return None; }
        Some(remaining)
    }

    /// Check if the deadline has elapsed.
    pub fn is_expired(&self) -> bool
    {
        self.remaining().is_none()
    }
}

//-------------------------------------------------------------------------------------------------------------------
