// src/link.rs
//
// Abstract vehicle transport. The dispatcher only ever talks to this trait;
// the UDP implementation lives in udp_link.rs and a logging dry-run
// implementation below lets an operator rehearse a session with no vehicle.

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("command `{command}` rejected by vehicle: {reply}")]
    CommandRejected { command: String, reply: String },

    #[error("no response to `{command}` within {timeout_ms} ms")]
    LinkTimeout { command: String, timeout_ms: u64 },

    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every call blocks until the vehicle has accepted (or rejected) the
/// command, which is what guarantees that back-to-back commands issued in
/// one frame reach the vehicle in order.
pub trait VehicleLink {
    fn connect(&mut self) -> Result<(), LinkError>;
    fn battery(&mut self) -> Result<i32, LinkError>;
    fn stream_on(&mut self) -> Result<(), LinkError>;

    fn take_off(&mut self) -> Result<(), LinkError>;
    fn land(&mut self) -> Result<(), LinkError>;

    fn move_left(&mut self, cm: u32) -> Result<(), LinkError>;
    fn move_right(&mut self, cm: u32) -> Result<(), LinkError>;
    fn move_up(&mut self, cm: u32) -> Result<(), LinkError>;
    fn move_down(&mut self, cm: u32) -> Result<(), LinkError>;

    fn rotate_cw(&mut self, deg: u32) -> Result<(), LinkError>;
    fn rotate_ccw(&mut self, deg: u32) -> Result<(), LinkError>;

    fn flip_left(&mut self) -> Result<(), LinkError>;
    fn flip_right(&mut self) -> Result<(), LinkError>;
    fn flip_forward(&mut self) -> Result<(), LinkError>;
    fn flip_back(&mut self) -> Result<(), LinkError>;
}

/// Accepts everything and logs it. Rehearsal mode.
pub struct DryRunLink;

impl DryRunLink {
    pub fn new() -> Self {
        Self
    }

    fn accept(&self, command: &str) -> Result<(), LinkError> {
        info!("🪁 [dry-run] {}", command);
        Ok(())
    }
}

impl VehicleLink for DryRunLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        self.accept("command")
    }

    fn battery(&mut self) -> Result<i32, LinkError> {
        info!("🪁 [dry-run] battery?");
        Ok(100)
    }

    fn stream_on(&mut self) -> Result<(), LinkError> {
        self.accept("streamon")
    }

    fn take_off(&mut self) -> Result<(), LinkError> {
        self.accept("takeoff")
    }

    fn land(&mut self) -> Result<(), LinkError> {
        self.accept("land")
    }

    fn move_left(&mut self, cm: u32) -> Result<(), LinkError> {
        self.accept(&format!("left {cm}"))
    }

    fn move_right(&mut self, cm: u32) -> Result<(), LinkError> {
        self.accept(&format!("right {cm}"))
    }

    fn move_up(&mut self, cm: u32) -> Result<(), LinkError> {
        self.accept(&format!("up {cm}"))
    }

    fn move_down(&mut self, cm: u32) -> Result<(), LinkError> {
        self.accept(&format!("down {cm}"))
    }

    fn rotate_cw(&mut self, deg: u32) -> Result<(), LinkError> {
        self.accept(&format!("cw {deg}"))
    }

    fn rotate_ccw(&mut self, deg: u32) -> Result<(), LinkError> {
        self.accept(&format!("ccw {deg}"))
    }

    fn flip_left(&mut self) -> Result<(), LinkError> {
        self.accept("flip l")
    }

    fn flip_right(&mut self) -> Result<(), LinkError> {
        self.accept("flip r")
    }

    fn flip_forward(&mut self) -> Result<(), LinkError> {
        self.accept("flip f")
    }

    fn flip_back(&mut self) -> Result<(), LinkError> {
        self.accept("flip b")
    }
}
