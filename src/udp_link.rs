// src/udp_link.rs
//
// Text protocol over UDP, the dialect the vehicle's SDK mode speaks:
// commands like `takeoff`, `left 70`, `flip b`, answered with `ok` or an
// `error ...` string. One command is in flight at a time and each call
// blocks for the reply, so the order commands are issued in is the order
// the vehicle executes them.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::time::Duration;

use tracing::{debug, info};

use crate::link::{LinkError, VehicleLink};
use crate::types::LinkConfig;

pub struct UdpLink {
    socket: UdpSocket,
    drone_addr: String,
    response_timeout: Duration,
    takeoff_timeout: Duration,
}

impl UdpLink {
    pub fn bind(config: &LinkConfig) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind(&config.bind_addr)?;
        info!(
            "📡 Vehicle link bound on {}, target {}",
            config.bind_addr, config.drone_addr
        );
        Ok(Self {
            socket,
            drone_addr: config.drone_addr.clone(),
            response_timeout: Duration::from_secs_f64(config.response_timeout_secs),
            takeoff_timeout: Duration::from_secs_f64(config.takeoff_timeout_secs),
        })
    }

    /// Send one command and block for its reply.
    fn exchange(&mut self, command: &str, timeout: Duration) -> Result<String, LinkError> {
        self.socket.send_to(command.as_bytes(), &self.drone_addr)?;
        self.socket.set_read_timeout(Some(timeout))?;

        let mut buf = [0u8; 1024];
        match self.socket.recv_from(&mut buf) {
            Ok((n, _)) => {
                let reply = String::from_utf8_lossy(&buf[..n]).trim().to_string();
                debug!("`{}` -> `{}`", command, reply);
                Ok(reply)
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                Err(LinkError::LinkTimeout {
                    command: command.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Commands that answer `ok` on success.
    fn control(&mut self, command: &str, timeout: Duration) -> Result<(), LinkError> {
        let reply = self.exchange(command, timeout)?;
        if reply.eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(LinkError::CommandRejected {
                command: command.to_string(),
                reply,
            })
        }
    }

    fn simple(&mut self, command: &str) -> Result<(), LinkError> {
        self.control(command, self.response_timeout)
    }
}

impl VehicleLink for UdpLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        // Enters SDK mode; everything else is rejected until this succeeds.
        self.simple("command")
    }

    fn battery(&mut self) -> Result<i32, LinkError> {
        let reply = self.exchange("battery?", self.response_timeout)?;
        reply
            .parse::<i32>()
            .map_err(|_| LinkError::CommandRejected {
                command: "battery?".to_string(),
                reply,
            })
    }

    fn stream_on(&mut self) -> Result<(), LinkError> {
        self.simple("streamon")
    }

    fn take_off(&mut self) -> Result<(), LinkError> {
        self.control("takeoff", self.takeoff_timeout)
    }

    fn land(&mut self) -> Result<(), LinkError> {
        self.simple("land")
    }

    fn move_left(&mut self, cm: u32) -> Result<(), LinkError> {
        self.simple(&format!("left {cm}"))
    }

    fn move_right(&mut self, cm: u32) -> Result<(), LinkError> {
        self.simple(&format!("right {cm}"))
    }

    fn move_up(&mut self, cm: u32) -> Result<(), LinkError> {
        self.simple(&format!("up {cm}"))
    }

    fn move_down(&mut self, cm: u32) -> Result<(), LinkError> {
        self.simple(&format!("down {cm}"))
    }

    fn rotate_cw(&mut self, deg: u32) -> Result<(), LinkError> {
        self.simple(&format!("cw {deg}"))
    }

    fn rotate_ccw(&mut self, deg: u32) -> Result<(), LinkError> {
        self.simple(&format!("ccw {deg}"))
    }

    fn flip_left(&mut self) -> Result<(), LinkError> {
        self.simple("flip l")
    }

    fn flip_right(&mut self) -> Result<(), LinkError> {
        self.simple("flip r")
    }

    fn flip_forward(&mut self) -> Result<(), LinkError> {
        self.simple("flip f")
    }

    fn flip_back(&mut self) -> Result<(), LinkError> {
        self.simple("flip b")
    }
}
