//! UDP stand-in for the LoRa radio on the relay side: one datagram per wire
//! frame, fire-and-forget sends, non-blocking polled receives.

use std::io::ErrorKind;
use std::net::UdpSocket;

use anyhow::{Context, Result};
use radio_protocol::RadioLink;
use tracing::warn;

pub struct UdpRadio {
    sock: UdpSocket,
    buf: Vec<u8>,
}

impl UdpRadio {
    pub fn connect(remote: &str) -> Result<Self> {
        let sock = UdpSocket::bind("0.0.0.0:0").context("bind tx socket")?;
        sock.connect(remote)
            .with_context(|| format!("connect to {remote}"))?;
        sock.set_nonblocking(true)?;
        Ok(Self::wrap(sock))
    }

    pub fn bind(local: &str) -> Result<Self> {
        let sock = UdpSocket::bind(local).with_context(|| format!("bind {local}"))?;
        sock.set_nonblocking(true)?;
        Ok(Self::wrap(sock))
    }

    fn wrap(sock: UdpSocket) -> Self {
        Self {
            sock,
            buf: vec![0u8; 1024],
        }
    }
}

impl RadioLink for UdpRadio {
    fn send(&mut self, frame: &[u8]) {
        if let Err(e) = self.sock.send(frame) {
            warn!(?e, "radio send failed; frame lost");
        }
    }

    fn try_receive(&mut self) -> Option<Vec<u8>> {
        match self.sock.recv_from(&mut self.buf) {
            Ok((n, _from)) => Some(self.buf[..n].to_vec()),
            Err(e) if e.kind() == ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!(?e, "radio receive error");
                None
            }
        }
    }
}
