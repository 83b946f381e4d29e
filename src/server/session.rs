//! Forwarding session tying one client connection to one downstream connection

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use super::shuttle::shuttle;
use crate::config::Config;
use crate::error::{ForwardError, Result};

/// A forwarding session for one accepted client connection.
///
/// The session dials the forward target, runs one shuttle per direction
/// until both have finished, then drops both sockets. Each shuttle's
/// half-close is what drives the opposite direction to EOF, so joining both
/// always terminates once either peer stops sending and closes.
pub struct Session {
    /// Client TCP stream
    client: TcpStream,
    /// Client address
    client_addr: SocketAddr,
    /// Configuration
    config: Arc<Config>,
}

impl Session {
    /// Create a new session for an accepted client connection
    pub fn new(client: TcpStream, client_addr: SocketAddr, config: Arc<Config>) -> Self {
        Self {
            client,
            client_addr,
            config,
        }
    }

    /// Run the session to completion.
    ///
    /// Errors never escape: a failed dial aborts the session (closing the
    /// client connection), and relay errors terminate their own direction
    /// only. Other sessions and the listener are unaffected either way.
    pub async fn run(self) {
        let target = self.config.target.addr();

        let downstream = match self.dial().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Session from {} aborted: {}", self.client_addr, e);
                // Dropping self.client closes the accepted connection.
                return;
            }
        };

        info!("New connection from {} -> {}", self.client_addr, target);

        let (client_read, client_write) = self.client.into_split();
        let (downstream_read, downstream_write) = downstream.into_split();

        let client_to_target =
            tokio::spawn(shuttle(client_read, downstream_write, "client->target"));
        let target_to_client =
            tokio::spawn(shuttle(downstream_read, client_write, "target->client"));

        // Both directions must be observed finished before the halves drop
        // and the sockets fully close.
        let (sent, received) = tokio::join!(client_to_target, target_to_client);
        let sent = sent.unwrap_or(0);
        let received = received.unwrap_or(0);

        info!(
            "Connection from {} closed ({} bytes sent, {} bytes received)",
            self.client_addr, sent, received
        );
    }

    /// Open the downstream connection to the forward target.
    async fn dial(&self) -> Result<TcpStream> {
        let addr = self.config.target.addr();
        debug!("Dialing target at {}", addr);

        let addrs: Vec<SocketAddr> = lookup_host(addr.as_str())
            .await
            .map_err(|e| {
                ForwardError::Resolve(format!(
                    "cannot resolve target host {}: {}",
                    self.config.target.host, e
                ))
            })?
            .collect();
        if addrs.is_empty() {
            return Err(ForwardError::Resolve(format!(
                "cannot resolve target host {}: no addresses",
                self.config.target.host
            )));
        }

        let connect = TcpStream::connect(addrs.as_slice());
        let connect_timeout = self.config.server.connect_timeout_secs;
        let dialed = if connect_timeout == 0 {
            connect.await
        } else {
            timeout(Duration::from_secs(connect_timeout), connect)
                .await
                .map_err(|_| ForwardError::Timeout(format!("connecting to {}", addr)))?
        };

        dialed.map_err(|e| match e.kind() {
            std::io::ErrorKind::ConnectionRefused => {
                ForwardError::Connection(format!("connection refused by {}", addr))
            }
            _ => ForwardError::Connection(format!("failed to connect to {}: {}", addr, e)),
        })
    }
}
