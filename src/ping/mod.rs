//! Wait for network connectivity by pinging a host.

use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "google.com";

/// Errors that can occur while waiting for a connection.
#[derive(Error, Debug)]
pub enum PingError {
    #[error("Could not run ping: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("No connection after {0} attempts")]
    GaveUp(u32),
}

/// One reachability check.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityCheck: Send + Sync {
    /// `Ok(true)` when the target answered.
    fn is_online(&self) -> Result<bool, PingError>;
}

/// Sends a single ICMP echo through the system `ping`.
pub struct PingCheck {
    host: String,
}

impl PingCheck {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Arguments for one echo request on this platform.
    pub fn args(&self) -> [&str; 3] {
        let count = if cfg!(windows) { "-n" } else { "-c" };
        [count, "1", self.host.as_str()]
    }
}

impl Default for PingCheck {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl ConnectivityCheck for PingCheck {
    fn is_online(&self) -> Result<bool, PingError> {
        let status = Command::new("ping")
            .args(self.args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        debug!("ping {} exited with {}", self.host, status);
        Ok(status.success())
    }
}

/// Check until online, sleeping `interval` between attempts.
///
/// Returns the number of attempts made. Without `max_attempts` it never gives up.
pub fn wait_for_connection(
    check: &dyn ConnectivityCheck,
    interval: Duration,
    max_attempts: Option<u32>,
) -> Result<u32, PingError> {
    let mut attempt = 1;
    loop {
        info!("Attempt {}", attempt);
        if check.is_online()? {
            info!("Connection detected");
            return Ok(attempt);
        }

        if max_attempts.is_some_and(|max| attempt >= max) {
            return Err(PingError::GaveUp(attempt));
        }
        attempt += 1;
        std::thread::sleep(interval);
    }
}
