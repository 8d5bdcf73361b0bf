//! TCP reachability probe for the model server.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::models::ModelConfig;
use crate::domain::ports::ReachabilityProbe;

/// Opens (and immediately drops) a TCP connection to decide whether the
/// model server is up.
#[derive(Debug, Clone)]
pub struct TcpReachabilityProbe {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpReachabilityProbe {
    pub fn new(host: impl Into<String>, port: u16, connect_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(
            config.probe_host.clone(),
            config.probe_port,
            Duration::from_millis(config.probe_timeout_ms),
        )
    }
}

#[async_trait]
impl ReachabilityProbe for TcpReachabilityProbe {
    fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn is_server_reachable(&self) -> bool {
        match timeout(
            self.connect_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(err)) => {
                debug!(addr = %self.target(), error = %err, "model server connection failed");
                false
            }
            Err(_) => {
                debug!(
                    addr = %self.target(),
                    timeout_ms = self.connect_timeout.as_millis(),
                    "model server connection timed out"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_reachable_when_listener_accepts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpReachabilityProbe::new("127.0.0.1", port, Duration::from_secs(2));
        assert!(probe.is_server_reachable().await);
    }

    #[tokio::test]
    async fn test_unreachable_when_port_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = TcpReachabilityProbe::new("127.0.0.1", port, Duration::from_secs(2));
        assert!(!probe.is_server_reachable().await);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_unreachable() {
        let probe = TcpReachabilityProbe::new("host.invalid", 11434, Duration::from_millis(500));
        assert!(!probe.is_server_reachable().await);
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let probe = TcpReachabilityProbe::from_config(&ModelConfig::default());
        assert_eq!(probe.target(), "localhost:11434");
        assert_eq!(probe.connect_timeout, Duration::from_secs(2));
    }
}
