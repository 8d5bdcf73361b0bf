use async_trait::async_trait;

/// Port trait for the model server reachability check
///
/// Implementations must never fail: any error during the check means the
/// server is not reachable.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Address being probed, for log lines
    fn target(&self) -> String;

    /// Returns true iff the server accepted a connection in time
    async fn is_server_reachable(&self) -> bool;
}
