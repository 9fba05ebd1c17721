//! Service availability probe

use crate::contract::RemoteGateway;

/// Result of probing the service root
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    Online {
        message: String,
        endpoints: Vec<String>,
    },
    Offline {
        reason: String,
    },
}

impl ServiceStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ServiceStatus::Online { .. })
    }
}

/// Probe the service with `GET /`
///
/// Never fails: any error is folded into [`ServiceStatus::Offline`].
pub async fn probe<G>(gateway: &G) -> ServiceStatus
where
    G: RemoteGateway,
{
    match gateway.discover().await {
        Ok(discovery) => {
            tracing::info!(endpoints = discovery.endpoints.len(), "Service online");
            ServiceStatus::Online {
                message: discovery.message,
                endpoints: discovery.endpoints,
            }
        }
        Err(e) => {
            tracing::warn!(kind = %e.kind(), error = %e, "Service unreachable");
            ServiceStatus::Offline {
                reason: e.message().to_string(),
            }
        }
    }
}
