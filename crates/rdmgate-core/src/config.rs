// ── Runtime gateway configuration ──
//
// Describes how the gateway addresses devices. Never touches disk: the
// CLI (or any other frontend) builds a `GatewayConfig` and hands it in.

use rdmgate_api::command::ROOT_DEVICE;

/// Configuration for a single [`Gateway`](crate::Gateway).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Sub-device every transaction targets (0 = root device).
    pub sub_device: u16,
    /// Resolve manufacturer/device labels in the background for newly seen UIDs.
    pub resolve_labels: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            sub_device: ROOT_DEVICE,
            resolve_labels: true,
        }
    }
}
