use crate::derive::ResolvedPorts;
use crate::registry::PortDecl;

/// Whether a placed port emits or receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortRole {
    Source,
    Target,
}

/// A port with its position along the node edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPort {
    pub id: String,
    pub label: Option<String>,
    pub role: PortRole,
    /// Distance from the top of the node, in percent of its height.
    pub offset_percent: f64,
}

/// Ports grouped by the node edge they are drawn on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortLayout {
    /// Targets: static declarations, then derived ports.
    pub left: Vec<PlacedPort>,
    pub right: Vec<PlacedPort>,
}

impl PortLayout {
    pub fn from_ports(ports: &ResolvedPorts) -> Self {
        Self {
            left: spread(&ports.targets, PortRole::Target),
            right: spread(&ports.sources, PortRole::Source),
        }
    }
}

/// Spaces `n` ports evenly, the i-th sitting at `100 / (n + 1) * (i + 1)` percent.
fn spread(ports: &[PortDecl], role: PortRole) -> Vec<PlacedPort> {
    let spacing = 100.0 / (ports.len() as f64 + 1.0);
    ports
        .iter()
        .enumerate()
        .map(|(i, port)| PlacedPort {
            id: port.id.clone(),
            label: port.label.clone(),
            role,
            offset_percent: spacing * (i as f64 + 1.0),
        })
        .collect()
}
