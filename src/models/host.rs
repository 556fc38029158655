/// Read-only host snapshot (hosts.status: 0 = enabled, 1 = disabled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostStatus {
    pub id: u64,
    pub name: String,
    pub enabled: bool,
}
