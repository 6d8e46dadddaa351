use crate::proto::{EmulatorStatus, VmHypervisorType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmConfig {
    pub hypervisor_type: String,
    pub number_of_cpu_cores: i32,
    pub ram_size_bytes: i64,
}

/// Emulator status with the hardware entry list flattened into a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub version: String,
    pub uptime_ms: u64,
    pub booted: bool,
    pub hardware_config: BTreeMap<String, String>,
    pub vm_config: VmConfig,
}

impl From<EmulatorStatus> for StatusReport {
    fn from(status: EmulatorStatus) -> Self {
        let hardware_config = status
            .hardware_config
            .map(|list| {
                list.entry
                    .into_iter()
                    .map(|entry| (entry.key, entry.value))
                    .collect()
            })
            .unwrap_or_default();

        let vm_config = status
            .vm_config
            .map(|vm| VmConfig {
                hypervisor_type: hypervisor_name(vm.hypervisor_type).to_owned(),
                number_of_cpu_cores: vm.number_of_cpu_cores,
                ram_size_bytes: vm.ram_size_bytes,
            })
            .unwrap_or_default();

        Self {
            version: status.version,
            uptime_ms: status.uptime,
            booted: status.booted,
            hardware_config,
            vm_config,
        }
    }
}

fn hypervisor_name(raw: i32) -> &'static str {
    match VmHypervisorType::try_from(raw) {
        Ok(VmHypervisorType::None) => "NONE",
        Ok(VmHypervisorType::Kvm) => "KVM",
        Ok(VmHypervisorType::Hvf) => "HVF",
        Ok(VmHypervisorType::Haxm) => "HAXM",
        Ok(VmHypervisorType::Whpx) => "WHPX",
        Ok(VmHypervisorType::Gvm) => "GVM",
        Ok(VmHypervisorType::Unknown) | Err(_) => "UNKNOWN",
    }
}
