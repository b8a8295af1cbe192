//! The slices of API entities this client reads. Every field is optional and
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityMetadata {
    pub uuid: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
}

// ---- central manager: virtual machines ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vm {
    pub metadata: EntityMetadata,
    pub spec: VmSpec,
    pub status: VmStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmSpec {
    pub name: Option<String>,
    pub cluster_reference: Option<Reference>,
    pub resources: VmSpecResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmSpecResources {
    pub power_state: Option<String>,
    pub memory_size_mib: Option<u64>,
    pub num_sockets: Option<u32>,
    pub num_vcpus_per_socket: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmStatus {
    pub state: Option<String>,
    pub resources: VmStatusResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmStatusResources {
    pub disk_list: Vec<VmDisk>,
    pub nic_list: Vec<VmNic>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmDisk {
    pub uuid: Option<String>,
    pub disk_size_bytes: Option<u64>,
    pub device_properties: Option<DeviceProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProperties {
    pub device_type: Option<String>,
    pub disk_address: Option<DiskAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskAddress {
    pub adapter_type: Option<String>,
    pub device_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmNic {
    pub uuid: Option<String>,
    pub subnet_reference: Option<Reference>,
    pub ip_endpoint_list: Vec<IpEndpoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpEndpoint {
    pub ip: Option<String>,
}

// ---- central manager: images ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub metadata: EntityMetadata,
    pub spec: ImageSpec,
    pub status: ImageStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSpec {
    pub name: Option<String>,
    pub description: Option<String>,
    pub resources: ImageSpecResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSpecResources {
    pub image_type: Option<String>,
    pub source_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStatus {
    pub state: Option<String>,
    pub resources: ImageStatusResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStatusResources {
    pub size_bytes: Option<u64>,
    pub source_uri: Option<String>,
}

/// Body of an image create call.
#[derive(Debug, Clone, Serialize)]
pub struct ImageCreateRequest {
    pub spec: ImageCreateSpec,
    pub metadata: ImageCreateMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageCreateSpec {
    pub name: String,
    pub description: String,
    pub resources: ImageSpecResources,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageCreateMetadata {
    pub kind: String,
    pub use_categories_mapping: bool,
}

impl ImageCreateRequest {
    pub fn new(name: &str, description: &str, image_type: &str, source_uri: &str) -> Self {
        Self {
            spec: ImageCreateSpec {
                name: name.to_string(),
                description: description.to_string(),
                resources: ImageSpecResources {
                    image_type: Some(image_type.to_string()),
                    source_uri: Some(source_uri.to_string()),
                },
            },
            metadata: ImageCreateMetadata {
                kind: "image".to_string(),
                use_categories_mapping: false,
            },
        }
    }
}

// ---- central manager: subnets ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subnet {
    pub metadata: EntityMetadata,
    pub spec: SubnetSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetSpec {
    pub name: Option<String>,
    pub resources: SubnetResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetResources {
    pub vlan_id: Option<u32>,
    pub subnet_type: Option<String>,
    pub ip_config: Option<IpConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpConfig {
    pub default_gateway_ip: Option<String>,
    pub prefix_length: Option<u32>,
    pub subnet_ip: Option<String>,
}

// ---- central manager: clusters ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub metadata: EntityMetadata,
    pub status: ClusterStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStatus {
    pub name: Option<String>,
    pub resources: ClusterResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterResources {
    pub nodes: Option<ClusterNodes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterNodes {
    pub hypervisor_server_list: Vec<HypervisorServer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HypervisorServer {
    pub ip: Option<String>,
    #[serde(rename = "type")]
    pub hypervisor_type: Option<String>,
    pub version: Option<String>,
}

// ---- element manager ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeListMetadata {
    pub total_entities: Option<u64>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PeList<T> {
    #[serde(default)]
    pub metadata: PeListMetadata,
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeDisk {
    pub disk_uuid: Option<String>,
    pub storage_tier_name: Option<String>,
    pub disk_size: Option<u64>,
    pub disk_status: Option<String>,
    pub host_name: Option<String>,
    pub online: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeVirtualDisk {
    pub uuid: Option<String>,
    pub attached_vm_uuid: Option<String>,
    pub disk_capacity_in_bytes: Option<u64>,
    pub disk_address: Option<String>,
    pub storage_container_uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeVm {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub vm_disk_info: Vec<PeVmDiskInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeVmDiskInfo {
    pub is_cdrom: Option<bool>,
    pub size: Option<u64>,
    pub disk_address: PeVmDiskAddress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeVmDiskAddress {
    pub device_uuid: Option<String>,
    pub vmdisk_uuid: Option<String>,
    pub ndfs_filepath: Option<String>,
}

// ---- Karbon ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KarbonCluster {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub kubeapi_server_ipv4_address: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
}
