use super::types::{PeDisk, PeList, PeVirtualDisk, PeVm};
use super::{NutanixClient, Service};
use crate::error::Result;
use serde_json::Value;

impl NutanixClient {
    /// VM detail from the element manager, including its vdisk layout.
    pub fn get_pe_vm(&self, uuid: &str) -> Result<PeVm> {
        self.get(
            Service::Element,
            &format!("vms/{}?include_vm_disk_config=true", uuid),
        )
    }

    pub fn list_disks(&self) -> Result<PeList<PeDisk>> {
        self.get(Service::Element, "disks/")
    }

    pub fn list_virtual_disks(&self) -> Result<PeList<PeVirtualDisk>> {
        self.get(Service::Element, "virtual_disks/")
    }

    pub fn get_pe_cluster(&self) -> Result<Value> {
        self.get(Service::Element, "cluster/")
    }
}
