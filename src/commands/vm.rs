use crate::api::types::{PeVm, Vm};
use crate::cli::{ConnectionArgs, VmCommands};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_success, print_table};
use crate::units::{bytes_to_human_readable, mib_from_mb};
use crate::validate::{parse_memory_mb, parse_power_state, require_uuid};
use serde_json::Value;

pub fn handle_vm_command(cmd: &VmCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        VmCommands::List { format } => {
            let client = connect(connection)?;
            let vms = client.list_vms()?;

            if is_table(format) {
                print_vm_list(&vms.entities, vms.total);
            } else {
                output_data(&vms.entities, format)?;
            }
        }

        VmCommands::Get { uuid, format } => {
            require_uuid(uuid)?;
            let client = connect(connection)?;
            let document = client.get_vm_document(uuid)?;

            if is_table(format) {
                let vm: Vm = serde_json::from_value(document)?;
                print_vm_detail(&vm);
            } else {
                output_data(&document, format)?;
            }
        }

        VmCommands::Disklist { uuid, format } => {
            require_uuid(uuid)?;
            let client = connect(connection)?;
            let document = client.get_vm_document(uuid)?;

            if is_table(format) {
                let vm: Vm = serde_json::from_value(document)?;
                print_vm_disks(&vm);
            } else {
                output_data(raw_disk_list(&document), format)?;
            }
        }

        VmCommands::Vdisks { uuid, format } => {
            require_uuid(uuid)?;
            let client = connect(connection)?;
            let vm = client.get_pe_vm(uuid)?;

            if is_table(format) {
                print_vm_vdisks(&vm);
            } else {
                output_data(&vm, format)?;
            }
        }

        VmCommands::UpdateMemory { uuid, memory } => {
            require_uuid(uuid)?;
            let memory_mb = parse_memory_mb(memory)?;
            let memory_mib = mib_from_mb(memory_mb);

            let client = connect(connection)?;
            tracing::info!(vm = %uuid, memory_mb, memory_mib, "updating VM memory");
            client.set_vm_memory(uuid, memory_mib)?;

            print_success(&format!(
                "VM {} updated to {} MB ({} MiB) memory",
                uuid, memory_mb, memory_mib
            ));
        }

        VmCommands::UpdatePower { uuid, state } => {
            require_uuid(uuid)?;
            let power_state = parse_power_state(state)?;

            let client = connect(connection)?;
            tracing::info!(vm = %uuid, power_state = %power_state, "updating VM power state");
            client.set_vm_power_state(uuid, &power_state)?;

            print_success(&format!(
                "VM {} updated to power state: {}",
                uuid, power_state
            ));
        }
    }
    Ok(())
}

static NO_DISKS: Value = Value::Array(Vec::new());

/// `status.resources.disk_list` of a raw VM document, untouched.
pub(crate) fn raw_disk_list(document: &Value) -> &Value {
    document
        .pointer("/status/resources/disk_list")
        .unwrap_or(&NO_DISKS)
}

pub(crate) fn vm_list_rows(vms: &[Vm]) -> Vec<Vec<String>> {
    vms.iter()
        .map(|vm| {
            vec![
                cell(vm.spec.name.as_deref()),
                cell(vm.metadata.uuid.as_deref()),
                cell(vm.spec.resources.power_state.as_deref()),
                cell(
                    vm.spec
                        .cluster_reference
                        .as_ref()
                        .and_then(|c| c.name.as_deref()),
                ),
            ]
        })
        .collect()
}

fn print_vm_list(vms: &[Vm], total: u64) {
    print_table(
        &["Name", "UUID", "Powered", "Cluster"],
        vm_list_rows(vms),
        Some(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            total.to_string(),
        ]),
    );
}

pub(crate) fn vm_detail_rows(vm: &Vm) -> Vec<Vec<String>> {
    let name = cell(vm.spec.name.as_deref());
    let disks = &vm.status.resources.disk_list;
    let mut rows = Vec::new();

    for disk in disks {
        let size = disk
            .disk_size_bytes
            .map(bytes_to_human_readable)
            .unwrap_or_default();
        let device_type = disk
            .device_properties
            .as_ref()
            .and_then(|p| p.device_type.as_deref());

        rows.push(vec![
            name.clone(),
            cell(disk.uuid.as_deref()),
            size,
            cell(device_type),
        ]);
    }

    rows.push(vec![
        name.clone(),
        String::new(),
        "TOTAL".to_string(),
        disks.len().to_string(),
    ]);
    rows.push(vec![
        name.clone(),
        String::new(),
        "POWER STATE".to_string(),
        cell(vm.spec.resources.power_state.as_deref()),
    ]);
    rows.push(vec![
        name.clone(),
        "NETWORK UUID".to_string(),
        "ADDRESS".to_string(),
        "NETWORK".to_string(),
    ]);

    for nic in &vm.status.resources.nic_list {
        let ip = nic
            .ip_endpoint_list
            .first()
            .and_then(|e| e.ip.clone())
            .unwrap_or_else(|| "UNDEFINED".to_string());
        let subnet = nic.subnet_reference.as_ref().and_then(|s| s.name.as_deref());

        rows.push(vec![name.clone(), cell(nic.uuid.as_deref()), ip, cell(subnet)]);
    }

    rows
}

fn print_vm_detail(vm: &Vm) {
    print_table(&["VM", "Disk UUID", "Size", "Disk Type"], vm_detail_rows(vm), None);
}

fn print_vm_disks(vm: &Vm) {
    let disks = &vm.status.resources.disk_list;
    let rows = disks
        .iter()
        .map(|disk| {
            let adapter = disk
                .device_properties
                .as_ref()
                .and_then(|p| p.disk_address.as_ref())
                .and_then(|a| a.adapter_type.as_deref());
            vec![
                cell(disk.uuid.as_deref()),
                disk.disk_size_bytes.unwrap_or(0).to_string(),
                cell(adapter),
            ]
        })
        .collect();

    print_table(
        &["Disk UUID", "Size (Bytes)", "Disk Type"],
        rows,
        Some(vec![
            cell(vm.spec.name.as_deref()),
            "Total".to_string(),
            disks.len().to_string(),
        ]),
    );
}

pub(crate) fn vm_vdisk_rows(vm: &PeVm) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for disk in &vm.vm_disk_info {
        let size = bytes_to_human_readable(disk.size.unwrap_or(0));
        let location = format!(
            "nfs://127.0.0.1{}",
            disk.disk_address.ndfs_filepath.as_deref().unwrap_or("nfs")
        );
        let disk_type = if disk.is_cdrom.unwrap_or(false) {
            "CDROM"
        } else {
            "DISK"
        };

        rows.push(vec![
            "PC".to_string(),
            cell(disk.disk_address.device_uuid.as_deref()),
            location.clone(),
            size.clone(),
            disk_type.to_string(),
        ]);
        rows.push(vec![
            "PE".to_string(),
            cell(disk.disk_address.vmdisk_uuid.as_deref()),
            location,
            size,
            disk_type.to_string(),
        ]);
    }

    rows
}

fn print_vm_vdisks(vm: &PeVm) {
    let title = format!("Disk UUID - {}", cell(vm.name.as_deref()));
    print_table(
        &["", title.as_str(), "NFS LOCATION", "Size", "Disk Type"],
        vm_vdisk_rows(vm),
        Some(vec![
            String::new(),
            String::new(),
            String::new(),
            "TOTAL".to_string(),
            vm.vm_disk_info.len().to_string(),
        ]),
    );
}
