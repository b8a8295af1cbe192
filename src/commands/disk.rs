use crate::api::types::{PeDisk, PeVirtualDisk};
use crate::cli::{ConnectionArgs, DiskCommands};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_table};
use crate::units::bytes_to_human_readable;

pub fn handle_disk_command(cmd: &DiskCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        DiskCommands::List { format } => {
            let client = connect(connection)?;
            let disks = client.list_disks()?;
            let total = disks
                .metadata
                .total_entities
                .unwrap_or(disks.entities.len() as u64);

            if is_table(format) {
                print_table(
                    &["Disk UUID", "Tier", "Size", "Status", "Host", "Online"],
                    disk_rows(&disks.entities),
                    Some(vec![
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        "TOTAL".to_string(),
                        total.to_string(),
                    ]),
                );
            } else {
                output_data(&disks.entities, format)?;
            }
        }

        DiskCommands::Vdisks { format } => {
            let client = connect(connection)?;
            let vdisks = client.list_virtual_disks()?;
            let total = vdisks
                .metadata
                .total_entities
                .unwrap_or(vdisks.entities.len() as u64);

            if is_table(format) {
                print_table(
                    &[
                        "vDisk UUID",
                        "Attached",
                        "Disk Capacity",
                        "VM Disk Address",
                        "Storage Container UUID",
                    ],
                    vdisk_rows(&vdisks.entities),
                    Some(vec![
                        String::new(),
                        String::new(),
                        String::new(),
                        "TOTAL".to_string(),
                        total.to_string(),
                    ]),
                );
            } else {
                output_data(&vdisks.entities, format)?;
            }
        }
    }
    Ok(())
}

fn disk_rows(disks: &[PeDisk]) -> Vec<Vec<String>> {
    disks
        .iter()
        .map(|d| {
            vec![
                cell(d.disk_uuid.as_deref()),
                cell(d.storage_tier_name.as_deref()),
                d.disk_size.map(|s| s.to_string()).unwrap_or_default(),
                cell(d.disk_status.as_deref()),
                cell(d.host_name.as_deref()),
                d.online.map(|o| o.to_string()).unwrap_or_default(),
            ]
        })
        .collect()
}

fn vdisk_rows(vdisks: &[PeVirtualDisk]) -> Vec<Vec<String>> {
    vdisks
        .iter()
        .map(|v| {
            vec![
                cell(v.uuid.as_deref()),
                v.attached_vm_uuid.clone().unwrap_or_else(|| "None".to_string()),
                bytes_to_human_readable(v.disk_capacity_in_bytes.unwrap_or(0)),
                v.disk_address.clone().unwrap_or_else(|| "None".to_string()),
                cell(v.storage_container_uuid.as_deref()),
            ]
        })
        .collect()
}
