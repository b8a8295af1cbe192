use crate::api::types::Subnet;
use crate::cli::{ConnectionArgs, SubnetCommands};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_table};

pub fn handle_subnet_command(cmd: &SubnetCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        SubnetCommands::List { format } => {
            let client = connect(connection)?;
            let subnets = client.list_subnets()?;

            if is_table(format) {
                print_table(
                    &["Name", "UUID", "Network", "CIDR", "VLAN", "TYPE"],
                    subnet_rows(&subnets.entities),
                    Some(vec![
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        "TOTAL".to_string(),
                        subnets.total.to_string(),
                    ]),
                );
            } else {
                output_data(&subnets.entities, format)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn subnet_rows(subnets: &[Subnet]) -> Vec<Vec<String>> {
    subnets
        .iter()
        .map(|subnet| {
            let resources = &subnet.spec.resources;
            let (gateway, prefix) = match &resources.ip_config {
                Some(ip) => (
                    ip.default_gateway_ip.clone().unwrap_or_else(|| "0.0.0.0".to_string()),
                    ip.prefix_length.unwrap_or(0).to_string(),
                ),
                None => ("0.0.0.0".to_string(), "0".to_string()),
            };

            vec![
                cell(subnet.spec.name.as_deref()),
                cell(subnet.metadata.uuid.as_deref()),
                gateway,
                prefix,
                resources.vlan_id.map(|v| v.to_string()).unwrap_or_default(),
                cell(resources.subnet_type.as_deref()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_rows_defaults_without_ip_config() {
        let subnets: Vec<Subnet> = serde_json::from_value(serde_json::json!([
            {
                "metadata": {"uuid": "s-1"},
                "spec": {"name": "managed", "resources": {
                    "vlan_id": 10, "subnet_type": "VLAN",
                    "ip_config": {"default_gateway_ip": "10.10.0.1", "prefix_length": 24}
                }}
            },
            {
                "metadata": {"uuid": "s-2"},
                "spec": {"name": "unmanaged", "resources": {"vlan_id": 0, "subnet_type": "VLAN"}}
            }
        ]))
        .unwrap();

        let rows = subnet_rows(&subnets);
        assert_eq!(rows[0], vec!["managed", "s-1", "10.10.0.1", "24", "10", "VLAN"]);
        assert_eq!(rows[1], vec!["unmanaged", "s-2", "0.0.0.0", "0", "0", "VLAN"]);
    }
}
