use crate::api::types::KarbonCluster;
use crate::cli::{ConnectionArgs, KarbonClusterCommands, KarbonCommands};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_table};

pub fn handle_karbon_command(cmd: &KarbonCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        KarbonCommands::Cluster(KarbonClusterCommands::List { format }) => {
            let client = connect(connection)?;
            let clusters = client.list_karbon_clusters()?;

            if is_table(format) {
                print_table(
                    &["Name", "UUID", "Address", "Version"],
                    karbon_cluster_rows(&clusters),
                    Some(vec![
                        String::new(),
                        String::new(),
                        "Total".to_string(),
                        clusters.len().to_string(),
                    ]),
                );
            } else {
                output_data(&clusters, format)?;
            }
        }
    }
    Ok(())
}

fn karbon_cluster_rows(clusters: &[KarbonCluster]) -> Vec<Vec<String>> {
    clusters
        .iter()
        .map(|c| {
            vec![
                cell(c.name.as_deref()),
                cell(c.uuid.as_deref()),
                cell(c.kubeapi_server_ipv4_address.as_deref()),
                cell(c.version.as_deref()),
            ]
        })
        .collect()
}
