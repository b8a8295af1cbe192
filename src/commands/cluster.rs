use crate::api::types::Cluster;
use crate::cli::{ClusterCommands, ConnectionArgs};
use crate::commands::connect;
use crate::error::Result;
use crate::output::{cell, is_table, output_data, print_table};

const LOOPBACK: &str = "127.0.0.1";

pub fn handle_cluster_command(cmd: &ClusterCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        ClusterCommands::All { format } => {
            let client = connect(connection)?;
            let clusters = client.list_clusters()?;
            // Prism Central lists itself as a cluster without nodes.
            let clusters: Vec<Cluster> = clusters
                .entities
                .into_iter()
                .filter(|c| c.status.resources.nodes.is_some())
                .collect();

            if is_table(format) {
                print_table(
                    &["Cluster Name", "UUID", "Hypervisor", "Version"],
                    cluster_rows(&clusters),
                    Some(vec![
                        String::new(),
                        String::new(),
                        "TOTAL".to_string(),
                        clusters.len().to_string(),
                    ]),
                );
            } else {
                output_data(&clusters, format)?;
            }
        }

        ClusterCommands::Get { format } => {
            let client = connect(connection)?;
            let cluster = client.get_pe_cluster()?;
            output_data(&cluster, format)?;
        }
    }
    Ok(())
}

/// Hypervisor type and version of the last non-loopback hypervisor server,
/// AHV 0.0 when there is none.
fn hypervisor_of(cluster: &Cluster) -> (String, String) {
    let mut hypervisor = ("AHV".to_string(), "0.0".to_string());

    if let Some(nodes) = &cluster.status.resources.nodes {
        for server in &nodes.hypervisor_server_list {
            if server.ip.as_deref() != Some(LOOPBACK) {
                hypervisor = (
                    cell(server.hypervisor_type.as_deref()),
                    cell(server.version.as_deref()),
                );
            }
        }
    }

    hypervisor
}

pub(crate) fn cluster_rows(clusters: &[Cluster]) -> Vec<Vec<String>> {
    clusters
        .iter()
        .map(|cluster| {
            let (hypervisor, version) = hypervisor_of(cluster);
            vec![
                cell(cluster.status.name.as_deref()),
                cell(cluster.metadata.uuid.as_deref()),
                hypervisor,
                version,
            ]
        })
        .collect()
}
