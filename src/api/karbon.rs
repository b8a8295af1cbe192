use super::types::KarbonCluster;
use super::{NutanixClient, Service};
use crate::error::Result;

const CLUSTERS_PATH: &str = "v1-beta.1/k8s/clusters";

impl NutanixClient {
    pub fn list_karbon_clusters(&self) -> Result<Vec<KarbonCluster>> {
        let clusters: Option<Vec<KarbonCluster>> = self.get(Service::Karbon, CLUSTERS_PATH)?;
        Ok(clusters.unwrap_or_default())
    }
}
