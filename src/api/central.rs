use super::paging::{fetch_all, ListPage, PagedList, DEFAULT_PAGE_SIZE};
use super::types::{Cluster, Image, ImageCreateRequest, Subnet, Vm};
use super::{NutanixClient, Service};
use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    kind: &'a str,
    offset: u64,
    length: u64,
}

impl NutanixClient {
    /// Walks `<collection>/list` until every entity has been fetched.
    fn list_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        kind: &str,
        page_size: u64,
    ) -> Result<PagedList<T>> {
        let path = format!("{}/list", collection);
        let list = fetch_all(page_size, |offset, length| {
            let body = ListRequest { kind, offset, length };
            self.post::<_, ListPage<T>>(Service::Central, &path, &body)
        })?;

        tracing::debug!(
            collection,
            fetched = list.entities.len(),
            total = list.total,
            offset = list.offset,
            "list complete"
        );
        Ok(list)
    }

    pub fn list_vms(&self) -> Result<PagedList<Vm>> {
        self.list_all("vms", "vm", DEFAULT_PAGE_SIZE)
    }

    /// The VM document exactly as the server returns it.
    pub fn get_vm_document(&self, uuid: &str) -> Result<Value> {
        self.get(Service::Central, &format!("vms/{}", uuid))
    }

    pub fn list_images(&self) -> Result<PagedList<Image>> {
        self.list_all("images", "image", DEFAULT_PAGE_SIZE)
    }

    pub fn create_image(&self, request: &ImageCreateRequest) -> Result<Image> {
        self.post(Service::Central, "images", request)
    }

    pub fn list_subnets(&self) -> Result<PagedList<Subnet>> {
        self.list_all("subnets", "subnet", DEFAULT_PAGE_SIZE)
    }

    pub fn list_clusters(&self) -> Result<PagedList<Cluster>> {
        self.list_all("clusters", "cluster", DEFAULT_PAGE_SIZE)
    }

    /// Fetches the VM document, applies `edit` to its `spec.resources` and
    /// PUTs it back. The raw document is used so fields this client does
    /// not model survive the round trip.
    pub fn update_vm_resources<F>(&self, uuid: &str, edit: F) -> Result<Value>
    where
        F: FnOnce(&mut serde_json::Map<String, Value>),
    {
        let document = self.get_vm_document(uuid)?;
        let body = build_vm_update(document, edit)?;
        self.put(Service::Central, &format!("vms/{}", uuid), &body)
    }

    pub fn set_vm_memory(&self, uuid: &str, memory_mib: u64) -> Result<Value> {
        self.update_vm_resources(uuid, |resources| {
            resources.insert("memory_size_mib".to_string(), json!(memory_mib));
        })
    }

    pub fn set_vm_power_state(&self, uuid: &str, power_state: &str) -> Result<Value> {
        self.update_vm_resources(uuid, |resources| {
            resources.insert("power_state".to_string(), json!(power_state));
        })
    }
}

/// Builds an update body (`api_version`, `metadata`, `spec`) from a fetched
/// VM document. `status` is dropped because the API rejects it on update.
pub fn build_vm_update<F>(document: Value, edit: F) -> Result<Value>
where
    F: FnOnce(&mut serde_json::Map<String, Value>),
{
    let Value::Object(mut document) = document else {
        return Err(CliError::UnexpectedResponse {
            url: "vms".to_string(),
            reason: "VM document is not a JSON object".to_string(),
        });
    };

    let mut spec = document.remove("spec").unwrap_or_else(|| json!({}));
    let resources = spec
        .as_object_mut()
        .ok_or_else(|| missing_field("spec"))?
        .entry("resources")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| missing_field("spec.resources"))?;
    edit(resources);

    let mut body = serde_json::Map::new();
    if let Some(api_version) = document.remove("api_version") {
        body.insert("api_version".to_string(), api_version);
    }
    body.insert(
        "metadata".to_string(),
        document.remove("metadata").unwrap_or_else(|| json!({})),
    );
    body.insert("spec".to_string(), spec);

    Ok(Value::Object(body))
}

fn missing_field(field: &str) -> CliError {
    CliError::UnexpectedResponse {
        url: "vms".to_string(),
        reason: format!("VM document field '{}' is not an object", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_client;
    use httpmock::prelude::*;

    fn document() -> Value {
        json!({
            "api_version": "3.1",
            "metadata": {"uuid": "e64ad4e5-c6e2-462b-881f-a02bd0cdd8bb", "spec_version": 7},
            "spec": {
                "name": "web-01",
                "resources": {"memory_size_mib": 2048, "power_state": "OFF", "num_sockets": 2}
            },
            "status": {"state": "COMPLETE"}
        })
    }

    #[test]
    fn test_build_vm_update_memory() {
        let body = build_vm_update(document(), |r| {
            r.insert("memory_size_mib".to_string(), json!(3814));
        })
        .unwrap();

        assert_eq!(body["api_version"], "3.1");
        assert_eq!(body["metadata"]["spec_version"], 7);
        assert_eq!(body["spec"]["resources"]["memory_size_mib"], 3814);
        assert_eq!(body["spec"]["resources"]["num_sockets"], 2);
        assert_eq!(body["spec"]["name"], "web-01");
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_build_vm_update_creates_resources() {
        let body = build_vm_update(json!({"metadata": {}, "spec": {"name": "x"}}), |r| {
            r.insert("power_state".to_string(), json!("ON"));
        })
        .unwrap();
        assert_eq!(body["spec"]["resources"]["power_state"], "ON");
        assert!(body.get("api_version").is_none());
    }

    #[test]
    fn test_build_vm_update_rejects_non_object() {
        assert!(build_vm_update(json!([1, 2]), |_| {}).is_err());
        assert!(build_vm_update(json!({"spec": "bad"}), |_| {}).is_err());
    }

    #[test]
    fn test_list_request_body() {
        let body = serde_json::to_value(ListRequest {
            kind: "vm",
            offset: 40,
            length: 40,
        })
        .unwrap();
        assert_eq!(body, json!({"kind": "vm", "offset": 40, "length": 40}));
    }

    fn vm_page(offset: u64, count: u64, total: u64) -> Value {
        let entities: Vec<Value> = (offset..offset + count)
            .map(|i| json!({"metadata": {"uuid": format!("u{}", i)}, "spec": {"name": format!("vm-{}", i)}}))
            .collect();
        json!({
            "metadata": {"kind": "vm", "total_matches": total, "length": count, "offset": offset},
            "entities": entities
        })
    }

    #[test]
    fn test_list_vms_walks_pages() {
        let server = MockServer::start();
        let pages: Vec<_> = [(0, 40), (40, 40), (80, 15)]
            .into_iter()
            .map(|(offset, count)| {
                server.mock(|when, then| {
                    when.method(POST)
                        .path("/api/nutanix/v3/vms/list")
                        .json_body(json!({"kind": "vm", "offset": offset, "length": 40}));
                    then.status(200).json_body(vm_page(offset, count, 95));
                })
            })
            .collect();

        let list = mock_client(&server).list_vms().unwrap();

        for page in &pages {
            page.assert();
        }
        assert_eq!(list.entities.len(), 95);
        assert_eq!(list.total, 95);
        assert_eq!(list.entities[0].metadata.uuid.as_deref(), Some("u0"));
        assert_eq!(list.entities[94].metadata.uuid.as_deref(), Some("u94"));
    }

    #[test]
    fn test_list_with_zero_total_makes_one_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/nutanix/v3/images/list");
            then.status(200)
                .json_body(json!({"metadata": {"kind": "image", "total_matches": 0, "length": 0}, "entities": []}));
        });

        let list = mock_client(&server).list_images().unwrap();

        mock.assert();
        assert!(list.entities.is_empty());
        assert_eq!(list.total, 0);
    }

    #[test]
    fn test_list_stops_on_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/nutanix/v3/subnets/list");
            then.status(401).body("unauthorized");
        });

        let err = mock_client(&server).list_subnets().unwrap_err();
        assert!(matches!(err, CliError::Api { status, .. } if status.as_u16() == 401));
    }

    #[test]
    fn test_set_vm_memory_gets_then_puts_without_status() {
        let server = MockServer::start();
        let uuid = "e64ad4e5-c6e2-462b-881f-a02bd0cdd8bb";
        let path = format!("/api/nutanix/v3/vms/{}", uuid);

        let get = server.mock(|when, then| {
            when.method(GET).path(path.as_str());
            then.status(200).json_body(document());
        });
        let put = server.mock(|when, then| {
            when.method(PUT).path(path.as_str()).json_body(json!({
                "api_version": "3.1",
                "metadata": {"uuid": uuid, "spec_version": 7},
                "spec": {
                    "name": "web-01",
                    "resources": {"memory_size_mib": 3814, "power_state": "OFF", "num_sockets": 2}
                }
            }));
            then.status(202).json_body(json!({"status": {"state": "PENDING"}}));
        });

        let response = mock_client(&server).set_vm_memory(uuid, 3814).unwrap();

        get.assert();
        put.assert();
        assert_eq!(response["status"]["state"], "PENDING");
    }

    #[test]
    fn test_set_vm_power_state_puts_power_state() {
        let server = MockServer::start();
        let uuid = "e64ad4e5-c6e2-462b-881f-a02bd0cdd8bb";
        let path = format!("/api/nutanix/v3/vms/{}", uuid);

        server.mock(|when, then| {
            when.method(GET).path(path.as_str());
            then.status(200).json_body(document());
        });
        let put = server.mock(|when, then| {
            when.method(PUT).path(path.as_str()).json_body(json!({
                "api_version": "3.1",
                "metadata": {"uuid": uuid, "spec_version": 7},
                "spec": {
                    "name": "web-01",
                    "resources": {"memory_size_mib": 2048, "power_state": "ON", "num_sockets": 2}
                }
            }));
            then.status(202).json_body(json!({}));
        });

        mock_client(&server).set_vm_power_state(uuid, "ON").unwrap();
        put.assert();
    }

    #[test]
    fn test_get_vm_document_is_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/nutanix/v3/vms/abc");
            then.status(200).json_body(document());
        });

        let raw = mock_client(&server).get_vm_document("abc").unwrap();
        assert_eq!(raw, document());
    }
}
