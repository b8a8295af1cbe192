pub mod cluster;
pub mod configure;
pub mod disk;
pub mod image;
pub mod karbon;
pub mod profile;
pub mod subnet;
pub mod vm;

pub use cluster::handle_cluster_command;
pub use configure::handle_configure_command;
pub use disk::handle_disk_command;
pub use image::handle_image_command;
pub use karbon::handle_karbon_command;
pub use profile::handle_profile_command;
pub use subnet::handle_subnet_command;
pub use vm::handle_vm_command;

use crate::api::NutanixClient;
use crate::cli::ConnectionArgs;
use crate::config::{resolve, select_profile, ProcessEnv, ProfileStore};
use crate::error::Result;

/// Resolves connection settings from flags, environment and the selected
/// profile, and opens a client.
pub fn connect(connection: &ConnectionArgs) -> Result<NutanixClient> {
    let flags = connection.to_flags();
    let store = ProfileStore::from_home()?;
    let profile = select_profile(&store, &flags, &ProcessEnv)?;
    let config = resolve(&flags, &ProcessEnv, profile.as_ref())?;

    tracing::debug!(pc = %config.pc.url, user = %config.pc.username, "resolved connection");
    NutanixClient::new(config)
}
