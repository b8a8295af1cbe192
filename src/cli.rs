use crate::config::ConnectionFlags;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "ncli")]
#[command(about = "A CLI tool for managing Nutanix clusters through Prism")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings. Each one falls back to its environment variable,
/// then to the selected profile.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Prism Central address, e.g. 10.0.0.1:9440 [env: NUTANIX_PC_ADDRESS]
    #[arg(long, visible_alias = "pca", global = true)]
    pub pcaddress: Option<String>,

    /// Prism Central URL, e.g. https://10.0.0.1:9440/api/nutanix/v3/ [env: NUTANIX_PC_URL]
    #[arg(long, visible_alias = "purl", global = true)]
    pub pcurl: Option<String>,

    /// Prism Element address [env: NUTANIX_PE_ADDRESS]
    #[arg(long, visible_alias = "pea", global = true)]
    pub peaddress: Option<String>,

    /// Prism Element URL [env: NUTANIX_PE_URL]
    #[arg(long, global = true)]
    pub peurl: Option<String>,

    /// Karbon address [env: NUTANIX_KARBON_ADDRESS]
    #[arg(long, global = true)]
    pub karbonaddress: Option<String>,

    /// Karbon URL [env: NUTANIX_KARBON_URL]
    #[arg(long, global = true)]
    pub karbonurl: Option<String>,

    /// Prism username [env: NUTANIX_PC_USER]
    #[arg(short, long, visible_alias = "user", global = true)]
    pub username: Option<String>,

    /// Prism password [env: NUTANIX_PC_PASSWORD]
    #[arg(short, long, visible_alias = "pass", global = true)]
    pub password: Option<String>,

    /// Karbon username, defaults to the Prism username [env: NUTANIX_KARBON_USER]
    #[arg(long, global = true)]
    pub karbonuser: Option<String>,

    /// Karbon password, defaults to the Prism password [env: NUTANIX_KARBON_PASSWORD]
    #[arg(long, global = true)]
    pub karbonpass: Option<String>,

    /// Stored credential profile to use [env: NUTANIX_PROFILE] [default: default]
    #[arg(long, visible_alias = "pro", global = true)]
    pub profile: Option<String>,

    /// Skip TLS certificate verification [env: NUTANIX_SKIP_CERT_VERIFY]
    #[arg(long, visible_alias = "skipverify", global = true)]
    pub skip_cert_verify: bool,
}

impl ConnectionArgs {
    pub fn to_flags(&self) -> ConnectionFlags {
        ConnectionFlags {
            pc_address: self.pcaddress.clone(),
            pc_url: self.pcurl.clone(),
            pe_address: self.peaddress.clone(),
            pe_url: self.peurl.clone(),
            karbon_address: self.karbonaddress.clone(),
            karbon_url: self.karbonurl.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            karbon_user: self.karbonuser.clone(),
            karbon_password: self.karbonpass.clone(),
            profile: self.profile.clone(),
            skip_cert_verify: self.skip_cert_verify,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure stored credentials interactively
    #[command(visible_alias = "conf")]
    Configure,

    /// Stored credential profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Virtual machine commands
    #[command(subcommand)]
    Vm(VmCommands),

    /// Image commands
    #[command(subcommand)]
    Image(ImageCommands),

    /// Cluster commands
    #[command(subcommand)]
    Cluster(ClusterCommands),

    /// Subnet commands
    #[command(subcommand)]
    Subnet(SubnetCommands),

    /// Physical and virtual disk commands (Prism Element)
    #[command(subcommand)]
    Disk(DiskCommands),

    /// Karbon (Kubernetes) commands
    #[command(subcommand)]
    Karbon(KarbonCommands),
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List saved profiles
    List,

    /// Save a profile from the connection flags and environment
    Create {
        /// Profile name
        #[arg(long)]
        name: String,

        /// Overwrite an existing profile with the same name
        #[arg(long)]
        force: bool,
    },

    /// Delete a saved profile
    Delete {
        /// Profile name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum VmCommands {
    /// Retrieve all VMs
    List {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Get one VM by UUID
    Get {
        /// VM UUID
        uuid: String,

        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Get the disk list of a VM by UUID
    Disklist {
        /// VM UUID
        uuid: String,

        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Show the vdisk layout of a VM as seen by Prism Element
    Vdisks {
        /// VM UUID
        uuid: String,

        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Set VM memory: <UUID> <memory in MB>
    UpdateMemory {
        /// VM UUID
        uuid: String,

        /// Memory in MB (500 - 500000)
        memory: String,
    },

    /// Set VM power state: <UUID> <ON|OFF>
    UpdatePower {
        /// VM UUID
        uuid: String,

        /// Power state (ON or OFF)
        state: String,
    },
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// List all images
    List {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Create a new image from a source URI
    Create {
        /// Image name
        #[arg(long, visible_alias = "in", default_value = "")]
        image_name: String,

        /// Image description
        #[arg(long, visible_alias = "idesc", default_value = "")]
        image_description: String,

        /// Image type - DISK_IMAGE or ISO_IMAGE
        #[arg(long, visible_alias = "it", default_value = "")]
        image_type: String,

        /// Image source URI
        #[arg(long, visible_alias = "is", default_value = "")]
        image_source: String,
    },
}

#[derive(Subcommand)]
pub enum ClusterCommands {
    /// List all clusters registered with Prism Central
    All {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// Show cluster details from Prism Element
    Get {
        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml", value_parser = ["json", "yaml"])]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum SubnetCommands {
    /// List all subnets
    List {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum DiskCommands {
    /// List physical disks
    List {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },

    /// List virtual disks
    Vdisks {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum KarbonCommands {
    /// Karbon cluster commands
    #[command(subcommand)]
    Cluster(KarbonClusterCommands),
}

#[derive(Subcommand)]
pub enum KarbonClusterCommands {
    /// List Karbon Kubernetes clusters
    List {
        /// Output format (table, json, or yaml)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "yaml"])]
        format: String,
    },
}
