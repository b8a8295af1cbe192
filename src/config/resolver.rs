use crate::config::profile::{Profile, ProfileStore, DEFAULT_PROFILE};
use crate::error::{CliError, Result};
use std::collections::HashMap;

pub const ENV_PC_ADDRESS: &str = "NUTANIX_PC_ADDRESS";
pub const ENV_PC_URL: &str = "NUTANIX_PC_URL";
pub const ENV_PE_ADDRESS: &str = "NUTANIX_PE_ADDRESS";
pub const ENV_PE_URL: &str = "NUTANIX_PE_URL";
pub const ENV_KARBON_ADDRESS: &str = "NUTANIX_KARBON_ADDRESS";
pub const ENV_KARBON_URL: &str = "NUTANIX_KARBON_URL";
pub const ENV_USERNAME: &str = "NUTANIX_PC_USER";
pub const ENV_PASSWORD: &str = "NUTANIX_PC_PASSWORD";
pub const ENV_KARBON_USER: &str = "NUTANIX_KARBON_USER";
pub const ENV_KARBON_PASSWORD: &str = "NUTANIX_KARBON_PASSWORD";
pub const ENV_PROFILE: &str = "NUTANIX_PROFILE";
pub const ENV_SKIP_CERT_VERIFY: &str = "NUTANIX_SKIP_CERT_VERIFY";

/// Where environment lookups come from. The process environment in
/// production, a map in tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Connection values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionFlags {
    pub pc_address: Option<String>,
    pub pc_url: Option<String>,
    pub pe_address: Option<String>,
    pub pe_url: Option<String>,
    pub karbon_address: Option<String>,
    pub karbon_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub karbon_user: Option<String>,
    pub karbon_password: Option<String>,
    pub profile: Option<String>,
    pub skip_cert_verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Fully resolved connection settings. The element manager and Karbon
/// endpoints are optional because only some commands need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub pc: Endpoint,
    pub pe: Option<Endpoint>,
    pub karbon: Option<Endpoint>,
    pub skip_cert_verify: bool,
}

pub fn pc_url_from_address(address: &str) -> String {
    format!("https://{}/api/nutanix/v3/", address)
}

pub fn pe_url_from_address(address: &str) -> String {
    format!("https://{}/PrismGateway/services/rest/v2.0/", address)
}

pub fn karbon_url_from_address(address: &str) -> String {
    format!("https://{}/karbon/", address)
}

/// Picks the profile to layer under flags and environment. A profile named
/// by flag or `NUTANIX_PROFILE` must exist; otherwise `default` is used when
/// present.
pub fn select_profile(
    store: &ProfileStore,
    flags: &ConnectionFlags,
    env: &dyn EnvSource,
) -> Result<Option<Profile>> {
    let named = non_empty(flags.profile.as_deref()).or_else(|| non_empty(env.var(ENV_PROFILE).as_deref()));

    match named {
        Some(name) => {
            tracing::debug!(profile = %name, "using named profile");
            store.load(&name).map(Some)
        }
        None => store.load_optional(DEFAULT_PROFILE),
    }
}

struct Layers<'a> {
    flags: &'a ConnectionFlags,
    env: &'a dyn EnvSource,
    profile: Option<&'a Profile>,
}

impl Layers<'_> {
    /// First non-empty value of flag then environment variable.
    fn explicit(&self, flag: fn(&ConnectionFlags) -> Option<&String>, env_key: &str) -> Option<String> {
        non_empty(flag(self.flags).map(String::as_str))
            .or_else(|| non_empty(self.env.var(env_key).as_deref()))
    }

    /// First non-empty value of flag, environment variable, then profile field.
    fn pick(
        &self,
        flag: fn(&ConnectionFlags) -> Option<&String>,
        env_key: &str,
        stored: fn(&Profile) -> &String,
    ) -> Option<String> {
        self.explicit(flag, env_key)
            .or_else(|| self.profile.and_then(|p| non_empty(Some(stored(p).as_str()))))
    }
}

/// Resolves every connection field as flag > environment > profile > default.
pub fn resolve(
    flags: &ConnectionFlags,
    env: &dyn EnvSource,
    profile: Option<&Profile>,
) -> Result<ConnectionConfig> {
    let layers = Layers { flags, env, profile };

    let pc_address = layers.pick(|f| f.pc_address.as_ref(), ENV_PC_ADDRESS, |p| &p.pc_address);
    let pc_url = layers
        .pick(|f| f.pc_url.as_ref(), ENV_PC_URL, |p| &p.pc_url)
        .or_else(|| pc_address.as_deref().map(pc_url_from_address))
        .ok_or(CliError::MissingSetting("pcurl or pcaddress"))?;

    let username = layers
        .pick(|f| f.username.as_ref(), ENV_USERNAME, |p| &p.username)
        .ok_or(CliError::MissingSetting("username"))?;
    let password = layers
        .pick(|f| f.password.as_ref(), ENV_PASSWORD, |p| &p.password)
        .ok_or(CliError::MissingSetting("password"))?;

    let pe_address = layers
        .pick(|f| f.pe_address.as_ref(), ENV_PE_ADDRESS, |p| &p.pe_address)
        .or_else(|| pc_address.clone());
    let pe_url = layers
        .pick(|f| f.pe_url.as_ref(), ENV_PE_URL, |p| &p.pe_url)
        .or_else(|| pe_address.as_deref().map(pe_url_from_address));

    let karbon_address = layers
        .pick(|f| f.karbon_address.as_ref(), ENV_KARBON_ADDRESS, |p| &p.karbon_address)
        .or_else(|| pc_address.clone());
    let karbon_url = layers
        .pick(|f| f.karbon_url.as_ref(), ENV_KARBON_URL, |p| &p.karbon_url)
        .or_else(|| karbon_address.as_deref().map(karbon_url_from_address));
    let karbon_user = layers
        .pick(|f| f.karbon_user.as_ref(), ENV_KARBON_USER, |p| &p.karbon_user)
        .unwrap_or_else(|| username.clone());
    let karbon_password = layers
        .pick(|f| f.karbon_password.as_ref(), ENV_KARBON_PASSWORD, |p| &p.karbon_password)
        .unwrap_or_else(|| password.clone());

    let skip_cert_verify = flags.skip_cert_verify
        || env
            .var(ENV_SKIP_CERT_VERIFY)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

    let pe = pe_url.map(|url| Endpoint {
        url,
        username: username.clone(),
        password: password.clone(),
    });
    let karbon = karbon_url.map(|url| Endpoint {
        url,
        username: karbon_user,
        password: karbon_password,
    });

    Ok(ConnectionConfig {
        pc: Endpoint {
            url: pc_url,
            username,
            password,
        },
        pe,
        karbon,
        skip_cert_verify,
    })
}

/// Snapshot of the flag and environment layers as a storable profile. Derived
/// URLs are not filled in, so the stored file keeps only what was given.
pub fn capture_profile(flags: &ConnectionFlags, env: &dyn EnvSource) -> Result<Profile> {
    let layers = Layers {
        flags,
        env,
        profile: None,
    };
    let profile = Profile {
        pc_address: layers.explicit(|f| f.pc_address.as_ref(), ENV_PC_ADDRESS).unwrap_or_default(),
        pc_url: layers.explicit(|f| f.pc_url.as_ref(), ENV_PC_URL).unwrap_or_default(),
        pe_address: layers.explicit(|f| f.pe_address.as_ref(), ENV_PE_ADDRESS).unwrap_or_default(),
        pe_url: layers.explicit(|f| f.pe_url.as_ref(), ENV_PE_URL).unwrap_or_default(),
        karbon_address: layers.explicit(|f| f.karbon_address.as_ref(), ENV_KARBON_ADDRESS).unwrap_or_default(),
        karbon_url: layers.explicit(|f| f.karbon_url.as_ref(), ENV_KARBON_URL).unwrap_or_default(),
        username: layers.explicit(|f| f.username.as_ref(), ENV_USERNAME).unwrap_or_default(),
        password: layers.explicit(|f| f.password.as_ref(), ENV_PASSWORD).unwrap_or_default(),
        karbon_user: layers.explicit(|f| f.karbon_user.as_ref(), ENV_KARBON_USER).unwrap_or_default(),
        karbon_password: layers.explicit(|f| f.karbon_password.as_ref(), ENV_KARBON_PASSWORD).unwrap_or_default(),
    };

    if profile.pc_address.is_empty() && profile.pc_url.is_empty() {
        return Err(CliError::MissingSetting("pcurl or pcaddress"));
    }
    if profile.username.is_empty() {
        return Err(CliError::MissingSetting("username"));
    }
    if profile.password.is_empty() {
        return Err(CliError::MissingSetting("password"));
    }

    Ok(profile)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn stored() -> Profile {
        Profile {
            pc_address: "profile-pc:9440".to_string(),
            username: "profile-user".to_string(),
            password: "profile-pass".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flag_beats_env_beats_profile_beats_default() {
        let profile = stored();

        // profile only: URL falls back to the address-derived default
        let cfg = resolve(&ConnectionFlags::default(), &env(&[]), Some(&profile)).unwrap();
        assert_eq!(cfg.pc.url, "https://profile-pc:9440/api/nutanix/v3/");
        assert_eq!(cfg.pc.username, "profile-user");

        // env overrides profile
        let vars = env(&[(ENV_PC_ADDRESS, "env-pc"), (ENV_USERNAME, "env-user")]);
        let cfg = resolve(&ConnectionFlags::default(), &vars, Some(&profile)).unwrap();
        assert_eq!(cfg.pc.url, "https://env-pc/api/nutanix/v3/");
        assert_eq!(cfg.pc.username, "env-user");
        assert_eq!(cfg.pc.password, "profile-pass");

        // flag overrides env
        let flags = ConnectionFlags {
            pc_address: Some("flag-pc".to_string()),
            username: Some("flag-user".to_string()),
            ..Default::default()
        };
        let cfg = resolve(&flags, &vars, Some(&profile)).unwrap();
        assert_eq!(cfg.pc.url, "https://flag-pc/api/nutanix/v3/");
        assert_eq!(cfg.pc.username, "flag-user");

        // an explicit URL wins over the address-derived one
        let vars = env(&[(ENV_PC_URL, "https://lb.example/api/nutanix/v3/")]);
        let cfg = resolve(&flags, &vars, Some(&profile)).unwrap();
        assert_eq!(cfg.pc.url, "https://lb.example/api/nutanix/v3/");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let flags = ConnectionFlags {
            username: Some("  ".to_string()),
            ..Default::default()
        };
        let vars = env(&[(ENV_USERNAME, "")]);
        let cfg = resolve(&flags, &vars, Some(&stored())).unwrap();
        assert_eq!(cfg.pc.username, "profile-user");
    }

    #[test]
    fn test_missing_required_fields() {
        let vars = env(&[(ENV_PC_ADDRESS, "pc"), (ENV_PASSWORD, "secret")]);
        let err = resolve(&ConnectionFlags::default(), &vars, None).unwrap_err();
        assert!(matches!(err, CliError::MissingSetting("username")));

        let vars = env(&[(ENV_USERNAME, "admin"), (ENV_PASSWORD, "secret")]);
        let err = resolve(&ConnectionFlags::default(), &vars, None).unwrap_err();
        assert!(matches!(err, CliError::MissingSetting("pcurl or pcaddress")));
    }

    #[test]
    fn test_sub_service_fallbacks() {
        let cfg = resolve(&ConnectionFlags::default(), &env(&[]), Some(&stored())).unwrap();
        let pe = cfg.pe.unwrap();
        assert_eq!(pe.url, "https://profile-pc:9440/PrismGateway/services/rest/v2.0/");
        let karbon = cfg.karbon.unwrap();
        assert_eq!(karbon.url, "https://profile-pc:9440/karbon/");
        assert_eq!(karbon.username, "profile-user");
        assert_eq!(karbon.password, "profile-pass");

        let profile = Profile {
            pe_address: "pe-host:9440".to_string(),
            karbon_user: "k8s-admin".to_string(),
            ..stored()
        };
        let cfg = resolve(&ConnectionFlags::default(), &env(&[]), Some(&profile)).unwrap();
        assert_eq!(
            cfg.pe.unwrap().url,
            "https://pe-host:9440/PrismGateway/services/rest/v2.0/"
        );
        assert_eq!(cfg.karbon.unwrap().username, "k8s-admin");
    }

    #[test]
    fn test_pe_absent_without_any_address() {
        let vars = env(&[
            (ENV_PC_URL, "https://pc/api/nutanix/v3/"),
            (ENV_USERNAME, "admin"),
            (ENV_PASSWORD, "secret"),
        ]);
        let cfg = resolve(&ConnectionFlags::default(), &vars, None).unwrap();
        assert!(cfg.pe.is_none());
        assert!(cfg.karbon.is_none());
    }

    #[test]
    fn test_skip_cert_verify_from_env() {
        let vars = env(&[(ENV_SKIP_CERT_VERIFY, "TRUE")]);
        let cfg = resolve(&ConnectionFlags::default(), &vars, Some(&stored())).unwrap();
        assert!(cfg.skip_cert_verify);
        let cfg = resolve(&ConnectionFlags::default(), &env(&[]), Some(&stored())).unwrap();
        assert!(!cfg.skip_cert_verify);
    }

    #[test]
    fn test_select_profile() {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::new(tmp.path());

        // nothing named, no default on disk
        assert!(select_profile(&store, &ConnectionFlags::default(), &env(&[]))
            .unwrap()
            .is_none());

        store.save(DEFAULT_PROFILE, &stored()).unwrap();
        let lab = Profile {
            username: "lab-user".to_string(),
            ..stored()
        };
        store.save("lab", &lab).unwrap();

        let picked = select_profile(&store, &ConnectionFlags::default(), &env(&[])).unwrap();
        assert_eq!(picked.unwrap().username, "profile-user");

        let picked = select_profile(&store, &ConnectionFlags::default(), &env(&[(ENV_PROFILE, "lab")]))
            .unwrap();
        assert_eq!(picked.unwrap().username, "lab-user");

        let flags = ConnectionFlags {
            profile: Some("missing".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            select_profile(&store, &flags, &env(&[(ENV_PROFILE, "lab")])),
            Err(CliError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_capture_profile() {
        let flags = ConnectionFlags {
            pc_address: Some("10.0.0.1:9440".to_string()),
            username: Some("admin".to_string()),
            ..Default::default()
        };
        let vars = env(&[(ENV_PASSWORD, "secret123"), (ENV_USERNAME, "ignored")]);
        let profile = capture_profile(&flags, &vars).unwrap();
        assert_eq!(profile.pc_address, "10.0.0.1:9440");
        assert_eq!(profile.username, "admin");
        assert_eq!(profile.password, "secret123");
        assert!(profile.pc_url.is_empty());

        let err = capture_profile(&ConnectionFlags::default(), &vars).unwrap_err();
        assert!(matches!(err, CliError::MissingSetting("pcurl or pcaddress")));
    }
}
