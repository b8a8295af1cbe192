//! Local argument checks that run before any configuration is resolved
//! or any request leaves the machine.

use crate::error::{CliError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_MEMORY_MB: u64 = 500;
pub const MAX_MEMORY_MB: u64 = 500_000;

pub const POWER_STATES: [&str; 2] = ["ON", "OFF"];
pub const IMAGE_TYPES: [&str; 2] = ["DISK_IMAGE", "ISO_IMAGE"];

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-4[a-fA-F0-9]{3}-[89aAbB][a-fA-F0-9]{3}-[a-fA-F0-9]{12}$",
    )
    .expect("UUID pattern is valid")
});

/// True for version-4 style UUIDs (8-4-4-4-12 hex, version nibble `4`,
/// variant nibble one of `8`, `9`, `a`, `b`).
pub fn is_valid_uuid(uuid: &str) -> bool {
    UUID_PATTERN.is_match(uuid)
}

pub fn require_uuid(uuid: &str) -> Result<()> {
    if is_valid_uuid(uuid) {
        Ok(())
    } else {
        Err(CliError::InvalidUuid(uuid.to_string()))
    }
}

/// Parses a memory argument in MB and checks it is within the accepted bounds.
pub fn parse_memory_mb(value: &str) -> Result<u64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::validation(
            "no memory value provided...should be an integer",
        ));
    }

    let mb: u64 = value
        .parse()
        .map_err(|_| CliError::InvalidMemory(value.to_string()))?;

    if !(MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&mb) {
        return Err(CliError::InvalidMemory(value.to_string()));
    }

    Ok(mb)
}

/// Normalizes a power state argument to its upper-case API form.
pub fn parse_power_state(value: &str) -> Result<String> {
    let state = value.trim().to_uppercase();
    if POWER_STATES.contains(&state.as_str()) {
        Ok(state)
    } else {
        Err(CliError::InvalidPowerState(value.to_string()))
    }
}

pub fn require_min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        return Err(CliError::validation(format!(
            "{} is undefined or less than {} characters",
            field, min
        )));
    }
    Ok(())
}

pub fn require_image_type(value: &str) -> Result<()> {
    if IMAGE_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CliError::validation(
            "image-type must be either DISK_IMAGE or ISO_IMAGE",
        ))
    }
}

pub fn require_profile_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.chars().count() < 2 {
        return Err(CliError::validation("must enter a valid profile name"));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(CliError::validation(format!(
            "profile name '{}' must not contain path separators or start with '.'",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_uuids() {
        assert!(is_valid_uuid("E64AD4E5-C6E2-462B-881F-A02BD0CDD8BB"));
        assert!(is_valid_uuid("e64ad4e5-c6e2-462b-a81f-a02bd0cdd8bb"));
        assert!(is_valid_uuid("00000000-0000-4000-9000-000000000000"));
        assert!(is_valid_uuid("ffffffff-ffff-4fff-bfff-ffffffffffff"));
    }

    #[test]
    fn test_invalid_uuids() {
        assert!(!is_valid_uuid("not a valid uuid"));
        assert!(!is_valid_uuid(""));
        // version nibble must be 4
        assert!(!is_valid_uuid("e64ad4e5-c6e2-162b-881f-a02bd0cdd8bb"));
        // variant nibble must be 8, 9, a or b
        assert!(!is_valid_uuid("e64ad4e5-c6e2-462b-c81f-a02bd0cdd8bb"));
        assert!(!is_valid_uuid("e64ad4e5-c6e2-462b-|81f-a02bd0cdd8bb"));
        // wrong group lengths, stray characters
        assert!(!is_valid_uuid("e64ad4e5c6e2-462b-881f-a02bd0cdd8bb"));
        assert!(!is_valid_uuid("e64ad4e5-c6e2-462b-881f-a02bd0cdd8bb0"));
        assert!(!is_valid_uuid(" e64ad4e5-c6e2-462b-881f-a02bd0cdd8bb"));
        assert!(!is_valid_uuid("g64ad4e5-c6e2-462b-881f-a02bd0cdd8bb"));
    }

    #[test]
    fn test_parse_memory_bounds() {
        assert_eq!(parse_memory_mb("500").unwrap(), 500);
        assert_eq!(parse_memory_mb("500000").unwrap(), 500_000);
        assert_eq!(parse_memory_mb(" 4096 ").unwrap(), 4096);
        assert!(matches!(parse_memory_mb("499"), Err(CliError::InvalidMemory(_))));
        assert!(matches!(parse_memory_mb("500001"), Err(CliError::InvalidMemory(_))));
        assert!(matches!(parse_memory_mb("4GB"), Err(CliError::InvalidMemory(_))));
        assert!(matches!(parse_memory_mb("-1"), Err(CliError::InvalidMemory(_))));
        assert!(matches!(parse_memory_mb(""), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_parse_power_state() {
        assert_eq!(parse_power_state("on").unwrap(), "ON");
        assert_eq!(parse_power_state("Off").unwrap(), "OFF");
        assert!(matches!(
            parse_power_state("reboot"),
            Err(CliError::InvalidPowerState(_))
        ));
        assert!(parse_power_state("").is_err());
    }

    #[test]
    fn test_image_checks() {
        assert!(require_image_type("DISK_IMAGE").is_ok());
        assert!(require_image_type("ISO_IMAGE").is_ok());
        assert!(require_image_type("iso_image").is_err());
        assert!(require_min_len("image-name", "abc", 3).is_ok());
        assert!(require_min_len("image-name", "ab", 3).is_err());
        assert!(require_min_len("image-name", "   ", 3).is_err());
    }

    #[test]
    fn test_profile_name() {
        assert!(require_profile_name("default").is_ok());
        assert!(require_profile_name("x").is_err());
        assert!(require_profile_name("../etc").is_err());
        assert!(require_profile_name(".hidden").is_err());
    }
}
