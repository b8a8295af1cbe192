use crate::config::{Profile, ProfileStore, DEFAULT_PROFILE};
use crate::error::{CliError, Result};
use crate::output::{print_success, print_warning};
use crate::validate::require_profile_name;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PC_ADDRESS: &str = "10.0.0.1:9440";
const MIN_PASSWORD_LEN: usize = 8;
const MIN_ADDRESS_LEN: usize = 6;

/// Applies the prompt rules to raw input: empty input takes the default, and
/// the result must be at least `min_len` characters.
pub fn accept_input(input: &str, min_len: usize, default: &str) -> Result<String> {
    let input = input.trim();
    let value = if input.is_empty() { default } else { input };

    if value.chars().count() < min_len {
        return Err(CliError::validation(format!(
            "invalid input length (minimum {} characters)",
            min_len
        )));
    }

    Ok(value.to_string())
}

fn prompt(theme: &ColorfulTheme, message: &str, min_len: usize, default: &str) -> Result<String> {
    let input: String = Input::with_theme(theme)
        .with_prompt(format!("{} [{}]", message, default))
        .allow_empty(true)
        .interact_text()?;
    accept_input(&input, min_len, default)
}

fn prompt_secret(theme: &ColorfulTheme, message: &str, min_len: usize, default: &str) -> Result<String> {
    let shown = if default.is_empty() { "" } else { "********" };
    let input = Password::with_theme(theme)
        .with_prompt(format!("{} [{}]", message, shown))
        .allow_empty_password(true)
        .interact()?;
    accept_input(&input, min_len, default)
}

/// Prompts for a profile and writes it, offering any existing values of the
/// same profile as defaults.
pub fn handle_configure_command() -> Result<()> {
    let store = ProfileStore::from_home()?;
    let theme = ColorfulTheme::default();

    let name = prompt(&theme, "Profile name", 2, DEFAULT_PROFILE)?;
    require_profile_name(&name)?;

    let existing = store.load_optional(&name)?;
    if existing.is_some() {
        print_warning(&format!("profile '{}' exists and will be overwritten", name));
    }
    let current = existing.unwrap_or_default();

    let username = prompt(
        &theme,
        "Prism Central username",
        1,
        or_default(&current.username, DEFAULT_USERNAME),
    )?;
    let password = prompt_secret(&theme, "Prism Central password", MIN_PASSWORD_LEN, &current.password)?;
    let pc_address = prompt(
        &theme,
        "Prism Central address",
        MIN_ADDRESS_LEN,
        or_default(&current.pc_address, DEFAULT_PC_ADDRESS),
    )?;
    let pe_address = prompt(&theme, "Prism Element address (optional)", 0, &current.pe_address)?;
    let karbon_address = prompt(&theme, "Karbon address (optional)", 0, &current.karbon_address)?;

    let profile = Profile {
        pc_address,
        pe_address,
        karbon_address,
        username,
        password,
        ..current
    };

    let path = store.save(&name, &profile)?;
    print_success(&format!("saved profile to: {}", path.display()));
    Ok(())
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_input() {
        assert_eq!(accept_input("", 0, "default").unwrap(), "default");
        assert_eq!(accept_input("  lab ", 2, "default").unwrap(), "lab");
        assert_eq!(accept_input("", 6, "10.0.0.1").unwrap(), "10.0.0.1");
        assert!(accept_input("", 8, "").is_err());
        assert!(accept_input("short", 8, "longenough").is_err());
        assert_eq!(accept_input("", 0, "").unwrap(), "");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("", "admin"), "admin");
        assert_eq!(or_default("root", "admin"), "root");
    }
}
