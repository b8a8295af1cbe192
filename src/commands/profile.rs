use crate::cli::{ConnectionArgs, ProfileCommands};
use crate::config::{capture_profile, ProcessEnv, ProfileEntry, ProfileStore};
use crate::error::{CliError, Result};
use crate::output::{print_notice, print_success, print_table};
use crate::validate::require_profile_name;

pub fn handle_profile_command(cmd: &ProfileCommands, connection: &ConnectionArgs) -> Result<()> {
    let store = ProfileStore::from_home()?;

    match cmd {
        ProfileCommands::List => {
            let profiles = store.list()?;
            if profiles.is_empty() {
                print_notice(&format!("no profiles stored in {}", store.dir().display()));
            }
            print_table(
                &["Profile", "Last Modified", "Location"],
                profile_rows(&profiles),
                Some(vec![
                    "Total".to_string(),
                    String::new(),
                    profiles.len().to_string(),
                ]),
            );
        }

        ProfileCommands::Create { name, force } => {
            require_profile_name(name)?;
            let path = store.path_for(name);
            if path.exists() && !force {
                return Err(CliError::ProfileExists {
                    name: name.clone(),
                    path,
                });
            }

            let profile = capture_profile(&connection.to_flags(), &ProcessEnv)?;
            let path = store.save(name, &profile)?;
            print_success(&format!("saved profile '{}' to {}", name, path.display()));
        }

        ProfileCommands::Delete { name } => {
            require_profile_name(name)?;
            store.delete(name)?;
            print_success(&format!("deleted profile: {}", name));
        }
    }
    Ok(())
}

fn profile_rows(profiles: &[ProfileEntry]) -> Vec<Vec<String>> {
    profiles
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.modified
                    .map(|m| m.format("%Y-%m-%d %H:%M:%S %Z").to_string())
                    .unwrap_or_default(),
                p.path.display().to_string(),
            ]
        })
        .collect()
}
