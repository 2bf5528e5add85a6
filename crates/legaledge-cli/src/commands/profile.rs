//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, ProviderArg};
use crate::config::{Config, Profile, ProviderKind};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            provider,
            model,
            endpoint,
            api_key_env,
            timeout,
        } => {
            let profile = build_profile(provider, model, endpoint, api_key_env, timeout);
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}Provider: {:?}", indent, profile.provider);
    println!("{}Model: {}", indent, profile.model);
    println!("{}Endpoint: {}", indent, profile.endpoint());
    if profile.provider == ProviderKind::Gemini {
        println!("{}API key from: ${}", indent, profile.api_key_env);
    }
    if let Some(secs) = profile.timeout_secs {
        println!("{}Timeout: {}s", indent, secs);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

fn build_profile(
    provider: ProviderArg,
    model: Option<String>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
    timeout: Option<u64>,
) -> Profile {
    let kind = ProviderKind::from(provider);
    let mut profile = match kind {
        ProviderKind::Gemini => Profile::gemini(kind.default_model()),
        ProviderKind::Ollama => Profile::ollama(kind.default_model()),
    };
    if let Some(model) = model {
        profile.model = model;
    }
    if let Some(env) = api_key_env {
        profile.api_key_env = env;
    }
    profile.endpoint = endpoint;
    profile.timeout_secs = timeout;
    profile
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    profile: Profile,
    formatter: &Formatter,
) -> Result<()> {
    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load(Some(&dir.path().join("config.toml"))).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let profile = build_profile(ProviderArg::Ollama, None, None, None, Some(60));
        set_profile(&mut config, "local".to_string(), profile, &formatter).unwrap();
        assert_eq!(config.profiles["local"].model, "llama3");

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
        assert_eq!(reloaded.profiles["local"].timeout_secs, Some(60));
    }

    #[test]
    fn test_build_profile_overrides() {
        let profile = build_profile(
            ProviderArg::Gemini,
            Some("gemini-1.5-pro".to_string()),
            Some("https://proxy.example".to_string()),
            Some("MY_KEY".to_string()),
            None,
        );
        assert_eq!(profile.provider, ProviderKind::Gemini);
        assert_eq!(profile.model, "gemini-1.5-pro");
        assert_eq!(profile.endpoint(), "https://proxy.example");
        assert_eq!(profile.api_key_env, "MY_KEY");
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(matches!(result, Err(CliError::NotPermitted(_))));
    }
}
