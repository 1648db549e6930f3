use anyhow::{Context, Result, bail};
use blogwriter_core::config::{ClientConfig, mask_secret};
use blogwriter_infrastructure::{ConfigService, WriterPaths};

pub fn show(paths: &WriterPaths) -> Result<()> {
    let config = ConfigService::new(paths.clone())
        .get_config()
        .context("Failed to load configuration")?;
    print!("{}", describe(&config));
    Ok(())
}

pub fn path(paths: &WriterPaths) -> Result<()> {
    let file = paths.config_file()?;
    println!("{}", file.display());
    Ok(())
}

/// Updates one key in `config.toml`. Environment overrides are not written back.
pub fn set(paths: &WriterPaths, key: &str, value: &str) -> Result<()> {
    let service = ConfigService::new(paths.clone());
    let mut config = service.load_file().context("Failed to load configuration")?;
    apply(&mut config, key, value)?;
    service.save(&config).context("Failed to save configuration")?;
    println!("Set {}", key);
    Ok(())
}

fn apply(config: &mut ClientConfig, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let optional = (!value.is_empty()).then(|| value.to_string());

    match key {
        "api_base_url" => config.api_base_url = optional,
        "identity.url" => config.identity.url = optional,
        "identity.anon_key" => config.identity.anon_key = optional,
        "log_level" => config.log_level = optional,
        "request_timeout_secs" => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("Invalid timeout: {}", value))?;
            if secs == 0 {
                bail!("request_timeout_secs must be greater than 0");
            }
            config.request_timeout_secs = secs;
        }
        other => bail!("Unknown config key: {}", other),
    }
    Ok(())
}

fn describe(config: &ClientConfig) -> String {
    let unset = || "(not set)".to_string();
    format!(
        "api_base_url         = {}\n\
         request_timeout_secs = {}\n\
         log_level            = {}\n\
         identity.url         = {}\n\
         identity.anon_key    = {}\n",
        config.api_base_url().unwrap_or_else(unset),
        config.request_timeout_secs,
        config.log_level.clone().unwrap_or_else(unset),
        config.identity_url().unwrap_or_else(unset),
        config
            .identity_anon_key()
            .map(|key| mask_secret(&key))
            .unwrap_or_else(unset),
    )
}
