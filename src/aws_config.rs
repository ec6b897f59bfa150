use anyhow::{bail, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

pub async fn configure_aws(profile: &str, region: Option<String>) -> aws_types::SdkConfig {
    let region_provider =
        RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();

    aws_config::defaults(BehaviorVersion::v2024_03_28())
        .profile_name(profile)
        .region(region_provider)
        .load()
        .await
}

fn shared_config_files() -> Vec<PathBuf> {
    dirs_next::home_dir()
        .map(|home| vec![home.join(".aws/credentials"), home.join(".aws/config")])
        .unwrap_or_default()
}

/// Section names of an AWS shared config/credentials file, with the
/// `profile ` prefix used by ~/.aws/config stripped off.
pub fn profiles_in_file(path: &Path) -> Result<Vec<String>> {
    let mut ini = Ini::new_cs();
    ini.load(path).map_err(anyhow::Error::msg)?;

    Ok(ini
        .sections()
        .into_iter()
        .map(|section| {
            section
                .strip_prefix("profile ")
                .unwrap_or(&section)
                .to_string()
        })
        .collect())
}

/// Fail fast on a profile the shared AWS files don't know about, instead of
/// letting the SDK resolve an empty credential chain later. The `default`
/// profile and a setup with no shared files at all (credentials coming from
/// the environment) are left to the SDK.
pub fn ensure_profile_exists(profile: &str) -> Result<()> {
    if profile == "default" {
        return Ok(());
    }

    let files: Vec<PathBuf> = shared_config_files()
        .into_iter()
        .filter(|path| path.exists())
        .collect();
    if files.is_empty() {
        return Ok(());
    }

    let mut profiles = Vec::new();
    for file in &files {
        profiles.extend(profiles_in_file(file)?);
    }
    if profiles.iter().any(|candidate| candidate == profile) {
        return Ok(());
    }

    let searched = files
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    bail!(
        "profile '{}' not found in {} (available profiles: {})",
        profile,
        searched,
        if profiles.is_empty() {
            "none".to_string()
        } else {
            profiles.join(", ")
        }
    )
}
