use clap::Parser;

/// Audit EC2 instances for a tag key/value pair and bulk-apply it to the
/// instances that are missing it.
#[derive(Parser, Debug)]
#[command(name = "rusttag", version, about)]
pub struct Cli {
    /// AWS profile to run the commands with
    #[arg(long, default_value = "default")]
    pub profile: String,

    /// AWS region to run the commands in
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Tag key to search
    #[arg(long, default_value = "default")]
    pub key: String,

    /// Tag value to search
    #[arg(long, default_value = "default")]
    pub value: String,

    /// Print the audit report as JSON instead of colored text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_fall_back_to_their_documented_defaults() {
        let cli = Cli::parse_from(["rusttag"]);
        assert_eq!(cli.profile, "default");
        assert_eq!(cli.region, "us-east-1");
        assert_eq!(cli.key, "default");
        assert_eq!(cli.value, "default");
        assert!(!cli.json);
    }

    #[test]
    fn flags_override_the_defaults() {
        let cli = Cli::parse_from([
            "rusttag", "--profile", "ops", "--region", "eu-west-1", "--key", "backup", "--value",
            "daily", "--json",
        ]);
        assert_eq!(cli.profile, "ops");
        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.key, "backup");
        assert_eq!(cli.value, "daily");
        assert!(cli.json);
    }
}
