use anyhow::{Context, Result};
use aws_sdk_ec2::Client as Ec2Client;
use clap::Parser;

use rusttag::aws_config;
use rusttag::cli::Cli;
use rusttag::ec2;
use rusttag::interactive;
use rusttag::report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    aws_config::ensure_profile_exists(&cli.profile)?;
    let config = aws_config::configure_aws(&cli.profile, Some(cli.region.clone())).await;
    let client = Ec2Client::new(&config);

    let instances = ec2::fetch_instances(&client)
        .await
        .context("could not list EC2 instances")?;
    let partition = ec2::partition_by_tag(&instances, &cli.key, &cli.value);

    if cli.json {
        report::print_partition_json(&client, &partition, &cli.key, &cli.value).await?;
    } else {
        report::print_partition(&client, &partition).await;
    }

    if partition.unmatched.is_empty() {
        println!(
            "No instances are missing the tag [{}] | [{}]",
            cli.key, cli.value
        );
        return Ok(());
    }

    if !interactive::confirm_tagging(&cli.key, &cli.value)? {
        println!("Tag creation cancelled");
        return Ok(());
    }

    report::apply_missing_tags(&client, &partition.unmatched, &cli.key, &cli.value).await
}
