use anyhow::{bail, Result};
use aws_sdk_ec2::Client as Ec2Client;
use colored::Colorize;
use serde_json::{json, Value};

use crate::ec2::{self, TagPartition};

/// One status line per instance, matched half first, each half in
/// API-returned order.
pub async fn print_partition(client: &Ec2Client, partition: &TagPartition) {
    for instance_id in &partition.matched {
        println!("{} ✅", display_name(client, instance_id).await.green());
    }
    for instance_id in &partition.unmatched {
        println!("{} ❌", display_name(client, instance_id).await.red());
    }
}

pub async fn print_partition_json(
    client: &Ec2Client,
    partition: &TagPartition,
    key: &str,
    value: &str,
) -> Result<()> {
    let matched = resolve_names(client, &partition.matched).await;
    let unmatched = resolve_names(client, &partition.unmatched).await;

    let report = partition_report(key, value, &matched, &unmatched);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write the tag pair onto every unmatched instance, printing one
/// confirmation line per success. Failures are collected per instance rather
/// than aborting the loop; any failure makes the whole run fail.
pub async fn apply_missing_tags(
    client: &Ec2Client,
    unmatched: &[String],
    key: &str,
    value: &str,
) -> Result<()> {
    println!(
        "{}",
        "#######################[Creating new tags]#######################".yellow()
    );

    let tags = [(key.to_string(), value.to_string())];
    let mut failed = Vec::new();
    for instance_id in unmatched {
        if let Err(err) = ec2::create_tags(client, instance_id, &tags).await {
            eprintln!("{} {err:#}", "error:".red());
            failed.push(instance_id.clone());
            continue;
        }
        let name = display_name(client, instance_id).await;
        println!(
            "Tag [{key}] | [{value}] created for instance {} ✅",
            name.green()
        );
    }

    if !failed.is_empty() {
        bail!(
            "failed to tag {} of {} instances: {}",
            failed.len(),
            unmatched.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

/// Name to show for an instance; falls back to the instance ID when the
/// lookup fails, so one unresolvable name doesn't stop the report.
async fn display_name(client: &Ec2Client, instance_id: &str) -> String {
    match ec2::instance_name_by_id(client, instance_id).await {
        Ok(name) => name,
        Err(err) => {
            eprintln!("{} {err:#}", "warning:".yellow());
            instance_id.to_string()
        }
    }
}

async fn resolve_names(client: &Ec2Client, instance_ids: &[String]) -> Vec<(String, Option<String>)> {
    let mut rows = Vec::with_capacity(instance_ids.len());
    for instance_id in instance_ids {
        let name = ec2::instance_name_by_id(client, instance_id).await.ok();
        rows.push((instance_id.clone(), name));
    }
    rows
}

fn partition_report(
    key: &str,
    value: &str,
    matched: &[(String, Option<String>)],
    unmatched: &[(String, Option<String>)],
) -> Value {
    let entries = |rows: &[(String, Option<String>)]| -> Vec<Value> {
        rows.iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect()
    };

    json!({
        "tag": { "key": key, "value": value },
        "matched": entries(matched),
        "unmatched": entries(unmatched),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_report_carries_ids_and_nullable_names() {
        let matched = vec![("i-2".to_string(), Some("b".to_string()))];
        let unmatched = vec![("i-1".to_string(), None)];

        let report = partition_report("env", "prod", &matched, &unmatched);
        assert_eq!(report["tag"]["key"], "env");
        assert_eq!(report["tag"]["value"], "prod");
        assert_eq!(report["matched"][0]["id"], "i-2");
        assert_eq!(report["matched"][0]["name"], "b");
        assert_eq!(report["unmatched"][0]["id"], "i-1");
        assert_eq!(report["unmatched"][0]["name"], Value::Null);
    }

    #[test]
    fn json_report_keeps_partition_order() {
        let matched = vec![
            ("i-5".to_string(), Some("e".to_string())),
            ("i-3".to_string(), Some("c".to_string())),
        ];

        let report = partition_report("env", "prod", &matched, &[]);
        assert_eq!(report["matched"][0]["id"], "i-5");
        assert_eq!(report["matched"][1]["id"], "i-3");
        assert_eq!(report["unmatched"].as_array().unwrap().len(), 0);
    }
}
