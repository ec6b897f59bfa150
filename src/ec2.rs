use anyhow::{anyhow, Context, Result};
use aws_sdk_ec2::types::{Instance, Tag};
use aws_sdk_ec2::Client as Ec2Client;

/// The fleet split against one tag pair: instance IDs that carry it and
/// instance IDs that are missing it, both in API-returned order.
#[derive(Debug, Default, PartialEq)]
pub struct TagPartition {
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

pub async fn fetch_instances(client: &Ec2Client) -> Result<Vec<Instance>> {
    let resp = client
        .describe_instances()
        .send()
        .await
        .context("DescribeInstances call failed")?;

    Ok(resp
        .reservations()
        .iter()
        .flat_map(|res| res.instances())
        .cloned()
        .collect())
}

/// True iff any tag pair equals the target pair. Exact, case-sensitive
/// equality on both key and value; an instance with no tags never matches.
pub fn has_tag_pair(instance: &Instance, key: &str, value: &str) -> bool {
    instance
        .tags()
        .iter()
        .any(|tag| tag.key() == Some(key) && tag.value() == Some(value))
}

pub fn partition_by_tag(instances: &[Instance], key: &str, value: &str) -> TagPartition {
    let mut partition = TagPartition::default();
    for instance in instances {
        // DescribeInstances should always populate the ID; skip if it doesn't.
        let Some(id) = instance.instance_id() else {
            continue;
        };
        if has_tag_pair(instance, key, value) {
            partition.matched.push(id.to_string());
        } else {
            partition.unmatched.push(id.to_string());
        }
    }
    partition
}

pub fn name_tag(instance: &Instance) -> Option<&str> {
    instance
        .tags()
        .iter()
        .find(|tag| tag.key() == Some("Name"))
        .and_then(|tag| tag.value())
}

/// Resolve the value of an instance's `Name` tag with a dedicated
/// DescribeInstances call.
pub async fn instance_name_by_id(client: &Ec2Client, instance_id: &str) -> Result<String> {
    let resp = client
        .describe_instances()
        .instance_ids(instance_id)
        .send()
        .await
        .with_context(|| format!("failed to describe instance {instance_id}"))?;

    let instance = resp
        .reservations()
        .first()
        .and_then(|res| res.instances().first())
        .ok_or_else(|| anyhow!("instance not found for ID: {instance_id}"))?;

    name_tag(instance)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("instance name not found for ID: {instance_id}"))
}

/// Create-or-replace the given tag pairs on one instance.
pub async fn create_tags(
    client: &Ec2Client,
    instance_id: &str,
    tags: &[(String, String)],
) -> Result<()> {
    let mut request = client.create_tags().resources(instance_id);
    for (key, value) in tags {
        request = request.tags(Tag::builder().key(key).value(value).build());
    }

    request
        .send()
        .await
        .with_context(|| format!("failed to create tags on instance {instance_id}"))?;
    Ok(())
}
