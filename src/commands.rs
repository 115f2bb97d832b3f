//! Subcommand implementations. Each one returns what the binary prints.

use crate::cli::Command;
use anyhow::Context;
use gin_client::extraction::ExtractionRequest;
use gin_client::{EntityClient, ExtractionClient};
use gin_core::config::Config;
use gin_core::store::AdminStores;
use gin_core::{Entity, Kind, NormalizedName};
use serde_json::Value;

/// Printable result of a subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| std::fmt::Error)?;
                writeln!(f, "{pretty}")
            }
            Output::Text(text) => f.write_str(text),
        }
    }
}

fn json(value: impl serde::Serialize) -> anyhow::Result<Output> {
    Ok(Output::Json(serde_json::to_value(value)?))
}

pub async fn run(command: Command, config: &Config) -> anyhow::Result<Output> {
    match command {
        Command::Entities => {
            let listing = EntityClient::from_config(config).list_entities().await;
            if listing.is_degraded() {
                tracing::warn!("entity backend unavailable, listing sample data");
            }
            json(listing)
        }

        Command::Entity { id } => {
            let record = EntityClient::from_config(config)
                .get_entity(&id)
                .await?
                .with_context(|| format!("entity not found: {id}"))?;
            Ok(Output::Json(Value::Object(record)))
        }

        Command::Create {
            id,
            major,
            minor,
            name,
            start_time,
        } => {
            let entity = Entity {
                id,
                kind: Kind::new(major, minor),
                created: chrono::Utc::now().to_rfc3339(),
                name: NormalizedName {
                    value: name,
                    start_time,
                    end_time: String::new(),
                },
                ..Entity::default()
            };
            let created = EntityClient::from_config(config)
                .create_entity(&entity)
                .await?;
            Ok(Output::Json(Value::Object(created)))
        }

        Command::Update {
            id,
            name,
            terminated,
        } => {
            let client = EntityClient::from_config(config);
            let record = client
                .get_entity(&id)
                .await?
                .with_context(|| format!("entity not found: {id}"))?;
            let mut entity = Entity::from_record(record).context("entity record is malformed")?;
            if let Some(name) = name {
                entity.name.value = name;
            }
            if let Some(terminated) = terminated {
                entity.terminated = terminated;
            }
            let updated = client.update_entity(&entity).await?;
            Ok(Output::Json(Value::Object(updated)))
        }

        Command::Upload { path } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document.pdf");
            let receipt = ExtractionClient::from_config(config)
                .upload(filename, &data)
                .await?;
            json(receipt)
        }

        Command::QuickStart => json(ExtractionClient::from_config(config).quick_setup().await?),

        Command::Extract {
            file_id,
            api_key,
            metadata,
            prompt,
            wait,
        } => {
            let metadata = match metadata {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => String::new(),
            };
            let client = ExtractionClient::from_config(config);
            let job = client
                .start_extraction(&ExtractionRequest {
                    file_id,
                    api_key,
                    metadata,
                    prompt,
                })
                .await?;
            if wait {
                json(client.wait_for_completion(&job.job_id).await)
            } else {
                json(job)
            }
        }

        Command::Results { job_id, wait } => {
            let client = ExtractionClient::from_config(config);
            if wait {
                return json(client.wait_for_completion(&job_id).await);
            }
            let results = client
                .results(&job_id)
                .await?
                .with_context(|| format!("job not found: {job_id}"))?;
            json(results)
        }

        Command::File { path } => {
            let text = ExtractionClient::from_config(config)
                .file_content(&path)
                .await?;
            Ok(Output::Text(text))
        }

        Command::Download { job_id, out } => {
            let archive = ExtractionClient::from_config(config)
                .download_all(&job_id)
                .await?;
            tokio::fs::write(&out, &archive)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            Ok(Output::Json(serde_json::json!({
                "job_id": job_id,
                "path": out.display().to_string(),
                "bytes": archive.len(),
            })))
        }

        Command::Metadata => json(AdminStores::seeded().metadata.list()),

        Command::Attributes { name } => {
            let stores = AdminStores::seeded();
            match name {
                Some(name) => json(stores.attributes.by_name(&name)),
                None => json(stores.attributes.list()),
            }
        }

        Command::Relationships => json(AdminStores::seeded().relationships.list()),
    }
}
