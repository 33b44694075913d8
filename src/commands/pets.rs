//! Inventory command handlers.
//!
//! Every handler checks the session gate before touching the network;
//! anonymous callers are told to log in and no request is built.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use prettytable::{cell, row, Table};

use crate::config::Config;
use crate::petstore::reconcile;
use crate::petstore::types::{Category, Pet, PetStatus, Tag};
use crate::petstore::PetstoreClient;
use crate::session::{FileStore, SessionGate};

/// Builds the API client after verifying the session.
fn authenticated_client(config: &Config) -> Result<PetstoreClient> {
    let gate = SessionGate::new(FileStore::new(config.session_store_path()?));
    if !gate.is_authenticated() {
        bail!("not logged in; run `blesspets login` first");
    }
    Ok(PetstoreClient::new(&config.api)?)
}

/// List the inventory, optionally restricted to one status and a search term.
pub async fn list(
    config: &Config,
    status: Option<PetStatus>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let client = authenticated_client(config)?;

    let pets = match status {
        Some(status) => client.find_by_status(status).await?,
        None => client.list_all().await?,
    };
    let pets = reconcile::filter_pets(&pets, None, search.as_deref());

    if json {
        println!("{}", serde_json::to_string_pretty(&pets)?);
        return Ok(());
    }

    if pets.is_empty() {
        println!("No pets found");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "NAME", "STATUS", "CATEGORY", "TAGS"]);
    for pet in &pets {
        table.add_row(row![
            pet.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            pet.name.as_deref().unwrap_or("-"),
            colorize_status(pet.status),
            pet.category
                .as_ref()
                .and_then(|c| c.name.as_deref())
                .unwrap_or("-"),
            tag_names(pet),
        ]);
    }
    table.printstd();
    println!("{} pets", pets.len());

    Ok(())
}

/// Show one pet.
pub async fn get(config: &Config, id: i64, json: bool) -> Result<()> {
    let client = authenticated_client(config)?;
    let pet = client.get_by_id(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pet)?);
        return Ok(());
    }

    println!("ID:       {}", pet.id.unwrap_or_default());
    println!("Name:     {}", pet.name.as_deref().unwrap_or("-"));
    println!("Status:   {}", colorize_status(pet.status));
    println!(
        "Category: {}",
        pet.category
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("-")
    );
    println!("Tags:     {}", tag_names(&pet));
    for url in &pet.photo_urls {
        println!("Photo:    {}", url);
    }

    Ok(())
}

/// Create a new record; the service assigns the id.
pub async fn add(
    config: &Config,
    name: String,
    status: PetStatus,
    photo_urls: Vec<String>,
    category: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let client = authenticated_client(config)?;

    let draft = Pet {
        id: None,
        name: Some(name),
        status,
        photo_urls,
        category: category.map(|name| Category {
            id: None,
            name: Some(name),
        }),
        tags: if tags.is_empty() {
            None
        } else {
            Some(
                tags.into_iter()
                    .map(|name| Tag {
                        id: None,
                        name: Some(name),
                    })
                    .collect(),
            )
        },
    };

    let created = client.create(&draft).await?;
    match created.id {
        Some(id) => println!("{} pet {}", "Created".green(), id),
        None => println!("{}", "Created pet (service returned no id)".yellow()),
    }

    Ok(())
}

/// Update an existing record: fetch it, apply the requested changes, and
/// send the whole record back.
pub async fn update(
    config: &Config,
    id: i64,
    name: Option<String>,
    status: Option<PetStatus>,
    photo_urls: Vec<String>,
    category: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let client = authenticated_client(config)?;

    let mut pet = client.get_by_id(id).await?;
    if let Some(name) = name {
        pet.name = Some(name);
    }
    if let Some(status) = status {
        pet.status = status;
    }
    if !photo_urls.is_empty() {
        pet.photo_urls = photo_urls;
    }
    if let Some(name) = category {
        pet.category = Some(Category {
            id: None,
            name: Some(name),
        });
    }
    if !tags.is_empty() {
        pet.tags = Some(
            tags.into_iter()
                .map(|name| Tag {
                    id: None,
                    name: Some(name),
                })
                .collect(),
        );
    }

    client.update(&pet).await?;
    println!("{} pet {}", "Updated".green(), id);

    Ok(())
}

/// Delete a record.
pub async fn delete(config: &Config, id: i64) -> Result<()> {
    let client = authenticated_client(config)?;
    client.delete_by_id(id).await?;
    println!("{} pet {}", "Deleted".green(), id);
    Ok(())
}

/// Upload an image file for a record.
pub async fn upload_image(config: &Config, id: i64, file: &Path) -> Result<()> {
    let client = authenticated_client(config)?;

    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin");

    let response = client.upload_image(id, file_name, bytes).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn colorize_status(status: PetStatus) -> String {
    match status {
        PetStatus::Available => status.to_string().green().to_string(),
        PetStatus::Pending => status.to_string().yellow().to_string(),
        PetStatus::Sold => status.to_string().red().to_string(),
    }
}

fn tag_names(pet: &Pet) -> String {
    let names: Vec<&str> = pet
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|t| t.name.as_deref())
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
