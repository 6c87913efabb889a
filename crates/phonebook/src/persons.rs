use crate::directory::Directory;
use crate::prelude::{println, *};
use crate::store::SqliteStore;
use colored::Colorize;
use phonebook_core::{Contact, ContactInput};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, clap::Parser)]
#[command(name = "persons")]
#[command(about = "Manage the contacts of a SQLite phonebook")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file
    #[arg(
        long,
        env = "PHONEBOOK_DATABASE",
        default_value = "phonebook.db",
        global = true
    )]
    pub database: PathBuf,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all contacts
    #[clap(name = "list")]
    List(ListOptions),

    /// Add a contact
    #[clap(name = "add")]
    Add(AddOptions),

    /// Replace the name and number of a contact
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// Remove a contact
    #[clap(name = "remove")]
    Remove(RemoveOptions),

    /// Show how many contacts the phonebook holds
    #[clap(name = "info")]
    Info,
}

#[derive(Debug, clap::Args)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct AddOptions {
    /// Contact name (must be unique, ignoring case)
    name: String,

    /// Phone number
    number: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct UpdateOptions {
    /// Contact id
    id: String,

    /// New name
    name: String,

    /// New phone number
    number: String,
}

#[derive(Debug, clap::Args)]
pub struct RemoveOptions {
    /// Contact id
    id: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let store = SqliteStore::open(&app.database)
        .with_context(|| format!("Failed to open database {}", app.database.display()))?;

    if global.verbose {
        if let Some(path) = store.db_path() {
            println!("Database: {}", path.display());
            println!();
        }
    }

    let directory = Directory::new(Arc::new(store));

    match app.command {
        Commands::List(options) => list(&directory, options),
        Commands::Add(options) => add(&directory, options),
        Commands::Update(options) => update(&directory, options),
        Commands::Remove(options) => remove(&directory, options),
        Commands::Info => info(&directory),
    }
}

fn list(directory: &Directory, options: ListOptions) -> Result<()> {
    let contacts = directory.list()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&contacts)?);
        return Ok(());
    }

    if contacts.is_empty() {
        println!("{}", "Phonebook is empty".bright_black());
        return Ok(());
    }

    display_contacts(&contacts);
    Ok(())
}

fn add(directory: &Directory, options: AddOptions) -> Result<()> {
    let contact = directory
        .create(&ContactInput::new(options.name, options.number))
        .map_err(|e| eyre!("Failed to add contact: {e}"))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        println!("Added {} ({})", contact.name.green(), contact.id.cyan());
    }

    Ok(())
}

fn update(directory: &Directory, options: UpdateOptions) -> Result<()> {
    let contact = directory
        .update(&options.id, &ContactInput::new(options.name, options.number))
        .map_err(|e| eyre!("Failed to update contact: {e}"))?;

    println!(
        "Updated {}: {} {}",
        contact.id.cyan(),
        contact.name.green(),
        contact.number
    );

    Ok(())
}

fn remove(directory: &Directory, options: RemoveOptions) -> Result<()> {
    directory
        .delete(&options.id)
        .map_err(|e| eyre!("Failed to remove contact: {e}"))?;

    println!("Removed {}", options.id.cyan());
    Ok(())
}

fn info(directory: &Directory) -> Result<()> {
    let count = directory.count()?;
    println!("Phonebook has info for {} people", count.to_string().bold());
    Ok(())
}

/// Render contacts as a table.
fn display_contacts(contacts: &[Contact]) {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Number".bold().cyan()
    ]);

    for contact in contacts {
        table.add_row(prettytable::row![
            contact.id.bright_black().to_string(),
            contact.name,
            contact.number
        ]);
    }

    table.printstd();
}
