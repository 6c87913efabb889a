use crate::store::Backend;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "PHONEBOOK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Storage backend
    #[arg(long, env = "PHONEBOOK_STORE", value_enum, default_value_t = Backend::Memory)]
    pub store: Backend,

    /// SQLite database file (only used with --store sqlite)
    #[arg(long, env = "PHONEBOOK_DATABASE", default_value = "phonebook.db")]
    pub database: PathBuf,

    /// Start the memory backend without the sample contacts
    #[arg(long)]
    pub no_seed: bool,
}
