use crate::prelude::*;
use clap::Parser;

mod directory;
mod error;
mod persons;
mod prelude;
mod server;
mod store;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Phonebook REST service and contact administration"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PHONEBOOK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Run the HTTP service
    Serve(crate::server::ServeOptions),

    /// Manage contacts in a SQLite phonebook
    Persons(crate::persons::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Persons(sub_app) => crate::persons::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
