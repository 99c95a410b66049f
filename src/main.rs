use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlistdash::{
    cli,
    config::{self, CollectorSettings, Credentials},
    error,
    spotify::SpotifyClient,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the playlist dashboard in the browser
    Serve(ServeOptions),

    /// Print the dashboard of a playlist in the terminal
    Show(ShowOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,

    /// Open the dashboard of this playlist link in the browser
    #[clap(long)]
    pub open: Option<String>,

    /// Show a notice when a playlist could only be collected partially
    #[clap(long)]
    pub warn_on_partial: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Shareable playlist link, e.g. https://open.spotify.com/playlist/<id>
    pub link: String,

    /// Warn when the playlist could only be collected partially
    #[clap(long)]
    pub warn_on_partial: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn connect() -> SpotifyClient {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => error!("Cannot start without Spotify credentials. Err: {}", e),
    };

    match SpotifyClient::connect(credentials) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    }
}

fn collector_settings(warn_on_partial: bool) -> CollectorSettings {
    let mut settings = CollectorSettings::from_env();
    settings.warn_on_partial |= warn_on_partial;
    settings
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            let addr = match opt.addr {
                Some(raw) => config::parse_server_addr(&raw),
                None => config::server_addr(),
            };
            let addr = match addr {
                Ok(addr) => addr,
                Err(e) => error!("Failed to parse server address: {}", e),
            };

            let client = connect();
            if let Err(e) = client.authenticate().await {
                error!("Spotify rejected the application credentials. Err: {}", e);
            }

            cli::serve(
                Arc::new(client),
                collector_settings(opt.warn_on_partial),
                addr,
                opt.open,
            )
            .await
        }
        Command::Show(opt) => {
            let client = connect();
            cli::show(&client, &opt.link, &collector_settings(opt.warn_on_partial)).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
