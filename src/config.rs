//! Command-line and environment configuration.
//!
//! Everything the process needs is resolved here once and handed down as
//! [`Settings`]; nothing below this module reads the environment.

use crate::consts::limits;
use clap::{Parser, Subcommand};
use std::fmt;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Maximum number of articles per search
    #[arg(long, default_value_t = limits::DEFAULT_RESULT_LIMIT, global = true)]
    pub limit: usize,

    /// Naver search API client id (enables the keyed source)
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true, global = true)]
    pub naver_client_id: Option<String>,

    /// Naver search API client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub naver_client_secret: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive keyword prompt (default)
    Console,
    /// Serve the search page and JSON API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
}

/// Keyed API id/secret pair. Both values are non-empty by construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// `None` unless both values are non-blank after trimming.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Option<Self> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = client_secret.into().trim().to_string();
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self { client_id, client_secret })
    }

    pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        Self::new(client_id?, client_secret?)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub limit: usize,
    pub credentials: Option<Credentials>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            limit: cli.limit,
            credentials: Credentials::from_parts(
                cli.naver_client_id.clone(),
                cli.naver_client_secret.clone(),
            ),
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Console)
    }
}

/// `host:port` as a socket address.
pub fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    format!("{}:{}", host, port).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_values() {
        assert!(Credentials::new("id", "secret").is_some());
        assert!(Credentials::new("", "secret").is_none());
        assert!(Credentials::new("id", "   ").is_none());
        assert!(Credentials::from_parts(Some("id".into()), None).is_none());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("my-id", "my-secret").unwrap();
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("my-id"));
        assert!(!shown.contains("my-secret"));
    }

    #[test]
    fn test_cli_defaults_to_console() {
        let cli = Cli::parse_from(["news_brief"]);
        assert_eq!(cli.command(), Command::Console);
        assert_eq!(cli.limit, limits::DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn test_cli_serve_flags() {
        let cli = Cli::parse_from(["news_brief", "serve", "--host", "127.0.0.1", "--port", "8080", "--limit", "3"]);
        assert_eq!(
            cli.command(),
            Command::Serve { host: "127.0.0.1".into(), port: 8080 }
        );
        assert_eq!(cli.limit, 3);
        let addr = bind_addr("127.0.0.1", 8080).unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(bind_addr("not a host", 8080).is_err());
    }

    #[test]
    fn test_settings_from_cli_flags() {
        let cli = Cli::parse_from([
            "news_brief",
            "--naver-client-id",
            "id",
            "--naver-client-secret",
            "secret",
        ]);
        let settings = Settings::from_cli(&cli);
        let creds = settings.credentials.unwrap();
        assert_eq!(creds.client_id(), "id");
        assert_eq!(creds.client_secret(), "secret");
    }
}
