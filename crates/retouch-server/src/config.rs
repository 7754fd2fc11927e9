//! Server configuration.
//!
//! Every option can be given as a flag or through the environment, so the
//! server runs unchanged in a container that only sets `PORT`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_PORT: u16 = 7860;

/// Largest accepted request body (32 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Idle time after which a session is dropped (one hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Retouch Server - browser photo editor backend
#[derive(Parser, Debug, Clone)]
#[command(name = "retouch-server")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for prepared downloads (system temp dir if unset)
    #[arg(long, env = "RETOUCH_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[arg(
        long,
        env = "RETOUCH_MAX_UPLOAD_BYTES",
        default_value_t = DEFAULT_MAX_UPLOAD_BYTES
    )]
    pub max_upload_bytes: usize,

    /// Seconds a session may sit unused before it is dropped
    #[arg(
        long,
        env = "RETOUCH_SESSION_TTL_SECS",
        default_value_t = DEFAULT_SESSION_TTL_SECS
    )]
    pub session_ttl_secs: u64,

    /// Log output format
    #[arg(long, env = "RETOUCH_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            download_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            log_format: LogFormat::Text,
        }
    }
}
