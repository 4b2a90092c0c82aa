use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use snipx_core::logging_facility::Profile;
use snipx_engine::commands::session::SessionPolicy;

pub const DEFAULT_DB_PATH: &str = ".snipx/store.db";

/// Database location, shared by every command
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    /// SQLite database file; created with its parent directory if missing
    ///
    /// Environment variable: `SNIPX_DB`
    #[arg(long, env = "SNIPX_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to listen on
    ///
    /// Environment variable: `SNIPX_ADDR`
    #[arg(long, env = "SNIPX_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: String,

    /// Environment variable: `SNIPX_LOG_FORMAT`
    #[arg(long, env = "SNIPX_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Sender address for creation notices
    ///
    /// Environment variable: `SNIPX_MAIL_FROM`
    #[arg(long, env = "SNIPX_MAIL_FROM", default_value = "noreply@snipx.local")]
    pub mail_from: String,

    /// Notices buffered before new ones are dropped
    ///
    /// Environment variable: `SNIPX_MAIL_QUEUE`
    #[arg(long, env = "SNIPX_MAIL_QUEUE", default_value_t = 64)]
    pub mail_queue: usize,

    /// Days a login session stays valid
    ///
    /// Environment variable: `SNIPX_SESSION_TTL`
    #[arg(long = "session-ttl", env = "SNIPX_SESSION_TTL", default_value_t = SessionPolicy::DEFAULT_TTL_DAYS)]
    pub session_ttl_days: i64,
}

/// Validated server settings
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub log_format: LogFormat,
    pub mail_from: String,
    pub mail_queue: usize,
    pub sessions: SessionPolicy,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = anyhow::Error;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        if args.mail_queue == 0 {
            bail!("SNIPX_MAIL_QUEUE must be greater than 0");
        }
        let mail_from = args.mail_from.trim().to_string();
        if mail_from.is_empty() {
            bail!("SNIPX_MAIL_FROM must not be empty");
        }
        if args.session_ttl_days <= 0 {
            bail!("SNIPX_SESSION_TTL must be greater than 0");
        }
        let ttl = chrono::Duration::try_days(args.session_ttl_days)
            .with_context(|| format!("SNIPX_SESSION_TTL '{}' is too large", args.session_ttl_days))?;
        let addr = args
            .addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid SNIPX_ADDR '{}'", args.addr))?;

        Ok(Self {
            db_path: args.db.db,
            addr,
            log_format: args.log_format,
            mail_from,
            mail_queue: args.mail_queue,
            sessions: SessionPolicy::new(ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            db: DbArgs {
                db: PathBuf::from(DEFAULT_DB_PATH),
            },
            addr: "127.0.0.1:8000".to_string(),
            log_format: LogFormat::Json,
            mail_from: " noreply@snipx.local ".to_string(),
            mail_queue: 64,
            session_ttl_days: 14,
        }
    }

    #[test]
    fn test_valid_args() {
        let config = ServeConfig::try_from(args()).unwrap();
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.mail_from, "noreply@snipx.local");
        assert_eq!(config.log_format.profile(), Profile::Production);
        assert_eq!(config.sessions, SessionPolicy::default());
    }

    #[test]
    fn test_zero_queue_rejected() {
        let err = ServeConfig::try_from(ServeArgs {
            mail_queue: 0,
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("SNIPX_MAIL_QUEUE"));
    }

    #[test]
    fn test_bad_addr_rejected() {
        let err = ServeConfig::try_from(ServeArgs {
            addr: "localhost".to_string(),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("SNIPX_ADDR"));
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        for days in [0, -3] {
            let err = ServeConfig::try_from(ServeArgs {
                session_ttl_days: days,
                ..args()
            })
            .unwrap_err();
            assert!(err.to_string().contains("SNIPX_SESSION_TTL"));
        }
        let config = ServeConfig::try_from(ServeArgs {
            session_ttl_days: 1,
            ..args()
        })
        .unwrap();
        assert_eq!(config.sessions.max_age_secs(), 86_400);
    }

    #[test]
    fn test_huge_session_ttl_rejected() {
        let err = ServeConfig::try_from(ServeArgs {
            session_ttl_days: i64::MAX,
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("SNIPX_SESSION_TTL"));
    }
}
