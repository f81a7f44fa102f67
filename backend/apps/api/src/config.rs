//! Server Configuration
//!
//! Environment variables override the per-crate defaults. A variable that is
//! set but does not parse stops startup.

use anyhow::Context;
use platform::rate_limit::RateLimitConfig;
use schedule::ScheduleConfig;
use session::SessionConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use vision::VisionConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session: SessionConfig,
    pub vision: VisionConfig,
    pub schedule: ScheduleConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let session_defaults = SessionConfig::default();
        let sweep = env.millis_or(
            "SESSION_SWEEP_INTERVAL_MS",
            session_defaults.sweep_interval.unwrap_or(Duration::ZERO),
        )?;
        let session = SessionConfig {
            session_timeout: env.millis_or("SESSION_TIMEOUT_MS", session_defaults.session_timeout)?,
            max_sessions: env.parse_or("MAX_SESSIONS", session_defaults.max_sessions)?,
            heartbeat_interval: env
                .millis_or("HEARTBEAT_INTERVAL_MS", session_defaults.heartbeat_interval)?,
            sweep_interval: (!sweep.is_zero()).then_some(sweep),
        };

        let vision_defaults = VisionConfig::default();
        let vision = VisionConfig {
            api_base_url: env
                .string("VISION_API_URL")
                .unwrap_or(vision_defaults.api_base_url),
            api_key: env.string("VISION_API_KEY"),
            default_model: env
                .string("VISION_MODEL")
                .unwrap_or(vision_defaults.default_model),
            default_prompt: vision_defaults.default_prompt,
            max_tokens: env.parse_or("VISION_MAX_TOKENS", vision_defaults.max_tokens)?,
            request_timeout: env.millis_or("VISION_TIMEOUT_MS", vision_defaults.request_timeout)?,
            rate_limit: RateLimitConfig::new(
                env.parse_or("VISION_RATE_LIMIT", vision_defaults.rate_limit.max_requests)?,
                env.millis_or("VISION_RATE_WINDOW_MS", vision_defaults.rate_limit.window)?,
            ),
            max_body_bytes: env.parse_or("VISION_MAX_BODY_BYTES", vision_defaults.max_body_bytes)?,
        };

        let schedule_defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            path: env
                .string("SCHEDULE_PATH")
                .map(PathBuf::from)
                .unwrap_or(schedule_defaults.path),
            ..schedule_defaults
        };

        Ok(Self {
            bind_addr: env.parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            session,
            vision,
            schedule,
        })
    }
}

/// One year
const MAX_MILLIS: i64 = 365 * 24 * 60 * 60 * 1000;

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Set and non-blank
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.string(name) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
            None => Ok(default),
        }
    }

    /// Milliseconds; must fit the signed epoch-ms arithmetic of the stores
    fn millis_or(&self, name: &str, default: Duration) -> anyhow::Result<Duration> {
        let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
        let ms: u64 = self.parse_or(name, default_ms)?;
        i64::try_from(ms)
            .ok()
            .filter(|&ms| ms <= MAX_MILLIS)
            .with_context(|| format!("{} is out of range: {} (max {})", name, ms, MAX_MILLIS))?;
        Ok(Duration::from_millis(ms))
    }
}
