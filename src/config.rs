use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::{
    error::{config::ConfigError, AppError},
    model::{
        calendar::{BloodMoonChannel, CalendarAnchor},
        encounter::Village,
    },
};

const DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_CLEANUP_SCHEDULE: &str = "0 0 5 * * *";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub events: EventConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let lookup = |name: &str| std::env::var(name).ok();

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            discord_bot_token: required(&lookup, "DISCORD_BOT_TOKEN")?,
            events: EventConfig::from_lookup(lookup)?,
        })
    }
}

/// Settings for the Blood Moon detector, the raid trigger and the tick loop.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Villages eligible for automated raids.
    pub villages: Vec<Village>,
    /// Channels whose messages never count toward raid activity.
    pub excluded_channel_ids: HashSet<u64>,
    /// Minimum server-wide messages inside the window for a raid.
    pub message_threshold: usize,
    /// Minimum distinct authors inside the window for a raid.
    pub min_unique_users: usize,
    pub activity_window: chrono::Duration,
    pub raid_cooldown: chrono::Duration,
    pub min_monster_tier: i32,
    pub blood_moon_anchors: Vec<CalendarAnchor>,
    pub blood_moon_channels: Vec<BloodMoonChannel>,
    /// Local hour (0-23) at which Blood Moon entry and exit take effect.
    pub activation_hour: u32,
    pub timezone: Tz,
    pub tick_interval: Duration,
    /// Upper bound for one detector's work within a tick.
    pub tick_timeout: Duration,
    /// Age after which announcement records are swept.
    pub announcement_retention: chrono::Duration,
    /// Cron expression (with seconds) for the announcement retention sweep.
    pub cleanup_schedule: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            villages: Vec::new(),
            excluded_channel_ids: HashSet::new(),
            message_threshold: 100,
            min_unique_users: 4,
            activity_window: chrono::Duration::minutes(30),
            raid_cooldown: chrono::Duration::minutes(240),
            min_monster_tier: 5,
            blood_moon_anchors: Vec::new(),
            blood_moon_channels: Vec::new(),
            activation_hour: 20,
            timezone: chrono_tz::America::New_York,
            tick_interval: Duration::from_secs(60),
            tick_timeout: Duration::from_secs(45),
            announcement_retention: chrono::Duration::days(30),
            cleanup_schedule: DEFAULT_CLEANUP_SCHEDULE.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct VillageEntry {
    name: String,
    region: String,
    #[serde(default)]
    channel_id: Option<String>,
}

#[derive(Deserialize)]
struct BloodMoonChannelEntry {
    channel_id: String,
    active_name: String,
    default_name: String,
}

impl EventConfig {
    /// Builds the event configuration from a variable lookup.
    ///
    /// Unset numeric and timing variables fall back to `EventConfig::default()`.
    /// An empty anchor or village list is accepted here; the detectors report it as a
    /// tick-local configuration error so the rest of the bot keeps running.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(EventConfig)` - Parsed configuration
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable is set but malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EventConfig::default();

        let villages = match lookup("VILLAGES") {
            Some(raw) => parse_villages(&raw)?,
            None => Vec::new(),
        };

        let blood_moon_channels = match lookup("BLOOD_MOON_CHANNELS") {
            Some(raw) => parse_blood_moon_channels(&raw)?,
            None => Vec::new(),
        };

        let blood_moon_anchors = match lookup("BLOOD_MOON_ANCHORS") {
            Some(raw) => parse_anchors(&raw)?,
            None => Vec::new(),
        };

        let excluded_channel_ids = match lookup("EXCLUDED_CHANNEL_IDS") {
            Some(raw) => parse_id_list("EXCLUDED_CHANNEL_IDS", &raw)?,
            None => HashSet::new(),
        };

        let timezone = match lookup("EVENT_TIMEZONE") {
            Some(raw) => raw.trim().parse::<Tz>().map_err(|e| invalid("EVENT_TIMEZONE", &raw, e))?,
            None => DEFAULT_TIMEZONE
                .parse::<Tz>()
                .map_err(|e| invalid("EVENT_TIMEZONE", DEFAULT_TIMEZONE, e))?,
        };

        let activation_hour = parse_or(&lookup, "BLOOD_MOON_HOUR", defaults.activation_hour)?;
        if activation_hour > 23 {
            return Err(invalid(
                "BLOOD_MOON_HOUR",
                &activation_hour.to_string(),
                "hour must be between 0 and 23",
            ));
        }

        let window_minutes = parse_or(
            &lookup,
            "ACTIVITY_WINDOW_MINUTES",
            defaults.activity_window.num_minutes(),
        )?;
        let cooldown_minutes = parse_or(
            &lookup,
            "RAID_COOLDOWN_MINUTES",
            defaults.raid_cooldown.num_minutes(),
        )?;
        let retention_days = parse_or(
            &lookup,
            "ANNOUNCEMENT_RETENTION_DAYS",
            defaults.announcement_retention.num_days(),
        )?;
        let tick_seconds = parse_or(&lookup, "EVENT_TICK_SECONDS", defaults.tick_interval.as_secs())?;
        let timeout_seconds = parse_or(
            &lookup,
            "EVENT_TICK_TIMEOUT_SECONDS",
            defaults.tick_timeout.as_secs(),
        )?;

        if window_minutes <= 0 {
            return Err(invalid(
                "ACTIVITY_WINDOW_MINUTES",
                &window_minutes.to_string(),
                "window must be positive",
            ));
        }
        if tick_seconds == 0 {
            return Err(invalid("EVENT_TICK_SECONDS", "0", "interval must be positive"));
        }
        if timeout_seconds == 0 {
            return Err(invalid(
                "EVENT_TICK_TIMEOUT_SECONDS",
                "0",
                "timeout must be positive",
            ));
        }

        let activity_window = minutes("ACTIVITY_WINDOW_MINUTES", window_minutes)?;
        let raid_cooldown = minutes("RAID_COOLDOWN_MINUTES", cooldown_minutes.max(0))?;
        let announcement_retention = chrono::Duration::try_days(retention_days.max(0))
            .ok_or_else(|| {
                invalid(
                    "ANNOUNCEMENT_RETENTION_DAYS",
                    &retention_days.to_string(),
                    "out of range",
                )
            })?;

        Ok(Self {
            villages,
            excluded_channel_ids,
            message_threshold: parse_or(&lookup, "RAID_MESSAGE_THRESHOLD", defaults.message_threshold)?,
            min_unique_users: parse_or(&lookup, "RAID_MIN_UNIQUE_USERS", defaults.min_unique_users)?,
            activity_window,
            raid_cooldown,
            min_monster_tier: parse_or(&lookup, "RAID_MIN_MONSTER_TIER", defaults.min_monster_tier)?,
            blood_moon_anchors,
            blood_moon_channels,
            activation_hour,
            timezone,
            tick_interval: Duration::from_secs(tick_seconds),
            tick_timeout: Duration::from_secs(timeout_seconds),
            announcement_retention,
            cleanup_schedule: lookup("ANNOUNCEMENT_CLEANUP_SCHEDULE")
                .unwrap_or(defaults.cleanup_schedule),
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| invalid(name, &raw, e)),
        None => Ok(default),
    }
}

fn invalid(name: &str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn minutes(name: &str, value: i64) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::try_minutes(value)
        .ok_or_else(|| invalid(name, &value.to_string(), "out of range"))
}

fn parse_id(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|e| invalid(name, raw, e))
}

/// Parses a comma-separated list of Discord IDs, ignoring blank entries.
fn parse_id_list(name: &str, raw: &str) -> Result<HashSet<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_id(name, entry))
        .collect()
}

/// Parses a comma-separated list of `MM-DD` anchors.
fn parse_anchors(raw: &str) -> Result<Vec<CalendarAnchor>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<CalendarAnchor>()
                .map_err(|e| invalid("BLOOD_MOON_ANCHORS", raw, e))
        })
        .collect()
}

/// Parses the `VILLAGES` JSON array.
///
/// Example: `[{"name":"Rudania","region":"Eldin","channel_id":"123"}]`
fn parse_villages(raw: &str) -> Result<Vec<Village>, ConfigError> {
    let entries: Vec<VillageEntry> =
        serde_json::from_str(raw).map_err(|e| invalid("VILLAGES", raw, e))?;

    entries
        .into_iter()
        .map(|entry| {
            let channel_id = entry
                .channel_id
                .as_deref()
                .map(|id| parse_id("VILLAGES", id))
                .transpose()?;

            Ok(Village {
                name: entry.name,
                region: entry.region,
                channel_id,
            })
        })
        .collect()
}

/// Parses the `BLOOD_MOON_CHANNELS` JSON array.
///
/// Example: `[{"channel_id":"123","active_name":"🔴blood-moon","default_name":"town-square"}]`
fn parse_blood_moon_channels(raw: &str) -> Result<Vec<BloodMoonChannel>, ConfigError> {
    let entries: Vec<BloodMoonChannelEntry> =
        serde_json::from_str(raw).map_err(|e| invalid("BLOOD_MOON_CHANNELS", raw, e))?;

    entries
        .into_iter()
        .map(|entry| {
            Ok(BloodMoonChannel {
                channel_id: parse_id("BLOOD_MOON_CHANNELS", &entry.channel_id)?,
                active_name: entry.active_name,
                default_name: entry.default_name,
            })
        })
        .collect()
}
