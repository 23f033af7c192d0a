use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the environment variable
        name: String,
        /// The raw value that failed to parse
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// No Blood Moon anchor dates are configured.
    ///
    /// Raised per tick by the calendar detector; the tick is skipped.
    #[error("No Blood Moon anchor dates are configured")]
    EmptyAnchorList,

    /// No villages are configured for raid encounters.
    #[error("No villages are configured for raid encounters")]
    NoVillages,

    /// A village was selected for a raid but has no channel mapped to it.
    #[error("Village '{0}' has no raid channel configured")]
    MissingVillageChannel(String),
}
