//! Resolve the display name and skin of a player.
//!
//! Players from old worlds are identified by their name, and their skin can
//! be fetched straight from the legacy skin server without any lookup.
//! Everyone else is identified by account UUID, which has to be exchanged for
//! a profile at the session server. Each call to
//! [`ProfileResolver::resolve`] makes at most one request and never retries.
//! The session server rate limits lookups of the same profile, callers
//! resolving many players should expect [`ProfileError::RateLimited`].
//!
//! ```no_run
//! use playerdat::profile::{ProfileError, ProfileResolver};
//! # use playerdat::Player;
//! # let player = Player::new("Alice", "Alice", None);
//!
//! let resolver = ProfileResolver::new().unwrap();
//! let (player, outcome) = resolver.apply(player);
//! match outcome {
//!     Ok(()) => println!("{:?}", player.skin_url()),
//!     Err(ProfileError::RateLimited) => println!("try again in a minute"),
//!     Err(e) => println!("{}", e),
//! }
//! ```

mod http;
mod payload;

use std::fmt::Display;
use std::time::Duration;

use log::debug;

use crate::Player;

pub use self::http::{HttpClient, HttpResponse, ReqwestClient};

/// The result of resolving a player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    /// Replacement display name. `None` keeps the player's current name.
    pub name: Option<String>,
    pub skin_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The session server does not know the UUID (HTTP 204).
    UnknownProfile,
    /// The session server refused the request, too many were made (HTTP 429).
    RateLimited,
    /// The request failed, or the response could not be understood.
    Failure(String),
}

impl ProfileError {
    /// Whether this is one of the conditions the session server reports on
    /// purpose, rather than a broken request or response.
    pub fn is_reportable(&self) -> bool {
        matches!(self, ProfileError::UnknownProfile | ProfileError::RateLimited)
    }
}

impl std::error::Error for ProfileError {}

impl Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::UnknownProfile => f.write_str("unrecognized UUID"),
            ProfileError::RateLimited => f.write_str(
                "too many requests: the session server allows one lookup per player per minute",
            ),
            ProfileError::Failure(msg) => write!(f, "profile resolution failed: {}", msg),
        }
    }
}

/// Where the resolver sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base URL of the session server, without a trailing slash.
    pub session_server: String,
    /// Base URL serving `/skin/<name>.png` for legacy accounts.
    pub skin_server: String,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            session_server: "https://sessionserver.mojang.com".into(),
            skin_server: "http://www.minecraft.net".into(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl ResolverConfig {
    pub fn profile_url(&self, uuid: &str) -> String {
        format!("{}/session/minecraft/profile/{}", self.session_server, uuid)
    }

    pub fn legacy_skin_url(&self, name: &str) -> String {
        format!("{}/skin/{}.png", self.skin_server, name)
    }
}

/// How a player's profile has to be looked up, decided once from its
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Legacy account, the name is the identifier.
    Offline { name: &'a str },
    /// Account UUID that must be resolved remotely.
    Online { uuid: &'a str },
}

impl<'a> Lookup<'a> {
    pub fn for_player(player: &'a Player) -> Self {
        match player.name() {
            Some(name) if name == player.uuid() => Lookup::Offline { name },
            _ => Lookup::Online {
                uuid: player.uuid(),
            },
        }
    }
}

pub struct ProfileResolver<C = ReqwestClient> {
    config: ResolverConfig,
    client: C,
}

impl ProfileResolver<ReqwestClient> {
    /// Resolver talking to the public session server.
    pub fn new() -> Result<Self, ProfileError> {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Result<Self, ProfileError> {
        let client = ReqwestClient::with_timeout(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl<C: HttpClient> ProfileResolver<C> {
    pub fn with_client(config: ResolverConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Work out the profile of a player. The player itself is not touched,
    /// apply the result with [`Player::with_profile`].
    pub fn resolve(&self, player: &Player) -> Result<Profile, ProfileError> {
        match Lookup::for_player(player) {
            Lookup::Offline { name } => Ok(Profile {
                name: None,
                skin_url: Some(self.config.legacy_skin_url(name)),
            }),
            Lookup::Online { uuid } => self.fetch(uuid),
        }
    }

    /// Resolve and apply in one step. On failure the player is handed back
    /// unchanged alongside the error.
    pub fn apply(&self, player: Player) -> (Player, Result<(), ProfileError>) {
        match self.resolve(&player) {
            Ok(profile) => (player.with_profile(profile), Ok(())),
            Err(e) => (player, Err(e)),
        }
    }

    fn fetch(&self, uuid: &str) -> Result<Profile, ProfileError> {
        let url = self.config.profile_url(uuid);
        debug!("requesting profile {}", url);

        let response = self.client.get(&url)?;
        match response.status {
            204 => Err(ProfileError::UnknownProfile),
            429 => Err(ProfileError::RateLimited),
            200..=299 => payload::parse_profile(&response.body),
            status => Err(ProfileError::Failure(format!(
                "HTTP {} from {}",
                status, url
            ))),
        }
    }
}
