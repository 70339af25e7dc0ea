//! The JSON documents returned by the session server.
//!
//! The profile carries a list of properties. The first holds a base64 string
//! which is itself a JSON document describing the player's textures:
//!
//! ```json
//! { "name": "Alice", "properties": [ { "name": "textures", "value": "eyJ0ZXh0dXJlcyI6e319" } ] }
//! ```

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::Deserialize;

use super::{Profile, ProfileError};

/// Standard alphabet, with or without trailing `=` padding.
const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Deserialize, Debug)]
struct SessionProfile {
    name: String,
    properties: Vec<Property>,
}

#[derive(Deserialize, Debug)]
struct Property {
    value: String,
}

#[derive(Deserialize, Debug)]
struct TexturesPayload {
    textures: Textures,
}

#[derive(Deserialize, Debug)]
struct Textures {
    #[serde(rename = "SKIN")]
    skin: Option<Texture>,
}

#[derive(Deserialize, Debug)]
struct Texture {
    url: String,
}

/// Turn a session server response body into a profile. Any problem with
/// either the outer or the embedded document fails the whole profile.
pub(crate) fn parse_profile(body: &[u8]) -> Result<Profile, ProfileError> {
    let profile: SessionProfile = serde_json::from_slice(body)
        .map_err(|e| ProfileError::Failure(format!("invalid profile: {}", e)))?;

    let property = profile
        .properties
        .first()
        .ok_or_else(|| ProfileError::Failure("profile has no properties".into()))?;

    // Line breaks may be folded into the value.
    let encoded: String = property.value.split_ascii_whitespace().collect();
    let decoded = BASE64_ENGINE
        .decode(encoded)
        .map_err(|e| ProfileError::Failure(format!("invalid textures encoding: {}", e)))?;

    let payload: TexturesPayload = serde_json::from_slice(&decoded)
        .map_err(|e| ProfileError::Failure(format!("invalid textures: {}", e)))?;

    Ok(Profile {
        name: Some(profile.name),
        skin_url: payload.textures.skin.map(|skin| skin.url),
    })
}
