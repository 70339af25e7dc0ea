use std::sync::Mutex;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use serde_json::json;

use crate::profile::{
    HttpClient, HttpResponse, Lookup, Profile, ProfileError, ProfileResolver, ResolverConfig,
};
use crate::Player;

const UUID: &str = "069a79f444e94726a5befca90e38aaf5";

/// Mock HTTP client that records every requested URL.
struct MockHttpClient {
    response: Result<HttpResponse, ProfileError>,
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    fn new(response: Result<HttpResponse, ProfileError>) -> Self {
        Self {
            response,
            requests: Mutex::new(vec![]),
        }
    }

    fn status(status: u16) -> Self {
        Self::new(Ok(HttpResponse {
            status,
            body: vec![],
        }))
    }

    fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Ok(HttpResponse {
            status: 200,
            body: body.into(),
        }))
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, ProfileError> {
        self.requests.lock().unwrap().push(url.to_owned());
        self.response.clone()
    }
}

impl HttpClient for &MockHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, ProfileError> {
        (*self).get(url)
    }
}

fn resolver(client: &MockHttpClient) -> ProfileResolver<&MockHttpClient> {
    ProfileResolver::with_client(ResolverConfig::default(), client)
}

fn session_body(name: &str, textures: serde_json::Value) -> Vec<u8> {
    let value = BASE64_ENGINE.encode(textures.to_string());
    json!({
        "id": UUID,
        "name": name,
        "properties": [ { "name": "textures", "value": value } ],
    })
    .to_string()
    .into_bytes()
}

fn unnamed_player() -> Player {
    let doc = crate::parse::from_bytes(&[10, 0, 0, 0]).unwrap();
    Player::from_document("069a79f4-44e9-4726-a5be-fca90e38aaf5.dat", &doc)
}

#[test]
fn lookup_branches() {
    let legacy = Player::new("Notch", "Notch", None);
    let online = unnamed_player();
    let renamed = Player::new("Alice", UUID, None);

    assert_eq!(Lookup::for_player(&legacy), Lookup::Offline { name: "Notch" });
    assert_eq!(Lookup::for_player(&online), Lookup::Online { uuid: UUID });
    assert_eq!(Lookup::for_player(&renamed), Lookup::Online { uuid: UUID });
}

#[test]
fn offline_never_calls_network() {
    let client = MockHttpClient::status(500);
    let player = Player::new("Notch", "Notch", None);

    let (player, outcome) = resolver(&client).apply(player);

    assert_eq!(outcome, Ok(()));
    assert!(client.requests().is_empty());
    assert_eq!(player.name(), Some("Notch"));
    assert_eq!(
        player.skin_url(),
        Some("http://www.minecraft.net/skin/Notch.png")
    );
}

#[test]
fn offline_uses_configured_skin_server() {
    let client = MockHttpClient::status(500);
    let config = ResolverConfig {
        skin_server: "http://localhost:8080".into(),
        ..ResolverConfig::default()
    };
    let resolver = ProfileResolver::with_client(config, &client);

    let profile = resolver
        .resolve(&Player::new("jeb_", "jeb_", None))
        .unwrap();

    assert_eq!(
        profile,
        Profile {
            name: None,
            skin_url: Some("http://localhost:8080/skin/jeb_.png".into()),
        }
    );
}

#[test]
fn online_requests_profile_by_uuid() {
    let client = MockHttpClient::ok(session_body("Alice", json!({ "textures": {} })));

    resolver(&client).resolve(&unnamed_player()).unwrap();

    assert_eq!(
        client.requests(),
        vec![format!(
            "https://sessionserver.mojang.com/session/minecraft/profile/{}",
            UUID
        )]
    );
}

#[test]
fn unknown_profile() {
    let client = MockHttpClient::status(204);
    let player = unnamed_player();

    let (after, outcome) = resolver(&client).apply(player.clone());

    assert_eq!(outcome, Err(ProfileError::UnknownProfile));
    assert_eq!(after, player);
    assert_eq!(after.name(), None);
    assert_eq!(after.skin_url(), None);
    assert_eq!(client.requests().len(), 1);
}

#[test]
fn rate_limited() {
    let client = MockHttpClient::status(429);
    let player = Player::new("Alice", UUID, Some("http://old".into()));

    let (after, outcome) = resolver(&client).apply(player.clone());

    assert_eq!(outcome, Err(ProfileError::RateLimited));
    assert!(outcome.unwrap_err().is_reportable());
    assert_eq!(after, player);
    assert_eq!(client.requests().len(), 1);
}

#[test]
fn other_status_is_failure() {
    for status in [301, 404, 500, 503] {
        let client = MockHttpClient::status(status);
        let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();

        assert!(matches!(err, ProfileError::Failure(_)), "{}: {:?}", status, err);
        assert!(!err.is_reportable());
    }
}

#[test]
fn transport_error_is_failure() {
    let client = MockHttpClient::new(Err(ProfileError::Failure("connection refused".into())));
    let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();

    assert_eq!(err, ProfileError::Failure("connection refused".into()));
}

#[test]
fn name_without_skin() {
    let client = MockHttpClient::ok(session_body("Alice", json!({ "textures": {} })));

    let (player, outcome) = resolver(&client).apply(unnamed_player());

    assert_eq!(outcome, Ok(()));
    assert_eq!(player.name(), Some("Alice"));
    assert_eq!(player.skin_url(), None);
}

#[test]
fn name_and_skin() {
    let textures = json!({
        "timestamp": 1,
        "profileId": UUID,
        "textures": {
            "SKIN": { "url": "http://textures.minecraft.net/texture/abc" },
            "CAPE": { "url": "http://textures.minecraft.net/texture/def" },
        },
    });
    let client = MockHttpClient::ok(session_body("Alice", textures));

    let profile = resolver(&client).resolve(&unnamed_player()).unwrap();

    assert_eq!(
        profile,
        Profile {
            name: Some("Alice".into()),
            skin_url: Some("http://textures.minecraft.net/texture/abc".into()),
        }
    );
}

#[test]
fn resolved_name_replaces_old_name() {
    let client = MockHttpClient::ok(session_body("NewName", json!({ "textures": {} })));
    let player = Player::new("OldName", UUID, Some("http://old".into()));

    let (player, outcome) = resolver(&client).apply(player);

    assert!(outcome.is_ok());
    assert_eq!(player.name(), Some("NewName"));
    assert_eq!(player.skin_url(), None);
}

#[test]
fn malformed_outer_json() {
    let client = MockHttpClient::ok("not json");
    let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();
    assert!(matches!(err, ProfileError::Failure(_)));
}

#[test]
fn missing_properties() {
    let body = json!({ "name": "Alice", "properties": [] }).to_string();
    let client = MockHttpClient::ok(body);

    let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();
    assert!(matches!(err, ProfileError::Failure(_)));
}

#[test]
fn bad_base64() {
    let body = json!({ "name": "Alice", "properties": [ { "value": "!!!" } ] }).to_string();
    let client = MockHttpClient::ok(body);

    let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();
    assert!(matches!(err, ProfileError::Failure(_)));
}

#[test]
fn partial_success_changes_nothing() {
    // Outer document is fine, the embedded one is not.
    let value = BASE64_ENGINE.encode("{ \"textures\": ");
    let body = json!({ "name": "Alice", "properties": [ { "value": value } ] }).to_string();
    let client = MockHttpClient::ok(body);
    let player = unnamed_player();

    let (after, outcome) = resolver(&client).apply(player.clone());

    assert!(matches!(outcome, Err(ProfileError::Failure(_))));
    assert_eq!(after, player);
    assert_eq!(after.name(), None);
}

fn body_with_value(value: &str) -> Vec<u8> {
    json!({ "name": "Alice", "properties": [ { "value": value } ] })
        .to_string()
        .into_bytes()
}

fn skin_textures() -> String {
    json!({ "textures": { "SKIN": { "url": "http://x/ab" } } }).to_string()
}

#[test]
fn unpadded_textures_value() {
    let padded = BASE64_ENGINE.encode(skin_textures());
    let unpadded = padded.trim_end_matches('=');
    assert_ne!(padded, unpadded);

    let client = MockHttpClient::ok(body_with_value(unpadded));
    let profile = resolver(&client).resolve(&unnamed_player()).unwrap();

    assert_eq!(profile.skin_url.as_deref(), Some("http://x/ab"));
}

#[test]
fn textures_value_with_line_breaks() {
    let encoded = BASE64_ENGINE.encode(skin_textures());
    let (head, tail) = encoded.split_at(16);
    let folded = format!("{}\r\n{}\n", head, tail);

    let client = MockHttpClient::ok(body_with_value(&folded));
    let profile = resolver(&client).resolve(&unnamed_player()).unwrap();

    assert_eq!(profile.name.as_deref(), Some("Alice"));
    assert_eq!(profile.skin_url.as_deref(), Some("http://x/ab"));
}

#[test]
fn textures_missing() {
    let client = MockHttpClient::ok(session_body("Alice", json!({ "other": 1 })));
    let err = resolver(&client).resolve(&unnamed_player()).unwrap_err();
    assert!(matches!(err, ProfileError::Failure(_)));
}

#[test]
fn default_config() {
    let config = ResolverConfig::default();

    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(
        config.profile_url("abc"),
        "https://sessionserver.mojang.com/session/minecraft/profile/abc"
    );
    assert_eq!(
        config.legacy_skin_url("Notch"),
        "http://www.minecraft.net/skin/Notch.png"
    );
}

#[test]
fn error_messages() {
    assert_eq!(ProfileError::UnknownProfile.to_string(), "unrecognized UUID");
    assert!(ProfileError::RateLimited.to_string().contains("too many requests"));
    assert_eq!(
        ProfileError::Failure("boom".into()).to_string(),
        "profile resolution failed: boom"
    );
}
