use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::extract::Field;
use crate::profile::Profile;
use crate::{parse, Document, Node};

pub const MAX_HEALTH: i32 = 20;
pub const MAX_FOOD: i32 = 20;
pub const MAX_AIR: i32 = 300;

/// The dimension a player was last in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
    End,
}

impl Dimension {
    /// Map the `Dimension` code stored in player files. Unknown codes are
    /// treated as the overworld.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Dimension::Overworld,
            1 => Dimension::End,
            -1 => Dimension::Nether,
            _ => Dimension::Overworld,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Block position of the bed a player last slept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpawnPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A stack of items in a player's inventory, including worn armour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: i16,
    pub damage: i16,
    pub count: i8,
    pub slot: i8,
}

impl Item {
    /// Read an item from an inventory entry. All four fields must be present
    /// with the right tags, otherwise there is no item.
    pub fn from_node(node: &Node) -> Option<Item> {
        let node = Some(node);

        Some(Item {
            id: node.child("id").short()?,
            damage: node.child("Damage").short()?,
            count: node.child("Count").byte()?,
            slot: node.child("Slot").byte()?,
        })
    }
}

/// Who a player file belongs to, derived from the name of the file.
///
/// Old worlds name player files after the player, eg `Notch.dat`. Newer
/// worlds use the hyphenated account UUID, in which case the display name is
/// unknown until the profile is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uuid: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn from_file_name(file_name: &str) -> Self {
        let token = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        if token.contains('-') {
            Identity {
                uuid: token.replace('-', ""),
                name: None,
            }
        } else {
            Identity {
                name: Some(token.clone()),
                uuid: token,
            }
        }
    }

    /// Legacy accounts use their name as their identifier.
    pub fn is_legacy(&self) -> bool {
        self.name.as_deref() == Some(self.uuid.as_str())
    }
}

/// A player decoded from a player file.
///
/// Only the name and skin ever change after decoding, and only through
/// [`Player::with_profile`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    name: Option<String>,
    uuid: String,
    skin_url: Option<String>,

    dimension: Dimension,
    position: Position,
    spawn: Option<SpawnPosition>,

    health: i32,
    food: i32,
    air: i32,

    xp_level: i32,
    xp_total: i32,

    inventory: Vec<Item>,
}

impl Player {
    /// A player with known identity and no decoded state.
    pub fn new(name: impl Into<String>, uuid: impl Into<String>, skin_url: Option<String>) -> Self {
        let mut player = Self::blank(Identity {
            uuid: uuid.into(),
            name: Some(name.into()),
        });
        player.skin_url = skin_url;
        player
    }

    /// Parse and decode a player file. The file may be GZip compressed.
    /// `file_name` is the name of the file, which identifies the player.
    pub fn from_reader<R: Read>(file_name: &str, reader: R) -> Result<Self> {
        debug!("loading player from {}", file_name);
        let doc = parse::from_reader_maybe_gzip(reader)?;
        Ok(Self::from_document(file_name, &doc))
    }

    /// Decode an already parsed player file.
    pub fn from_document(file_name: &str, doc: &Document) -> Self {
        Self::decode(Identity::from_file_name(file_name), &doc.root)
    }

    /// Decode a player compound found elsewhere, such as the `Player` tag of a
    /// single player world's `level.dat`. The name doubles as the identifier.
    pub fn from_compound(name: impl Into<String>, root: &Node) -> Self {
        let name = name.into();
        Self::decode(
            Identity {
                uuid: name.clone(),
                name: Some(name),
            },
            root,
        )
    }

    /// Apply a resolved profile, returning the updated player.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        if let Some(name) = profile.name {
            self.name = Some(name);
        }
        self.skin_url = profile.skin_url;
        self
    }

    fn blank(identity: Identity) -> Self {
        Self {
            name: identity.name,
            uuid: identity.uuid,
            skin_url: None,
            dimension: Dimension::default(),
            position: Position::default(),
            spawn: None,
            health: 0,
            food: 0,
            air: 0,
            xp_level: 0,
            xp_total: 0,
            inventory: vec![],
        }
    }

    fn decode(identity: Identity, root: &Node) -> Self {
        let mut player = Self::blank(identity);
        let root = Some(root);

        player.health = root.child("Health").short_or(0).into();
        player.air = root.child("Air").short_or(0).into();
        player.food = root.child("foodLevel").int_or(0);

        player.dimension = Dimension::from_code(root.child("Dimension").int_or(0));

        let pos = root.child("Pos");
        if let (Some(x), Some(y), Some(z)) = (
            pos.indexed(0).double(),
            pos.indexed(1).double(),
            pos.indexed(2).double(),
        ) {
            player.position = Position { x, y, z };
        }

        if let (Some(x), Some(y), Some(z)) = (
            root.child("SpawnX").int(),
            root.child("SpawnY").int(),
            root.child("SpawnZ").int(),
        ) {
            player.spawn = Some(SpawnPosition { x, y, z });
        }

        player.xp_level = root.child("XpLevel").int_or(0);
        player.xp_total = root.child("XpTotal").int_or(0);

        // Both carried and worn items.
        if let Some(entries) = root.child("Inventory").and_then(Node::as_list) {
            player.inventory = entries.iter().filter_map(Item::from_node).collect();

            let skipped = entries.len() - player.inventory.len();
            if skipped > 0 {
                debug!("{}: skipped {} malformed inventory entries", player.uuid, skipped);
            }
        }

        player
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn skin_url(&self) -> Option<&str> {
        self.skin_url.as_deref()
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// May be `None` if the player has not slept in a bed yet.
    pub fn spawn_position(&self) -> Option<SpawnPosition> {
        self.spawn
    }

    /// Health, 0 to [`MAX_HEALTH`].
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Food level, 0 to [`MAX_FOOD`].
    pub fn food(&self) -> i32 {
        self.food
    }

    /// Remaining air, 0 to [`MAX_AIR`].
    pub fn air(&self) -> i32 {
        self.air
    }

    pub fn xp_level(&self) -> i32 {
        self.xp_level
    }

    pub fn xp_total(&self) -> i32 {
        self.xp_total
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn identity(&self) -> Identity {
        Identity {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
        }
    }
}
