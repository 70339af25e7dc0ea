//! playerdat decodes the per-player `.dat` files that *Minecraft: Java
//! Edition* keeps in a world's `players`/`playerdata` directory, and resolves
//! the display name and skin of the player they belong to.
//!
//! * For the raw NBT tree see [`Node`] and the [`parse`] module.
//! * For defaulting, type-checked field access see [`extract`].
//! * For the decoded player see [`Player`].
//! * For name and skin lookup see [`profile`].
//!
//! # Quick example
//!
//! ```no_run
//! use playerdat::profile::ProfileResolver;
//! use playerdat::Player;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = std::fs::File::open("069a79f4-44e9-4726-a5be-fca90e38aaf5.dat")?;
//!
//! // Player files are GZip compressed, `from_reader` handles that.
//! let player = Player::from_reader("069a79f4-44e9-4726-a5be-fca90e38aaf5.dat", file)?;
//! println!("{:?} is in the {:?}", player.uuid(), player.dimension());
//!
//! let resolver = ProfileResolver::new()?;
//! let profile = resolver.resolve(&player)?;
//! let player = player.with_profile(profile);
//!
//! println!("{:?} wears {:?}", player.name(), player.skin_url());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod parse;
pub mod profile;

mod node;
mod player;

pub use node::*;
pub use player::*;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
