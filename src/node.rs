use std::collections::HashMap;

use crate::Tag;

/// Node is one complete NBT value, owning its data. Compounds and lists are
/// recursively parsed.
///
/// Lists remember the tag of their elements, so an empty list of doubles is
/// still distinguishable from an empty list of compounds. The parser only
/// ever produces lists whose elements all match that tag.
///
/// There is no variant for [`Tag::End`]. It only terminates compounds and
/// marks the element type of empty lists, it is never a value.
///
/// ```
/// use playerdat::Node;
/// # use playerdat::error::Result;
/// #
/// # fn main() -> Result<()> {
/// #   let buf = [10, 0, 0, 3, 0, 9, 102, 111, 111, 100, 76, 101, 118, 101, 108, 0, 0, 0, 20, 0];
///     let doc = playerdat::parse::from_bytes(&buf)?;
///     match doc.root.get("foodLevel") {
///         Some(Node::Int(food)) => println!("Food: {}", food),
///         _ => {},
///     }
/// #   Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Tag, Vec<Node>),
    Compound(HashMap<String, Node>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// A parsed NBT document: the root tag and its name. The name of the root is
/// usually the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub root: Node,
}

impl Node {
    /// The tag this node would be written with.
    pub fn tag(&self) -> Tag {
        match self {
            Node::Byte(_) => Tag::Byte,
            Node::Short(_) => Tag::Short,
            Node::Int(_) => Tag::Int,
            Node::Long(_) => Tag::Long,
            Node::Float(_) => Tag::Float,
            Node::Double(_) => Tag::Double,
            Node::ByteArray(_) => Tag::ByteArray,
            Node::String(_) => Tag::String,
            Node::List(..) => Tag::List,
            Node::Compound(_) => Tag::Compound,
            Node::IntArray(_) => Tag::IntArray,
            Node::LongArray(_) => Tag::LongArray,
        }
    }

    /// Child of a compound by name. `None` if missing or this is not a
    /// compound.
    pub fn get(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Compound(map) => map.get(name),
            _ => None,
        }
    }

    /// Element of a list by position. `None` if out of range or this is not a
    /// list.
    pub fn index(&self, i: usize) -> Option<&Node> {
        match self {
            Node::List(_, elements) => elements.get(i),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Node::Byte(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match *self {
            Node::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Node::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Node::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Node::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Node::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(_, elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Node::Compound(map) => Some(map),
            _ => None,
        }
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Node {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(HashMap<String, Node>, Compound);
