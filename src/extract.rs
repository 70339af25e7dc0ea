//! Defaulting, type-checked access to fields of a [`Node`] tree.
//!
//! Player files have been written by many versions of the game, so any field
//! may be missing or stored with a different tag than expected. None of the
//! functions here fail. A missing field and a field of the wrong tag are
//! treated the same way: the caller gets `None`, or the default it supplied.
//!
//! Every function takes an `Option<&Node>` so lookups chain without
//! intermediate matching:
//!
//! ```
//! use playerdat::extract::{as_double, child, indexed};
//! # use playerdat::Node;
//! # let root = Node::Compound(Default::default());
//!
//! let x = as_double(indexed(child(Some(&root), "Pos"), 0), 0.0);
//! # assert_eq!(x, 0.0);
//! ```
//!
//! The [`Field`] trait offers the same operations as methods.

use crate::Node;

/// Child of a compound node. `None` if the node is absent, is not a compound,
/// or has no such child.
pub fn child<'a>(node: Option<&'a Node>, name: &str) -> Option<&'a Node> {
    node?.get(name)
}

/// Element of a list node. `None` if the node is absent, is not a list, or
/// `i` is out of range.
pub fn indexed(node: Option<&Node>, i: usize) -> Option<&Node> {
    node?.index(i)
}

pub fn as_byte(node: Option<&Node>, default: i8) -> i8 {
    node.and_then(Node::as_byte).unwrap_or(default)
}

pub fn as_short(node: Option<&Node>, default: i16) -> i16 {
    node.and_then(Node::as_short).unwrap_or(default)
}

pub fn as_int(node: Option<&Node>, default: i32) -> i32 {
    node.and_then(Node::as_int).unwrap_or(default)
}

pub fn as_double(node: Option<&Node>, default: f64) -> f64 {
    node.and_then(Node::as_double).unwrap_or(default)
}

/// Method form of the functions in this module, implemented for
/// `Option<&Node>`.
///
/// ```
/// use playerdat::extract::Field;
/// # use playerdat::Node;
/// # let root = Node::Compound(Default::default());
///
/// let root = Some(&root);
/// let health = root.child("Health").short_or(0);
/// let spawn_x = root.child("SpawnX").int();
/// # assert_eq!(health, 0);
/// # assert_eq!(spawn_x, None);
/// ```
pub trait Field<'a> {
    fn child(self, name: &str) -> Option<&'a Node>;
    fn indexed(self, i: usize) -> Option<&'a Node>;

    fn byte(self) -> Option<i8>;
    fn short(self) -> Option<i16>;
    fn int(self) -> Option<i32>;
    fn double(self) -> Option<f64>;

    fn byte_or(self, default: i8) -> i8;
    fn short_or(self, default: i16) -> i16;
    fn int_or(self, default: i32) -> i32;
    fn double_or(self, default: f64) -> f64;
}

impl<'a> Field<'a> for Option<&'a Node> {
    fn child(self, name: &str) -> Option<&'a Node> {
        child(self, name)
    }

    fn indexed(self, i: usize) -> Option<&'a Node> {
        indexed(self, i)
    }

    fn byte(self) -> Option<i8> {
        self.and_then(Node::as_byte)
    }

    fn short(self) -> Option<i16> {
        self.and_then(Node::as_short)
    }

    fn int(self) -> Option<i32> {
        self.and_then(Node::as_int)
    }

    fn double(self) -> Option<f64> {
        self.and_then(Node::as_double)
    }

    fn byte_or(self, default: i8) -> i8 {
        as_byte(self, default)
    }

    fn short_or(self, default: i16) -> i16 {
        as_short(self, default)
    }

    fn int_or(self, default: i32) -> i32 {
        as_int(self, default)
    }

    fn double_or(self, default: f64) -> f64 {
        as_double(self, default)
    }
}
