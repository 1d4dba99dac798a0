//! Derivation path parsing and resolution.
//!
//! Grammar: `[root "/"] component ("/" component)*`
//! - root: `m` keeps private keys, `M` returns a public-only node
//! - component: `-?digits [' | p | h] [.pub]`
//!
//! A path without a root is resolved relative to the receiving node.
//! Indices range over [-2^31, 2^32 - 1]; negatives alias their 32-bit
//! two's-complement value, so `-1` is child number 0xFFFFFFFF.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use hdkey_core::{Error, Result};
use tracing::debug;

use crate::derivation::HARDENED;
use crate::node::Node;

const HARDENED_MARKERS: [char; 3] = ['\'', 'p', 'h'];
const PUBLIC_SUFFIX: &str = ".pub";
const MIN_INDEX: i64 = i32::MIN as i64;
const MAX_INDEX: i64 = u32::MAX as i64;

/// How a path starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathRoot {
    /// `m`
    Private,
    /// `M`: the resolved node has no private key.
    Public,
    /// No root marker.
    Relative,
}

/// One parsed path component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// 32-bit child number, hardened bit included.
    pub index: u32,
    /// `.pub` suffix: drop the private key after this step.
    pub public: bool,
}

/// A parsed derivation path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationPath {
    root: PathRoot,
    steps: Vec<PathStep>,
}

impl DerivationPath {
    pub fn root(&self) -> PathRoot {
        self.root
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut components = s.split('/').peekable();
        let root = match components.peek() {
            Some(&"m") => PathRoot::Private,
            Some(&"M") => PathRoot::Public,
            _ => PathRoot::Relative,
        };
        if root != PathRoot::Relative {
            components.next();
        }

        let steps = components.map(parse_step).collect::<Result<Vec<_>>>()?;
        if root == PathRoot::Relative && steps.is_empty() {
            return Err(Error::InvalidDerivationPath(s.to_string()));
        }

        Ok(Self { root, steps })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separate = match self.root {
            PathRoot::Private => {
                f.write_str("m")?;
                true
            }
            PathRoot::Public => {
                f.write_str("M")?;
                true
            }
            PathRoot::Relative => false,
        };
        for step in &self.steps {
            if separate {
                f.write_str("/")?;
            }
            separate = true;
            write!(f, "{}", step.index & !HARDENED)?;
            if step.index & HARDENED != 0 {
                f.write_str("'")?;
            }
            if step.public {
                f.write_str(PUBLIC_SUFFIX)?;
            }
        }
        Ok(())
    }
}

fn parse_step(component: &str) -> Result<PathStep> {
    let invalid = || Error::InvalidDerivationPath(component.to_string());

    let (rest, public) = match component.strip_suffix(PUBLIC_SUFFIX) {
        Some(rest) => (rest, true),
        None => (component, false),
    };
    let (digits, hardened) = match rest.strip_suffix(&HARDENED_MARKERS[..]) {
        Some(digits) => (digits, true),
        None => (rest, false),
    };

    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: i64 = digits.parse().map_err(|_| invalid())?;
    if !(MIN_INDEX..=MAX_INDEX).contains(&value) {
        return Err(invalid());
    }

    // Truncation to the low 32 bits is the two's-complement alias.
    let mut index = value as u32;
    if hardened {
        index |= HARDENED;
    }

    Ok(PathStep { index, public })
}

impl Node {
    /// Resolve a parsed path starting from this node.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Node> {
        debug!(root = ?path.root(), steps = path.steps().len(), depth = self.depth(), "resolving path");

        let mut node = self.clone();
        for step in path.steps() {
            node = node.derive_child(step.index)?;
            if step.public {
                node = node.to_public();
            }
        }

        if path.root() == PathRoot::Public {
            node = node.to_public();
        }
        Ok(node)
    }

    /// Parse and resolve a path string such as `m/0'/1/2p.pub`.
    pub fn node_for_path(&self, path: &str) -> Result<Node> {
        self.derive_path(&path.parse()?)
    }
}
