// Path: crates/types/src/app/name.rs

//! Account and contract names.

use crate::codec::{Pack, ReadBuffer, Unpack, WriteStream};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;

const CONTRACT_PREFIX: char = '$';
const CONTRACT_SPLIT: char = '@';

/// The name of an account or of a contract.
///
/// A contract is identified by its owning account and its own name and is
/// written `$<contract>@<owner>`. Any other string is a plain account name. The
/// host treats names as opaque values; this type only knows how to tell the two
/// forms apart.
///
/// On the wire a `Name` is exactly its string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Name {
    name: String,
}

impl Name {
    /// Parses `s`, recognizing the `$<contract>@<owner>` form.
    pub fn new(s: impl Into<String>) -> Self {
        Self { name: s.into() }
    }

    /// Builds a contract name from its owning account and contract name.
    pub fn contract_of(owner: &str, contract: &str) -> Self {
        Self::new(format!("{CONTRACT_PREFIX}{contract}{CONTRACT_SPLIT}{owner}"))
    }

    fn split(&self) -> Option<usize> {
        if self.name.len() > 1 && self.name.starts_with(CONTRACT_PREFIX) {
            self.name.find(CONTRACT_SPLIT)
        } else {
            None
        }
    }

    /// Returns true if this names a contract (a non-empty owner follows the split).
    pub fn is_contract(&self) -> bool {
        match self.split() {
            Some(split) => self.name.len() > split + 1,
            None => false,
        }
    }

    /// The account part: the owner for a contract name, the whole name otherwise.
    pub fn account(&self) -> &str {
        match self.split() {
            Some(split) if self.is_contract() => self.name.get(split + 1..).unwrap_or_default(),
            _ => &self.name,
        }
    }

    /// The contract part, or an empty string for a plain account name.
    pub fn contract(&self) -> &str {
        match self.split() {
            Some(split) if self.is_contract() => self.name.get(1..split).unwrap_or_default(),
            _ => "",
        }
    }

    /// The full string form.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::new(s)
    }
}

impl From<Name> for String {
    fn from(n: Name) -> Self {
        n.name
    }
}

impl Pack for Name {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        self.name.pack_to(s)
    }
}

impl Unpack for Name {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        String::unpack_from(s).map(Name::new)
    }
}
