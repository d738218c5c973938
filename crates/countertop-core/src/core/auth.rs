// crates/countertop-core/src/core/auth.rs
// ============================================================================
// Module: Countertop Users and Roles
// Description: User roles, action gating, and salted password digests.
// Purpose: Authenticate operators and restrict manager-only actions.
// Dependencies: rand, serde, sha2, subtle, thiserror
// ============================================================================

//! ## Overview
//! Operators log in as either a manager or a waiter. Passwords are never
//! stored in clear text: each user gets a random salt and a SHA-256 digest
//! over `salt || password`. Verification compares digests in constant time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::core::identifiers::UserName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Salt length in bytes.
const SALT_BYTES: usize = 16;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Catalog, reporting, and void privileges.
    Manager,
    /// Order taking only.
    Waiter,
}

impl Role {
    /// Returns the canonical role label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Waiter => "waiter",
        }
    }

    /// Returns true when the role may perform the action.
    #[must_use]
    pub const fn allows(self, action: Action) -> bool {
        match self {
            Self::Manager => true,
            Self::Waiter => !action.requires_manager(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "waiter" => Ok(Self::Waiter),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// Gated operator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read or search the catalog.
    ReadCatalog,
    /// Add or remove catalog products.
    EditCatalog,
    /// Register a new sale.
    RegisterSale,
    /// Edit an existing sale in place.
    EditSale,
    /// Show a sale or reprint its receipt.
    ShowSale,
    /// Void (delete) a sale.
    VoidSale,
    /// View sales reports.
    ViewReports,
}

impl Action {
    /// Returns true when only managers may perform the action.
    #[must_use]
    pub const fn requires_manager(self) -> bool {
        matches!(self, Self::EditCatalog | Self::VoidSale | Self::ViewReports)
    }
}

// ============================================================================
// SECTION: Users
// ============================================================================

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub name: UserName,
    /// Assigned role.
    pub role: Role,
}

impl User {
    /// Ensures the user may perform the action.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] when the role does not allow it.
    pub fn require(&self, action: Action) -> Result<(), AuthError> {
        if self.role.allows(action) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                user: self.name.to_string(),
                role: self.role,
            })
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Role does not permit the action.
    #[error("user {user} with role {role} is not permitted to perform this action")]
    Forbidden {
        /// Offending user name.
        user: String,
        /// Role held by the user.
        role: Role,
    },
    /// Stored role label is not recognized.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

// ============================================================================
// SECTION: Password Digests
// ============================================================================

/// Salted password digest as stored.
///
/// # Invariants
/// - `salt` and `hash` are lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    /// Hex-encoded random salt.
    pub salt: String,
    /// Hex-encoded SHA-256 of `salt || password`.
    pub hash: String,
}

impl PasswordDigest {
    /// Derives a digest with a fresh random salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive_with_salt(password, &hex_encode(&salt))
    }

    /// Derives a digest for a known hex salt.
    #[must_use]
    pub fn derive_with_salt(password: &str, salt: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        Self {
            salt: salt.to_string(),
            hash: hex_encode(&hasher.finalize()),
        }
    }

    /// Returns true when the password matches, comparing in constant time.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::derive_with_salt(password, &self.salt);
        candidate.hash.as_bytes().ct_eq(self.hash.as_bytes()).into()
    }
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}
