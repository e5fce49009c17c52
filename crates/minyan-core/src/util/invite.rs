//! Invite-code generation for building membership links.
//!
//! ## Summary
//! Produces short, human-typable codes. Codes are uppercase alphanumeric and
//! not guaranteed globally unique; the building lookup treats a missing code
//! as "no match", so collisions only widen an invite's audience, they never
//! corrupt state.

use crate::constants::INVITE_CODE_LEN;

/// Generate a random uppercase invite code of [`INVITE_CODE_LEN`] characters.
#[must_use]
pub fn generate_invite_code() -> String {
    // A v4 uuid's simple form is 32 random hex chars; more than enough
    // entropy for a 6-character code.
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(INVITE_CODE_LEN)
        .collect::<String>()
        .to_uppercase()
}
