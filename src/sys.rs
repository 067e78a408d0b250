//! System utilities for user identity and OS-level lookups

use std::path::PathBuf;

use crate::{Error, Result};

/// Identity of the user invoking the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Real UID of the process
    pub uid: u32,
    /// Login name from the password database
    pub name: String,
    /// Home directory from the password database
    pub home: PathBuf,
}

/// Looks up the invoking user in the password database.
///
/// Returns [`Error::IdentityUnavailable`] if the real UID has no entry or
/// the lookup itself fails. Without an identity no per-user build directory
/// can be formed, so callers treat this as fatal.
///
/// # Examples
///
/// ```no_run
/// use yay::sys::current_user;
///
/// let user = current_user().expect("no passwd entry");
/// println!("{} (uid {})", user.name, user.uid);
/// ```
#[cfg(unix)]
pub fn current_user() -> Result<UserIdentity> {
    use nix::unistd::{User, getuid};

    let uid = getuid();
    match User::from_uid(uid) {
        Ok(Some(user)) => Ok(UserIdentity {
            uid: user.uid.as_raw(),
            name: user.name,
            home: user.dir,
        }),
        Ok(None) => Err(Error::IdentityUnavailable(format!(
            "no passwd entry for uid {}",
            uid
        ))),
        Err(e) => Err(Error::IdentityUnavailable(e.to_string())),
    }
}

#[cfg(not(unix))]
pub fn current_user() -> Result<UserIdentity> {
    Err(Error::IdentityUnavailable(
        "user identity lookup is only supported on Unix".to_string(),
    ))
}

/// Returns true when the effective UID is root.
#[cfg(unix)]
pub fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_current_user_matches_real_uid() {
        // Sandboxed runners may use a uid with no passwd entry
        if let Ok(user) = current_user() {
            assert_eq!(user.uid, nix::unistd::getuid().as_raw());
            assert!(!user.name.is_empty());
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_is_root_matches_euid() {
        assert_eq!(is_root(), nix::unistd::geteuid().as_raw() == 0);
    }

    #[test]
    #[cfg(not(unix))]
    fn test_current_user_unsupported() {
        assert!(matches!(
            current_user(),
            Err(Error::IdentityUnavailable(_))
        ));
    }
}
