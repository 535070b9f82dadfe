//! Operating-system family selection for the OS override layer.

use std::fmt;

/// Coarse OS family, mapped to one override file under `os/`.
///
/// Detected once at resolver construction and stored as an immutable
/// field; unrecognized families leave the OS layer absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
    Mac,
}

impl OsFamily {
    /// Detect the family of the running operating system.
    pub fn detect() -> Option<Self> {
        Self::from_name(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::Mac),
            "linux" | "android" | "freebsd" | "dragonfly" | "netbsd" | "openbsd" | "solaris"
            | "illumos" => Some(Self::Unix),
            _ => None,
        }
    }

    /// Base name of the properties file for this family.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "linux",
            Self::Mac => "mac",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Unix => write!(f, "unix"),
            Self::Mac => write!(f, "mac"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_families() {
        assert_eq!(OsFamily::from_name("windows"), Some(OsFamily::Windows));
        assert_eq!(OsFamily::from_name("macos"), Some(OsFamily::Mac));
        assert_eq!(OsFamily::from_name("linux"), Some(OsFamily::Unix));
        assert_eq!(OsFamily::from_name("freebsd"), Some(OsFamily::Unix));
    }

    #[test]
    fn test_from_name_unrecognized_is_absent() {
        assert_eq!(OsFamily::from_name("wasi"), None);
        assert_eq!(OsFamily::from_name(""), None);
    }

    #[test]
    fn test_file_stems() {
        assert_eq!(OsFamily::Windows.file_stem(), "windows");
        assert_eq!(OsFamily::Unix.file_stem(), "linux");
        assert_eq!(OsFamily::Mac.file_stem(), "mac");
    }

    #[test]
    fn test_detect_matches_current_platform() {
        // Every platform the test suite runs on is a recognized family.
        assert_eq!(OsFamily::detect(), OsFamily::from_name(std::env::consts::OS));
    }
}
