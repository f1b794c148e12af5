//! The upstream calls the relay can make.

use std::fmt;
use std::time::Duration;

/// One kind of outbound Google call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// OAuth2 userinfo.
    UserInfo,
    /// Drive `files.list`.
    ListFiles,
    /// Drive `files.get` (metadata).
    FileMetadata,
    /// Drive `files.get?alt=media`.
    Download,
}

impl Endpoint {
    /// Whole-call deadline: connect, response headers and body.
    pub const fn timeout(self) -> Duration {
        match self {
            Endpoint::UserInfo => Duration::from_secs(20),
            Endpoint::ListFiles | Endpoint::FileMetadata => Duration::from_secs(30),
            Endpoint::Download => Duration::from_secs(60),
        }
    }

    /// Stable label for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Endpoint::UserInfo => "userinfo",
            Endpoint::ListFiles => "files.list",
            Endpoint::FileMetadata => "files.get",
            Endpoint::Download => "files.download",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timeouts() {
        assert_eq!(Endpoint::UserInfo.timeout(), Duration::from_secs(20));
        assert_eq!(Endpoint::ListFiles.timeout(), Duration::from_secs(30));
        assert_eq!(Endpoint::FileMetadata.timeout(), Duration::from_secs(30));
        assert_eq!(Endpoint::Download.timeout(), Duration::from_secs(60));
    }
}
