use tsqlgen_core::{DialectError, Result};

/// Dialect token selecting the hosted 2012-era engine rather than an
/// on-premises server.
pub const AZURE_TOKEN: &str = "2012.Azure";

// --- Engine versions ---
//
// Ordered so that `>=` comparisons express "this version or newer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlVersion {
    /// SQL Server 2000.
    Sql8,
    /// SQL Server 2005.
    Sql9,
    /// SQL Server 2008.
    Sql10,
    /// SQL Server 2012 and the hosted service edition.
    Sql11,
}

impl SqlVersion {
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "2000" => Ok(Self::Sql8),
            "2005" => Ok(Self::Sql9),
            "2008" => Ok(Self::Sql10),
            "2012" | AZURE_TOKEN => Ok(Self::Sql11),
            _ => Err(DialectError::UnsupportedToken {
                token: token.to_owned(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sql8 => "SQL Server 2000",
            Self::Sql9 => "SQL Server 2005",
            Self::Sql10 => "SQL Server 2008",
            Self::Sql11 => "SQL Server 2012",
        }
    }
}
