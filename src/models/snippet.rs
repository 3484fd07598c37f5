use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const TAG_MAX: usize = 50;

// ______________________________________ Snippet ______________________________________
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: Language,
    pub tags: Vec<String>,
    pub is_public: bool,
    /// Ids of the users who favorited this snippet. Never contains
    /// duplicates; the toggle operation flips membership.
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ______________________________________ Language ______________________________________
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Csharp,
    Go,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Rust,
    Sql,
    Html,
    Css,
    Bash,
    Powershell,
    Other,
}

impl FromRow<'_, PgRow> for Snippet {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let language: String = row.try_get("language")?;
        let language = Language::parse(&language).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "language".into(),
            source: format!("unknown language {language:?}").into(),
        })?;

        Ok(Snippet {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            code: row.try_get("code")?,
            language,
            tags: row.try_get("tags")?,
            is_public: row.try_get("is_public")?,
            favorites: row.try_get("favorites")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Csharp => "csharp",
            Self::Go => "go",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Rust => "rust",
            Self::Sql => "sql",
            Self::Html => "html",
            Self::Css => "css",
            Self::Bash => "bash",
            Self::Powershell => "powershell",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "javascript" => Some(Self::Javascript),
            "typescript" => Some(Self::Typescript),
            "python" => Some(Self::Python),
            "java" => Some(Self::Java),
            "csharp" => Some(Self::Csharp),
            "go" => Some(Self::Go),
            "ruby" => Some(Self::Ruby),
            "php" => Some(Self::Php),
            "swift" => Some(Self::Swift),
            "kotlin" => Some(Self::Kotlin),
            "rust" => Some(Self::Rust),
            "sql" => Some(Self::Sql),
            "html" => Some(Self::Html),
            "css" => Some(Self::Css),
            "bash" => Some(Self::Bash),
            "powershell" => Some(Self::Powershell),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}
