use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column of the catalog that a search term is matched against
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchColumn {
    /// Default search across title, author, series, etc.
    Def,
    #[default]
    Title,
    Author,
    Series,
    Publisher,
    Year,
    /// ISBN
    Identifier,
    Language,
    Md5,
    Tags,
    Extension,
}

impl SearchColumn {
    pub const ALL: [SearchColumn; 11] = [
        SearchColumn::Def,
        SearchColumn::Title,
        SearchColumn::Author,
        SearchColumn::Series,
        SearchColumn::Publisher,
        SearchColumn::Year,
        SearchColumn::Identifier,
        SearchColumn::Language,
        SearchColumn::Md5,
        SearchColumn::Tags,
        SearchColumn::Extension,
    ];

    /// Value sent as the `column` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchColumn::Def => "def",
            SearchColumn::Title => "title",
            SearchColumn::Author => "author",
            SearchColumn::Series => "series",
            SearchColumn::Publisher => "publisher",
            SearchColumn::Year => "year",
            SearchColumn::Identifier => "identifier",
            SearchColumn::Language => "language",
            SearchColumn::Md5 => "md5",
            SearchColumn::Tags => "tags",
            SearchColumn::Extension => "extension",
        }
    }
}

impl fmt::Display for SearchColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let k = s.trim().to_lowercase();
        match k.as_str() {
            "isbn" => return Ok(SearchColumn::Identifier),
            "default" => return Ok(SearchColumn::Def),
            _ => {}
        }
        SearchColumn::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == k)
            .ok_or_else(|| format!("unknown search column: {}", s))
    }
}

/// One book entry parsed from a search results page.
///
/// Every field is always present in the serialized form; fields that could not be
/// resolved are `null`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct BookRecord {
    pub author: Option<String>,
    pub series: Option<String>,
    pub title: Option<String>,
    pub edition: Option<String>,
    pub isbn: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub pages: Option<String>,
    pub language: Option<String>,
    pub size: Option<String>,
    pub extension: Option<String>,
    /// Absolute download links, in page order
    pub mirrors: Vec<String>,
}
