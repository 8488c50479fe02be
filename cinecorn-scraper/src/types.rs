use serde::Deserialize;

/// Top-level response wrapper from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// A candidate match for a search term.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Full movie record from the details endpoint.
///
/// Keys follow the provider's naming, including the spaced ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<LooseNumber>,
    /// Runtimes in minutes, main cut first.
    #[serde(default)]
    pub runtimes: Vec<LooseNumber>,
    #[serde(default)]
    pub rating: Option<LooseNumber>,
    #[serde(default, rename = "plot outline")]
    pub plot_outline: Option<String>,
    #[serde(default, rename = "cover url")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<Credit>,
    #[serde(default, rename = "director")]
    pub directors: Vec<Credit>,
}

/// A credited person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credit {
    pub id: String,
    pub name: String,
}

impl Credit {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A numeric field that the provider sends either as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// The value as a whole number, if it is one.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            LooseNumber::Int(n) => i32::try_from(*n).ok(),
            LooseNumber::Float(f) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => {
                Some(*f as i32)
            }
            LooseNumber::Float(_) => None,
            LooseNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Int(n) => Some(*n as f64),
            LooseNumber::Float(f) => Some(*f),
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }
}

impl std::fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LooseNumber::Int(n) => write!(f, "{n}"),
            LooseNumber::Float(x) => write!(f, "{x}"),
            LooseNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LooseNumber {
    fn from(n: i64) -> Self {
        LooseNumber::Int(n)
    }
}

impl From<f64> for LooseNumber {
    fn from(x: f64) -> Self {
        LooseNumber::Float(x)
    }
}

impl From<&str> for LooseNumber {
    fn from(s: &str) -> Self {
        LooseNumber::Text(s.to_string())
    }
}
