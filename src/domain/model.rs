use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A clinic location in the static registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Branch {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub coordinate: Coordinate,
    pub phone: &'static str,
    pub hours: &'static str,
    pub specialties: &'static [&'static str],
    pub transport: Option<&'static str>,
}

impl Branch {
    /// Area name in parentheses, e.g. "Sentul" for "i-Sihat Dental Care (Sentul)".
    pub fn area(&self) -> &'static str {
        match (self.name.find('('), self.name.rfind(')')) {
            (Some(start), Some(end)) if start < end => &self.name[start + 1..end],
            _ => self.name,
        }
    }
}

/// A branch annotated for one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedBranch {
    pub branch: Branch,
    pub distance_km: Option<f64>,
    pub is_nearest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub query: String,
    pub coordinate: Option<Coordinate>,
    pub distance_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub message: String,
    pub recommendation: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryCategory {
    Distance,
    Time,
    Transit,
    Address,
    General,
}

impl SummaryCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryCategory::Distance => "distance",
            SummaryCategory::Time => "time",
            SummaryCategory::Transit => "transit",
            SummaryCategory::Address => "address",
            SummaryCategory::General => "general",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub text: String,
    pub category: SummaryCategory,
}
