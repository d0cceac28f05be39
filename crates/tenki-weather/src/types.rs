use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of the JMA region catalog (`area.json`).
///
/// Centers carry `children` (office codes); offices carry `parent`.
/// The published catalog keys nodes by code and usually omits `code` inside
/// the node itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "enName", skip_serializing_if = "Option::is_none")]
    pub en_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// Region catalog. Only `centers` is required.
///
/// `offices` is kept as raw JSON and only read by [`AreaCatalog::office_names`]
/// when children are derived from the catalog, so a missing, `null` or
/// malformed `offices` section never fails the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaCatalog {
    pub centers: BTreeMap<String, AreaNode>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub offices: BTreeMap<String, serde_json::Value>,
}

impl AreaCatalog {
    /// Parent regions in code order
    pub fn parents(&self) -> Vec<ParentRegion> {
        self.centers
            .iter()
            .map(|(key, node)| ParentRegion {
                name: node.name.clone(),
                code: node.code.clone().unwrap_or_else(|| key.clone()),
                children: node.children.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Office display names keyed by office code. Entries without a string
    /// `name` are skipped.
    pub fn office_names(&self) -> BTreeMap<String, String> {
        self.offices
            .iter()
            .filter_map(|(key, node)| {
                let name = node.get("name")?.as_str()?;
                let code = node
                    .get("code")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or(key.as_str());
                Some((code.to_string(), name.to_string()))
            })
            .collect()
    }
}

/// A selectable top-level region ("center")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRegion {
    pub name: String,
    pub code: String,
    /// Child office codes as published in the catalog
    pub children: Vec<String>,
}

/// A selectable sub-region; its code keys the forecast endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRegion {
    pub name: String,
    pub code: String,
}

impl ChildRegion {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Forecast endpoint response after shape checking.
///
/// A response that parses as JSON but is not an array of office records is
/// kept as `Unrecognized`: nothing is rendered and no error is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastPayload {
    Offices(Vec<OfficeForecast>),
    Unrecognized,
}

impl ForecastPayload {
    pub fn from_value(value: serde_json::Value) -> Self {
        if !value.is_array() {
            tracing::warn!("Forecast response is not an array; nothing to render");
            return Self::Unrecognized;
        }
        match serde_json::from_value::<Vec<OfficeForecast>>(value) {
            Ok(offices) => Self::Offices(offices),
            Err(e) => {
                tracing::warn!("Forecast response has unexpected records: {}", e);
                Self::Unrecognized
            }
        }
    }

    /// The office record the view renders (always the first)
    pub fn primary_office(&self) -> Option<&OfficeForecast> {
        match self {
            Self::Offices(offices) => offices.first(),
            Self::Unrecognized => None,
        }
    }
}

/// One forecast office record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeForecast {
    #[serde(default)]
    pub publishing_office: Option<String>,
    #[serde(default)]
    pub report_datetime: Option<String>,
    #[serde(default)]
    pub headline_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time_defines: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub areas: Vec<AreaWeather>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// Per-area sequences aligned by index with `TimeSeries::time_defines`.
/// Any sequence may be missing and any element may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaWeather {
    #[serde(default)]
    pub area: Option<AreaRef>,
    #[serde(default)]
    pub weathers: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub winds: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub waves: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub temps: Option<Vec<Option<Reading>>>,
    #[serde(default)]
    pub pops: Option<Vec<Option<Reading>>>,
}

impl AreaWeather {
    pub fn weather_at(&self, index: usize) -> Option<&str> {
        text_at(self.weathers.as_deref(), index)
    }

    pub fn wind_at(&self, index: usize) -> Option<&str> {
        text_at(self.winds.as_deref(), index)
    }

    pub fn wave_at(&self, index: usize) -> Option<&str> {
        text_at(self.waves.as_deref(), index)
    }
}

fn text_at(values: Option<&[Option<String>]>, index: usize) -> Option<&str> {
    values?.get(index)?.as_deref()
}

/// Temperature / precipitation values, published as strings or numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Text(String),
    Number(f64),
}

fn object_or_empty<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        serde_json::Value::Null => Ok(BTreeMap::new()),
        other => {
            tracing::warn!("Ignoring catalog offices of unexpected type: {}", other);
            Ok(BTreeMap::new())
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid region code: {0:?}")]
    InvalidCode(String),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
