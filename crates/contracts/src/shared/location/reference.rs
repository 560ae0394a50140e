//! Bundled PSGC reference tables (region → province → city → barangay)
//!
//! The tables ship inside the binary and are parsed once per process.
//! Rows keep the order of the source files. `build.rs` copies them into
//! `OUT_DIR` from `data/`, or from `PSGC_DATA_DIR` when that is set.

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const REGIONS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/regions.json"));
const PROVINCES_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/provinces.json"));
const CITIES_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/cities.json"));
const BARANGAYS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/barangays.json"));

/// Common shape of every level of the location hierarchy
pub trait LocationEntry {
    /// Own code (primary key in its table)
    fn code(&self) -> &str;

    /// Code of the parent row, empty for top-level rows
    fn parent_code(&self) -> &str;

    /// Human-readable name shown in dropdowns
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_code: String,
    pub region_name: String,
    #[serde(default)]
    pub psgc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub province_code: String,
    pub province_name: String,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub psgc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_code: String,
    pub city_name: String,
    #[serde(default)]
    pub province_code: String,
    #[serde(default)]
    pub psgc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barangay {
    pub brgy_code: String,
    pub brgy_name: String,
    #[serde(default)]
    pub city_code: String,
}

impl LocationEntry for Region {
    fn code(&self) -> &str {
        &self.region_code
    }

    fn parent_code(&self) -> &str {
        ""
    }

    fn name(&self) -> &str {
        &self.region_name
    }
}

impl LocationEntry for Province {
    fn code(&self) -> &str {
        &self.province_code
    }

    fn parent_code(&self) -> &str {
        &self.region_code
    }

    fn name(&self) -> &str {
        &self.province_name
    }
}

impl LocationEntry for City {
    fn code(&self) -> &str {
        &self.city_code
    }

    fn parent_code(&self) -> &str {
        &self.province_code
    }

    fn name(&self) -> &str {
        &self.city_name
    }
}

impl LocationEntry for Barangay {
    fn code(&self) -> &str {
        &self.brgy_code
    }

    fn parent_code(&self) -> &str {
        &self.city_code
    }

    fn name(&self) -> &str {
        &self.brgy_name
    }
}

/// Code → row position. The first row with a given code wins.
fn build_index<T: LocationEntry>(rows: &[T]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(rows.len());
    for (pos, row) in rows.iter().enumerate() {
        index.entry(row.code().to_string()).or_insert(pos);
    }
    index
}

/// Four immutable lookup tables with a code index per table
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    regions: Vec<Region>,
    provinces: Vec<Province>,
    cities: Vec<City>,
    barangays: Vec<Barangay>,

    region_index: HashMap<String, usize>,
    province_index: HashMap<String, usize>,
    city_index: HashMap<String, usize>,
    barangay_index: HashMap<String, usize>,
}

impl ReferenceData {
    pub fn new(
        regions: Vec<Region>,
        provinces: Vec<Province>,
        cities: Vec<City>,
        barangays: Vec<Barangay>,
    ) -> Self {
        Self {
            region_index: build_index(&regions),
            province_index: build_index(&provinces),
            city_index: build_index(&cities),
            barangay_index: build_index(&barangays),
            regions,
            provinces,
            cities,
            barangays,
        }
    }

    /// Parse the four tables from JSON arrays
    pub fn from_json(
        regions: &str,
        provinces: &str,
        cities: &str,
        barangays: &str,
    ) -> anyhow::Result<Self> {
        let regions: Vec<Region> =
            serde_json::from_str(regions).context("Failed to parse regions table")?;
        let provinces: Vec<Province> =
            serde_json::from_str(provinces).context("Failed to parse provinces table")?;
        let cities: Vec<City> =
            serde_json::from_str(cities).context("Failed to parse cities table")?;
        let barangays: Vec<Barangay> =
            serde_json::from_str(barangays).context("Failed to parse barangays table")?;

        Ok(Self::new(regions, provinces, cities, barangays))
    }

    /// Parse the tables embedded in the binary
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(REGIONS_JSON, PROVINCES_JSON, CITIES_JSON, BARANGAYS_JSON)
    }

    /// Small hand-checked subset (Ilocos, Cagayan Valley, NCR) with
    /// complete barangay lists for a few cities
    #[cfg(test)]
    pub(crate) fn fixture() -> Self {
        Self::from_json(
            include_str!("fixtures/regions.json"),
            include_str!("fixtures/provinces.json"),
            include_str!("fixtures/cities.json"),
            include_str!("fixtures/barangays.json"),
        )
        .unwrap()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn barangays(&self) -> &[Barangay] {
        &self.barangays
    }

    pub fn region(&self, code: &str) -> Option<&Region> {
        self.region_index.get(code).map(|&pos| &self.regions[pos])
    }

    pub fn province(&self, code: &str) -> Option<&Province> {
        self.province_index.get(code).map(|&pos| &self.provinces[pos])
    }

    pub fn city(&self, code: &str) -> Option<&City> {
        self.city_index.get(code).map(|&pos| &self.cities[pos])
    }

    pub fn barangay(&self, code: &str) -> Option<&Barangay> {
        self.barangay_index.get(code).map(|&pos| &self.barangays[pos])
    }
}

static BUNDLED: Lazy<ReferenceData> = Lazy::new(|| match ReferenceData::bundled() {
    Ok(data) => {
        log::debug!(
            "Location reference data loaded: {} regions, {} provinces, {} cities, {} barangays",
            data.regions.len(),
            data.provinces.len(),
            data.cities.len(),
            data.barangays.len()
        );
        data
    }
    Err(e) => {
        // Bundled data is trusted; a broken build leaves the dropdowns empty
        log::error!("Failed to load location reference data: {:#}", e);
        ReferenceData::default()
    }
});

/// Process-wide reference tables, parsed on first access
pub fn reference_data() -> &'static ReferenceData {
    &BUNDLED
}
