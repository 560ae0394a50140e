//! Build script for the bundled PSGC location tables
//!
//! Copies `regions.json`, `provinces.json`, `cities.json` and `barangays.json`
//! into `OUT_DIR`, from where `shared::location::reference` embeds them.
//! The source is `src/shared/location/data` unless `PSGC_DATA_DIR` points at
//! another directory holding the same four files (e.g. a full PSGC release
//! exported in the same row shape). Tables are checked before they are copied.

use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "src/shared/location/data";
const TABLES: [&str; 4] = ["regions", "provinces", "cities", "barangays"];

fn main() {
    println!("cargo:rerun-if-env-changed=PSGC_DATA_DIR");

    let data_dir = match env::var("PSGC_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            println!("cargo:warning=Using PSGC tables from {}", dir);
            PathBuf::from(dir)
        }
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    };
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is not set"));

    for table in TABLES {
        let path = data_dir.join(format!("{}.json", table));
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let tables = match Tables::load(&data_dir) {
        Ok(tables) => tables,
        Err(e) => panic!("Failed to load PSGC tables from {}: {}", data_dir.display(), e),
    };
    tables.check_links();

    for table in TABLES {
        let file = format!("{}.json", table);
        if let Err(e) = fs::copy(data_dir.join(&file), out_dir.join(&file)) {
            panic!("Failed to copy {}: {}", file, e);
        }
    }
}

// ============================================================================
// Row shapes (only the keys the check needs)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RegionRow {
    region_code: String,
}

#[derive(Debug, Deserialize)]
struct ProvinceRow {
    province_code: String,
    #[serde(default)]
    region_code: String,
}

#[derive(Debug, Deserialize)]
struct CityRow {
    city_code: String,
    #[serde(default)]
    province_code: String,
}

#[derive(Debug, Deserialize)]
struct BarangayRow {
    brgy_code: String,
    #[serde(default)]
    city_code: String,
}

struct Tables {
    regions: Vec<RegionRow>,
    provinces: Vec<ProvinceRow>,
    cities: Vec<CityRow>,
    barangays: Vec<BarangayRow>,
}

fn read_table<T: for<'de> Deserialize<'de>>(dir: &Path, table: &str) -> Result<Vec<T>, String> {
    let path = dir.join(format!("{}.json", table));
    let text = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

impl Tables {
    fn load(dir: &Path) -> Result<Self, String> {
        Ok(Self {
            regions: read_table(dir, "regions")?,
            provinces: read_table(dir, "provinces")?,
            cities: read_table(dir, "cities")?,
            barangays: read_table(dir, "barangays")?,
        })
    }

    /// Orphan rows are kept (they never show up in a dropdown) but reported
    fn check_links(&self) {
        let regions: HashSet<&str> = self.regions.iter().map(|r| r.region_code.as_str()).collect();
        let provinces: HashSet<&str> =
            self.provinces.iter().map(|p| p.province_code.as_str()).collect();
        let cities: HashSet<&str> = self.cities.iter().map(|c| c.city_code.as_str()).collect();

        let orphans = [
            (
                "provinces",
                self.provinces
                    .iter()
                    .filter(|p| !regions.contains(p.region_code.as_str()))
                    .count(),
            ),
            (
                "cities",
                self.cities
                    .iter()
                    .filter(|c| !provinces.contains(c.province_code.as_str()))
                    .count(),
            ),
            (
                "barangays",
                self.barangays
                    .iter()
                    .filter(|b| !cities.contains(b.city_code.as_str()))
                    .count(),
            ),
        ];
        for (table, count) in orphans {
            if count > 0 {
                println!("cargo:warning={} {} rows reference a missing parent", count, table);
            }
        }
    }
}
