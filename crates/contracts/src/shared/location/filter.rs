//! Option sets derived from the currently selected parent

use super::reference::{Barangay, City, LocationEntry, Province, ReferenceData};

/// Rows whose parent code equals `parent_code`, in source order.
/// An empty parent code selects nothing.
pub fn children_of<'a, T: LocationEntry>(rows: &'a [T], parent_code: &str) -> Vec<&'a T> {
    if parent_code.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .filter(|row| row.parent_code() == parent_code)
        .collect()
}

impl ReferenceData {
    pub fn provinces_for(&self, region_code: &str) -> Vec<&Province> {
        children_of(self.provinces(), region_code)
    }

    pub fn cities_for(&self, province_code: &str) -> Vec<&City> {
        children_of(self.cities(), province_code)
    }

    pub fn barangays_for(&self, city_code: &str) -> Vec<&Barangay> {
        children_of(self.barangays(), city_code)
    }

    /// Whether the tables list any barangay under `city_code`.
    /// Cities without listed barangays cannot require one.
    pub fn has_barangays(&self, city_code: &str) -> bool {
        !city_code.is_empty() && self.barangays().iter().any(|b| b.city_code == city_code)
    }

    /// Display name of a region, empty if the code does not resolve
    pub fn region_name(&self, code: &str) -> &str {
        self.region(code).map(LocationEntry::name).unwrap_or("")
    }

    pub fn province_name(&self, code: &str) -> &str {
        self.province(code).map(LocationEntry::name).unwrap_or("")
    }

    pub fn city_name(&self, code: &str) -> &str {
        self.city(code).map(LocationEntry::name).unwrap_or("")
    }

    pub fn barangay_name(&self, code: &str) -> &str {
        self.barangay(code).map(LocationEntry::name).unwrap_or("")
    }
}
