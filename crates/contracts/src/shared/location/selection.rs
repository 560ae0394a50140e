//! Cascading region → province → city → barangay selection
//!
//! Every change handler resets the levels below it and reports each touched
//! field to the sink, top-down. Unknown codes are kept as-is: the reported
//! name is empty and the child option set comes out empty.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::reference::{Barangay, City, Province, ReferenceData, Region};

/// Address field touched by a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Region,
    Province,
    City,
    Barangay,
}

impl AddressField {
    pub const ALL: [AddressField; 4] = [
        AddressField::Region,
        AddressField::Province,
        AddressField::City,
        AddressField::Barangay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::Region => "region",
            AddressField::Province => "province",
            AddressField::City => "city",
            AddressField::Barangay => "barangay",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected codes, empty string meaning "unset"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCodes {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub barangay: String,
}

impl LocationCodes {
    pub fn new(
        region: impl Into<String>,
        province: impl Into<String>,
        city: impl Into<String>,
        barangay: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            province: province.into(),
            city: city.into(),
            barangay: barangay.into(),
        }
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Region => &self.region,
            AddressField::Province => &self.province,
            AddressField::City => &self.city,
            AddressField::Barangay => &self.barangay,
        }
    }

    pub fn is_empty(&self) -> bool {
        AddressField::ALL.iter().all(|&f| self.get(f).is_empty())
    }

    /// True when every set code belongs to the option set of its parent.
    ///
    /// The selection controller never calls this: initial codes are adopted
    /// as given. Forms can use it to flag stale persisted addresses.
    pub fn is_consistent(&self, data: &ReferenceData) -> bool {
        let levels = [
            (self.region.as_str(), data.region(&self.region).is_some()),
            (
                self.province.as_str(),
                data.province(&self.province)
                    .is_some_and(|p| p.region_code == self.region),
            ),
            (
                self.city.as_str(),
                data.city(&self.city)
                    .is_some_and(|c| c.province_code == self.province),
            ),
            (
                self.barangay.as_str(),
                data.barangay(&self.barangay)
                    .is_some_and(|b| b.city_code == self.city),
            ),
        ];

        // Once a level is unset every level below it must be unset too
        let mut parent_set = true;
        for (code, belongs) in levels {
            if code.is_empty() {
                parent_set = false;
                continue;
            }
            if !parent_set || !belongs {
                return false;
            }
        }
        true
    }
}

/// Receiver of `(field, value)` updates emitted by a cascade
pub trait AddressSink {
    fn on_address_change(&mut self, field: AddressField, value: &str);
}

impl<F> AddressSink for F
where
    F: FnMut(AddressField, &str),
{
    fn on_address_change(&mut self, field: AddressField, value: &str) {
        self(field, value)
    }
}

/// Selection state for one address form
pub struct LocationSelection<'a, S> {
    data: &'a ReferenceData,
    codes: LocationCodes,
    sink: S,
}

impl<'a, S: AddressSink> LocationSelection<'a, S> {
    /// Adopt `initial` as-is (no validation, nothing emitted)
    pub fn new(data: &'a ReferenceData, initial: LocationCodes, sink: S) -> Self {
        Self {
            data,
            codes: initial,
            sink,
        }
    }

    pub fn codes(&self) -> &LocationCodes {
        &self.codes
    }

    pub fn region(&self) -> &str {
        &self.codes.region
    }

    pub fn province(&self) -> &str {
        &self.codes.province
    }

    pub fn city(&self) -> &str {
        &self.codes.city
    }

    pub fn barangay(&self) -> &str {
        &self.codes.barangay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn regions(&self) -> &'a [Region] {
        self.data.regions()
    }

    pub fn provinces(&self) -> Vec<&'a Province> {
        self.data.provinces_for(&self.codes.region)
    }

    pub fn cities(&self) -> Vec<&'a City> {
        self.data.cities_for(&self.codes.province)
    }

    pub fn barangays(&self) -> Vec<&'a Barangay> {
        self.data.barangays_for(&self.codes.city)
    }

    pub fn set_region(&mut self, code: &str) {
        self.codes = LocationCodes {
            region: code.to_string(),
            ..LocationCodes::default()
        };

        let name = self.data.region_name(code);
        self.sink.on_address_change(AddressField::Region, name);
        self.sink.on_address_change(AddressField::Province, "");
        self.sink.on_address_change(AddressField::City, "");
        self.sink.on_address_change(AddressField::Barangay, "");
    }

    pub fn set_province(&mut self, code: &str) {
        self.codes.province = code.to_string();
        self.codes.city.clear();
        self.codes.barangay.clear();

        let name = self.data.province_name(code);
        self.sink.on_address_change(AddressField::Province, name);
        self.sink.on_address_change(AddressField::City, "");
        self.sink.on_address_change(AddressField::Barangay, "");
    }

    pub fn set_city(&mut self, code: &str) {
        self.codes.city = code.to_string();
        self.codes.barangay.clear();

        let name = self.data.city_name(code);
        self.sink.on_address_change(AddressField::City, name);
        self.sink.on_address_change(AddressField::Barangay, "");
    }

    pub fn set_barangay(&mut self, code: &str) {
        self.codes.barangay = code.to_string();

        let name = self.data.barangay_name(code);
        self.sink.on_address_change(AddressField::Barangay, name);
    }

    /// Dispatch to the handler of `field`
    pub fn set(&mut self, field: AddressField, code: &str) {
        match field {
            AddressField::Region => self.set_region(code),
            AddressField::Province => self.set_province(code),
            AddressField::City => self.set_city(code),
            AddressField::Barangay => self.set_barangay(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(AddressField, String)>);

    impl AddressSink for Recorder {
        fn on_address_change(&mut self, field: AddressField, value: &str) {
            self.0.push((field, value.to_string()));
        }
    }

    fn data() -> ReferenceData {
        ReferenceData::fixture()
    }

    fn full_codes() -> LocationCodes {
        LocationCodes::new("01", "0128", "012801", "012801001")
    }

    fn emitted<'s>(sel: &'s LocationSelection<'_, Recorder>) -> Vec<(&'static str, &'s str)> {
        sel.sink()
            .0
            .iter()
            .map(|(f, v)| (f.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_starts_unset() {
        let data = data();
        let sel = LocationSelection::new(&data, LocationCodes::default(), Recorder::default());
        assert!(sel.codes().is_empty());
        assert_eq!(sel.regions().len(), data.regions().len());
        assert!(sel.provinces().is_empty());
        assert!(sel.cities().is_empty());
        assert!(sel.barangays().is_empty());
    }

    #[test]
    fn test_initial_codes_adopted_without_emitting() {
        let data = data();
        let sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        assert_eq!(sel.region(), "01");
        assert_eq!(sel.province(), "0128");
        assert_eq!(sel.city(), "012801");
        assert_eq!(sel.barangay(), "012801001");
        assert!(sel.sink().0.is_empty());
        assert_eq!(sel.provinces().len(), 3);
        assert_eq!(sel.barangays()[0].brgy_code, "012801001");
    }

    #[test]
    fn test_inconsistent_initial_codes_are_trusted() {
        let data = data();
        let codes = LocationCodes::new("02", "0128", "", "");
        let sel = LocationSelection::new(&data, codes.clone(), Recorder::default());
        assert_eq!(sel.codes(), &codes);
        assert!(!codes.is_consistent(&data));
    }

    #[test]
    fn test_set_region_resets_children_and_emits_in_order() {
        let data = data();
        let mut sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        sel.set_region("02");

        assert_eq!(sel.codes(), &LocationCodes::new("02", "", "", ""));
        assert_eq!(
            emitted(&sel),
            vec![
                ("region", "REGION II (CAGAYAN VALLEY)"),
                ("province", ""),
                ("city", ""),
                ("barangay", ""),
            ]
        );
        assert!(sel.provinces().iter().all(|p| p.region_code == "02"));
    }

    #[test]
    fn test_set_same_region_still_resets() {
        let data = data();
        let mut sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        sel.set_region("01");
        assert_eq!(sel.codes(), &LocationCodes::new("01", "", "", ""));
        assert_eq!(sel.sink().0.len(), 4);
    }

    #[test]
    fn test_set_province_keeps_region() {
        let data = data();
        let mut sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        sel.set_province("0129");

        assert_eq!(sel.codes(), &LocationCodes::new("01", "0129", "", ""));
        assert_eq!(
            emitted(&sel),
            vec![("province", "Ilocos Sur"), ("city", ""), ("barangay", "")]
        );
        assert_eq!(sel.cities().len(), 1);
    }

    #[test]
    fn test_province_without_region_is_adopted() {
        let data = data();
        let mut sel = LocationSelection::new(&data, LocationCodes::default(), Recorder::default());
        sel.set_province("0128");
        // Name resolves from the table, the region stays unset
        assert_eq!(sel.region(), "");
        assert_eq!(sel.province(), "0128");
        assert_eq!(emitted(&sel)[0], ("province", "Ilocos Norte"));
        assert!(sel.provinces().is_empty());
    }

    #[test]
    fn test_set_city_twice_re_emits() {
        let data = data();
        let mut sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        sel.set_city("012802");
        let first = sel.codes().clone();
        sel.set_city("012802");

        assert_eq!(sel.codes(), &first);
        assert_eq!(sel.codes(), &LocationCodes::new("01", "0128", "012802", ""));
        assert_eq!(
            emitted(&sel),
            vec![
                ("city", "BACARRA"),
                ("barangay", ""),
                ("city", "BACARRA"),
                ("barangay", ""),
            ]
        );
        assert_eq!(sel.barangays().len(), 3);
    }

    #[test]
    fn test_set_barangay_emits_name_only() {
        let data = data();
        let mut sel = LocationSelection::new(
            &data,
            LocationCodes::new("01", "0128", "012802", ""),
            Recorder::default(),
        );
        sel.set_barangay("012802002");
        assert_eq!(sel.barangay(), "012802002");
        assert_eq!(emitted(&sel), vec![("barangay", "Buyon")]);
    }

    #[test]
    fn test_unknown_region_degrades_silently() {
        let data = data();
        let mut sel = LocationSelection::new(&data, full_codes(), Recorder::default());
        sel.set_region("ZZ");

        assert_eq!(sel.region(), "ZZ");
        assert_eq!(
            emitted(&sel),
            vec![("region", ""), ("province", ""), ("city", ""), ("barangay", "")]
        );
        assert!(sel.provinces().is_empty());
        assert!(data.provinces_for("ZZ").is_empty());
    }

    #[test]
    fn test_full_cascade_with_closure_sink() {
        let data = data();
        let mut log: Vec<String> = Vec::new();
        {
            let mut sel = LocationSelection::new(
                &data,
                LocationCodes::default(),
                |field: AddressField, value: &str| log.push(format!("{}={}", field, value)),
            );
            sel.set(AddressField::Region, "13");
            sel.set(AddressField::Province, "1374");
            sel.set(AddressField::City, "137404");
            sel.set(AddressField::Barangay, "137404002");
            assert!(sel.codes().is_consistent(&data));
        }
        assert_eq!(log.len(), 4 + 3 + 2 + 1);
        assert_eq!(log.first().map(String::as_str), Some("region=NATIONAL CAPITAL REGION (NCR)"));
        assert_eq!(log.last().map(String::as_str), Some("barangay=Amihan"));
    }

    #[test]
    fn test_consistency_check() {
        let data = data();
        assert!(LocationCodes::default().is_consistent(&data));
        assert!(full_codes().is_consistent(&data));
        assert!(LocationCodes::new("01", "0128", "", "").is_consistent(&data));
        // Child set under an unset parent
        assert!(!LocationCodes::new("01", "", "012801", "").is_consistent(&data));
        // City from another province
        assert!(!LocationCodes::new("01", "0129", "012801", "").is_consistent(&data));
        assert!(!LocationCodes::new("ZZ", "", "", "").is_consistent(&data));
    }

    #[test]
    fn test_field_names() {
        let names: Vec<&str> = AddressField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["region", "province", "city", "barangay"]);
        assert_eq!(
            serde_json::to_string(&AddressField::Barangay).unwrap(),
            "\"barangay\""
        );
    }
}
