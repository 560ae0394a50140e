//! Typed contact payloads embedded in entity forms (address, phone)

use serde::{Deserialize, Serialize};

use super::location::{AddressField, LocationCodes, ReferenceData};

/// Postal address as stored by the API.
///
/// `region`..`barangay` hold display names reported by the location selector,
/// `codes` holds the selected PSGC codes so edit forms can restore the dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub barangay: String,
    #[serde(default, rename = "zipCode")]
    pub zip_code: String,
    #[serde(default)]
    pub codes: LocationCodes,
}

impl AddressPayload {
    /// Store a name reported for `field`
    pub fn apply(&mut self, field: AddressField, value: &str) {
        let slot = match field {
            AddressField::Region => &mut self.region,
            AddressField::Province => &mut self.province,
            AddressField::City => &mut self.city,
            AddressField::Barangay => &mut self.barangay,
        };
        *slot = value.to_string();
    }

    pub fn with_field(mut self, field: AddressField, value: &str) -> Self {
        self.apply(field, value);
        self
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    /// Take codes and resolve every name from the reference tables
    pub fn with_codes(mut self, codes: LocationCodes, data: &ReferenceData) -> Self {
        self.region = data.region_name(&codes.region).to_string();
        self.province = data.province_name(&codes.province).to_string();
        self.city = data.city_name(&codes.city).to_string();
        self.barangay = data.barangay_name(&codes.barangay).to_string();
        self.codes = codes;
        self
    }

    /// Street line present and every level named. The barangay may stay
    /// empty when the selected city is known but has no barangays listed.
    pub fn is_complete(&self, data: &ReferenceData) -> bool {
        let barangay_optional =
            data.city(&self.codes.city).is_some() && !data.has_barangays(&self.codes.city);
        !self.street.trim().is_empty()
            && AddressField::ALL.iter().all(|&f| {
                !self.name(f).is_empty() || (f == AddressField::Barangay && barangay_optional)
            })
    }

    pub fn name(&self, field: AddressField) -> &str {
        match field {
            AddressField::Region => &self.region,
            AddressField::Province => &self.province,
            AddressField::City => &self.city,
            AddressField::Barangay => &self.barangay,
        }
    }

    /// "street, barangay, city, province" skipping empty parts
    pub fn one_line(&self) -> String {
        [
            self.street.trim(),
            self.barangay.as_str(),
            self.city.as_str(),
            self.province.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Philippine mobile number in `+639XXXXXXXXX` form.
/// Deserialization goes through [`PhonePayload::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhonePayload(String);

impl PhonePayload {
    /// Accepts `09XXXXXXXXX`, `9XXXXXXXXX`, `639XXXXXXXXX` and `+639XXXXXXXXX`,
    /// ignoring spaces, dashes and parentheses. A `+` must be followed by `63`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        let digits = match cleaned.strip_prefix('+') {
            Some(rest) if rest.starts_with("63") => rest,
            Some(_) => return Err(format!("Only +63 numbers are supported: {}", raw)),
            None => cleaned.as_str(),
        };

        if digits.is_empty() {
            return Err("Phone number is required".into());
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Phone number contains invalid characters: {}", raw));
        }

        let national = match digits.len() {
            12 if digits.starts_with("63") => &digits[2..],
            11 if digits.starts_with('0') => &digits[1..],
            10 => digits,
            _ => return Err(format!("Phone number has invalid length: {}", raw)),
        };

        if !national.starts_with('9') {
            return Err(format!("Not a mobile number: {}", raw));
        }

        Ok(Self(format!("+63{}", national)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local display form, e.g. `0917 123 4567`
    pub fn display_local(&self) -> String {
        let national = self.0.strip_prefix("+63").unwrap_or(&self.0);
        match (national.get(..3), national.get(3..6), national.get(6..)) {
            (Some(prefix), Some(mid), Some(rest)) if !rest.is_empty() => {
                format!("0{} {} {}", prefix, mid, rest)
            }
            _ => self.0.clone(),
        }
    }
}

impl TryFrom<String> for PhonePayload {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PhonePayload> for String {
    fn from(phone: PhonePayload) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_codes() -> LocationCodes {
        LocationCodes::new("01", "0128", "012801", "012801001")
    }

    #[test]
    fn test_apply_stores_names() {
        let address = AddressPayload::default()
            .with_field(AddressField::Region, "REGION I (ILOCOS REGION)")
            .with_field(AddressField::Province, "Ilocos Norte")
            .with_field(AddressField::Province, "");
        assert_eq!(address.region, "REGION I (ILOCOS REGION)");
        assert_eq!(address.province, "");
    }

    #[test]
    fn test_with_codes_resolves_names() {
        let data = ReferenceData::fixture();
        let address = AddressPayload::default()
            .with_street("12 Rizal St.")
            .with_codes(full_codes(), &data);
        assert_eq!(address.city, "ADAMS");
        assert_eq!(address.barangay, "Adams (Pob.)");
        assert_eq!(address.codes.city, "012801");
        assert!(address.is_complete(&data));
        assert_eq!(
            address.one_line(),
            "12 Rizal St., Adams (Pob.), ADAMS, Ilocos Norte"
        );
    }

    #[test]
    fn test_incomplete_without_street_or_barangay() {
        let data = ReferenceData::fixture();
        let address = AddressPayload::default().with_codes(full_codes(), &data);
        assert!(!address.is_complete(&data));
        let address = address
            .with_street("Lot 4")
            .with_field(AddressField::Barangay, "");
        assert!(!address.is_complete(&data));
    }

    #[test]
    fn test_barangay_optional_when_city_lists_none() {
        let data = ReferenceData::fixture();
        let with_list = LocationCodes::new("01", "0128", "012802", "");
        let address = AddressPayload::default()
            .with_street("Purok 1")
            .with_codes(with_list, &data);
        assert!(!address.is_complete(&data));

        // No barangays bundled for this city
        let without_list = LocationCodes::new("01", "0128", "012812", "");
        let data = ReferenceData::from_json(
            include_str!("location/fixtures/regions.json"),
            include_str!("location/fixtures/provinces.json"),
            include_str!("location/fixtures/cities.json"),
            "[]",
        )
        .unwrap();
        let address = AddressPayload::default()
            .with_street("Purok 1")
            .with_codes(without_list, &data);
        assert_eq!(address.barangay, "");
        assert!(address.is_complete(&data));

        // Names without codes still need a barangay
        let names_only = AddressPayload {
            codes: LocationCodes::default(),
            ..address
        };
        assert!(!names_only.is_complete(&data));
    }

    #[test]
    fn test_address_json_field_names() {
        let address = AddressPayload {
            zip_code: "2900".into(),
            ..AddressPayload::default()
        };
        let json = serde_json::to_value(address).unwrap();
        assert_eq!(json["zipCode"], "2900");
        assert_eq!(json["codes"]["region"], "");
    }

    #[test]
    fn test_phone_formats_normalize() {
        for raw in [
            "09171234567",
            "9171234567",
            "639171234567",
            "+639171234567",
            "+63 917 123 4567",
            "(0917) 123-4567",
        ] {
            assert_eq!(PhonePayload::parse(raw).unwrap().as_str(), "+639171234567", "{}", raw);
        }
    }

    #[test]
    fn test_phone_rejects_bad_input() {
        assert!(PhonePayload::parse("").is_err());
        assert!(PhonePayload::parse("+").is_err());
        assert!(PhonePayload::parse("0917abc4567").is_err());
        assert!(PhonePayload::parse("0917123").is_err());
        // Landline
        assert!(PhonePayload::parse("0281234567").is_err());
    }

    #[test]
    fn test_phone_plus_requires_country_code() {
        assert!(PhonePayload::parse("+09171234567").is_err());
        assert!(PhonePayload::parse("+9171234567").is_err());
        assert!(PhonePayload::parse("+1 917 123 4567").is_err());
    }

    #[test]
    fn test_phone_local_display() {
        let phone = PhonePayload::parse("+639171234567").unwrap();
        assert_eq!(phone.display_local(), "0917 123 4567");
    }

    #[test]
    fn test_phone_deserialize_validates() {
        let phone: PhonePayload = serde_json::from_str("\"0917 123 4567\"").unwrap();
        assert_eq!(phone.as_str(), "+639171234567");
        assert_eq!(phone.display_local(), "0917 123 4567");
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+639171234567\"");

        assert!(serde_json::from_str::<PhonePayload>("\"12\"").is_err());
        assert!(serde_json::from_str::<PhonePayload>("\"+9171234567\"").is_err());
    }
}
