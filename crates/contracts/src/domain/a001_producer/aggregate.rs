use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::contact::{AddressPayload, PhonePayload};
use crate::shared::location::{reference_data, AddressField};

// ============================================================================
// ID Type
// ============================================================================

/// Producer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerId(pub Uuid);

impl ProducerId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProducerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Read model
// ============================================================================

/// Producer (supplier of catalog products) as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub id: ProducerId,
    pub name: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: AddressPayload,
    pub comment: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Producer {
    pub fn collection_name() -> &'static str {
        "producers"
    }

    pub fn list_name() -> &'static str {
        "Producers"
    }

    /// Form state for editing this record
    pub fn to_dto(&self) -> ProducerDto {
        ProducerDto {
            id: Some(self.id.as_string()),
            name: self.name.clone(),
            contact_person: self.contact_person.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            comment: self.comment.clone(),
        }
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Plain text fields of the producer form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProducerDetailField {
    Name,
    ContactPerson,
    Email,
    Comment,
}

/// One edit coming from the producer form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProducerPatch {
    Detail(ProducerDetailField, String),
    Address(AddressField, String),
    Street(String),
    ZipCode(String),
    Phone(String),
}

/// DTO for creating/updating a producer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducerDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "contactPerson", default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: AddressPayload,
    pub comment: Option<String>,
}

impl ProducerDto {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn apply(&mut self, patch: ProducerPatch) {
        match patch {
            ProducerPatch::Detail(field, value) => match field {
                ProducerDetailField::Name => self.name = value,
                ProducerDetailField::ContactPerson => self.contact_person = value,
                ProducerDetailField::Email => self.email = value,
                ProducerDetailField::Comment => {
                    self.comment = if value.trim().is_empty() {
                        None
                    } else {
                        Some(value)
                    };
                }
            },
            ProducerPatch::Address(field, value) => self.address.apply(field, &value),
            ProducerPatch::Street(value) => self.address.street = value,
            ProducerPatch::ZipCode(value) => self.address.zip_code = value,
            ProducerPatch::Phone(value) => self.phone = value,
        }
    }

    pub fn with(mut self, patch: ProducerPatch) -> Self {
        self.apply(patch);
        self
    }

    /// Validation
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Producer name is required".into());
        }
        if !self.email.trim().is_empty() && !is_plausible_email(self.email.trim()) {
            return Err(format!("Invalid email address: {}", self.email));
        }
        if !self.phone.trim().is_empty() {
            PhonePayload::parse(&self.phone)?;
        }
        if !self.address.is_complete(reference_data()) {
            return Err("Address must include street, region, province, city and barangay".into());
        }
        Ok(())
    }

    /// Validate and normalize before sending to the API
    pub fn prepare_for_save(&self) -> Result<ProducerDto, String> {
        self.validate()?;
        let mut dto = self.clone();
        dto.name = dto.name.trim().to_string();
        dto.email = dto.email.trim().to_string();
        if !dto.phone.trim().is_empty() {
            dto.phone = PhonePayload::parse(&dto.phone)?.as_str().to_string();
        }
        Ok(dto)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::location::LocationCodes;

    fn complete_dto() -> ProducerDto {
        let data = reference_data();
        ProducerDto {
            name: " Batac Farms ".into(),
            email: "sales@batacfarms.ph".into(),
            phone: "0917 123 4567".into(),
            address: AddressPayload::default()
                .with_street("Purok 3")
                .with_codes(LocationCodes::new("01", "0128", "012801", "012801001"), data),
            ..ProducerDto::default()
        }
    }

    #[test]
    fn test_apply_patches() {
        let dto = ProducerDto::default()
            .with(ProducerPatch::Detail(ProducerDetailField::Name, "Ilocos Garlic Co.".into()))
            .with(ProducerPatch::Address(AddressField::City, "BACARRA".into()))
            .with(ProducerPatch::Street("Rizal St.".into()))
            .with(ProducerPatch::ZipCode("2916".into()))
            .with(ProducerPatch::Phone("09171234567".into()));
        assert_eq!(dto.name, "Ilocos Garlic Co.");
        assert_eq!(dto.address.city, "BACARRA");
        assert_eq!(dto.address.street, "Rizal St.");
        assert_eq!(dto.address.zip_code, "2916");
        assert_eq!(dto.phone, "09171234567");
    }

    #[test]
    fn test_blank_comment_becomes_none() {
        let dto = ProducerDto::default()
            .with(ProducerPatch::Detail(ProducerDetailField::Comment, "  ".into()));
        assert_eq!(dto.comment, None);
        let dto = dto.with(ProducerPatch::Detail(ProducerDetailField::Comment, "organic".into()));
        assert_eq!(dto.comment.as_deref(), Some("organic"));
    }

    #[test]
    fn test_validate() {
        assert!(complete_dto().validate().is_ok());

        let mut dto = complete_dto();
        dto.name = "  ".into();
        assert!(dto.validate().is_err());

        let dto = complete_dto().with(ProducerPatch::Phone("12345".into()));
        assert!(dto.validate().is_err());

        let dto = complete_dto().with(ProducerPatch::Detail(ProducerDetailField::Email, "nope".into()));
        assert!(dto.validate().is_err());

        let dto = complete_dto().with(ProducerPatch::Address(AddressField::Region, String::new()));
        assert!(dto.validate().is_err());

        let dto = complete_dto().with(ProducerPatch::Address(AddressField::Barangay, String::new()));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_validate_city_without_listed_barangays() {
        let data = reference_data();
        let codes = LocationCodes::new("07", "0722", "072217", "");
        assert!(data.barangays_for("072217").is_empty());

        let mut dto = complete_dto();
        dto.address = AddressPayload::default()
            .with_street("Osmeña Blvd.")
            .with_codes(codes, data);
        assert_eq!(dto.address.city, "CEBU CITY (Capital)");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_prepare_for_save_normalizes() {
        let dto = complete_dto().prepare_for_save().unwrap();
        assert_eq!(dto.name, "Batac Farms");
        assert_eq!(dto.phone, "+639171234567");
    }

    #[test]
    fn test_producer_to_dto() {
        let producer = Producer {
            id: ProducerId::new_v4(),
            name: "Vigan Longganisa".into(),
            contact_person: "Maria Santos".into(),
            email: String::new(),
            phone: String::new(),
            address: AddressPayload::default(),
            comment: None,
            updated_at: Utc::now(),
        };
        let dto = producer.to_dto();
        assert!(dto.is_edit());
        assert_eq!(ProducerId::from_string(dto.id.as_deref().unwrap()).unwrap(), producer.id);
    }

    #[test]
    fn test_invalid_id() {
        assert!(ProducerId::from_string("not-a-uuid").is_err());
    }
}
