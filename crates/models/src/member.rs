use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{Entity, Record};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Active => f.write_str("Active"),
            MemberStatus::Inactive => f.write_str("Inactive"),
        }
    }
}

impl FromStr for MemberStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(ModelError::Parse(format!("unknown member status '{}'", other))),
        }
    }
}

/// Member directory entry. Persisted with camelCase field names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    /// `YYYY-MM-DD`
    pub birthdate: String,
    pub member_id: String,
    /// Masked, e.g. `***-**-9872`.
    pub ssn: String,
    pub member_status: MemberStatus,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub email: String,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn is_active(&self) -> bool {
        self.member_status == MemberStatus::Active
    }
}

impl Entity for Member {
    const COLLECTION: &'static str = "members";

    fn validate(&self) -> Result<(), ModelError> {
        if self.first_name.trim().is_empty() { return Err(ModelError::required("firstName")); }
        if self.last_name.trim().is_empty() { return Err(ModelError::required("lastName")); }
        if self.member_id.trim().is_empty() { return Err(ModelError::required("memberId")); }
        if !self.birthdate.is_empty() && NaiveDate::parse_from_str(&self.birthdate, "%Y-%m-%d").is_err() {
            return Err(ModelError::Validation("birthdate must be YYYY-MM-DD".into()));
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(ModelError::Validation("invalid email".into()));
        }
        Ok(())
    }
}

/// Partial update for a [`Member`]. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_status: Option<MemberStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl MemberPatch {
    pub fn status(status: MemberStatus) -> Self {
        Self { member_status: Some(status), ..Self::default() }
    }
}

/// Default member directory contents.
pub fn seed_members() -> Vec<Record<Member>> {
    vec![
        Record::new("1", Member {
            first_name: "Jacob".into(),
            last_name: "Smith".into(),
            sex: "Male".into(),
            birthdate: "1994-08-21".into(),
            member_id: "D-21000945300".into(),
            ssn: "***-**-9872".into(),
            member_status: MemberStatus::Active,
            address_line1: "123 Main St".into(),
            city: "Lebanon".into(),
            state: "MO".into(),
            zip_code: "65536".into(),
            email: "jacob.smith@email.com".into(),
        }),
        Record::new("2", Member {
            first_name: "Sarah".into(),
            last_name: "Johnson".into(),
            sex: "Female".into(),
            birthdate: "1988-03-15".into(),
            member_id: "D-21000945301".into(),
            ssn: "***-**-1234".into(),
            member_status: MemberStatus::Active,
            address_line1: "456 Oak Ave".into(),
            city: "Springfield".into(),
            state: "MO".into(),
            zip_code: "65802".into(),
            email: "sarah.johnson@email.com".into(),
        }),
        Record::new("3", Member {
            first_name: "Michael".into(),
            last_name: "Brown".into(),
            sex: "Male".into(),
            birthdate: "1992-11-30".into(),
            member_id: "D-21000945302".into(),
            ssn: "***-**-5678".into(),
            member_status: MemberStatus::Inactive,
            address_line1: "789 Pine Rd".into(),
            city: "Columbia".into(),
            state: "MO".into(),
            zip_code: "65201".into(),
            email: "michael.brown@email.com".into(),
        }),
    ]
}
