use std::collections::HashSet;

use serde_json::json;

use crate::errors::ModelError;
use crate::member::{seed_members, Member, MemberPatch, MemberStatus};
use crate::{Entity, Record};

fn valid_member() -> Member {
    Member {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        member_id: "D-1".into(),
        birthdate: "2000-01-31".into(),
        email: "jane@example.com".into(),
        ..Member::default()
    }
}

#[test]
fn decodes_persisted_camel_case_shape() -> Result<(), anyhow::Error> {
    let rec: Record<Member> = serde_json::from_value(json!({
        "id": "1",
        "firstName": "Jacob",
        "lastName": "Smith",
        "sex": "Male",
        "birthdate": "1994-08-21",
        "memberId": "D-21000945300",
        "ssn": "***-**-9872",
        "memberStatus": "Active",
        "addressLine1": "123 Main St",
        "city": "Lebanon",
        "state": "MO",
        "zipCode": "65536",
        "email": "jacob.smith@email.com"
    }))?;
    assert_eq!(rec.id(), "1");
    assert_eq!(rec.address_line1, "123 Main St");
    assert_eq!(rec.zip_code, "65536");
    assert_eq!(rec.member_status, MemberStatus::Active);
    assert_eq!(rec.full_name(), "Jacob Smith");
    Ok(())
}

#[test]
fn decode_requires_every_member_field() {
    let res: Result<Record<Member>, _> = serde_json::from_value(json!({"id": "1", "firstName": "Only"}));
    assert!(res.is_err());
}

#[test]
fn default_member_is_active() {
    assert_eq!(Member::default().member_status, MemberStatus::Active);
}

#[test]
fn validate_requires_names_and_member_id() {
    assert!(valid_member().validate().is_ok());
    let m = Member { first_name: "  ".into(), ..valid_member() };
    assert_eq!(m.validate(), Err(ModelError::required("firstName")));
    let m = Member { last_name: String::new(), ..valid_member() };
    assert_eq!(m.validate(), Err(ModelError::required("lastName")));
    let m = Member { member_id: String::new(), ..valid_member() };
    assert_eq!(m.validate(), Err(ModelError::required("memberId")));
}

#[test]
fn validate_checks_birthdate_and_email_when_present() {
    let m = Member { birthdate: "1994-13-40".into(), ..valid_member() };
    assert!(matches!(m.validate(), Err(ModelError::Validation(_))));
    let m = Member { email: "not-an-email".into(), ..valid_member() };
    assert!(matches!(m.validate(), Err(ModelError::Validation(_))));
    let m = Member { birthdate: String::new(), email: String::new(), ..valid_member() };
    assert!(m.validate().is_ok());
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("inactive".parse::<MemberStatus>(), Ok(MemberStatus::Inactive));
    assert_eq!(" Active ".parse::<MemberStatus>(), Ok(MemberStatus::Active));
    assert!("suspended".parse::<MemberStatus>().is_err());
    assert_eq!(MemberStatus::Inactive.to_string(), "Inactive");
}

#[test]
fn patch_serializes_only_set_fields() -> Result<(), anyhow::Error> {
    let patch = MemberPatch { city: Some("Joplin".into()), ..MemberPatch::status(MemberStatus::Inactive) };
    let v = serde_json::to_value(&patch)?;
    assert_eq!(v, json!({"memberStatus": "Inactive", "city": "Joplin"}));
    Ok(())
}

#[test]
fn seed_members_are_valid_and_uniquely_identified() {
    let seeds = seed_members();
    assert_eq!(seeds.len(), 3);
    let ids: HashSet<&str> = seeds.iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(seeds.iter().all(|r| r.validate().is_ok()));
    assert_eq!(seeds[2].member_status, MemberStatus::Inactive);
}
