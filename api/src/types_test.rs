use super::*;

fn metadata_json(extra: &str) -> String {
    format!(r#"{{"userId":7,"email":"a@b.co","firstname":"Somchai","lastname":"Dee","userType":"General"{extra}}}"#)
}

#[test]
fn user_metadata_normalizes_numeric_id() {
    let meta: UserMetadata = serde_json::from_str(&metadata_json("")).expect("metadata");
    assert_eq!(meta.user_id, "7");
    assert_eq!(meta.user_type, Role::General);
}

#[test]
fn user_metadata_accepts_string_id() {
    let meta: UserMetadata = serde_json::from_str(
        r#"{"userId":"u-9","email":"a@b.co","firstname":"A","userType":"Admin"}"#,
    )
    .expect("metadata");
    assert_eq!(meta.user_id, "u-9");
    assert_eq!(meta.user_type, Role::Admin);
}

#[test]
fn user_metadata_rejects_unknown_role() {
    let raw = r#"{"userId":1,"email":"a@b.co","firstname":"A","userType":"Volunteer"}"#;
    assert!(serde_json::from_str::<UserMetadata>(raw).is_err());
}

#[test]
fn user_metadata_rejects_fractional_or_missing_id() {
    let fractional = r#"{"userId":1.5,"email":"a@b.co","userType":"General"}"#;
    assert!(serde_json::from_str::<UserMetadata>(fractional).is_err());
    let empty = r#"{"userId":"","email":"a@b.co","userType":"General"}"#;
    assert!(serde_json::from_str::<UserMetadata>(empty).is_err());
}

#[test]
fn snapshot_from_metadata_joins_names() {
    let meta: UserMetadata = serde_json::from_str(&metadata_json("")).expect("metadata");
    let snapshot = UserSnapshot::from_metadata(&meta);
    assert_eq!(snapshot.id, "7");
    assert_eq!(snapshot.name, "Somchai Dee");
    assert_eq!(snapshot.firstname, "Somchai");
    assert_eq!(snapshot.lastname.as_deref(), Some("Dee"));
}

#[test]
fn snapshot_for_foundation_prefers_foundation_name() {
    let raw = r#"{"userId":3,"email":"f@b.co","firstname":"","userType":"Foundation","foundationName":"Soi Dog"}"#;
    let meta: UserMetadata = serde_json::from_str(raw).expect("metadata");
    let snapshot = UserSnapshot::from_metadata(&meta);
    assert_eq!(snapshot.name, "Soi Dog");
    assert!(snapshot.is_foundation());
}

#[test]
fn snapshot_name_falls_back_to_email() {
    let raw = r#"{"userId":3,"email":"f@b.co","userType":"Foundation"}"#;
    let meta: UserMetadata = serde_json::from_str(raw).expect("metadata");
    assert_eq!(UserSnapshot::from_metadata(&meta).name, "f@b.co");
}

#[test]
fn snapshot_serializes_with_persisted_key_names() {
    let meta: UserMetadata = serde_json::from_str(&metadata_json(r#","image":"https://img/1.png""#)).expect("metadata");
    let value = serde_json::to_value(UserSnapshot::from_metadata(&meta)).expect("json");
    let keys: Vec<&str> = value.as_object().expect("object").keys().map(String::as_str).collect();
    for key in ["id", "email", "name", "image", "firstname", "lastname", "userType"] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert_eq!(value["userType"], "General");
}

#[test]
fn snapshot_from_info_uses_fresh_fields() {
    let raw = r#"{"id":7,"email":"a@b.co","firstname":"New","lastname":"Name","userType":"General","image":"x.png"}"#;
    let info: UserInfo = serde_json::from_str(raw).expect("info");
    let snapshot = UserSnapshot::from_info(&info);
    assert_eq!(snapshot.id, "7");
    assert_eq!(snapshot.name, "New Name");
    assert_eq!(snapshot.image.as_deref(), Some("x.png"));
}

#[test]
fn pet_list_query_skips_unset_filters() {
    assert!(PetListQuery::default().to_pairs().is_empty());
    let query = PetListQuery { foundation_id: Some("12".to_owned()), species: Some(String::new()) };
    assert_eq!(query.to_pairs(), vec![("foundationId".to_owned(), "12".to_owned())]);
}

#[test]
fn pet_decodes_optional_foundation_id() {
    let raw = r#"{"id":1,"name":"Mochi","species":"cat","foundationId":null}"#;
    let pet: Pet = serde_json::from_str(raw).expect("pet");
    assert_eq!(pet.foundation_id, None);
    assert!(pet.images.is_empty());

    let raw = r#"{"id":1,"name":"Mochi","species":"cat","foundationId":44}"#;
    let pet: Pet = serde_json::from_str(raw).expect("pet");
    assert_eq!(pet.foundation_id.as_deref(), Some("44"));
}

#[test]
fn register_body_omits_unset_optionals() {
    let body = RegisterGeneralBody {
        email: "a@b.co".to_owned(),
        password: "pw".to_owned(),
        firstname: "A".to_owned(),
        ..RegisterGeneralBody::default()
    };
    let value = serde_json::to_value(body).expect("json");
    assert_eq!(value, serde_json::json!({"email":"a@b.co","password":"pw","firstname":"A"}));
}

#[test]
fn update_user_body_uses_camel_case() {
    let body = UpdateUserBody { phone_number: Some("0812345678".to_owned()), ..UpdateUserBody::default() };
    assert!(!body.is_empty());
    assert_eq!(serde_json::to_value(body).expect("json"), serde_json::json!({"phoneNumber":"0812345678"}));
    assert!(UpdateUserBody::default().is_empty());
}

#[test]
fn adoption_request_decodes_status() {
    let raw = r#"{"id":5,"petId":"p1","status":"Approved"}"#;
    let request: AdoptionRequest = serde_json::from_str(raw).expect("request");
    assert_eq!(request.status, AdoptionStatus::Approved);
    assert_eq!(request.pet_id, "p1");
}
