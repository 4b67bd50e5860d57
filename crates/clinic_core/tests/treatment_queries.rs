use clinic_core::db::open_db_in_memory;
use clinic_core::{
    ClinicService, RepoError, SystemClock, TreatmentPayload, UpdatedAt, UuidGenerator,
    ValidationError,
};

fn treatment(name: &str, price: f64) -> TreatmentPayload {
    TreatmentPayload {
        name: name.to_string(),
        description: format!("{name} session"),
        price: Some(price),
    }
}

#[test]
fn price_range_selects_only_prices_within_bounds() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();

    service.add_treatment(treatment("ten", 10.0)).unwrap();
    let twenty = service.add_treatment(treatment("twenty", 20.0)).unwrap();
    service.add_treatment(treatment("thirty", 30.0)).unwrap();

    let found = service.get_treatments_by_price_range(15.0, 25.0).unwrap();
    assert_eq!(found, vec![twenty]);
}

#[test]
fn price_range_includes_both_bounds() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();

    let below = service.add_treatment(treatment("below", 9.0)).unwrap();
    let at_min = service.add_treatment(treatment("min", 10.0)).unwrap();
    let at_max = service.add_treatment(treatment("max", 50.0)).unwrap();

    let found: Vec<_> = service
        .get_treatments_by_price_range(10.0, 50.0)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert!(found.contains(&at_min.id));
    assert!(found.contains(&at_max.id));
    assert!(!found.contains(&below.id));
    assert_eq!(found.len(), 2);
}

#[test]
fn inverted_or_nan_price_bounds() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();
    service.add_treatment(treatment("any", 20.0)).unwrap();

    assert!(service
        .get_treatments_by_price_range(30.0, 10.0)
        .unwrap()
        .is_empty());

    let err = service
        .get_treatments_by_price_range(f64::NAN, 10.0)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidRange { .. })
    ));
}

#[test]
fn zero_price_is_a_valid_treatment() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();

    let free = service.add_treatment(treatment("consult", 0.0)).unwrap();
    assert_eq!(free.price, 0.0);
    assert_eq!(
        service.get_treatments_by_price_range(0.0, 0.0).unwrap(),
        vec![free]
    );
}

#[test]
fn absent_or_negative_price_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();

    let absent = service
        .add_treatment(TreatmentPayload {
            price: None,
            ..treatment("massage", 1.0)
        })
        .unwrap_err();
    match absent {
        RepoError::Validation(ValidationError::MissingFields { fields, .. }) => {
            assert_eq!(fields, vec!["price"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let negative = service
        .add_treatment(treatment("refund", -5.0))
        .unwrap_err();
    assert!(matches!(
        negative,
        RepoError::Validation(ValidationError::InvalidField { field: "price", .. })
    ));
    assert!(service.get_treatments().unwrap().is_empty());
}

#[test]
fn treatment_update_and_delete_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids).unwrap();

    let created = service.add_treatment(treatment("yoga", 40.0)).unwrap();
    assert_eq!(created.updated_at, UpdatedAt::Never);

    let repriced = service
        .update_treatment(&created.id, treatment("yoga", 45.0))
        .unwrap();
    assert_eq!(repriced.price, 45.0);
    assert!(repriced.updated_at.is_set());
    assert_eq!(service.get_treatment(&created.id).unwrap(), repriced);

    let removed = service.delete_treatment(&created.id).unwrap();
    assert_eq!(removed, repriced);
    assert!(service.get_treatment(&created.id).unwrap_err().is_not_found());
}

#[test]
fn treatment_payload_deserializes_missing_price_as_absent() {
    let payload: TreatmentPayload =
        serde_json::from_value(serde_json::json!({ "name": "x", "description": "y" })).unwrap();
    assert_eq!(payload.price, None);

    let zero: TreatmentPayload = serde_json::from_value(serde_json::json!({
        "name": "x",
        "description": "y",
        "price": 0
    }))
    .unwrap();
    assert_eq!(zero.price, Some(0.0));
}
