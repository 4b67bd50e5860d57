//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one sync function per clinic operation to Dart via FRB.
//! - Project core records into FFI-owned item structs and wrap them in
//!   per-entity response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the configured database, runs one operation against one
//!   entity kind, and releases the connection.
//! - Logging is not started implicitly. Hosts call `init_logging` or
//!   `init_logging_from_env` once at startup.

use clinic_core::db::open_db;
use clinic_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Appointment, AppointmentPayload, ClinicConfig, ClinicService, Patient, PatientPayload,
    RepoResult, SystemClock, Therapist, TherapistPayload, Treatment, TreatmentPayload,
    UpdatedAt, UuidGenerator,
};
use log::warn;
use std::sync::OnceLock;

static CLINIC_CONFIG: OnceLock<ClinicConfig> = OnceLock::new();
static CLINIC_CLOCK: OnceLock<SystemClock> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// A blank `level` falls back to `CLINIC_LOG_LEVEL`, then to the build-mode
/// default. Returns an empty string on success and the error message on
/// failure. Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = effective_log_level(level, resolve_config());
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Initializes logging from `CLINIC_LOG_LEVEL` and `CLINIC_LOG_DIR`.
///
/// Returns an empty string on success and the error message on failure,
/// including when `CLINIC_LOG_DIR` is not set.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    init_logging_with(resolve_config())
}

/// Patient projection returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientItem {
    pub id: String,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    /// Creation time in nanoseconds.
    pub created_at_ns: u64,
    /// Last update time in nanoseconds; `None` until the first update.
    pub updated_at_ns: Option<u64>,
}

/// Therapist projection returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistItem {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub created_at_ns: u64,
    pub updated_at_ns: Option<u64>,
}

/// Treatment projection returned to Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at_ns: u64,
    pub updated_at_ns: Option<u64>,
}

/// Appointment projection returned to Dart. Appointments never track updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentItem {
    pub id: String,
    pub patient_id: String,
    pub therapist_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at_ns: u64,
}

/// Single-patient action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected patient on success.
    pub patient: Option<PatientItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PatientResponse {
    fn success(message: impl Into<String>, patient: Patient) -> Self {
        Self {
            ok: true,
            patient: Some(to_patient_item(patient)),
            message: message.into(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            patient: None,
            message,
        }
    }
}

/// Patient listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientListResponse {
    pub ok: bool,
    /// Patients in id order; empty on failure.
    pub items: Vec<PatientItem>,
    pub message: String,
}

impl PatientListResponse {
    fn success(patients: Vec<Patient>) -> Self {
        Self {
            ok: true,
            message: found_message(patients.len(), "patient"),
            items: patients.into_iter().map(to_patient_item).collect(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message,
        }
    }
}

/// Single-therapist action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistResponse {
    pub ok: bool,
    pub therapist: Option<TherapistItem>,
    pub message: String,
}

impl TherapistResponse {
    fn success(message: impl Into<String>, therapist: Therapist) -> Self {
        Self {
            ok: true,
            therapist: Some(to_therapist_item(therapist)),
            message: message.into(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            therapist: None,
            message,
        }
    }
}

/// Therapist listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistListResponse {
    pub ok: bool,
    pub items: Vec<TherapistItem>,
    pub message: String,
}

impl TherapistListResponse {
    fn success(therapists: Vec<Therapist>) -> Self {
        Self {
            ok: true,
            message: found_message(therapists.len(), "therapist"),
            items: therapists.into_iter().map(to_therapist_item).collect(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message,
        }
    }
}

/// Single-treatment action response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentResponse {
    pub ok: bool,
    pub treatment: Option<TreatmentItem>,
    pub message: String,
}

impl TreatmentResponse {
    fn success(message: impl Into<String>, treatment: Treatment) -> Self {
        Self {
            ok: true,
            treatment: Some(to_treatment_item(treatment)),
            message: message.into(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            treatment: None,
            message,
        }
    }
}

/// Treatment listing response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentListResponse {
    pub ok: bool,
    pub items: Vec<TreatmentItem>,
    pub message: String,
}

impl TreatmentListResponse {
    fn success(treatments: Vec<Treatment>) -> Self {
        Self {
            ok: true,
            message: found_message(treatments.len(), "treatment"),
            items: treatments.into_iter().map(to_treatment_item).collect(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message,
        }
    }
}

/// Single-appointment action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentResponse {
    pub ok: bool,
    pub appointment: Option<AppointmentItem>,
    pub message: String,
}

impl AppointmentResponse {
    fn success(message: impl Into<String>, appointment: Appointment) -> Self {
        Self {
            ok: true,
            appointment: Some(to_appointment_item(appointment)),
            message: message.into(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            appointment: None,
            message,
        }
    }
}

/// Appointment listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentListResponse {
    pub ok: bool,
    pub items: Vec<AppointmentItem>,
    pub message: String,
}

impl AppointmentListResponse {
    fn success(appointments: Vec<Appointment>) -> Self {
        Self {
            ok: true,
            message: found_message(appointments.len(), "appointment"),
            items: appointments.into_iter().map(to_appointment_item).collect(),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message,
        }
    }
}

/// Creates a patient.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Every field is required; blank values are reported in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_patient(name: String, dob: String, gender: String, phone: String) -> PatientResponse {
    let payload = PatientPayload {
        name,
        dob,
        gender,
        phone,
    };
    with_clinic_service("add_patient", |service| service.add_patient(payload)).map_or_else(
        PatientResponse::failure,
        |patient| PatientResponse::success("Patient created.", patient),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_patients() -> PatientListResponse {
    with_clinic_service("get_patients", |service| service.get_patients())
        .map_or_else(PatientListResponse::failure, PatientListResponse::success)
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_patient(id: String) -> PatientResponse {
    with_clinic_service("get_patient", |service| service.get_patient(&id)).map_or_else(
        PatientResponse::failure,
        |patient| PatientResponse::success("Patient found.", patient),
    )
}

/// Replaces every field of an existing patient.
///
/// All-blank fields are rejected as an empty payload before lookup.
#[flutter_rust_bridge::frb(sync)]
pub fn update_patient(
    id: String,
    name: String,
    dob: String,
    gender: String,
    phone: String,
) -> PatientResponse {
    let payload = PatientPayload {
        name,
        dob,
        gender,
        phone,
    };
    with_clinic_service("update_patient", |service| {
        service.update_patient(&id, payload)
    })
    .map_or_else(PatientResponse::failure, |patient| {
        PatientResponse::success("Patient updated.", patient)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_patient(id: String) -> PatientResponse {
    with_clinic_service("delete_patient", |service| service.delete_patient(&id)).map_or_else(
        PatientResponse::failure,
        |patient| PatientResponse::success("Patient deleted.", patient),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_therapist(name: String, specialization: String, phone: String) -> TherapistResponse {
    let payload = TherapistPayload {
        name,
        specialization,
        phone,
    };
    with_clinic_service("add_therapist", |service| service.add_therapist(payload)).map_or_else(
        TherapistResponse::failure,
        |therapist| TherapistResponse::success("Therapist created.", therapist),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_therapists() -> TherapistListResponse {
    with_clinic_service("get_therapists", |service| service.get_therapists())
        .map_or_else(TherapistListResponse::failure, TherapistListResponse::success)
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_therapist(id: String) -> TherapistResponse {
    with_clinic_service("get_therapist", |service| service.get_therapist(&id)).map_or_else(
        TherapistResponse::failure,
        |therapist| TherapistResponse::success("Therapist found.", therapist),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_therapist(
    id: String,
    name: String,
    specialization: String,
    phone: String,
) -> TherapistResponse {
    let payload = TherapistPayload {
        name,
        specialization,
        phone,
    };
    with_clinic_service("update_therapist", |service| {
        service.update_therapist(&id, payload)
    })
    .map_or_else(TherapistResponse::failure, |therapist| {
        TherapistResponse::success("Therapist updated.", therapist)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_therapist(id: String) -> TherapistResponse {
    with_clinic_service("delete_therapist", |service| service.delete_therapist(&id))
        .map_or_else(TherapistResponse::failure, |therapist| {
            TherapistResponse::success("Therapist deleted.", therapist)
        })
}

/// Creates a treatment.
///
/// `price: None` is reported as a missing field; `Some(0.0)` is a valid
/// free treatment.
#[flutter_rust_bridge::frb(sync)]
pub fn add_treatment(name: String, description: String, price: Option<f64>) -> TreatmentResponse {
    let payload = TreatmentPayload {
        name,
        description,
        price,
    };
    with_clinic_service("add_treatment", |service| service.add_treatment(payload)).map_or_else(
        TreatmentResponse::failure,
        |treatment| TreatmentResponse::success("Treatment created.", treatment),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_treatments() -> TreatmentListResponse {
    with_clinic_service("get_treatments", |service| service.get_treatments())
        .map_or_else(TreatmentListResponse::failure, TreatmentListResponse::success)
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_treatment(id: String) -> TreatmentResponse {
    with_clinic_service("get_treatment", |service| service.get_treatment(&id)).map_or_else(
        TreatmentResponse::failure,
        |treatment| TreatmentResponse::success("Treatment found.", treatment),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_treatment(
    id: String,
    name: String,
    description: String,
    price: Option<f64>,
) -> TreatmentResponse {
    let payload = TreatmentPayload {
        name,
        description,
        price,
    };
    with_clinic_service("update_treatment", |service| {
        service.update_treatment(&id, payload)
    })
    .map_or_else(TreatmentResponse::failure, |treatment| {
        TreatmentResponse::success("Treatment updated.", treatment)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_treatment(id: String) -> TreatmentResponse {
    with_clinic_service("delete_treatment", |service| service.delete_treatment(&id))
        .map_or_else(TreatmentResponse::failure, |treatment| {
            TreatmentResponse::success("Treatment deleted.", treatment)
        })
}

/// Treatments priced within `[min_price, max_price]`, both inclusive.
#[flutter_rust_bridge::frb(sync)]
pub fn get_treatments_by_price_range(min_price: f64, max_price: f64) -> TreatmentListResponse {
    with_clinic_service("get_treatments_by_price_range", |service| {
        service.get_treatments_by_price_range(min_price, max_price)
    })
    .map_or_else(TreatmentListResponse::failure, TreatmentListResponse::success)
}

/// Books an appointment.
///
/// `date` must be a calendar date (`YYYY-MM-DD`). Patient and therapist ids
/// are stored as given without checking they exist.
#[flutter_rust_bridge::frb(sync)]
pub fn add_appointment(
    patient_id: String,
    therapist_id: String,
    date: String,
    start_time: String,
    end_time: String,
) -> AppointmentResponse {
    let payload = AppointmentPayload {
        patient_id,
        therapist_id,
        date,
        start_time,
        end_time,
    };
    with_clinic_service("add_appointment", |service| service.add_appointment(payload))
        .map_or_else(AppointmentResponse::failure, |appointment| {
            AppointmentResponse::success("Appointment created.", appointment)
        })
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_appointments() -> AppointmentListResponse {
    with_clinic_service("get_appointments", |service| service.get_appointments())
        .map_or_else(AppointmentListResponse::failure, AppointmentListResponse::success)
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_appointment(id: String) -> AppointmentResponse {
    with_clinic_service("get_appointment", |service| service.get_appointment(&id))
        .map_or_else(AppointmentResponse::failure, |appointment| {
            AppointmentResponse::success("Appointment found.", appointment)
        })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_appointment(
    id: String,
    patient_id: String,
    therapist_id: String,
    date: String,
    start_time: String,
    end_time: String,
) -> AppointmentResponse {
    let payload = AppointmentPayload {
        patient_id,
        therapist_id,
        date,
        start_time,
        end_time,
    };
    with_clinic_service("update_appointment", |service| {
        service.update_appointment(&id, payload)
    })
    .map_or_else(AppointmentResponse::failure, |appointment| {
        AppointmentResponse::success("Appointment updated.", appointment)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_appointment(id: String) -> AppointmentResponse {
    with_clinic_service("delete_appointment", |service| {
        service.delete_appointment(&id)
    })
    .map_or_else(AppointmentResponse::failure, |appointment| {
        AppointmentResponse::success("Appointment deleted.", appointment)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_appointments_by_patient(patient_id: String) -> AppointmentListResponse {
    with_clinic_service("get_appointments_by_patient", |service| {
        service.get_appointments_by_patient(&patient_id)
    })
    .map_or_else(AppointmentListResponse::failure, AppointmentListResponse::success)
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_appointments_by_therapist(therapist_id: String) -> AppointmentListResponse {
    with_clinic_service("get_appointments_by_therapist", |service| {
        service.get_appointments_by_therapist(&therapist_id)
    })
    .map_or_else(AppointmentListResponse::failure, AppointmentListResponse::success)
}

/// Appointments dated within `[start_date, end_date]`, both inclusive.
#[flutter_rust_bridge::frb(sync)]
pub fn get_appointments_by_date_range(
    start_date: String,
    end_date: String,
) -> AppointmentListResponse {
    with_clinic_service("get_appointments_by_date_range", |service| {
        service.get_appointments_by_date_range(&start_date, &end_date)
    })
    .map_or_else(AppointmentListResponse::failure, AppointmentListResponse::success)
}

fn to_patient_item(patient: Patient) -> PatientItem {
    PatientItem {
        id: patient.id,
        name: patient.name,
        dob: patient.dob,
        gender: patient.gender,
        phone: patient.phone,
        created_at_ns: patient.created_at.as_nanos(),
        updated_at_ns: updated_at_ns(patient.updated_at),
    }
}

fn to_therapist_item(therapist: Therapist) -> TherapistItem {
    TherapistItem {
        id: therapist.id,
        name: therapist.name,
        specialization: therapist.specialization,
        phone: therapist.phone,
        created_at_ns: therapist.created_at.as_nanos(),
        updated_at_ns: updated_at_ns(therapist.updated_at),
    }
}

fn to_treatment_item(treatment: Treatment) -> TreatmentItem {
    TreatmentItem {
        id: treatment.id,
        name: treatment.name,
        description: treatment.description,
        price: treatment.price,
        created_at_ns: treatment.created_at.as_nanos(),
        updated_at_ns: updated_at_ns(treatment.updated_at),
    }
}

fn to_appointment_item(appointment: Appointment) -> AppointmentItem {
    AppointmentItem {
        id: appointment.id,
        patient_id: appointment.patient_id,
        therapist_id: appointment.therapist_id,
        date: appointment.date,
        start_time: appointment.start_time,
        end_time: appointment.end_time,
        created_at_ns: appointment.created_at.as_nanos(),
    }
}

fn updated_at_ns(updated_at: UpdatedAt) -> Option<u64> {
    updated_at.timestamp().map(|at| at.as_nanos())
}

fn found_message(count: usize, label: &str) -> String {
    if count == 0 {
        "No results.".to_string()
    } else {
        format!("Found {count} {label}(s).")
    }
}

fn resolve_config() -> &'static ClinicConfig {
    CLINIC_CONFIG.get_or_init(ClinicConfig::from_env)
}

fn effective_log_level(level: String, config: &ClinicConfig) -> String {
    if level.trim().is_empty() {
        config.log_level.clone()
    } else {
        level
    }
}

fn init_logging_with(config: &ClinicConfig) -> String {
    match config.init_logging() {
        Ok(true) => String::new(),
        Ok(false) => "CLINIC_LOG_DIR is not set; logging stays off".to_string(),
        Err(err) => err,
    }
}

fn with_clinic_service<T>(
    operation: &'static str,
    f: impl FnOnce(&ClinicService<'_>) -> RepoResult<T>,
) -> Result<T, String> {
    let result = run_operation(operation, f);
    if let Err(message) = &result {
        warn!("event=ffi_call module=ffi status=error operation={operation} error={message}");
    }
    result
}

fn run_operation<T>(
    operation: &'static str,
    f: impl FnOnce(&ClinicService<'_>) -> RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(&resolve_config().db_path)
        .map_err(|err| format!("{operation} failed: clinic DB open failed: {err}"))?;
    let clock = CLINIC_CLOCK.get_or_init(SystemClock::new);
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, clock, &ids)
        .map_err(|err| format!("{operation} failed: clinic store init failed: {err}"))?;
    f(&service).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        add_appointment, add_patient, add_treatment, core_version, delete_patient,
        effective_log_level, get_appointments_by_patient, get_patient,
        get_treatments_by_price_range, init_logging, init_logging_with, ping, update_patient,
    };
    use clinic_core::ClinicConfig;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn config(log_level: &str, log_dir: Option<&str>) -> ClinicConfig {
        ClinicConfig {
            db_path: std::env::temp_dir().join("clinic-ffi-test.sqlite3"),
            log_level: log_level.to_string(),
            log_dir: log_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn blank_log_level_falls_back_to_configured_level() {
        let config = config("warn", None);
        assert_eq!(effective_log_level("  ".to_string(), &config), "warn");
        assert_eq!(effective_log_level("error".to_string(), &config), "error");
    }

    #[test]
    fn config_logging_reports_missing_dir_and_bad_level() {
        let missing_dir = init_logging_with(&config("info", None));
        assert!(missing_dir.contains("CLINIC_LOG_DIR"), "{missing_dir}");

        let bad_level = init_logging_with(&config("verbose", Some("/tmp/clinic-logs")));
        assert!(bad_level.contains("verbose"), "{bad_level}");
    }

    #[test]
    fn patient_lifecycle_through_ffi_envelopes() {
        let created = add_patient(
            "A".to_string(),
            "01/01/1990".to_string(),
            "F".to_string(),
            "123".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let created = created.patient.expect("created patient");
        assert_eq!(created.dob, "01/01/1990");
        assert_eq!(created.updated_at_ns, None);

        let updated = update_patient(
            created.id.clone(),
            "B".to_string(),
            "1990-01-01".to_string(),
            "F".to_string(),
            "123".to_string(),
        );
        assert!(updated.ok, "{}", updated.message);
        let updated = updated.patient.expect("updated patient");
        assert_eq!(updated.name, "B");
        assert_eq!(updated.created_at_ns, created.created_at_ns);
        assert!(updated.updated_at_ns.is_some());

        let deleted = delete_patient(created.id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let missing = get_patient(created.id.clone());
        assert!(!missing.ok);
        assert!(missing.patient.is_none());
        assert!(missing.message.contains(&created.id));
    }

    #[test]
    fn validation_failures_surface_as_messages() {
        let response = add_patient(String::new(), String::new(), String::new(), String::new());
        assert!(!response.ok);
        assert!(response.message.contains("All fields are required"));

        let empty_update = update_patient(
            unique_token("missing"),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert!(!empty_update.ok);
        assert!(empty_update.message.contains("empty payload"));
    }

    #[test]
    fn appointments_by_patient_only_returns_matching_rows() {
        let patient_id = unique_token("ffi-patient");
        let other_id = unique_token("ffi-other");
        let book = |patient_id: &str| {
            add_appointment(
                patient_id.to_string(),
                "t1".to_string(),
                "2024-05-01".to_string(),
                "09:00".to_string(),
                "09:30".to_string(),
            )
        };

        let mine = book(&patient_id);
        assert!(mine.ok, "{}", mine.message);
        let theirs = book(&other_id);
        assert!(theirs.ok, "{}", theirs.message);

        let found = get_appointments_by_patient(patient_id);
        assert!(found.ok, "{}", found.message);
        assert_eq!(found.items, vec![mine.appointment.expect("created appointment")]);
        assert_eq!(found.message, "Found 1 appointment(s).");
    }

    #[test]
    fn treatment_price_is_optional_at_the_boundary() {
        let absent = add_treatment("massage".to_string(), "deep tissue".to_string(), None);
        assert!(!absent.ok);
        assert!(absent.message.contains("price"), "{}", absent.message);

        let free = add_treatment("intake".to_string(), "first visit".to_string(), Some(0.0));
        assert!(free.ok, "{}", free.message);
        assert_eq!(free.treatment.expect("created treatment").price, 0.0);
    }

    #[test]
    fn price_range_rejects_nan_bound() {
        let created = add_treatment(
            "massage".to_string(),
            "deep tissue".to_string(),
            Some(60.0),
        );
        assert!(created.ok, "{}", created.message);

        let response = get_treatments_by_price_range(f64::NAN, 100.0);
        assert!(!response.ok);
        assert!(response.items.is_empty());
        assert!(response.message.contains("invalid range"));
    }
}
