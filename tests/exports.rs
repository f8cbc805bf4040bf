#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use shiftplan::{
    io,
    model::{Business, MonthRef, RoleId, Worker, Workspace},
    notification::{prepare_schedule_notice, TextNotice},
    requests::{PendingRequest, RequestError, RequestStatus},
    schedule::MonthlySchedule,
    scheduler::Scheduler,
    storage::{JsonStorage, Storage},
    template::ShiftDefinition,
};
use tempfile::tempdir;

const SERVER: RoleId = RoleId(1);

fn t(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn july() -> MonthRef {
    MonthRef::new(2025, 6).unwrap()
}

fn business() -> Business {
    let mut b = Business::new("Chez Nous");
    let server = b.add_role("Server");
    let mut def = ShiftDefinition::new("Morning", t(9), t(17)).unwrap();
    def.set_requirement(server, 2);
    b.add_shift(1, def).unwrap();
    b
}

fn alice() -> Worker {
    let mut w = Worker::new("Alice", "alice@example.com", 9).unwrap();
    w.role_ids = vec![SERVER];
    w.availability_entry(july());
    w
}

fn generated() -> MonthlySchedule {
    let business = business();
    let workers = vec![alice()];
    Scheduler::new(&business, &workers).generate(july()).unwrap()
}

#[test]
fn csv_export_flattens_assignments_and_open_slots() {
    let schedule = generated();
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.csv");
    io::export_schedule_csv(&path, &schedule).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Day,Shift,Time,Role,Worker,Status"
    );
    assert!(content.contains("2025-07-07,Monday,Morning,09:00 - 17:00,Server,Alice,Assigned"));
    assert!(content
        .contains("2025-07-07,Monday,Morning,09:00 - 17:00,Server,UNFILLED,Needs Assignment"));
    // 4 lundis, 1 affectation + 1 place vacante chacun, plus le header
    assert_eq!(content.lines().count(), 9);
}

#[test]
fn json_export_round_trips_the_schedule() {
    let schedule = generated();
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    io::export_schedule_json(&path, &schedule).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let loaded: MonthlySchedule = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded, schedule);
}

#[test]
fn workers_csv_import_parses_roles_and_validates_rating() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workers.csv");
    std::fs::write(
        &path,
        "name,email,rating,roles\nAlice,alice@example.com,9,1;2\nBob,bob@example.com,3,\n",
    )
    .unwrap();

    let workers = io::import_workers_csv(&path).unwrap();
    assert_eq!(workers.len(), 2);
    assert_eq!(workers[0].name, "Alice");
    assert_eq!(workers[0].role_ids, vec![RoleId(1), RoleId(2)]);
    assert!(workers[1].role_ids.is_empty());

    std::fs::write(
        &path,
        "name,email,rating,roles\nZoe,zoe@example.com,11,1\n",
    )
    .unwrap();
    assert!(io::import_workers_csv(&path).is_err());
}

#[test]
fn storage_round_trips_the_workspace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    let storage = JsonStorage::open(&path).unwrap();

    // fichier absent : document neuf
    let fresh = storage.load_or_default().unwrap();
    assert!(fresh.workers.is_empty());

    let mut workspace = Workspace::default();
    workspace.business = business();
    workspace.workers.push(alice());
    workspace
        .schedules
        .insert(july().key(), generated());
    storage.save(&workspace).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.business.name, "Chez Nous");
    assert_eq!(loaded.workers.len(), 1);
    assert!(loaded.schedules.contains_key("2025-07"));
    assert_eq!(loaded.schedules["2025-07"], workspace.schedules["2025-07"]);
}

#[test]
fn time_off_request_lifecycle_is_terminal() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let worker = alice();

    let start = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();
    assert_eq!(
        PendingRequest::time_off(worker.id.clone(), end, start, "vacances", now).unwrap_err(),
        RequestError::InvalidDateRange
    );

    let mut request =
        PendingRequest::time_off(worker.id.clone(), start, end, "vacances", now).unwrap();
    assert!(request.is_pending());

    let later = Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap();
    request.approve(later).unwrap();
    assert_eq!(request.status, RequestStatus::Approved);
    assert_eq!(request.updated_at, later);
    assert_eq!(request.created_at, now);

    assert_eq!(request.deny(later).unwrap_err(), RequestError::AlreadyResolved);
    assert_eq!(request.approve(later).unwrap_err(), RequestError::AlreadyResolved);
    assert_eq!(request.status, RequestStatus::Approved);
}

#[test]
fn shift_swap_request_round_trips_and_resolves() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let alice = alice();
    let target = Worker::new("Bob", "bob@example.com", 3).unwrap();

    let mut request = PendingRequest::shift_swap(
        alice.id.clone(),
        NaiveDate::from_ymd_opt(2025, 7, 7).unwrap(),
        "2025-07-07-0".to_string(),
        Some(target.id.clone()),
        now,
    );
    assert!(request.is_pending());

    let json = serde_json::to_string(&request).unwrap();
    let loaded: PendingRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, request);

    request.deny(now).unwrap();
    assert_eq!(request.status, RequestStatus::Denied);
}

#[test]
fn schedule_notice_lists_the_workers_assignments() {
    let schedule = generated();
    let worker = alice();
    let renderer = TextNotice;

    let notice = prepare_schedule_notice(&schedule, &worker, &renderer).unwrap();
    assert_eq!(notice.worker_name, "Alice");
    assert_eq!(notice.shift_count, 4);
    assert!(notice.content.contains("Alice"));
    assert!(notice.content.contains("2025-07-07 Morning 09:00 - 17:00 (Server)"));

    let outsider = Worker::new("Zoe", "zoe@example.com", 5).unwrap();
    assert!(prepare_schedule_notice(&schedule, &outsider, &renderer).is_err());
}
