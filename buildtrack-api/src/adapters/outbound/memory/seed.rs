//! Demo portfolio used when `store.seed_demo_data` is enabled.

use std::collections::HashMap;

use buildtrack_core::{
    dates,
    domain::{
        AcceptanceCategory, AcceptanceStatus, AcceptanceTask, Allocation, AllocationState,
        CalendarNote, DocumentStatus, DocumentType, EvidenceKind, PaymentStage, PaymentStatus,
        PcccCategory, PcccMaterial, Project, ProjectDocument, ProjectStatus, RecordId,
        SiteMaterial, SiteMaterialStatus, Task, TaskLocation, TaskType, Worker, WorkerStatus,
    },
};
use serde::Serialize;
use serde_json::Value;
use time::{Date, Duration};

use crate::domain::{ports::outbound::Collection, StoreError};

/// Three projects, five warehouse items and four acceptance records, with
/// derived fields computed as of `today`.
pub fn demo_records(today: Date) -> Result<HashMap<Collection, Vec<Value>>, StoreError> {
    let materials = demo_materials()
        .into_iter()
        .map(|mut material| {
            material.refresh_status(today);
            material
        })
        .collect::<Vec<_>>();

    Ok(HashMap::from([
        (Collection::Projects, to_values(Collection::Projects, &demo_projects())?),
        (Collection::PcccMaterials, to_values(Collection::PcccMaterials, &materials)?),
        (Collection::QaqcTasks, to_values(Collection::QaqcTasks, &demo_acceptance())?),
    ]))
}

fn to_values<T: Serialize>(collection: Collection, records: &[T]) -> Result<Vec<Value>, StoreError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(|e| StoreError::invalid(collection, e)))
        .collect()
}

fn demo_projects() -> Vec<Project> {
    let project = |id: &str, code: &str, name: &str, status: ProjectStatus, budget: f64, spent: f64| {
        let mut project = Project::new(id, code, name)
            .with_status(status)
            .with_budget(budget, spent)
            .with_tasks(demo_tasks(id));
        project.financials = demo_financials(budget);
        project.documents = demo_documents();
        project.materials = demo_site_materials();
        project
    };

    let mut green_city = project(
        "p-1",
        "KDT-001",
        "Green City - Block A",
        ProjectStatus::InProgress,
        5_000_000_000.0,
        1_000_000_000.0,
    );
    green_city.location = "District 9, Ho Chi Minh City".to_string();
    green_city.manager = "Nguyen Van A".to_string();
    green_city.start_date = "2023-11-01".to_string();
    green_city.end_date = "2024-06-30".to_string();
    green_city.description = "20-storey residential tower.".to_string();
    green_city.workers = demo_workers(15);

    let mut riverside = project(
        "p-2",
        "BT-052",
        "Riverside Villa",
        ProjectStatus::Delayed,
        2_000_000_000.0,
        400_000_000.0,
    );
    riverside.location = "Da Nang".to_string();
    riverside.manager = "Tran Thi B".to_string();
    riverside.start_date = "2023-10-15".to_string();
    riverside.end_date = "2024-02-15".to_string();
    riverside.description = "Premium resort villa.".to_string();
    riverside.workers = demo_workers(8);

    let mut factory = project(
        "p-3",
        "NM-103",
        "Packaging Factory",
        ProjectStatus::InProgress,
        15_000_000_000.0,
        3_000_000_000.0,
    );
    factory.location = "Binh Duong".to_string();
    factory.manager = "Le Van C".to_string();
    factory.start_date = "2023-09-01".to_string();
    factory.end_date = "2024-03-01".to_string();
    factory.description = "Pre-engineered steel workshop.".to_string();
    factory.workers = demo_workers(30);

    vec![green_city, riverside, factory]
}

fn demo_tasks(project_id: &str) -> Vec<Task> {
    let id = |n: u8| format!("{project_id}-t{n}");

    let mut site_prep = Task::new(id(1), "Site preparation", "2023-11-01", "2023-11-05")
        .with_progress(100)
        .with_status(ProjectStatus::Completed);
    site_prep.location = Some(TaskLocation {
        address: Some("Main gate, zone A".to_string()),
        ..Default::default()
    });

    let foundation = Task::new(id(2), "Foundation works", "2023-11-06", "2023-11-20")
        .with_type(TaskType::Construction)
        .with_progress(85)
        .with_status(ProjectStatus::InProgress);

    let mut slab = Task::new(id(3), "Ground floor slab pour", "2023-11-21", "2023-11-25")
        .with_type(TaskType::Construction);
    slab.dependencies = vec![foundation.id.clone()];

    vec![
        site_prep,
        foundation,
        slab,
        Task::new(id(4), "Perimeter walls", "2023-11-26", "2023-12-10")
            .with_type(TaskType::Construction),
        Task::new(id(5), "Electrical and plumbing rough-in", "2023-12-05", "2023-12-20")
            .with_type(TaskType::Electrical),
    ]
}

fn demo_workers(count: usize) -> Vec<Worker> {
    (1..=count)
        .map(|i| Worker {
            id: RecordId::new(format!("w-{i}")),
            name: format!("Worker {i}"),
            role: match i % 3 {
                1 => "Site engineer",
                2 => "Mason",
                _ => "Electrician",
            }
            .to_string(),
            status: WorkerStatus::Active,
            avatar: String::new(),
        })
        .collect()
}

fn demo_site_materials() -> Vec<SiteMaterial> {
    let material = |id: &str, name: &str, quantity: u32, unit: &str, status| SiteMaterial {
        id: RecordId::new(id),
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        status,
        last_updated: "2023-10-25".to_string(),
    };

    vec![
        material("m-1", "Cement PCB40", 500, "bag", SiteMaterialStatus::Available),
        material("m-2", "Rebar", 2000, "kg", SiteMaterialStatus::LowStock),
        material("m-3", "Sand", 50, "m3", SiteMaterialStatus::Available),
        material("m-4", "Paint", 0, "drum", SiteMaterialStatus::OutOfStock),
    ]
}

fn demo_financials(budget: f64) -> Vec<PaymentStage> {
    let stage = |id: &str, name: &str, share: f64, due: &str, status, paid: Option<&str>| PaymentStage {
        id: RecordId::new(id),
        name: name.to_string(),
        amount: budget * share,
        due_date: due.to_string(),
        status,
        paid_date: paid.map(str::to_string),
        description: None,
    };

    vec![
        stage("pay-1", "Advance payment (20%)", 0.2, "2023-11-01", PaymentStatus::Paid, Some("2023-11-02")),
        stage("pay-2", "Stage 1: foundations", 0.3, "2023-12-15", PaymentStatus::Pending, None),
        stage("pay-3", "Stage 2: structure", 0.3, "2024-03-01", PaymentStatus::Pending, None),
        stage("pay-4", "Handover (20%)", 0.2, "2024-06-30", PaymentStatus::Pending, None),
    ]
}

fn demo_documents() -> Vec<ProjectDocument> {
    let document = |id: &str, name: &str, document_type, date: &str, status| ProjectDocument {
        id: RecordId::new(id),
        name: name.to_string(),
        document_type,
        upload_date: date.to_string(),
        status,
        uploaded_by: "Nguyen Van A".to_string(),
        url: None,
        version: None,
        notes: None,
        file_size: None,
    };

    vec![
        document("doc-1", "Construction contract", DocumentType::Contract, "2023-10-25", DocumentStatus::Approved),
        document("doc-2", "Building permit 123/GPXD", DocumentType::Legal, "2023-10-20", DocumentStatus::Approved),
        document("doc-3", "Architectural drawings", DocumentType::Design, "2023-10-30", DocumentStatus::Approved),
        document("doc-4", "Foundation acceptance minutes", DocumentType::Handover, "2023-12-10", DocumentStatus::Draft),
    ]
}

fn demo_materials() -> Vec<PcccMaterial> {
    let allocation = |project_id: &str, project_name: &str, quantity, status, install_date: Option<&str>| Allocation {
        project_id: project_id.into(),
        project_name: project_name.to_string(),
        quantity,
        status,
        install_date: install_date.map(str::to_string),
    };

    let mut sprinkler = PcccMaterial::new("pccc-1", "Pendent sprinkler head", PcccCategory::Sprinkler, "pcs")
        .with_spec("68°C, K=5.6")
        .with_quantities(1000, 800, 200);
    sprinkler.allocated_to = vec![allocation("p-1", "Green City - Block A", 200, AllocationState::Issued, None)];

    let mut panel = PcccMaterial::new("pccc-2", "Fire alarm control panel", PcccCategory::Alarm, "set")
        .with_spec("10 loop, addressable")
        .with_quantities(5, 1, 2)
        .with_expiry("2023-12-01");
    panel.allocated_to = vec![
        allocation("p-3", "Packaging Factory", 2, AllocationState::Installed, Some("2023-10-15")),
        allocation("p-1", "Green City - Block A", 2, AllocationState::Issued, None),
    ];

    let mut extinguisher = PcccMaterial::new("pccc-3", "ABC powder extinguisher", PcccCategory::Extinguisher, "unit")
        .with_spec("MFZ4 4kg")
        .with_quantities(200, 30, 50)
        .with_expiry("2024-05-20");
    extinguisher.allocated_to = vec![
        allocation("p-2", "Riverside Villa", 20, AllocationState::Installed, None),
        allocation("p-3", "Packaging Factory", 150, AllocationState::Installed, None),
    ];

    let mut pipe = PcccMaterial::new("pccc-4", "Seamless steel fire pipe", PcccCategory::Pipe, "length (6m)")
        .with_spec("DN100 Sch40")
        .with_quantities(500, 450, 100);
    pipe.allocated_to = vec![allocation("p-1", "Green City - Block A", 50, AllocationState::Issued, None)];

    let valve = PcccMaterial::new("pccc-5", "Supervised gate valve", PcccCategory::Valve, "pcs")
        .with_spec("OS&Y DN100")
        .with_quantities(20, 20, 5);

    vec![sprinkler, panel, extinguisher, pipe, valve]
}

fn demo_acceptance() -> Vec<AcceptanceTask> {
    let mut hydrant = AcceptanceTask::new(
        "qa-1",
        "p-1",
        "Green City - Block A",
        AcceptanceCategory::WallHydrant,
        "Hydrant line pressure test, floors 1-5",
    )
    .with_status(AcceptanceStatus::Approved)
    .with_document("pressure_test_F1-F5.pdf", EvidenceKind::Pdf, "2023-11-20")
    .with_document("pressure_chart.xlsx", EvidenceKind::Excel, "2023-11-20");
    hydrant.standard_ref = "TCVN 7336:2021".to_string();
    hydrant.inspector = Some("Nguyen Van Kiem".to_string());
    hydrant.check_date = Some("2023-11-20".to_string());

    let mut sprinkler = AcceptanceTask::new(
        "qa-2",
        "p-1",
        "Green City - Block A",
        AcceptanceCategory::Sprinkler,
        "Sprinkler head installation",
    );
    sprinkler.standard_ref = "TCVN 7336:2021".to_string();

    let mut alarm = AcceptanceTask::new(
        "qa-3",
        "p-3",
        "Packaging Factory",
        AcceptanceCategory::FireAlarm,
        "Fire alarm interlock test",
    )
    .with_status(AcceptanceStatus::InProgress)
    .with_document("drill_scenario.pdf", EvidenceKind::Pdf, "2023-12-01");
    alarm.standard_ref = "TCVN 5738:2021".to_string();
    alarm.notes = Some("Waiting for jockey pump connection".to_string());

    let mut lightning = AcceptanceTask::new(
        "qa-4",
        "p-2",
        "Riverside Villa",
        AcceptanceCategory::LightningProtection,
        "Earthing resistance measurement",
    )
    .with_status(AcceptanceStatus::Rejected)
    .with_document("measurement_round_1.pdf", EvidenceKind::Pdf, "2023-11-15");
    lightning.standard_ref = "TCVN 9385:2012".to_string();
    lightning.notes = Some("Measured 12 Ohm, limit is 10 Ohm. More rods required.".to_string());

    vec![hydrant, sprinkler, alarm, lightning]
}

/// Calendar notes around `today`: a reminder later today, one for tomorrow
/// and a completed note from yesterday.
pub fn demo_notes(today: Date) -> Vec<CalendarNote> {
    let day = |offset: i64| dates::format_date(today.saturating_add(Duration::days(offset)));

    vec![
        CalendarNote::new("note-1", day(0), "Site meeting with the fire police")
            .with_reminder_at("16:00"),
        CalendarNote::new("note-2", day(1), "Concrete delivery for block A slab")
            .with_reminder_at("07:30"),
        CalendarNote::new("note-3", day(-1), "Send stage 2 payment request").completed(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildtrack_core::domain::StockStatus;
    use time::macros::date;

    #[test]
    fn demo_records_decode_as_typed_records() {
        let records = demo_records(date!(2024 - 03 - 11)).unwrap();

        let projects: Vec<Project> =
            serde_json::from_value(Value::Array(records[&Collection::Projects].clone())).unwrap();
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[0].progress, 37);

        let materials: Vec<PcccMaterial> =
            serde_json::from_value(Value::Array(records[&Collection::PcccMaterials].clone())).unwrap();
        assert_eq!(materials[0].status, StockStatus::Good);
        assert_eq!(materials[1].status, StockStatus::Expired);
        assert_eq!(materials[2].status, StockStatus::LowStock);

        assert_eq!(records[&Collection::QaqcTasks].len(), 4);
    }

    #[test]
    fn demo_notes_are_relative_to_today() {
        let notes = demo_notes(date!(2024 - 03 - 31));
        assert_eq!(notes[0].date, "2024-03-31");
        assert_eq!(notes[1].date, "2024-04-01");
        assert_eq!(notes[0].reminder_time.as_deref(), Some("2024-03-31T16:00:00"));
        assert!(notes[2].is_completed);
    }
}
