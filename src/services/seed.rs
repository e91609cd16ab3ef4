//! Sample data for development databases

use chrono::{Days, Duration, Local, NaiveDate};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, EquipmentTypeInput},
        maintenance::{CreateMaintenanceStandard, CreateMaintenanceType},
        plan::CreatePlan,
        Equipment, MaintenanceStandard, PlanStatus,
    },
    repository::Repository,
    services::planner::{period_count, projected_dates},
};

const EQUIPMENT_TYPES: &[&str] = &[
    "Lathe",
    "CNC milling machine",
    "Hydraulic press",
    "Belt conveyor",
    "Screw compressor",
    "Drying chamber",
    "Grinding machine",
    "Welding machine",
];

/// (name, code, frequency in months)
const MAINTENANCE_TYPES: &[(&str, &str, i32)] = &[
    ("Inspection", "inspection", 1),
    ("Repair", "repair", 6),
    ("Overhaul", "overhaul", 36),
];

/// (name, inventory number, index into EQUIPMENT_TYPES)
const EQUIPMENT: &[(&str, &str, usize)] = &[
    ("Lathe 1K62", "LATHE-001", 0),
    ("Lathe 16K20", "LATHE-002", 0),
    ("CNC lathe", "LATHE-003", 0),
    ("Milling machine 6R13", "MILL-001", 1),
    ("Milling machine Haas", "MILL-002", 1),
    ("Hydraulic press 50t", "PRESS-001", 2),
    ("Hydraulic press 100t", "PRESS-002", 2),
    ("Main conveyor", "CONV-001", 3),
    ("Packing conveyor", "CONV-002", 3),
    ("Atlas Copco compressor", "COMP-001", 4),
    ("Drying chamber SK-5", "DRY-001", 5),
    ("Grinding machine 3G71", "GRIND-001", 6),
    ("Kemppi welder", "WELD-001", 7),
    ("ESAB welder", "WELD-002", 7),
];

/// Installation date between 180 and 545 days before `today`
fn random_installation_date<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let back = 180 + rng.gen_range(0..=365);
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

/// Sample plans cover this many months after installation
const SEED_HORIZON_MONTHS: i32 = 24;

/// Sample plans older than this many days before today are left out
const SEED_PAST_DAYS: u64 = 30;

/// Status draw weights (percent)
const STATUS_WEIGHTS: [(PlanStatus, u32); 4] = [
    (PlanStatus::Planned, 70),
    (PlanStatus::InProgress, 10),
    (PlanStatus::Completed, 15),
    (PlanStatus::Cancelled, 5),
];

/// Note for a sample plan, by maintenance type code and status
fn sample_note(code: &str, status: PlanStatus) -> &'static str {
    match (code, status) {
        ("inspection", PlanStatus::Planned) => "Scheduled inspection",
        ("inspection", PlanStatus::InProgress) => "Visual check and parameter measurement under way",
        ("inspection", PlanStatus::Completed) => "Inspection done. No remarks.",
        ("inspection", PlanStatus::Cancelled) => "Inspection postponed for production reasons",
        ("repair", PlanStatus::Planned) => "Scheduled repair",
        ("repair", PlanStatus::InProgress) => "Replacing worn parts and adjusting",
        ("repair", PlanStatus::Completed) => "Repair finished. Equipment ready for work.",
        ("repair", PlanStatus::Cancelled) => "Repair moved to the next period",
        ("overhaul", PlanStatus::Planned) => "Scheduled overhaul",
        ("overhaul", PlanStatus::InProgress) => "Full disassembly and replacement of main assemblies",
        ("overhaul", PlanStatus::Completed) => "Overhaul done. Equipment passed acceptance tests.",
        ("overhaul", PlanStatus::Cancelled) => "Overhaul deferred for technical reasons",
        _ => "",
    }
}

/// Sample plans for one standard, with drawn statuses.
///
/// Dates follow the generator's 30-day months over the seed horizon, minus
/// those more than a month in the past. Completed plans get an actual date
/// between 5 days before and 2 days after the planned date.
fn sample_plans<R: Rng>(
    rng: &mut R,
    statuses: &WeightedIndex<u32>,
    equipment: &Equipment,
    standard: &MaintenanceStandard,
    code: &str,
    today: NaiveDate,
) -> Vec<CreatePlan> {
    let cutoff = today.checked_sub_days(Days::new(SEED_PAST_DAYS)).unwrap_or(today);
    let periods = period_count(SEED_HORIZON_MONTHS, standard.frequency_months);

    projected_dates(equipment.installation_date, standard.frequency_months, periods)
        .into_iter()
        .filter(|planned_date| *planned_date >= cutoff)
        .map(|planned_date| {
            let status = STATUS_WEIGHTS[statuses.sample(rng)].0;
            let actual_date = if status == PlanStatus::Completed {
                planned_date.checked_add_signed(Duration::days(rng.gen_range(-5..=2)))
            } else {
                None
            };
            CreatePlan {
                equipment_id: equipment.id,
                maintenance_type_id: standard.maintenance_type_id,
                planned_date,
                status: Some(status),
                actual_date,
                notes: Some(sample_note(code, status).to_string()),
            }
        })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub equipment_types: usize,
    pub maintenance_types: usize,
    pub standards: usize,
    pub equipment: usize,
    pub plans: u64,
}

#[derive(Clone)]
pub struct SeedService {
    repository: Repository,
}

impl SeedService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Replace all data with the sample set
    pub async fn run(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();
        let statuses = WeightedIndex::new(STATUS_WEIGHTS.iter().map(|(_, weight)| *weight))
            .map_err(|e| AppError::Internal(format!("Invalid status weights: {}", e)))?;

        self.repository.clear_all().await?;
        tracing::info!("Existing data cleared");

        let mut type_ids = Vec::with_capacity(EQUIPMENT_TYPES.len());
        for name in EQUIPMENT_TYPES {
            let created = self
                .repository
                .equipment
                .create_type(&EquipmentTypeInput { name: name.to_string() })
                .await?;
            type_ids.push(created.id);
            report.equipment_types += 1;
        }

        let mut standards = Vec::new();
        for (name, code, frequency) in MAINTENANCE_TYPES {
            let mt = self
                .repository
                .standards
                .create_type(&CreateMaintenanceType {
                    name: name.to_string(),
                    code: code.to_string(),
                })
                .await?;
            report.maintenance_types += 1;

            for type_id in &type_ids {
                let standard = self
                    .repository
                    .standards
                    .create(&CreateMaintenanceStandard {
                        equipment_type_id: *type_id,
                        maintenance_type_id: mt.id,
                        frequency_months: *frequency,
                    })
                    .await?;
                standards.push((standard, *code));
                report.standards += 1;
            }
        }

        let today = Local::now().date_naive();
        let mut rng = StdRng::from_entropy();
        for (name, inventory_number, type_idx) in EQUIPMENT {
            let equipment = self
                .repository
                .equipment
                .create(&CreateEquipment {
                    name: name.to_string(),
                    inventory_number: inventory_number.to_string(),
                    equipment_type_id: type_ids[*type_idx],
                    installation_date: random_installation_date(&mut rng, today),
                })
                .await?;
            report.equipment += 1;

            for (standard, code) in standards
                .iter()
                .filter(|(s, _)| s.equipment_type_id == equipment.equipment_type_id)
            {
                for plan in sample_plans(&mut rng, &statuses, &equipment, standard, code, today) {
                    self.repository.plans.create(&plan, None).await?;
                    report.plans += 1;
                }
            }
        }

        tracing::info!("Seed complete: {:?}", report);
        Ok(report)
    }
}
