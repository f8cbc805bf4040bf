#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use shiftplan::{
    io,
    model::{MonthRef, RoleId, Worker},
    notification::{prepare_schedule_notice, TextNotice},
    requests::PendingRequest,
    scheduler::{add_worker_to_shift, remove_worker_from_shift, Scheduler},
    storage::{JsonStorage, Storage},
    template::ShiftDefinition,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification de shifts (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du document de travail
    #[arg(long, global = true, default_value = "plan.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un rôle au commerce
    AddRole {
        #[arg(long)]
        name: String,
    },

    /// Supprimer un rôle (purge aussi ses exigences dans le gabarit)
    RemoveRole {
        #[arg(long)]
        id: u32,
    },

    /// Ajouter un shift au gabarit hebdomadaire
    AddShift {
        /// 0 = dimanche .. 6 = samedi
        #[arg(long)]
        weekday: u8,
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
        /// Effectifs requis, ex. "1=2,3=1" (roleId=count)
        #[arg(long)]
        require: String,
    },

    /// Ajouter un travailleur au roster
    AddWorker {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Note 1..=10
        #[arg(long)]
        rating: u8,
        /// Ids de rôles, ex. "1,3"
        #[arg(long, value_delimiter = ',')]
        roles: Vec<u32>,
    },

    /// Importer des travailleurs depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Soumettre le mois d'un travailleur (tout disponible par défaut)
    SubmitMonth {
        #[arg(long)]
        email: String,
        #[arg(long)]
        year: i32,
        /// 1..=12
        #[arg(long)]
        month: u32,
    },

    /// Marquer une indisponibilité (date entière ou un shift précis)
    MarkUnavailable {
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Index du shift dans le jour ; absent = tous les shifts du jour
        #[arg(long)]
        shift: Option<u32>,
    },

    /// Générer le planning d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        /// 1..=12
        #[arg(long)]
        month: u32,
    },

    /// Afficher les agrégats d'un mois généré
    Stats {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Exporter un mois généré (CSV et/ou JSON)
    Export {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Ajouter manuellement un travailleur sur un shift généré
    Assign {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: u32,
    },

    /// Retirer un travailleur d'un shift généré
    Unassign {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        email: String,
    },

    /// Déposer une demande de congé
    RequestTimeOff {
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: String,
    },

    /// Lister les demandes
    ListRequests,

    /// Trancher une demande en attente
    ResolveRequest {
        #[arg(long)]
        id: String,
        #[arg(long)]
        decision: Decision,
    },

    /// Générer le récapitulatif texte d'un travailleur pour un mois
    Notify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Decision {
    Approve,
    Deny,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .with_context(|| format!("invalid time (expected HH:MM): {raw}"))
}

fn parse_month(year: i32, month: u32) -> Result<MonthRef> {
    if !(1..=12).contains(&month) {
        bail!("month must be in 1..=12");
    }
    MonthRef::new(year, month - 1).map_err(anyhow::Error::msg)
}

/// Parse "1=2,3=1" en couples (roleId, effectif).
fn parse_requirements(raw: &str) -> Result<Vec<(RoleId, u32)>> {
    raw.split(',')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let (role, count) = chunk
                .trim()
                .split_once('=')
                .with_context(|| format!("invalid requirement (expected roleId=count): {chunk}"))?;
            let role: u32 = role.trim().parse().context("invalid role id")?;
            let count: u32 = count.trim().parse().context("invalid count")?;
            Ok((RoleId(role), count))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
    #[cfg(not(feature = "logging"))]
    let _ = cli.log;

    let storage = JsonStorage::open(&cli.data)?;
    let mut workspace = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddRole { name } => {
            let id = workspace.business.add_role(&name);
            storage.save(&workspace)?;
            println!("role {name} added with id {id}");
            0
        }
        Commands::RemoveRole { id } => {
            if !workspace.business.remove_role(RoleId(id)) {
                bail!("unknown role id: {id}");
            }
            storage.save(&workspace)?;
            println!("role {id} removed");
            0
        }
        Commands::AddShift {
            weekday,
            name,
            start,
            end,
            require,
        } => {
            let start = parse_time(&start)?;
            let end = parse_time(&end)?;
            let mut def = ShiftDefinition::new(&name, start, end).map_err(anyhow::Error::msg)?;
            for (role, count) in parse_requirements(&require)? {
                def.set_requirement(role, count);
            }
            workspace.business.add_shift(weekday, def)?;
            storage.save(&workspace)?;
            0
        }
        Commands::AddWorker {
            name,
            email,
            rating,
            roles,
        } => {
            if workspace.find_worker_by_email(&email).is_some() {
                bail!("a worker with email {email} already exists");
            }
            let mut worker = Worker::new(&name, &email, rating).map_err(anyhow::Error::msg)?;
            for id in roles {
                let id = RoleId(id);
                if workspace.business.role(id).is_none() {
                    bail!("unknown role id: {id}");
                }
                worker.role_ids.push(id);
            }
            workspace.workers.push(worker);
            storage.save(&workspace)?;
            0
        }
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            workspace.workers.extend(workers);
            storage.save(&workspace)?;
            0
        }
        Commands::SubmitMonth { email, year, month } => {
            let month = parse_month(year, month)?;
            let worker = workspace
                .find_worker_mut_by_email(&email)
                .with_context(|| format!("unknown worker email: {email}"))?;
            worker.availability_entry(month);
            storage.save(&workspace)?;
            println!("availability submitted for {}", month.key());
            0
        }
        Commands::MarkUnavailable { email, date, shift } => {
            let date = parse_date(&date)?;
            let shift_count = workspace
                .business
                .template
                .shifts_for(shiftplan::model::weekday0(date))
                .len() as u32;
            let worker = workspace
                .find_worker_mut_by_email(&email)
                .with_context(|| format!("unknown worker email: {email}"))?;
            let entry = worker.availability_entry(MonthRef::from_date(date));
            match shift {
                Some(index) => entry.mark(date, index, false),
                None => {
                    for index in 0..shift_count.max(1) {
                        entry.mark(date, index, false);
                    }
                }
            }
            storage.save(&workspace)?;
            0
        }
        Commands::Generate { year, month } => {
            let month = parse_month(year, month)?;
            workspace.business.validate()?;
            let schedule =
                Scheduler::new(&workspace.business, &workspace.workers).generate(month)?;
            let stats = schedule.stats;
            workspace.schedules.insert(month.key(), schedule);
            storage.save(&workspace)?;
            println!(
                "Total shifts: {} | filled: {} | unfilled: {} | workers scheduled: {}/{}",
                stats.total_shifts,
                stats.filled_shifts,
                stats.unfilled_shifts,
                stats.workers_scheduled,
                stats.total_workers
            );
            // Code 2 = WARNING/INCOMPLETE
            if stats.unfilled_shifts > 0 {
                2
            } else {
                0
            }
        }
        Commands::Stats { year, month } => {
            let month = parse_month(year, month)?;
            let schedule = workspace
                .schedules
                .get(&month.key())
                .with_context(|| format!("no schedule generated for {}", month.key()))?;
            let stats = schedule.stats;
            println!("Total shifts: {}", stats.total_shifts);
            println!("Filled shifts: {}", stats.filled_shifts);
            println!("Unfilled shifts: {}", stats.unfilled_shifts);
            println!(
                "Workers scheduled: {}/{}",
                stats.workers_scheduled, stats.total_workers
            );
            0
        }
        Commands::Export {
            year,
            month,
            out_csv,
            out_json,
        } => {
            let month = parse_month(year, month)?;
            let schedule = workspace
                .schedules
                .get(&month.key())
                .with_context(|| format!("no schedule generated for {}", month.key()))?;
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, schedule)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, schedule)?;
            }
            0
        }
        Commands::Assign {
            date,
            shift_id,
            email,
            role,
        } => {
            let date = parse_date(&date)?;
            let worker = workspace
                .find_worker_by_email(&email)
                .cloned()
                .with_context(|| format!("unknown worker email: {email}"))?;
            let role = workspace
                .business
                .role(RoleId(role))
                .cloned()
                .with_context(|| format!("unknown role id: {role}"))?;
            let total_workers = workspace.workers.len() as u32;
            let key = MonthRef::from_date(date).key();
            let schedule = workspace
                .schedules
                .get_mut(&key)
                .with_context(|| format!("no schedule generated for {key}"))?;
            let shift = schedule
                .shift_mut(date, &shift_id)
                .with_context(|| format!("unknown shift {shift_id} on {date}"))?;
            add_worker_to_shift(shift, &worker, &role)?;
            schedule.refresh_stats(total_workers);
            storage.save(&workspace)?;
            0
        }
        Commands::Unassign {
            date,
            shift_id,
            email,
        } => {
            let date = parse_date(&date)?;
            let worker_id = workspace
                .find_worker_by_email(&email)
                .map(|w| w.id.clone())
                .with_context(|| format!("unknown worker email: {email}"))?;
            let shift_index: u32 = shift_id
                .rsplit('-')
                .next()
                .and_then(|raw| raw.parse().ok())
                .with_context(|| format!("invalid shift id: {shift_id}"))?;
            let definition = workspace
                .business
                .template
                .shifts_for(shiftplan::model::weekday0(date))
                .get(shift_index as usize)
                .cloned()
                .with_context(|| format!("no shift definition for {shift_id}"))?;
            let total_workers = workspace.workers.len() as u32;
            let key = MonthRef::from_date(date).key();
            let schedule = workspace
                .schedules
                .get_mut(&key)
                .with_context(|| format!("no schedule generated for {key}"))?;
            let shift = schedule
                .shift_mut(date, &shift_id)
                .with_context(|| format!("unknown shift {shift_id} on {date}"))?;
            if !remove_worker_from_shift(shift, &worker_id, &definition) {
                bail!("{email} is not assigned to shift {shift_id}");
            }
            schedule.refresh_stats(total_workers);
            storage.save(&workspace)?;
            0
        }
        Commands::RequestTimeOff {
            email,
            start,
            end,
            reason,
        } => {
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            let worker_id = workspace
                .find_worker_by_email(&email)
                .map(|w| w.id.clone())
                .with_context(|| format!("unknown worker email: {email}"))?;
            let request = PendingRequest::time_off(worker_id, start, end, reason, Utc::now())?;
            println!("request {} created", request.id);
            workspace.requests.push(request);
            storage.save(&workspace)?;
            0
        }
        Commands::ListRequests => {
            for request in &workspace.requests {
                let who = workspace
                    .find_worker_by_id(&request.worker_id)
                    .map(|w| w.name.as_str())
                    .unwrap_or("-");
                println!("{} | {} | {:?} | {:?}", request.id, who, request.kind, request.status);
            }
            0
        }
        Commands::ResolveRequest { id, decision } => {
            let request = workspace
                .find_request_mut(&id)
                .with_context(|| format!("unknown request: {id}"))?;
            match decision {
                Decision::Approve => request.approve(Utc::now())?,
                Decision::Deny => request.deny(Utc::now())?,
            }
            storage.save(&workspace)?;
            0
        }
        Commands::Notify {
            email,
            year,
            month,
            out,
        } => {
            let month = parse_month(year, month)?;
            let worker = workspace
                .find_worker_by_email(&email)
                .with_context(|| format!("unknown worker email: {email}"))?;
            let schedule = workspace
                .schedules
                .get(&month.key())
                .with_context(|| format!("no schedule generated for {}", month.key()))?;
            let renderer = TextNotice;
            let notice = prepare_schedule_notice(schedule, worker, &renderer)?;
            std::fs::write(&out, notice.content)?;
            println!(
                "Notice generated for {} ({} shift(s))",
                notice.worker_name, notice.shift_count
            );
            0
        }
    };

    std::process::exit(code);
}
