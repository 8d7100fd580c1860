#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use equipe::{
    io,
    model::{Roster, ShiftId, WorkerId},
    scheduler::{self, Scheduler},
    storage::{JsonStorage, Plan, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'affectation de créneaux (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`, filtre via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer le plan à partir de deux CSV (employés, créneaux)
    Import {
        #[arg(long)]
        workers: String,
        #[arg(long)]
        shifts: String,
    },

    /// Lancer l'affectation automatique (remplace les affectations existantes)
    Assign,

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Un employé reprend le créneau d'un autre
    Swap {
        #[arg(long)]
        shift: u32,
        /// Employé qui prend le créneau
        #[arg(long)]
        take: u32,
        /// Employé qui le détient actuellement
        #[arg(long)]
        from: u32,
    },

    /// Vérifier les conflits du plan courant
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;

    let code = match cli.cmd {
        Commands::Import { workers, shifts } => {
            let workers = io::import_workers_csv(workers)?;
            let shifts = io::import_shifts_csv(shifts)?;
            let roster = Roster::new(workers, shifts)?;
            println!(
                "Imported {} worker(s) and {} shift(s)",
                roster.workers().len(),
                roster.shifts().len()
            );
            storage.save(&Plan::new(roster))?;
            0
        }
        Commands::Assign => {
            let mut plan = storage.load()?;
            let out = scheduler::assign_shifts(plan.roster.workers(), plan.roster.shifts());
            for warning in out.warning_messages() {
                eprintln!("WARNING: {warning}");
            }
            let incomplete = !out.warnings.is_empty();
            println!("{} assignment(s)", out.ledger.len());
            plan.record(out, Utc::now());
            storage.save(&plan)?;
            // Code 2 = WARNING/INCOMPLETE
            if incomplete {
                2
            } else {
                0
            }
        }
        Commands::List { out_json, out_csv } => {
            let plan = storage.load()?;
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &plan.roster, &plan.ledger)?;
            }
            print_plan(&plan);
            0
        }
        Commands::Swap { shift, take, from } => {
            let mut plan = storage.load()?;
            let report = scheduler::swap(
                &plan.ledger,
                WorkerId::new(take)?,
                WorkerId::new(from)?,
                ShiftId::new(shift)?,
                plan.roster.workers(),
                plan.roster.shifts(),
            );
            match report.updated_ledger {
                Some(ledger) => {
                    plan.ledger = ledger;
                    storage.save(&plan)?;
                    println!("{}", report.message);
                    0
                }
                None => {
                    eprintln!("swap rejected: {}", report.message);
                    2
                }
            }
        }
        Commands::Check { report } => {
            let plan = storage.load()?;
            let scheduler = Scheduler::with_ledger(plan.roster, plan.ledger);
            let conflicts = scheduler.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!("  {c}");
                }
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "worker_id", "shift_ids"])?;
                    for c in &conflicts {
                        let worker = c.worker.map(|id| id.to_string()).unwrap_or_default();
                        let shifts: Vec<String> = c.shifts.iter().map(|s| s.to_string()).collect();
                        w.write_record([c.kind.as_str(), worker.as_str(), shifts.join(";").as_str()])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
    };

    std::process::exit(code);
}

fn print_plan(plan: &Plan) {
    let mut shifts: Vec<_> = plan.roster.shifts().iter().collect();
    shifts.sort_by_key(|s| (s.day(), s.start_hour(), s.id()));
    for s in shifts {
        let workers: Vec<String> = plan
            .ledger
            .assigned_workers_for(s.id())
            .iter()
            .map(|id| {
                plan.roster
                    .find_worker(*id)
                    .map(|w| w.name().to_string())
                    .unwrap_or_else(|| id.to_string())
            })
            .collect();
        println!(
            "{} | {} {}:00 → {}:00 | {}/{} | {}",
            s.id(),
            s.day(),
            s.start_hour(),
            s.end_hour(),
            workers.len(),
            s.required_workers(),
            if workers.is_empty() {
                "-".to_string()
            } else {
                workers.join(", ")
            }
        );
    }

    let scheduler = Scheduler::with_ledger(plan.roster.clone(), plan.ledger.clone());
    for (id, hours) in scheduler.hours_by_worker() {
        if let Some(w) = plan.roster.find_worker(id) {
            println!("{}: {}h / {}h", w.name(), hours, w.max_hours_per_week());
        }
    }
}
