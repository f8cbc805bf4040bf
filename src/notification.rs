use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::model::Worker;
use crate::schedule::MonthlySchedule;

/// Une ligne d'affectation d'un travailleur dans un mois généré.
#[derive(Debug, Clone)]
pub struct AssignmentLine {
    pub date: NaiveDate,
    pub shift_name: String,
    pub time_range: String,
    pub role_name: String,
}

/// Récapitulatif de mois prêt à être remis à un travailleur.
#[derive(Debug, Clone)]
pub struct ScheduleNotice {
    pub worker_name: String,
    pub shift_count: usize,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, mail, etc.).
pub trait NoticeRenderer {
    fn render(&self, worker: &Worker, lines: &[AssignmentLine]) -> String;
}

/// Gabarit texte simple destiné à un futur mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, worker: &Worker, lines: &[AssignmentLine]) -> String {
        let mut out = format!(
            "Bonjour {name},\n\nTu es planifié(e) sur {count} shift(s) ce mois-ci :\n",
            name = worker.name,
            count = lines.len()
        );
        for line in lines {
            out.push_str(&format!(
                "- {date} {shift} {time} ({role})\n",
                date = line.date,
                shift = line.shift_name,
                time = line.time_range,
                role = line.role_name
            ));
        }
        out.push_str("\nMerci de signaler tout empêchement à ton gestionnaire.\n");
        out
    }
}

/// Prépare le récapitulatif d'un travailleur pour un mois généré.
pub fn prepare_schedule_notice(
    schedule: &MonthlySchedule,
    worker: &Worker,
    renderer: &dyn NoticeRenderer,
) -> Result<ScheduleNotice> {
    let mut lines = Vec::new();
    for (date, shifts) in &schedule.days {
        for shift in shifts {
            for assigned in &shift.assigned_workers {
                if assigned.worker_id == worker.id {
                    lines.push(AssignmentLine {
                        date: *date,
                        shift_name: shift.name.clone(),
                        time_range: format!(
                            "{} - {}",
                            shift.start.format("%H:%M"),
                            shift.end.format("%H:%M")
                        ),
                        role_name: assigned.role_name.clone(),
                    });
                }
            }
        }
    }

    if lines.is_empty() {
        bail!("no assignment found for {}", worker.name);
    }

    let content = renderer.render(worker, &lines);
    Ok(ScheduleNotice {
        worker_name: worker.name.clone(),
        shift_count: lines.len(),
        content,
    })
}
