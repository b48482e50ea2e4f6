use super::{
    AllergyEntry, HospitalOverview, PatientOverview, ResourceSummary, SpecialtyCount,
    StatusReport,
};

const RULE: &str = "==============================================";

pub fn render_specialty_counts(counts: &[SpecialtyCount]) -> String {
    let mut output = String::from("Doctors per specialty\n");
    output.push_str("---------------------\n");
    if counts.is_empty() {
        output.push_str("No doctors registered.\n");
    }
    for sc in counts {
        output.push_str(&format!("{:<18}: {}\n", sc.specialty.label(), sc.count));
    }
    output
}

/// One line per status: `SCHEDULED   : 3 (60.00%)`
pub fn render_status_report(report: &StatusReport) -> String {
    let mut output = String::from("Appointments by status\n");
    output.push_str("----------------------\n");
    for row in &report.rows {
        output.push_str(&format!(
            "{:<12}: {} ({:.2}%)\n",
            row.status.as_str(),
            row.count,
            row.percentage
        ));
    }
    output.push_str(&format!("Total: {}\n", report.total));
    output
}

pub fn render_patients_with_allergies(entries: &[AllergyEntry]) -> String {
    let mut output = String::from("===== PATIENTS WITH ALLERGIES =====\n");
    if entries.is_empty() {
        output.push_str("No patients with recorded allergies.\n");
        return output;
    }
    for e in entries {
        output.push_str(&format!(
            "Patient: {} | DNI: {} | Allergies: {}\n",
            e.full_name,
            e.dni,
            e.allergies.len()
        ));
        output.push_str(&format!("  {}\n", e.allergies.join(", ")));
    }
    output
}

pub fn render_resource_summary(summary: &ResourceSummary) -> String {
    format!(
        "===== HOSPITAL RESOURCES =====\n\
         Rooms: {}\n\
         Patients: {}\n\
         Doctors: {}\n\
         Scheduled appointments: {}\n\
         {}\n",
        summary.rooms, summary.patients, summary.doctors, summary.scheduled_appointments, RULE
    )
}

pub fn render_patient_overview(overview: &PatientOverview) -> String {
    let mut output = String::from("===== PATIENT =====\n");
    output.push_str(&format!("Name: {}\n", overview.full_name));
    output.push_str(&format!("DNI: {}\n", overview.dni));
    output.push_str(&format!("Age: {}\n", overview.age));
    output.push_str(&format!("Blood type: {}\n", overview.blood_type));
    output.push_str(&format!("Record: {}\n", overview.record_number));
    output.push_str(&format!("Diagnoses: {}\n", join_or_none(&overview.diagnoses)));
    output.push_str(&format!("Allergies: {}\n", join_or_none(&overview.allergies)));
    output.push_str(&format!("Treatments: {}\n", join_or_none(&overview.treatments)));

    output.push_str("Appointments:\n");
    if overview.appointments.is_empty() {
        output.push_str("  (none)\n");
    }
    for a in &overview.appointments {
        output.push_str(&format!(
            "  {} [{}] {} in {}",
            a.scheduled_at.format("%Y-%m-%d %H:%M"),
            a.status,
            a.doctor,
            a.room
        ));
        if !a.notes.is_empty() {
            output.push_str(&format!(" - {}", a.notes));
        }
        output.push('\n');
    }
    output
}

pub fn render_hospital_overview(overview: &HospitalOverview) -> String {
    let mut output = format!("{}\n", overview.name);
    output.push_str(&format!("Address: {}\n", overview.address));
    output.push_str(&format!("Phone: {}\n", overview.phone));

    output.push_str("Departments:\n");
    for d in &overview.departments {
        output.push_str(&format!(
            "  {} ({}) - doctors: {}, rooms: {}\n",
            d.name,
            d.specialty.label(),
            d.doctors,
            join_or_none(&d.rooms)
        ));
    }

    output.push_str("Patients:\n");
    for p in &overview.patients {
        output.push_str(&format!("  {}\n", p));
    }
    output
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
