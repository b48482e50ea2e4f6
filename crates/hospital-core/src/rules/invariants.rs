//! Individual referential-integrity checks
//!
//! Each function returns every violation it finds as human-readable
//! descriptions; `validation::validate_store` stops at the first one.

use std::collections::HashSet;

use crate::ops::Store;

/// Departments pointing at a missing hospital, or missing from its list
pub fn find_department_membership_violations(store: &Store) -> Vec<String> {
    let mut out = Vec::new();
    for dept in store.departments.values() {
        match store.hospitals.get(&dept.hospital_id) {
            None => out.push(format!(
                "department {} references unknown hospital {}",
                dept.id, dept.hospital_id
            )),
            Some(h) if !h.department_ids.contains(&dept.id) => out.push(format!(
                "department {} is not listed by hospital {}",
                dept.id, h.id
            )),
            Some(_) => {}
        }
    }
    for hospital in store.hospitals.values() {
        for dept_id in &hospital.department_ids {
            if store
                .departments
                .get(dept_id)
                .map(|d| d.hospital_id != hospital.id)
                .unwrap_or(true)
            {
                out.push(format!(
                    "hospital {} lists department {} it does not own",
                    hospital.id, dept_id
                ));
            }
        }
    }
    out
}

/// Rooms pointing at a missing department, or missing from its list
pub fn find_room_membership_violations(store: &Store) -> Vec<String> {
    let mut out = Vec::new();
    for room in store.rooms.values() {
        match store.departments.get(&room.department_id) {
            None => out.push(format!(
                "room {} references unknown department {}",
                room.number, room.department_id
            )),
            Some(d) if !d.room_ids.contains(&room.id) => out.push(format!(
                "room {} is not listed by department {}",
                room.number, d.id
            )),
            Some(_) => {}
        }
    }
    out
}

/// Doctor/department links that are one-sided or cross specialties
pub fn find_doctor_assignment_violations(store: &Store) -> Vec<String> {
    let mut out = Vec::new();
    for doctor in store.doctors.values() {
        let Some(dept_id) = &doctor.department_id else {
            continue;
        };
        match store.departments.get(dept_id) {
            None => out.push(format!(
                "doctor {} references unknown department {}",
                doctor.id, dept_id
            )),
            Some(d) if !d.doctor_ids.contains(&doctor.id) => out.push(format!(
                "doctor {} is not listed by department {}",
                doctor.id, d.id
            )),
            Some(d) if d.specialty != doctor.specialty => out.push(format!(
                "doctor {} ({}) assigned to {} department {}",
                doctor.id, doctor.specialty, d.specialty, d.id
            )),
            Some(_) => {}
        }
    }
    for dept in store.departments.values() {
        for doctor_id in &dept.doctor_ids {
            let owned = store
                .doctors
                .get(doctor_id)
                .map(|d| d.department_id.as_deref() == Some(dept.id.as_str()))
                .unwrap_or(false);
            if !owned {
                out.push(format!(
                    "department {} lists doctor {} assigned elsewhere",
                    dept.id, doctor_id
                ));
            }
        }
    }
    out
}

/// Patients without a matching record, or with a dangling hospital
pub fn find_patient_violations(store: &Store) -> Vec<String> {
    let mut out = Vec::new();
    for patient in store.patients.values() {
        match store.records.get(&patient.record_id) {
            Some(r) if r.patient_id == patient.id => {}
            _ => out.push(format!(
                "patient {} has no medical record {}",
                patient.id, patient.record_id
            )),
        }
        if let Some(hid) = &patient.hospital_id {
            let listed = store
                .hospitals
                .get(hid)
                .map(|h| h.patient_ids.contains(&patient.id))
                .unwrap_or(false);
            if !listed {
                out.push(format!(
                    "patient {} is not listed by hospital {}",
                    patient.id, hid
                ));
            }
        }
    }
    for record in store.records.values() {
        if !store.patients.contains_key(&record.patient_id) {
            out.push(format!(
                "record {} references unknown patient {}",
                record.number, record.patient_id
            ));
        }
    }
    out
}

/// Appointments referencing a missing patient, doctor or room
pub fn find_dangling_appointments(store: &Store) -> Vec<String> {
    store
        .appointments
        .values()
        .filter_map(|a| {
            if !store.patients.contains_key(&a.patient_id) {
                Some(format!("appointment {} references unknown patient", a.id))
            } else if !store.doctors.contains_key(&a.doctor_id) {
                Some(format!("appointment {} references unknown doctor", a.id))
            } else if !store.rooms.contains_key(&a.room_id) {
                Some(format!("appointment {} references unknown room", a.id))
            } else {
                None
            }
        })
        .collect()
}

/// DNIs or room numbers used twice
pub fn find_duplicate_keys(store: &Store) -> Vec<String> {
    let mut out = Vec::new();

    let mut seen = HashSet::new();
    for d in store.doctors.values() {
        if !seen.insert(d.dni()) {
            out.push(format!("doctor DNI {} registered twice", d.dni()));
        }
    }

    let mut seen = HashSet::new();
    for p in store.patients.values() {
        if !seen.insert(p.dni()) {
            out.push(format!("patient DNI {} registered twice", p.dni()));
        }
    }

    let mut seen = HashSet::new();
    for r in store.rooms.values() {
        if !seen.insert(r.number.as_str()) {
            out.push(format!("room number {} used twice", r.number));
        }
    }
    out
}
