//! Demo users and seed records.
//!
//! All data here is fictional. Dates are expressed relative to `today` so the
//! dashboard always has appointments on the current day and inventory
//! statuses stay meaningful whatever the calendar says.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::models::{
    Appointment, AppointmentStatus, AppointmentType, EmergencyContact, Gender, InventoryCategory,
    InventoryItem, Patient, PatientStatus, RecordId, Role, Shift, StaffMember, StaffStatus, User,
};

/// Seed collections for a [`crate::store::RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub staff: Vec<StaffMember>,
    pub inventory: Vec<InventoryItem>,
}

// ═══════════════════════════════════════════════════════════
// Demo users
// ═══════════════════════════════════════════════════════════

/// The fixed login set, one user per role. Ids match their staff records.
pub fn demo_users() -> Vec<User> {
    [Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist]
        .into_iter()
        .map(demo_user)
        .collect()
}

pub fn demo_user(role: Role) -> User {
    let (id, name, email, department) = match role {
        Role::Admin => (1, "Dr. Sarah Johnson", "admin@medcare.com", "Administration"),
        Role::Doctor => (2, "Dr. Michael Chen", "doctor@medcare.com", "Cardiology"),
        Role::Nurse => (3, "Emily Rodriguez", "nurse@medcare.com", "Emergency"),
        Role::Receptionist => (4, "James Wilson", "reception@medcare.com", "Front Desk"),
    };
    User {
        id: RecordId(id),
        name: name.into(),
        email: email.into(),
        role,
        department: Some(department.into()),
    }
}

// ═══════════════════════════════════════════════════════════
// Seed records
// ═══════════════════════════════════════════════════════════

pub fn seed(today: NaiveDate) -> Fixtures {
    Fixtures {
        patients: patients(today),
        appointments: appointments(today),
        staff: staff(),
        inventory: inventory(today),
    }
}

fn days_ago(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(n)).unwrap_or(today)
}

fn days_ahead(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_add_days(Days::new(n)).unwrap_or(today)
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn patients(today: NaiveDate) -> Vec<Patient> {
    vec![
        Patient {
            id: RecordId(1),
            name: "John Doe".into(),
            age: 45,
            gender: Gender::Male,
            phone: "+1 (555) 123-4567".into(),
            email: "john.doe@email.com".into(),
            address: "123 Main St, City, State 12345".into(),
            blood_type: "A+".into(),
            allergies: strings(&["Penicillin", "Shellfish"]),
            medical_history: "Hypertension, Diabetes Type 2".into(),
            emergency_contact: EmergencyContact {
                name: "Jane Doe".into(),
                phone: "+1 (555) 987-6543".into(),
                relationship: "Wife".into(),
            },
            last_visit: days_ago(today, 5),
            status: PatientStatus::Active,
        },
        Patient {
            id: RecordId(2),
            name: "Sarah Smith".into(),
            age: 32,
            gender: Gender::Female,
            phone: "+1 (555) 234-5678".into(),
            email: "sarah.smith@email.com".into(),
            address: "456 Oak Ave, City, State 12345".into(),
            blood_type: "O-".into(),
            allergies: strings(&["Latex"]),
            medical_history: "Asthma, Migraine".into(),
            emergency_contact: EmergencyContact {
                name: "Mike Smith".into(),
                phone: "+1 (555) 876-5432".into(),
                relationship: "Husband".into(),
            },
            last_visit: days_ago(today, 2),
            status: PatientStatus::Active,
        },
        Patient {
            id: RecordId(3),
            name: "Robert Johnson".into(),
            age: 67,
            gender: Gender::Male,
            phone: "+1 (555) 345-6789".into(),
            email: "robert.j@email.com".into(),
            address: "789 Pine St, City, State 12345".into(),
            blood_type: "B+".into(),
            allergies: strings(&["None known"]),
            medical_history: "Heart Disease, High Cholesterol".into(),
            emergency_contact: EmergencyContact {
                name: "Mary Johnson".into(),
                phone: "+1 (555) 765-4321".into(),
                relationship: "Daughter".into(),
            },
            last_visit: today,
            status: PatientStatus::Critical,
        },
    ]
}

fn appointments(today: NaiveDate) -> Vec<Appointment> {
    let appt = |id, patient, time, appointment_type, status, duration, notes: &str| Appointment {
        id: RecordId(id),
        patient_id: RecordId(patient),
        doctor_id: RecordId(2),
        date: today,
        time,
        appointment_type,
        status,
        duration,
        notes: Some(notes.to_string()),
    };
    vec![
        appt(1, 1, at(9, 0), AppointmentType::Consultation, AppointmentStatus::Scheduled, 30, "Regular checkup"),
        appt(2, 2, at(10, 30), AppointmentType::FollowUp, AppointmentStatus::InProgress, 45, "Follow up on recent surgery"),
        appt(3, 3, at(14, 0), AppointmentType::Surgery, AppointmentStatus::Scheduled, 120, "Cardiac procedure"),
        appt(4, 1, at(16, 30), AppointmentType::Emergency, AppointmentStatus::Completed, 20, "Emergency consultation"),
    ]
}

fn staff() -> Vec<StaffMember> {
    let member = |id, name: &str, role, department: &str, specialization: Option<&str>, phone: &str, email: &str, shift, status| {
        StaffMember {
            id: RecordId(id),
            name: name.into(),
            role,
            department: department.into(),
            specialization: specialization.map(str::to_string),
            phone: phone.into(),
            email: email.into(),
            shift,
            status,
        }
    };
    vec![
        member(1, "Dr. Sarah Johnson", Role::Admin, "Administration", None, "+1 (555) 123-4567", "sarah.johnson@medcare.com", Shift::Morning, StaffStatus::Active),
        member(2, "Dr. Michael Chen", Role::Doctor, "Cardiology", Some("Interventional Cardiology"), "+1 (555) 234-5678", "michael.chen@medcare.com", Shift::Morning, StaffStatus::Active),
        member(3, "Emily Rodriguez", Role::Nurse, "Emergency", None, "+1 (555) 345-6789", "emily.rodriguez@medcare.com", Shift::Night, StaffStatus::Active),
        member(4, "James Wilson", Role::Receptionist, "Front Desk", None, "+1 (555) 456-7890", "james.wilson@medcare.com", Shift::Morning, StaffStatus::Active),
        member(5, "Dr. Lisa Park", Role::Doctor, "Pediatrics", Some("Child Psychology"), "+1 (555) 567-8901", "lisa.park@medcare.com", Shift::Evening, StaffStatus::OnLeave),
        member(6, "Robert Martinez", Role::Nurse, "ICU", None, "+1 (555) 678-9012", "robert.martinez@medcare.com", Shift::Night, StaffStatus::Active),
    ]
}

fn inventory(today: NaiveDate) -> Vec<InventoryItem> {
    let item = |id, name: &str, category, quantity, min_quantity, price, supplier: &str, expiry_date, location: &str| {
        InventoryItem {
            id: RecordId(id),
            name: name.into(),
            category,
            quantity,
            min_quantity,
            price,
            supplier: supplier.into(),
            expiry_date,
            location: location.into(),
        }
    };
    vec![
        item(1, "Insulin Pens", InventoryCategory::Medicine, 45, 50, 25.99, "MedSupply Corp", Some(days_ahead(today, 60)), "Pharmacy A-12"),
        item(2, "ECG Machine", InventoryCategory::Equipment, 8, 5, 15000.00, "Medical Equipment Inc", None, "Equipment Room B-5"),
        item(3, "Surgical Gloves (Box)", InventoryCategory::Supplies, 120, 100, 12.50, "SafeGuard Medical", None, "Supply Room C-3"),
        item(4, "Antibiotics - Amoxicillin", InventoryCategory::Medicine, 0, 25, 45.00, "PharmaCorp", Some(days_ahead(today, 30)), "Pharmacy A-8"),
        item(5, "Blood Pressure Monitor", InventoryCategory::Equipment, 15, 10, 250.00, "HealthTech Solutions", None, "Equipment Room B-2"),
        item(6, "Ibuprofen 200mg", InventoryCategory::Medicine, 5, 30, 8.99, "Generic Pharma", Some(days_ago(today, 30)), "Pharmacy A-5"),
    ]
}

/// A complete, valid add-patient form for tests.
#[cfg(test)]
pub(crate) fn sample_new_patient(name: &str, today: NaiveDate) -> crate::models::NewPatient {
    crate::models::NewPatient {
        name: name.into(),
        age: 30,
        gender: Gender::Female,
        phone: "+1 (555) 000-1111".into(),
        email: format!("{}@example.com", name.to_lowercase()),
        address: "1 Elm St".into(),
        blood_type: "AB+".into(),
        allergies: vec![],
        medical_history: String::new(),
        emergency_contact: EmergencyContact {
            name: "Bo".into(),
            phone: "+1 (555) 000-2222".into(),
            relationship: "Brother".into(),
        },
        last_visit: today,
        status: PatientStatus::Active,
    }
}
