pub mod appointment;
pub mod blood_type;
pub mod department;
pub mod doctor;
pub mod hospital;
pub mod license;
pub mod money;
pub mod patient;
pub mod person;
pub mod record;
pub mod room;
pub mod specialty;
pub mod status;

pub use appointment::Appointment;
pub use blood_type::BloodType;
pub use department::Department;
pub use doctor::Doctor;
pub use hospital::Hospital;
pub use license::License;
pub use money::Money;
pub use patient::Patient;
pub use person::{Person, PersonInput};
pub use record::{EntryKind, MedicalRecord};
pub use room::Room;
pub use specialty::Specialty;
pub use status::{AppointmentStatus, StatusAction};
