pub mod appointment_ops;
pub mod hospital_ops;
pub mod patient_ops;
pub mod staff_ops;
pub mod store;

pub use store::Store;
