pub mod person_lock;

pub use person_lock::PersonLocks;
