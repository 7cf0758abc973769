//! sea-orm entities for the HR records store.

pub mod departments;
pub mod employees;
pub mod sections;
pub mod users;
