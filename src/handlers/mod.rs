pub mod employees;
pub mod health;
pub mod planning;
pub mod projects;
pub mod shared;
pub mod time_entries;
