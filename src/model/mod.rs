pub mod attendance;
pub mod employee;
pub mod month;
pub mod status;
pub mod supervisor;
