//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod announcement;
pub mod answer;
pub mod course;
pub mod instructor;
pub mod learner;
pub mod learner_answer;
pub mod lookup;
pub mod notes;
pub mod profile;
pub mod question;
pub mod quiz;
pub mod taken_quiz;
pub mod tutorial;
pub mod user;
