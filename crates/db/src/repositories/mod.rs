//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reads return
//! `sqlx::Error`; writes that validate input or touch blob storage
//! return [`DbError`](crate::error::DbError).

pub mod announcement_repo;
pub mod answer_repo;
pub mod course_repo;
pub mod instructor_repo;
pub mod learner_answer_repo;
pub mod learner_repo;
pub mod notes_repo;
pub mod profile_repo;
pub mod question_repo;
pub mod quiz_repo;
pub mod taken_quiz_repo;
pub mod tutorial_repo;
pub mod user_repo;

pub use announcement_repo::AnnouncementRepo;
pub use answer_repo::AnswerRepo;
pub use course_repo::CourseRepo;
pub use instructor_repo::InstructorRepo;
pub use learner_answer_repo::LearnerAnswerRepo;
pub use learner_repo::LearnerRepo;
pub use notes_repo::NotesRepo;
pub use profile_repo::ProfileRepo;
pub use question_repo::QuestionRepo;
pub use quiz_repo::QuizRepo;
pub use taken_quiz_repo::TakenQuizRepo;
pub use tutorial_repo::TutorialRepo;
pub use user_repo::UserRepo;
