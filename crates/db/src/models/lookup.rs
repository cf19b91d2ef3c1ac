//! Enums mapping to the SMALLSERIAL lookup tables.
//!
//! Each variant's discriminant matches the seed data order (1-based) in
//! `20261001000002_create_lookup_tables.sql`, and its name matches the
//! seeded `name` column.

use elearn_core::error::CoreError;

/// Lookup ID type matching SMALLINT/SMALLSERIAL in the database.
pub type LookupId = i16;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident : $table:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $db_name:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Lookup table holding the seed rows.
            pub const TABLE: &'static str = $table;

            /// Every variant in id order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the database lookup ID.
            pub fn id(self) -> LookupId {
                self as LookupId
            }

            /// Seeded `name` column value.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $db_name ),+
                }
            }

            pub fn from_id(id: LookupId) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.id() == id)
            }

            /// Parse from the seeded `name` column value.
            pub fn from_name(name: &str) -> Result<Self, CoreError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == name)
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "Unknown {} '{name}'",
                            stringify!($name)
                        ))
                    })
            }
        }

        impl From<$name> for LookupId {
            fn from(value: $name) -> Self {
                value as LookupId
            }
        }
    };
}

define_lookup_enum! {
    /// Course catalog category.
    CourseCategory: "course_categories" {
        Programming = 1 => "programming",
        Design = 2 => "design",
        Business = 3 => "business",
        Marketing = 4 => "marketing",
        Science = 5 => "science",
        Language = 6 => "language",
    }
}

define_lookup_enum! {
    /// Tutorial difficulty level.
    Difficulty: "tutorial_difficulties" {
        Beginner = 1 => "beginner",
        Intermediate = 2 => "intermediate",
        Advanced = 3 => "advanced",
    }
}

define_lookup_enum! {
    /// Quiz publication status. Any status may follow any other.
    QuizStatus: "quiz_statuses" {
        Draft = 1 => "draft",
        Published = 2 => "published",
        Archived = 3 => "archived",
    }
}

define_lookup_enum! {
    /// Kind of question.
    QuestionType: "question_types" {
        MultipleChoice = 1 => "multiple_choice",
        TrueFalse = 2 => "true_false",
        ShortAnswer = 3 => "short_answer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_category_ids_match_seed_data() {
        assert_eq!(CourseCategory::Programming.id(), 1);
        assert_eq!(CourseCategory::Design.id(), 2);
        assert_eq!(CourseCategory::Business.id(), 3);
        assert_eq!(CourseCategory::Marketing.id(), 4);
        assert_eq!(CourseCategory::Science.id(), 5);
        assert_eq!(CourseCategory::Language.id(), 6);
    }

    #[test]
    fn quiz_status_ids_match_seed_data() {
        assert_eq!(QuizStatus::Draft.id(), 1);
        assert_eq!(QuizStatus::Published.id(), 2);
        assert_eq!(QuizStatus::Archived.id(), 3);
    }

    #[test]
    fn lookup_into_id() {
        let id: LookupId = Difficulty::Advanced.into();
        assert_eq!(id, 3);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(
            QuestionType::from_name("true_false").unwrap(),
            QuestionType::TrueFalse
        );
        assert_eq!(QuestionType::ShortAnswer.name(), "short_answer");
        assert!(QuestionType::from_name("essay").is_err());
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(Difficulty::from_id(2), Some(Difficulty::Intermediate));
        assert_eq!(Difficulty::from_id(0), None);
        assert_eq!(CourseCategory::from_id(7), None);
    }
}
