//! Ownership tree of the schema.
//!
//! Each edge is one foreign key: deleting a row of `parent` removes every
//! `child` row whose `column` references it. The migrations declare exactly
//! these edges, all `ON DELETE CASCADE ON UPDATE CASCADE`; the db crate's
//! schema tests compare the live catalog against this table.

use std::collections::{BTreeSet, VecDeque};

/// What the database does to a child row when its parent goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    Cascade,
}

impl DeleteRule {
    /// Name as reported by `information_schema.referential_constraints`.
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeEdge {
    pub parent: &'static str,
    pub child: &'static str,
    pub column: &'static str,
    pub on_delete: DeleteRule,
}

const fn cascade(parent: &'static str, child: &'static str, column: &'static str) -> CascadeEdge {
    CascadeEdge {
        parent,
        child,
        column,
        on_delete: DeleteRule::Cascade,
    }
}

pub const CASCADE_EDGES: &[CascadeEdge] = &[
    cascade("users", "profiles", "user_id"),
    cascade("users", "announcements", "user_id"),
    cascade("users", "tutorials", "user_id"),
    cascade("users", "notes", "user_id"),
    cascade("users", "quizzes", "owner_id"),
    cascade("users", "learners", "user_id"),
    cascade("users", "instructors", "user_id"),
    cascade("courses", "tutorials", "course_id"),
    cascade("courses", "notes", "course_id"),
    cascade("courses", "quizzes", "course_id"),
    cascade("courses", "learner_interests", "course_id"),
    cascade("courses", "instructor_expertise", "course_id"),
    cascade("quizzes", "questions", "quiz_id"),
    cascade("quizzes", "taken_quizzes", "quiz_id"),
    cascade("questions", "answers", "question_id"),
    cascade("questions", "learner_answers", "question_id"),
    cascade("answers", "learner_answers", "answer_id"),
    cascade("learners", "taken_quizzes", "learner_id"),
    cascade("learners", "learner_answers", "student_id"),
    cascade("learners", "learner_interests", "learner_id"),
    cascade("instructors", "instructor_expertise", "instructor_id"),
];

/// Edges whose parent is `table`.
pub fn children_of(table: &str) -> impl Iterator<Item = &'static CascadeEdge> + '_ {
    CASCADE_EDGES.iter().filter(move |e| e.parent == table)
}

/// Look up the edge for a foreign key column.
pub fn edge_for(child: &str, column: &str) -> Option<&'static CascadeEdge> {
    CASCADE_EDGES
        .iter()
        .find(|e| e.child == child && e.column == column)
}

/// Every table a delete on `table` can reach, excluding `table` itself.
pub fn descendants(table: &str) -> BTreeSet<&'static str> {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([table]);

    while let Some(current) = queue.pop_front() {
        for edge in children_of(current) {
            if edge.child != table && seen.insert(edge.child) {
                queue.push_back(edge.child);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_a_user_reaches_attempt_tables() {
        let reach = descendants("users");
        for table in [
            "profiles",
            "learners",
            "taken_quizzes",
            "learner_answers",
            "questions",
            "answers",
        ] {
            assert!(reach.contains(table), "users should reach {table}");
        }
        assert!(!reach.contains("courses"));
    }

    #[test]
    fn leaf_tables_have_no_descendants() {
        assert!(descendants("learner_answers").is_empty());
        assert!(descendants("announcements").is_empty());
    }

    #[test]
    fn answers_reach_only_learner_answers() {
        let reach: Vec<_> = descendants("answers").into_iter().collect();
        assert_eq!(reach, vec!["learner_answers"]);
    }

    #[test]
    fn edge_lookup() {
        let edge = edge_for("quizzes", "owner_id").unwrap();
        assert_eq!(edge.parent, "users");
        assert_eq!(edge.on_delete.sql_name(), "CASCADE");
        assert!(edge_for("quizzes", "missing").is_none());
    }

    #[test]
    fn edges_are_unique() {
        let keys: BTreeSet<_> = CASCADE_EDGES.iter().map(|e| (e.child, e.column)).collect();
        assert_eq!(keys.len(), CASCADE_EDGES.len());
    }
}
