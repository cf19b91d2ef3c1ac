//! Learner interests and instructor expertise links.

use elearn_core::roles::{Role, RoleSet};
use elearn_db::models::course::CreateCourse;
use elearn_db::models::instructor::{CreateInstructor, UpdateInstructor};
use elearn_db::models::learner::CreateLearner;
use elearn_db::models::user::CreateUser;
use elearn_db::repositories::{CourseRepo, InstructorRepo, LearnerRepo, UserRepo};
use elearn_db::IntegrityKind;
use sqlx::PgPool;

async fn new_user_id(pool: &PgPool, username: &str, role: Role) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            first_name: None,
            last_name: None,
            email: None,
            password_hash: "hash".to_string(),
            roles: [role].into_iter().collect::<RoleSet>(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_course_ids(pool: &PgPool, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        ids.push(CourseRepo::create(pool, &CreateCourse::new(*name)).await.unwrap().id);
    }
    ids
}

fn names(courses: Vec<elearn_db::models::course::Course>) -> Vec<String> {
    courses.into_iter().map(|c| c.name).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_learner_interests(pool: PgPool) {
    let user_id = new_user_id(&pool, "curious", Role::Learner).await;
    let learner = LearnerRepo::create(&pool, &CreateLearner { user_id }).await.unwrap();
    let ids = new_course_ids(&pool, &["Zoology", "Botany", "Ecology"]).await;

    LearnerRepo::add_interest(&pool, learner.id, ids[0]).await.unwrap();
    LearnerRepo::add_interest(&pool, learner.id, ids[0]).await.unwrap();
    LearnerRepo::add_interest(&pool, learner.id, ids[1]).await.unwrap();
    assert_eq!(
        names(LearnerRepo::list_interests(&pool, learner.id).await.unwrap()),
        vec!["Botany", "Zoology"]
    );

    assert!(LearnerRepo::remove_interest(&pool, learner.id, ids[0]).await.unwrap());
    assert!(!LearnerRepo::remove_interest(&pool, learner.id, ids[0]).await.unwrap());

    LearnerRepo::set_interests(&pool, learner.id, &[ids[2], ids[0], ids[2]])
        .await
        .unwrap();
    assert_eq!(
        names(LearnerRepo::list_interests(&pool, learner.id).await.unwrap()),
        vec!["Ecology", "Zoology"]
    );

    LearnerRepo::set_interests(&pool, learner.id, &[]).await.unwrap();
    assert!(LearnerRepo::list_interests(&pool, learner.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_delete_drops_links(pool: PgPool) {
    let user_id = new_user_id(&pool, "linked", Role::Learner).await;
    let learner = LearnerRepo::create(&pool, &CreateLearner { user_id }).await.unwrap();
    let ids = new_course_ids(&pool, &["Temporary"]).await;

    LearnerRepo::add_interest(&pool, learner.id, ids[0]).await.unwrap();
    CourseRepo::delete(&pool, ids[0]).await.unwrap();
    assert!(LearnerRepo::list_interests(&pool, learner.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_learner_record_per_user(pool: PgPool) {
    let user_id = new_user_id(&pool, "once", Role::Learner).await;
    LearnerRepo::create(&pool, &CreateLearner { user_id }).await.unwrap();
    let err = LearnerRepo::create(&pool, &CreateLearner { user_id })
        .await
        .unwrap_err();
    let err = elearn_db::DbError::from(err);
    assert_eq!(err.integrity_kind(), Some(IntegrityKind::Unique));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_learners_listed_by_username(pool: PgPool) {
    for name in ["zed", "amy"] {
        let user_id = new_user_id(&pool, name, Role::Learner).await;
        LearnerRepo::create(&pool, &CreateLearner { user_id }).await.unwrap();
    }
    let amy = UserRepo::find_by_username(&pool, "amy").await.unwrap().unwrap();
    let learners = LearnerRepo::list(&pool).await.unwrap();
    assert_eq!(learners.first().map(|l| l.user_id), Some(amy.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_instructors_listed_by_username(pool: PgPool) {
    let mut user_ids = Vec::new();
    for name in ["zed", "amy"] {
        let user_id = new_user_id(&pool, name, Role::Instructor).await;
        InstructorRepo::create(
            &pool,
            &CreateInstructor {
                user_id,
                bio: None,
                years_experience: None,
            },
        )
        .await
        .unwrap();
        user_ids.push(user_id);
    }
    let listed: Vec<_> = InstructorRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.user_id)
        .collect();
    assert_eq!(listed, vec![user_ids[1], user_ids[0]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_instructor_expertise_and_verification(pool: PgPool) {
    let user_id = new_user_id(&pool, "prof", Role::Instructor).await;
    let instructor = InstructorRepo::create(
        &pool,
        &CreateInstructor {
            user_id,
            bio: None,
            years_experience: Some(7),
        },
    )
    .await
    .unwrap();
    assert!(!instructor.is_verified);
    assert_eq!(instructor.bio, "");

    let ids = new_course_ids(&pool, &["Optics", "Mechanics"]).await;
    InstructorRepo::set_expertise(&pool, instructor.id, &ids).await.unwrap();
    assert_eq!(
        names(InstructorRepo::list_expertise(&pool, instructor.id).await.unwrap()),
        vec!["Mechanics", "Optics"]
    );

    let teaching = InstructorRepo::list_by_course(&pool, ids[0]).await.unwrap();
    assert_eq!(teaching.len(), 1);
    assert_eq!(teaching[0].id, instructor.id);

    assert!(InstructorRepo::remove_expertise(&pool, instructor.id, ids[0]).await.unwrap());
    assert!(InstructorRepo::list_by_course(&pool, ids[0]).await.unwrap().is_empty());

    assert!(InstructorRepo::set_verified(&pool, instructor.id, true).await.unwrap());
    let updated = InstructorRepo::update(
        &pool,
        instructor.id,
        &UpdateInstructor {
            bio: Some("Physicist".into()),
            years_experience: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.is_verified);
    assert_eq!(updated.bio, "Physicist");
    assert_eq!(updated.years_experience, 7);

    let err = InstructorRepo::create(
        &pool,
        &CreateInstructor {
            user_id,
            bio: None,
            years_experience: Some(-1),
        },
    )
    .await;
    assert!(err.is_err());
}
