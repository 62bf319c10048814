use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::{Lesson, lesson, problem, problem_option};
use db::models::problem::ProblemKind;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Set};

/// Demo lesson content: three short math lessons with a mix of
/// multiple-choice and free-input problems. Skipped entirely if any lesson
/// already exists, so re-running the seeder is safe.
pub struct LessonSeeder;

struct ProblemSpec {
    kind: ProblemKind,
    prompt: &'static str,
    answer_text: Option<&'static str>,
    // (text, is_correct) rows, only for mcq problems
    options: &'static [(&'static str, bool)],
}

struct LessonSpec {
    title: &'static str,
    description: &'static str,
    position: i64,
    problems: &'static [ProblemSpec],
}

const LESSONS: &[LessonSpec] = &[
    LessonSpec {
        title: "Basic Arithmetic",
        description: "Addition and subtraction warm-up",
        position: 1,
        problems: &[
            ProblemSpec {
                kind: ProblemKind::Mcq,
                prompt: "What is 2 + 3?",
                answer_text: None,
                options: &[("4", false), ("5", true), ("6", false)],
            },
            ProblemSpec {
                kind: ProblemKind::Input,
                prompt: "What is 10 - 4?",
                answer_text: Some("6"),
                options: &[],
            },
            ProblemSpec {
                kind: ProblemKind::Mcq,
                prompt: "What is 7 + 1?",
                answer_text: None,
                options: &[("9", false), ("8", true), ("7", false)],
            },
        ],
    },
    LessonSpec {
        title: "Multiplication Mastery",
        description: "Times tables practice",
        position: 2,
        problems: &[
            ProblemSpec {
                kind: ProblemKind::Input,
                prompt: "What is 3 x 4?",
                answer_text: Some("12"),
                options: &[],
            },
            ProblemSpec {
                kind: ProblemKind::Mcq,
                prompt: "What is 5 x 5?",
                answer_text: None,
                options: &[("10", false), ("20", false), ("25", true)],
            },
            ProblemSpec {
                kind: ProblemKind::Input,
                prompt: "What is 6 x 2?",
                answer_text: Some("12"),
                options: &[],
            },
        ],
    },
    LessonSpec {
        title: "Division Basics",
        description: "Simple division problems",
        position: 3,
        problems: &[
            ProblemSpec {
                kind: ProblemKind::Mcq,
                prompt: "What is 8 / 2?",
                answer_text: None,
                options: &[("4", true), ("2", false)],
            },
            ProblemSpec {
                kind: ProblemKind::Input,
                prompt: "What is 9 / 3?",
                answer_text: Some("3"),
                options: &[],
            },
            ProblemSpec {
                kind: ProblemKind::Mcq,
                prompt: "What is 12 / 4?",
                answer_text: None,
                options: &[("2", false), ("3", true)],
            },
        ],
    },
];

#[async_trait]
impl Seeder for LessonSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if Lesson::find().one(db).await?.is_some() {
            return Ok(());
        }

        for spec in LESSONS {
            let lesson = lesson::ActiveModel {
                id: NotSet,
                title: Set(spec.title.to_string()),
                description: Set(spec.description.to_string()),
                position: Set(spec.position),
            }
            .insert(db)
            .await?;

            for p in spec.problems {
                let problem = problem::ActiveModel {
                    id: NotSet,
                    lesson_id: Set(lesson.id),
                    kind: Set(p.kind),
                    prompt: Set(p.prompt.to_string()),
                    answer_text: Set(p.answer_text.map(str::to_string)),
                }
                .insert(db)
                .await?;

                for (text, is_correct) in p.options {
                    problem_option::ActiveModel {
                        id: NotSet,
                        problem_id: Set(problem.id),
                        text: Set(text.to_string()),
                        is_correct: Set(*is_correct),
                    }
                    .insert(db)
                    .await?;
                }
            }
        }

        Ok(())
    }
}
