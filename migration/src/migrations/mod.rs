pub mod m202607140001_create_users;
pub mod m202607140002_create_lessons;
pub mod m202607140003_create_problems;
pub mod m202607140004_create_problem_options;
pub mod m202607140005_create_submissions;
pub mod m202607140006_create_user_problem_progress;
pub mod m202607140007_create_user_lesson_progress;
