use crate::seed::{Seeder, run_seeder};
use crate::seeds::{lesson::LessonSeeder, user::DemoUserSeeder};
use common::config::Config;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    Config::init(".env");
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(DemoUserSeeder) as Box<dyn Seeder + Send + Sync>, "DemoUser"),
        (Box::new(LessonSeeder), "Lesson"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
