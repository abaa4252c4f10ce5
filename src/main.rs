use std::path::PathBuf;

use clap::Parser;
use lifetime_quiz::{Quiz, QuizOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (defaults to the embedded bank)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Seconds allowed per question
    #[arg(short, long, default_value_t = 60)]
    time: u64,

    /// Directory to write the results export into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let options = QuizOptions {
        seconds_per_question: args.time,
        export_dir: args.output,
    };

    let quiz = match args.questions {
        Some(path) => match Quiz::from_json(path, options) {
            Ok(quiz) => quiz,
            Err(e) => {
                eprintln!("Failed to load questions: {}", e);
                std::process::exit(1);
            }
        },
        None => Quiz::with_default_questions(options),
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
