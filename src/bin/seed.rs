//! Loads the demo content set: a demo user plus three categories with
//! their question pools. Safe to re-run; existing categories are skipped.

use clap::Parser;
use quizcraft::db::{Db, NewOption, NewQuestion, QuestionType};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL.
    #[arg(long, env, default_value = "sqlite:quizcraft.db?mode=rwc")]
    database_url: String,
}

struct DemoQuestion {
    text: &'static str,
    question_type: QuestionType,
    options: &'static [(&'static str, bool)],
}

struct DemoCategory {
    name: &'static str,
    description: &'static str,
    questions: &'static [DemoQuestion],
}

const DEMO: &[DemoCategory] = &[
    DemoCategory {
        name: "Python Programming",
        description: "Test your Python programming knowledge",
        questions: &[
            DemoQuestion {
                text: "What is the output of print(2 ** 3)?",
                question_type: QuestionType::Single,
                options: &[("6", false), ("8", true), ("9", false), ("5", false)],
            },
            DemoQuestion {
                text: "Which of the following is NOT a valid Python data type?",
                question_type: QuestionType::Single,
                options: &[("int", false), ("float", false), ("char", true), ("str", false)],
            },
            DemoQuestion {
                text: "What keyword is used to create a function in Python?",
                question_type: QuestionType::Single,
                options: &[
                    ("function", false),
                    ("def", true),
                    ("func", false),
                    ("define", false),
                ],
            },
            DemoQuestion {
                text: "Which of the following are mutable data types in Python? (Select all that apply)",
                question_type: QuestionType::Multiple,
                options: &[("list", true), ("tuple", false), ("dict", true), ("set", true)],
            },
        ],
    },
    DemoCategory {
        name: "Web Development",
        description: "Questions about HTML, CSS, and JavaScript",
        questions: &[
            DemoQuestion {
                text: "What does HTML stand for?",
                question_type: QuestionType::Single,
                options: &[
                    ("HyperText Markup Language", true),
                    ("HighText Machine Language", false),
                    ("HyperText Markdown Language", false),
                    ("Home Tool Markup Language", false),
                ],
            },
            DemoQuestion {
                text: "Which CSS property controls the text size?",
                question_type: QuestionType::Single,
                options: &[
                    ("font-style", false),
                    ("text-size", false),
                    ("font-size", true),
                    ("text-style", false),
                ],
            },
            DemoQuestion {
                text: "Which of these are valid ways to declare a variable in JavaScript? (Select all that apply)",
                question_type: QuestionType::Multiple,
                options: &[("var", true), ("let", true), ("const", true), ("def", false)],
            },
        ],
    },
    DemoCategory {
        name: "General Knowledge",
        description: "Fun general knowledge questions",
        questions: &[
            DemoQuestion {
                text: "What is the capital of France?",
                question_type: QuestionType::Single,
                options: &[
                    ("London", false),
                    ("Berlin", false),
                    ("Paris", true),
                    ("Madrid", false),
                ],
            },
            DemoQuestion {
                text: "Which planet is known as the Red Planet?",
                question_type: QuestionType::Single,
                options: &[
                    ("Venus", false),
                    ("Mars", true),
                    ("Jupiter", false),
                    ("Saturn", false),
                ],
            },
            DemoQuestion {
                text: "Which of these countries border France? (Select all that apply)",
                question_type: QuestionType::Multiple,
                options: &[
                    ("Spain", true),
                    ("Italy", true),
                    ("Portugal", false),
                    ("Belgium", true),
                ],
            },
        ],
    },
];

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let db = Db::new(&args.database_url).await?;

    if db.find_user_by_username("demo").await?.is_none() {
        db.create_user("demo", "demo1234", "Demo User").await?;
        tracing::info!("created demo user (username=demo, password=demo1234)");
    }

    for category in DEMO {
        if db.find_category_id(category.name).await?.is_some() {
            tracing::info!("category '{}' already exists, skipping", category.name);
            continue;
        }

        let category_id = db
            .create_category(category.name, category.description)
            .await?;

        for question in category.questions {
            let options = question
                .options
                .iter()
                .map(|&(text, is_correct)| NewOption {
                    text: text.to_string(),
                    is_correct,
                })
                .collect();

            db.create_question(
                category_id,
                NewQuestion {
                    text: question.text.to_string(),
                    question_type: question.question_type,
                    options,
                },
            )
            .await?;
        }

        tracing::info!(
            "loaded {} questions into '{}'",
            category.questions.len(),
            category.name
        );
    }

    Ok(())
}
