use maud::{html, Markup};

use crate::db::AttemptRow;
use crate::names;
use crate::scoring::QuestionResult;

pub struct ResultsData {
    pub attempt: AttemptRow,
    pub category_name: String,
    pub breakdown: Vec<QuestionResult>,
}

pub fn results(data: ResultsData) -> Markup {
    let score = data.attempt.score.unwrap_or(0);
    let correct = data.breakdown.iter().filter(|r| r.is_correct).count();

    html! {
        article {
            header {
                h2 { "Results for " mark { (data.category_name) } }
            }
            p style="font-size: 1.2rem;" {
                strong { (score) "%" }
                " (" (correct) " of " (data.breakdown.len())
                " correct, passing score " (data.attempt.passing_score) "%)"
            }
            @if data.attempt.passed {
                p style="color: #28a745; font-weight: 500;" { "Passed" }
            } @else {
                p style="color: #d32f2f; font-weight: 500;" { "Failed" }
            }
            table {
                thead {
                    tr {
                        th { "Question" }
                        th { "Result" }
                    }
                }
                tbody {
                    @for result in &data.breakdown {
                        tr {
                            td { (result.question_text) }
                            td {
                                @if result.is_correct { "\u{2705}" } @else { "\u{274C}" }
                            }
                        }
                    }
                }
            }
            button hx-get=(names::DASHBOARD_URL)
                   hx-push-url="true"
                   hx-target="main"
                   hx-swap="innerHTML" {
                "Back to dashboard"
            }
        }
    }
}
