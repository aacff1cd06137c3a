use maud::{html, Markup};

use crate::db::ReviewEntry;
use crate::names;

pub struct ReviewData {
    pub attempt_id: i64,
    pub entries: Vec<ReviewEntry>,
}

pub fn review_panel(data: ReviewData) -> Markup {
    let answered = data.entries.iter().filter(|e| e.answered).count();

    html! {
        article {
            header {
                h2 { "Review" }
            }
            p { (answered) " of " (data.entries.len()) " answered." }
            table {
                thead {
                    tr {
                        th { "Question" }
                        th { "Status" }
                        th { "Flagged" }
                        th {}
                    }
                }
                tbody {
                    @for (idx, entry) in data.entries.iter().enumerate() {
                        tr {
                            td { "Question " (idx + 1) }
                            td {
                                @if entry.answered {
                                    "Answered"
                                } @else {
                                    mark { "Unanswered" }
                                }
                            }
                            td {
                                @if entry.flagged { "\u{1F6A9}" } @else { "-" }
                            }
                            td {
                                button type="button" class="outline"
                                       hx-get=(names::question_url(data.attempt_id, entry.answer_id))
                                       hx-target="main"
                                       hx-swap="innerHTML" {
                                    "Open"
                                }
                            }
                        }
                    }
                }
            }
            button hx-post=(names::submit_url(data.attempt_id))
                   hx-target="main"
                   hx-swap="innerHTML"
                   hx-confirm="Submit the quiz? You cannot change answers afterwards." {
                "Submit quiz"
            }
        }
    }
}
