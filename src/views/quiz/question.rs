use maud::{html, Markup};

use crate::db::AnswerContext;
use crate::names;

pub struct QuestionData {
    pub attempt_id: i64,
    pub category_name: String,
    pub context: AnswerContext,
}

pub fn flag_button(answer_id: i64, flagged: bool) -> Markup {
    let class = if flagged { "flag-btn active" } else { "flag-btn" };
    let title = if flagged {
        "Unflag this question"
    } else {
        "Flag for review"
    };
    html! {
        button type="button" class=(class)
               hx-post=(names::flag_url(answer_id))
               hx-swap="outerHTML"
               title=(title) {
            "\u{1F6A9}"
        }
    }
}

pub fn question(data: QuestionData) -> Markup {
    let ctx = &data.context;
    let is_multiple = ctx.question_type.is_multiple();

    html! {
        p { "Taking a quiz on " mark { (data.category_name) } "." }
        article style="width: fit-content;" {
            div style="display: flex; align-items: center; margin-bottom: 0.5rem;" {
                p style="color: #666; font-size: 0.9rem; margin-bottom: 0;" {
                    "Question " strong { (ctx.position + 1) } " of " (ctx.total)
                }
                span style="margin-left: auto;" {
                    (flag_button(ctx.answer_id, ctx.flagged))
                }
            }

            h3 { (ctx.question_text) }

            @if is_multiple {
                p style="color: #0066cc; font-weight: 500;" { "Select all that apply." }
            }

            form hx-post=(names::question_url(data.attempt_id, ctx.answer_id))
                 hx-target="main"
                 hx-swap="innerHTML" {
                fieldset {
                    @for opt in &ctx.options {
                        label {
                            @if is_multiple {
                                input type="checkbox" name="options" value=(opt.id) checked[opt.is_selected];
                            } @else {
                                input type="radio" name="options" value=(opt.id) checked[opt.is_selected];
                            }
                            (opt.text)
                        }
                    }
                }
                div style="display: flex; gap: 1rem; margin-top: 1rem; align-items: center;" {
                    @if let Some(prev_id) = ctx.prev_id {
                        button type="button" class="nav-btn"
                               hx-get=(names::question_url(data.attempt_id, prev_id))
                               hx-target="main"
                               hx-swap="innerHTML" {
                            "Previous"
                        }
                    }
                    button type="submit" { "Save answer" }
                    @if let Some(next_id) = ctx.next_id {
                        button type="button" class="nav-btn"
                               hx-get=(names::question_url(data.attempt_id, next_id))
                               hx-target="main"
                               hx-swap="innerHTML" {
                            "Next"
                        }
                    }
                    span style="margin-left: auto; display: flex; gap: 1rem;" {
                        button type="button" class="outline"
                               hx-get=(names::review_url(data.attempt_id))
                               hx-target="main"
                               hx-swap="innerHTML" {
                            "Review"
                        }
                        @if ctx.is_last() {
                            button type="button"
                                   hx-post=(names::submit_url(data.attempt_id))
                                   hx-target="main"
                                   hx-swap="innerHTML"
                                   hx-confirm="Submit the quiz? You cannot change answers afterwards." {
                                "Submit quiz"
                            }
                        }
                    }
                }
            }
        }
    }
}
