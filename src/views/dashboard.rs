use maud::{html, Markup};

use crate::db::{CategoryRow, RecentAttemptRow};
use crate::names;

pub struct DashboardData {
    pub user_name: String,
    pub categories: Vec<CategoryRow>,
    pub recent: Vec<RecentAttemptRow>,
}

pub fn dashboard(data: DashboardData) -> Markup {
    html! {
        h1 { "Welcome back, " (data.user_name) "." }

        section {
            h2 { "Pick a category" }
            @if data.categories.is_empty() {
                p { "No categories yet. Add some under Content." }
            }
            div."category-grid" {
                @for category in &data.categories {
                    article {
                        header { h3 { (category.name) } }
                        p { (category.description) }
                        p style="color: #666; font-size: 0.9rem;" {
                            (category.question_count) " active questions"
                        }
                        @if category.question_count > 0 {
                            button hx-post=(names::start_attempt_url(category.id))
                                   hx-target="main"
                                   hx-swap="innerHTML" {
                                "Start quiz"
                            }
                        } @else {
                            button disabled { "Start quiz" }
                        }
                    }
                }
            }
        }

        section {
            h2 { "Recent attempts" }
            @if data.recent.is_empty() {
                p { "Nothing completed yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Category" }
                            th { "Score" }
                            th { "Result" }
                            th { "Completed" }
                            th {}
                        }
                    }
                    tbody {
                        @for attempt in &data.recent {
                            tr {
                                td { (attempt.category_name) }
                                td { (attempt.score) "%" }
                                td {
                                    @if attempt.passed { "Passed" } @else { "Failed" }
                                }
                                td { (attempt.completed_at.format("%Y-%m-%d %H:%M")) }
                                td {
                                    button."outline" hx-get=(names::results_url(attempt.id))
                                           hx-push-url="true"
                                           hx-target="main"
                                           hx-swap="innerHTML" {
                                        "Details"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
