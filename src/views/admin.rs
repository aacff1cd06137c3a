use maud::{html, Markup};

use crate::db::{AdminQuestionRow, CategoryRow};
use crate::names;

pub struct AdminData {
    pub categories: Vec<CategoryRow>,
    pub questions: Vec<AdminQuestionRow>,
}

pub fn admin_page(data: AdminData) -> Markup {
    html! {
        h1 { "Content" }

        section {
            h2 { "New category" }
            form hx-post="/admin/category" hx-target="main" hx-swap="innerHTML" {
                label {
                    "Name"
                    input name="name" type="text" required;
                }
                label {
                    "Description"
                    input name="description" type="text";
                }
                button type="submit" { "Create category" }
            }
        }

        section {
            h2 { "New question" }
            @if data.categories.is_empty() {
                p { "Create a category first." }
            } @else {
                form hx-post="/admin/question" hx-target="main" hx-swap="innerHTML" {
                    label {
                        "Category"
                        select name="category_id" {
                            @for category in &data.categories {
                                option value=(category.id) { (category.name) }
                            }
                        }
                    }
                    label {
                        "Question"
                        textarea name="text" rows="2" required {}
                    }
                    label {
                        "Type"
                        select name="question_type" {
                            option value="single" { "Single answer" }
                            option value="multiple" { "Multiple answers" }
                        }
                    }
                    fieldset {
                        legend { "Options (leave unused rows empty, tick the correct ones)" }
                        @for row in 1..=4 {
                            div style="display: flex; gap: 0.5rem; align-items: center;" {
                                input name="options" type="text" placeholder=(format!("Option {row}"));
                                label style="margin-bottom: 0; white-space: nowrap;" {
                                    input name="correct" type="checkbox" value=(row);
                                    "Correct"
                                }
                            }
                        }
                    }
                    button type="submit" { "Create question" }
                }
            }
        }

        section {
            h2 { "Questions" }
            @if data.questions.is_empty() {
                p { "No questions yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Question" }
                            th { "Category" }
                            th { "Type" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        @for question in &data.questions {
                            tr {
                                td { (question.text) }
                                td { (question.category_name) }
                                td { (question.question_type.as_str()) }
                                td {
                                    @if question.is_deleted {
                                        mark { "deleted" }
                                    } @else {
                                        "active"
                                    }
                                }
                                td {
                                    @if !question.is_deleted {
                                        button class="outline"
                                               hx-post=(names::delete_question_url(question.id))
                                               hx-target="main"
                                               hx-swap="innerHTML"
                                               hx-confirm="Remove this question from future quizzes?" {
                                            "Delete"
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
}
