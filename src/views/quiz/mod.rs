mod question;
mod results;
mod review;

pub use question::{flag_button, question, QuestionData};
pub use results::{results, ResultsData};
pub use review::{review_panel, ReviewData};

use maud::{html, Markup};

use crate::names;

pub fn empty_pool_notice(category_name: &str) -> Markup {
    html! {
        article {
            header {
                h2 { "No questions available" }
            }
            p {
                mark { (category_name) }
                " has no active questions, so a quiz cannot start."
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
