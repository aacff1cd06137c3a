use maud::{html, Markup};

use crate::names;

pub enum LoginState {
    Fresh,
    BadCredentials,
}

pub fn login_page(state: LoginState) -> Markup {
    html! {
        article style="max-width: 30rem; margin: 3rem auto;" {
            h1 { "Log in" }
            @if matches!(state, LoginState::BadCredentials) {
                p style="color: #d32f2f; font-weight: 500;" { "Invalid username or password." }
            }
            form hx-post=(names::LOGIN_URL) hx-target="main" hx-swap="innerHTML" {
                label {
                    "Username"
                    input name="username" type="text" autocomplete="username" required;
                }
                label {
                    "Password"
                    input name="password" type="password" autocomplete="current-password" required;
                }
                button type="submit" { "Log in" }
            }
        }
    }
}
