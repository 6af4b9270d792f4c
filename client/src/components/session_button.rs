//! Login / Logout toggle driven by the session context.

use leptos::prelude::*;

use crate::net::types::ProviderKind;
use crate::state::session::SessionContext;

/// Shows "Logout" for a signed-in user and "Login" otherwise.
///
/// Login is disabled until the session has been resolved so the button does
/// not flash the wrong action on first paint.
#[component]
pub fn SessionButton(session: SessionContext, #[prop(optional)] provider: ProviderKind) -> impl IntoView {
    let user = session.user();
    let resolving = session.resolving();

    view! {
        <Show
            when=move || user.with(Option::is_some)
            fallback=move || {
                view! {
                    <button
                        class="btn top-bar__session"
                        title=format!("Sign in with {}", provider.label())
                        disabled=move || resolving.get()
                        on:click=move |_| session.sign_in(provider)
                    >
                        "Login"
                    </button>
                }
            }
        >
            <button class="btn top-bar__session" on:click=move |_| session.sign_out()>
                "Logout"
            </button>
        </Show>
    }
}
