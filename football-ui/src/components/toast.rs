//! Toast Notification Component

use leptos::*;

use crate::state::GameScreen;

/// Bottom toast, visible while the screen holds a message
#[component]
pub fn Toast() -> impl IntoView {
    let screen = use_context::<GameScreen>().expect("GameScreen not found");

    view! {
        <div id="toast" class="toast" class:show=move || screen.toast.get().is_some()>
            {move || screen.toast.get().unwrap_or_default()}
        </div>
    }
}
