//! Users currently in the chat room.

use leptos::prelude::*;

/// Side panel listing connected display names in collaborator order.
#[component]
pub fn UserList(#[prop(into)] users: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <div class="user-list">
            <div class="user-list__summary">{move || format!("{} online", users.get().len())}</div>

            <Show
                when=move || !users.get().is_empty()
                fallback=move || view! { <div class="user-list__empty">"Nobody here yet."</div> }
            >
                <ul class="user-list__items">
                    {move || {
                        users
                            .get()
                            .into_iter()
                            .map(|name| view! { <li class="user-list__item">{name}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </div>
    }
}
