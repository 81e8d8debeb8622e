//! Root application component and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::components::chat_room::ChatRoom;
use crate::config::ChatConfig;
use crate::net::in_memory::InMemoryChat;
use crate::net::service::ChatServices;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Loads the room config and provides it, together with the chat
/// collaborators, to the component tree.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ChatConfig::load();
    let chat = Rc::new(InMemoryChat::new(config.history_limit));

    provide_context(StoredValue::new_local(ChatServices::from_shared(chat)));
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/chat-room.css"/>
        <Title text="Chat"/>

        <main class="app">
            <ChatRoom/>
        </main>
    }
}
