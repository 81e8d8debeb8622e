//! Chat room panel: name entry, message history, user list and message input.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel owns a `ChatRoomController` in a local `StoredValue`, so the
//! controller and its stream subscriptions are dropped with this component's
//! reactive owner. Collaborator emissions bump `revision`, which is what the
//! message list and user list track.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::user_list::UserList;
use crate::config::ChatConfig;
use crate::net::service::ChatServices;
use crate::state::chat::ChatMessage;
use crate::state::room::{ChatRoomController, RoomViews};
use crate::util::deferred::default_detector;

/// Chat room bound to the collaborators provided in context.
#[component]
pub fn ChatRoom() -> impl IntoView {
    let services = expect_context::<StoredValue<ChatServices, LocalStorage>>().get_value();
    let config = expect_context::<ChatConfig>();

    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let revision = RwSignal::new(0_u64);
    let connected = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let text = RwSignal::new(String::new());

    let views = RoomViews { messages: Rc::new(messages_ref), text_input: Rc::new(input_ref) };
    let mut controller = ChatRoomController::new(services.clone(), default_detector(), views, config);
    controller.init();
    controller.hold(services.communication.messages_stream(Box::new(move |_: ChatMessage| {
        revision.update(|r| *r += 1);
    })));
    controller.hold(services.handler.connected(Box::new(move |value: bool| {
        connected.set(value);
        revision.update(|r| *r += 1);
    })));
    let room = StoredValue::new_local(controller);

    let do_connect = move || room.with_value(ChatRoomController::connect);

    let do_send = move || {
        room.with_value(|r| {
            r.send();
            text.set(r.text());
        });
    };

    let on_name_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        room.with_value(|r| r.set_name(value.clone()));
        name.set(value);
    };

    let on_text_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        room.with_value(|r| r.set_text(value.clone()));
        text.set(value);
    };

    let on_submit_name = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_connect();
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let users = Signal::derive(move || {
        revision.track();
        room.with_value(ChatRoomController::users)
    });

    let message_rows = move || {
        revision.track();
        let messages = room.with_value(ChatRoomController::messages);
        if messages.is_empty() {
            return view! { <div class="chat-room__empty">"No messages yet"</div> }.into_any();
        }

        messages
            .into_iter()
            .map(|msg| {
                view! {
                    <div class="chat-room__message">
                        <span class="chat-room__author">{msg.author}</span>
                        <span class="chat-room__text">{msg.content}</span>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="chat-room">
            <Show
                when=move || connected.get()
                fallback=move || {
                    view! {
                        <form class="chat-room__connect" on:submit=on_submit_name>
                            <input
                                class="chat-room__name"
                                type="text"
                                placeholder="Your name"
                                prop:value=move || name.get()
                                on:input=on_name_input
                            />
                            <button class="btn btn--primary" type="submit" disabled=move || name.get().is_empty()>
                                "Connect"
                            </button>
                        </form>
                    }
                }
            >
                <div class="chat-room__body">
                    <div class="chat-room__messages" node_ref=messages_ref>
                        {message_rows}
                    </div>
                    <UserList users=users/>
                </div>

                <div class="chat-room__input-row">
                    <input
                        class="chat-room__input"
                        type="text"
                        placeholder="Message..."
                        node_ref=input_ref
                        prop:value=move || text.get()
                        on:input=on_text_input
                        on:keydown=on_keydown
                    />
                    <button
                        class="btn btn--primary chat-room__send"
                        on:click=move |_| do_send()
                        disabled=move || text.get().is_empty()
                    >
                        "Send"
                    </button>
                </div>
            </Show>
        </div>
    }
}
