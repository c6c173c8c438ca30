//! Entries Page
//!
//! Lists all diary entries with their thumbnails and hosts the inline
//! add/edit form.

use leptos::*;
use leptos_router::*;
use std::collections::HashMap;

use crate::api;
use crate::components::{EntryForm, ListSkeleton};
use crate::state::session;

/// Diary entries page component
#[component]
pub fn Home() -> impl IntoView {
    let entries = create_rw_signal(Vec::<api::Entry>::new());
    let thumbnails = create_rw_signal(HashMap::<String, String>::new());
    let (error, set_error) = create_signal(String::new());
    let (loading, set_loading) = create_signal(true);
    let (show_form, set_show_form) = create_signal(false);
    let editing_entry = create_rw_signal(None::<api::Entry>);

    // Load entries on mount
    create_effect(move |_| {
        spawn_local(async move {
            set_loading.set(true);
            match load_entries(entries, thumbnails).await {
                Ok(()) => set_error.set(String::new()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch entries: {}", e).into());
                    set_error.set("Failed to fetch entries.".to_string());
                }
            }
            set_loading.set(false);
        });
    });

    let on_saved = move || {
        set_show_form.set(false);
        editing_entry.set(None);
        spawn_local(async move {
            if let Err(e) = load_entries(entries, thumbnails).await {
                web_sys::console::error_1(&format!("Failed to fetch entries: {}", e).into());
                set_error.set("Failed to fetch entries.".to_string());
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Diary Entries"</h1>

                <button
                    on:click=move |_| set_show_form.update(|v| *v = !*v)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || if show_form.get() {
                        "Cancel"
                    } else if editing_entry.get().is_some() {
                        "Edit Entry"
                    } else {
                        "Add New Entry"
                    }}
                </button>
            </div>

            // Fetch failures stay visible above the list
            {move || {
                let msg = error.get();
                if msg.is_empty() {
                    view! {}.into_view()
                } else {
                    view! {
                        <div class="bg-red-900/50 border border-red-700 rounded-lg px-4 py-3 text-sm">
                            {msg}
                        </div>
                    }.into_view()
                }
            }}

            {move || {
                if show_form.get() {
                    view! {
                        <EntryForm editing=editing_entry.get() on_saved=on_saved />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            {move || {
                if loading.get() {
                    view! { <ListSkeleton count=4 /> }.into_view()
                } else {
                    let list = entries.get();
                    if list.is_empty() {
                        view! {
                            <p class="text-gray-400 text-center py-12">
                                "No entries yet. Add your first one!"
                            </p>
                        }.into_view()
                    } else {
                        view! {
                            <ul class="space-y-3">
                                {list.into_iter().map(|entry| view! {
                                    <EntryListItem
                                        entry=entry
                                        thumbnails=thumbnails
                                        editing_entry=editing_entry
                                        set_show_form=set_show_form
                                    />
                                }).collect_view()}
                            </ul>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}

/// Single entry row with its thumbnail and edit controls
#[component]
fn EntryListItem(
    entry: api::Entry,
    thumbnails: RwSignal<HashMap<String, String>>,
    editing_entry: RwSignal<Option<api::Entry>>,
    set_show_form: WriteSignal<bool>,
) -> impl IntoView {
    let id = entry.id.clone();
    let title = entry.title.clone();
    let edit_href = format!("/edit/{}", entry.id);
    let entry_for_edit = entry;

    view! {
        <li class="bg-gray-800 rounded-xl p-4 border border-gray-700 hover:border-gray-600
                   transition-colors flex items-center justify-between">
            <span class="font-medium">{title}</span>

            <div class="flex items-center space-x-3">
                {move || {
                    thumbnails.get().get(&id).cloned().map(|url| view! {
                        <img
                            src=url
                            alt="Entry thumbnail"
                            class="w-12 h-12 rounded object-cover"
                        />
                    })
                }}

                <button
                    on:click=move |_| {
                        editing_entry.set(Some(entry_for_edit.clone()));
                        set_show_form.set(true);
                    }
                    class="px-3 py-1.5 bg-yellow-600 hover:bg-yellow-500 rounded-lg text-sm
                           font-medium transition-colors"
                >
                    "Edit"
                </button>

                <A
                    href=edit_href
                    class="px-3 py-1.5 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm
                           font-medium transition-colors"
                >
                    "Open"
                </A>
            </div>
        </li>
    }
}

/// Fetch the entry list, then fan out one thumbnail request per entry
///
/// The thumbnail requests complete in any order; each fills only its own
/// entry's slot in the map.
async fn load_entries(
    entries: RwSignal<Vec<api::Entry>>,
    thumbnails: RwSignal<HashMap<String, String>>,
) -> Result<(), String> {
    let token = session::token().unwrap_or_default();
    let fetched = api::fetch_entries(&token).await?;

    for entry in &fetched {
        let id = entry.id.clone();
        spawn_local(async move {
            match api::fetch_entry_images(&id).await {
                Ok(images) => {
                    if let Some(first) = images.first() {
                        let url = api::thumbnail_url(&api::get_api_base(), &first.image_url);
                        thumbnails.update(|map| {
                            map.insert(id.clone(), url);
                        });
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch image for entry {}: {}", id, e).into(),
                    );
                }
            }
        });
    }

    entries.set(fetched);
    Ok(())
}
