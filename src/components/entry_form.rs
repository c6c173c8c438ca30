//! Entry Form Component
//!
//! Inline form for creating a diary entry or editing one picked from the
//! list. Selected files are read in the browser and submitted as base64
//! strings in a JSON payload.

use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::state::{session, GlobalState};

/// Add/edit form shown inline on the entries page
#[component]
pub fn EntryForm(
    editing: Option<api::Entry>,
    on_saved: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let is_editing = editing.is_some();
    let (title, set_title) = create_signal(
        editing.as_ref().map(|e| e.title.clone()).unwrap_or_default(),
    );
    let (text, set_text) = create_signal(
        editing.as_ref().map(|e| e.text.clone()).unwrap_or_default(),
    );
    let (files, set_files) = create_signal(Vec::<web_sys::File>::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_file_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            set_files.set(selected_files(input.files()));
        }
    };

    let entry_for_submit = editing;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let entry = entry_for_submit.clone();
        let form_title = title.get();
        let form_text = text.get();
        let picked = files.get();
        let token = session::token().unwrap_or_default();

        set_submitting.set(true);

        let state_clone = state.clone();
        let on_saved_inner = on_saved.clone();
        spawn_local(async move {
            let mut encoded = Vec::with_capacity(picked.len());
            for file in &picked {
                match read_file_bytes(file).await {
                    Ok(bytes) => encoded.push(api::encode_image(&bytes)),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to read file {}: {:?}", file.name(), e).into(),
                        );
                        state_clone.show_error(failure_message(entry.is_some()));
                        set_submitting.set(false);
                        return;
                    }
                }
            }

            let result = match &entry {
                Some(entry) => {
                    let payload = api::update_entry_payload(entry, form_title, form_text, encoded);
                    api::update_entry(&token, &entry.id, &payload).await
                }
                None => {
                    let payload = api::new_entry_payload(form_title, form_text, encoded);
                    api::add_entry(&token, &payload).await
                }
            };

            match result {
                Ok(()) => {
                    state_clone.show_success(success_message(entry.is_some()));
                    on_saved_inner();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Entry save failed: {}", e).into());
                    state_clone.show_error(failure_message(entry.is_some()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                <input
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    required=true
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Text"</label>
                <textarea
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                    required=true
                    rows="4"
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Upload Images"</label>
                <input
                    type="file"
                    multiple=true
                    on:change=on_file_change
                    class="w-full text-sm text-gray-400"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg font-medium transition-colors"
            >
                {move || if submitting.get() {
                    "Saving..."
                } else if is_editing {
                    "Save Changes"
                } else {
                    "Add Entry"
                }}
            </button>
        </form>
    }
}

/// Collect the files selected in a file input
pub(crate) fn selected_files(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    match list {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    }
}

/// Read a file's contents into memory
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn success_message(is_edit: bool) -> &'static str {
    if is_edit {
        "Entry updated successfully!"
    } else {
        "New entry added successfully!"
    }
}

fn failure_message(is_edit: bool) -> &'static str {
    if is_edit {
        "Failed to update entry."
    } else {
        "Failed to add entry."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_follow_form_mode() {
        assert_eq!(success_message(false), "New entry added successfully!");
        assert_eq!(success_message(true), "Entry updated successfully!");
        assert_eq!(failure_message(false), "Failed to add entry.");
        assert_eq!(failure_message(true), "Failed to update entry.");
    }
}
