//! Edit Entry Page
//!
//! Standalone editor for a single entry: change title and text, attach new
//! images via a multipart upload, and delete existing images one at a time.

use leptos::*;
use leptos_router::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::entry_form::selected_files;

/// Entry editor page component
#[component]
pub fn EditEntry() -> impl IntoView {
    let params = use_params_map();
    let entry_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (title, set_title) = create_signal(String::new());
    let (text, set_text) = create_signal(String::new());
    let (files, set_files) = create_signal(Vec::<web_sys::File>::new());
    let images = create_rw_signal(Vec::<api::EntryImage>::new());
    let (submitting, set_submitting) = create_signal(false);

    // Load the entry whenever the id parameter changes
    create_effect(move |_| {
        let id = entry_id();
        spawn_local(async move {
            match api::fetch_entry(&id).await {
                Ok(entry) => {
                    set_title.set(entry.title);
                    set_text.set(entry.text);
                    images.set(entry.images);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch entry data: {}", e).into());
                }
            }
        });
    });

    let on_file_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            set_files.set(selected_files(input.files()));
        }
    };

    // Delete on the server, then drop the image from the local strip
    let remove_image = move |image_id: String| {
        let id = entry_id();
        spawn_local(async move {
            match api::delete_image(&id, &image_id).await {
                Ok(()) => {
                    images.update(|list| without_image(list, &image_id));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to delete image: {}", e).into());
                }
            }
        });
    };

    let navigate = use_navigate();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let id = entry_id();
        let form_title = title.get();
        let form_text = text.get();
        let picked = files.get();

        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let form = match entry_form_data(&form_title, &form_text, &picked) {
                Ok(form) => form,
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to build form data: {:?}", e).into());
                    set_submitting.set(false);
                    return;
                }
            };

            match api::update_entry_multipart(&id, form).await {
                Ok(()) => navigate("/", Default::default()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to update entry: {}", e).into());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Edit Entry"</h1>

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
                    <label class="block text-sm text-gray-400 mb-2">"Upload New Images"</label>
                    <input
                        type="file"
                        multiple=true
                        on:change=on_file_change
                        class="w-full text-sm text-gray-400"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Existing Images"</label>
                    <div class="flex flex-wrap gap-3">
                        {move || {
                            images.get().into_iter().map(|image| {
                                let url = api::edit_image_url(&api::get_api_base(), &image.image_url);
                                let image_id = image.image_id.clone();
                                view! {
                                    <div class="relative">
                                        <img
                                            src=url
                                            alt="Entry image"
                                            class="w-24 h-24 rounded object-cover"
                                        />
                                        <button
                                            type="button"
                                            on:click=move |_| remove_image(image_id.clone())
                                            class="absolute top-0 right-0 px-1.5 bg-red-600
                                                   hover:bg-red-500 rounded text-sm"
                                        >
                                            "✕"
                                        </button>
                                    </div>
                                }
                            }).collect_view()
                        }}
                    </div>
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Saving..." } else { "Update Entry" }}
                </button>
            </form>
        </div>
    }
}

/// Build the multipart body for an entry update
fn entry_form_data(
    title: &str,
    text: &str,
    files: &[web_sys::File],
) -> Result<web_sys::FormData, wasm_bindgen::JsValue> {
    let form = web_sys::FormData::new()?;
    form.append_with_str("title", title)?;
    form.append_with_str("text", text)?;
    for file in files {
        form.append_with_blob_and_filename("images", file, &file.name())?;
    }
    Ok(form)
}

/// Drop the image matching `image_id`, keeping the order of the rest
fn without_image(images: &mut Vec<api::EntryImage>, image_id: &str) {
    images.retain(|image| image.image_id != image_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EntryImage;

    fn image(id: &str) -> EntryImage {
        EntryImage {
            image_id: id.to_string(),
            image_url: format!("{}.jpg", id),
        }
    }

    #[test]
    fn test_without_image_removes_only_the_match() {
        let mut images = vec![image("a"), image("b"), image("c")];
        without_image(&mut images, "b");
        assert_eq!(images, vec![image("a"), image("c")]);
    }

    #[test]
    fn test_without_image_ignores_unknown_id() {
        let mut images = vec![image("a")];
        without_image(&mut images, "zzz");
        assert_eq!(images, vec![image("a")]);
    }
}
