//! Auth Page
//!
//! Login and registration form shown to signed-out visitors.

use leptos::*;

use crate::api;
use crate::state::GlobalState;

/// Login / register page component
#[component]
pub fn Auth() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (is_login, set_is_login) = create_signal(true);
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (message, set_message) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let login = is_login.get();
        let form_email = email.get();
        let form_password = password.get();

        set_submitting.set(true);

        let state_clone = state.clone();
        spawn_local(async move {
            if login {
                match api::login(&form_email, &form_password).await {
                    Ok(token) => {
                        state_clone.sign_in(&token);
                        set_message.set("Login successful!".to_string());
                    }
                    Err(msg) => set_message.set(msg),
                }
            } else {
                match api::register(&form_email, &form_password).await {
                    Ok(msg) => set_message.set(msg),
                    Err(msg) => set_message.set(msg),
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-6 shadow-lg">
                <h2 class="text-2xl font-bold mb-6">
                    {move || if is_login.get() { "Login" } else { "Register" }}
                </h2>

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Email address"</label>
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required=true
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required=true
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    // Auth outcomes show inline rather than as toasts
                    {move || {
                        let msg = message.get();
                        if msg.is_empty() {
                            view! {}.into_view()
                        } else {
                            view! {
                                <div class="bg-blue-900/50 border border-blue-700 rounded-lg px-4 py-3 text-sm">
                                    {msg}
                                </div>
                            }.into_view()
                        }
                    }}

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if is_login.get() { "Login" } else { "Register" }}
                    </button>
                </form>

                <div class="mt-4 text-center">
                    <button
                        on:click=move |_| set_is_login.update(|v| *v = !*v)
                        class="text-sm text-primary-400 hover:text-primary-300"
                    >
                        {move || if is_login.get() {
                            "Don’t have an account? Register"
                        } else {
                            "Already have an account? Login"
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}
