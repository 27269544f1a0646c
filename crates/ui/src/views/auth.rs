use dioxus::prelude::*;
use quiz_core::model::User;
use services::SignUpOutcome;

use crate::context::AppContext;
use crate::vm::{AuthFormVm, AuthMode, AuthStep, AuthSubmission};

#[component]
pub fn AuthView(on_signed_in: Callback<User>, on_cancel: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(AuthFormVm::new);

    let submit = {
        let auth = ctx.auth();
        use_callback(move |()| {
            let Some(submission) = form.write().submit() else {
                return;
            };
            let auth = auth.clone();
            spawn(async move {
                let mut form = form;
                match submission {
                    AuthSubmission::SignIn { email, password } => {
                        match auth.sign_in(&email, &password).await {
                            Ok(session) => {
                                form.write().finish_sign_in();
                                on_signed_in.call(session.user);
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "sign-in failed");
                                form.write().fail(&err);
                            }
                        }
                    }
                    AuthSubmission::SignUp(sign_up) => match auth.sign_up(&sign_up).await {
                        Ok(outcome) => {
                            let step = form.write().finish_sign_up(&outcome);
                            if let (AuthStep::SignedIn, SignUpOutcome::SignedIn(session)) =
                                (step, outcome)
                            {
                                on_signed_in.call(session.user);
                            }
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "sign-up failed");
                            form.write().fail(&err);
                        }
                    },
                }
            });
        })
    };

    let vm = form.read().clone();
    let mode = vm.mode();
    let busy = vm.busy();
    let submit_label = if busy { "Please wait..." } else { mode.title() };

    rsx! {
        section { class: "auth",
            h2 { "{mode.title()}" }
            if let Some(notice) = vm.notice() {
                p { class: "auth-notice", "{notice}" }
            }
            if let Some(error) = vm.error() {
                p { class: "auth-error", role: "alert", "{error}" }
            }
            label { class: "field",
                span { "Email" }
                input {
                    r#type: "email",
                    value: "{vm.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
            }
            label { class: "field",
                span { "Password" }
                input {
                    r#type: "password",
                    value: "{vm.password}",
                    oninput: move |evt| form.write().password = evt.value(),
                }
            }
            if mode == AuthMode::Register {
                label { class: "field",
                    span { "Confirm password" }
                    input {
                        r#type: "password",
                        value: "{vm.confirm_password}",
                        oninput: move |evt| form.write().confirm_password = evt.value(),
                    }
                }
            }
            div { class: "auth-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| submit.call(()),
                    "{submit_label}"
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| form.write().toggle_mode(),
                    "{mode.switch_prompt()}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
