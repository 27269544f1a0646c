use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message() -> &'static str {
        "Something went wrong. Please try again."
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Log a service failure and collapse it to the generic view error.
pub fn view_error<E: std::fmt::Display>(action: &'static str) -> impl FnOnce(E) -> ViewError {
    move |err| {
        tracing::warn!(action, error = %err, "request failed");
        ViewError::Unknown
    }
}

#[component]
pub fn ErrorNotice(on_retry: Callback<()>) -> Element {
    let message = ViewError::message();
    rsx! {
        div { class: "error-notice", role: "alert",
            p { "{message}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}
