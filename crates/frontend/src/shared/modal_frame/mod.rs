use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn targets_overlay(ev: &ev::MouseEvent) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

/// Overlay with a centered modal surface.
///
/// The surface has no header of its own; each modal renders its title and actions.
#[component]
pub fn ModalFrame(
    /// Overlay click (press and release both on the overlay)
    on_close: Callback<()>,
    #[prop(optional)] z_index: Option<i32>,
    /// Extra class for `div.modal`
    #[prop(optional)]
    modal_class: Option<String>,
    /// Extra style for `div.modal`
    #[prop(optional)]
    modal_style: Option<String>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    // Выделение текста внутри окна с отпусканием кнопки на оверлее не закрывает окно
    let pressed_on_overlay = RwSignal::new(false);

    let on_mouse_down = move |ev: ev::MouseEvent| pressed_on_overlay.set(targets_overlay(&ev));

    let on_click = move |ev: ev::MouseEvent| {
        let should_close = pressed_on_overlay.get_untracked() && targets_overlay(&ev);
        pressed_on_overlay.set(false);
        if should_close {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let class = match modal_class.filter(|c| !c.is_empty()) {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };
    let style = match modal_style.filter(|s| !s.is_empty()) {
        Some(extra) => format!("position: relative; {extra}"),
        None => "position: relative;".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("display: flex; z-index: {z_index};")
            on:mousedown=on_mouse_down
            on:click=on_click
        >
            <div class=class style=style on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
