use yew::prelude::*;

#[function_component(FlagIcon)]
pub(crate) fn flag_icon() -> Html {
    html! {
        <svg class="icon" viewBox="0 0 24 24" fill="currentColor">
            <path d="M6 3a1 1 0 0 1 2 0v1l9 3-9 4v10H6V3z"/>
        </svg>
    }
}

#[function_component(ClockIcon)]
pub(crate) fn clock_icon() -> Html {
    html! {
        <svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <circle cx="12" cy="12" r="9"/>
            <path d="M12 7v5l3 3"/>
        </svg>
    }
}

#[function_component(CircleIcon)]
pub(crate) fn circle_icon() -> Html {
    html! {
        <svg class="icon" viewBox="0 0 24 24" fill="currentColor">
            <circle cx="12" cy="12" r="7"/>
        </svg>
    }
}

#[function_component(XMarkIcon)]
pub(crate) fn x_mark_icon() -> Html {
    html! {
        <svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="3">
            <path d="M5 5l14 14M19 5L5 19"/>
        </svg>
    }
}
