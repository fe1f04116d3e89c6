use crate::icons::{ClockIcon, FlagIcon, XMarkIcon};
use crate::utils::format_for_counter;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

#[derive(Properties, PartialEq)]
pub(crate) struct ResultModalProps {
    pub won: bool,
    /// Flags that sit on mines.
    pub mines_flagged: u32,
    /// Mines the player never flagged.
    pub mines_missed: u32,
    pub play_secs: u32,
    pub on_play_again: Callback<MouseEvent>,
}

/// End-of-game summary: cleared mines, missed mines, play time, and a
/// "Play again" button.
#[function_component]
pub(crate) fn ResultModal(props: &ResultModalProps) -> Html {
    let result_text = if props.won { "You win!" } else { "You lose!" };

    html! {
        <Modal>
            <dialog class="result" open={true}>
                <div class="info">
                    <div class="info-wrap">
                        <span class="icon-slot"><XMarkIcon/></span>
                        <span class="number">{props.mines_flagged}</span>
                    </div>
                    <div class="info-wrap">
                        <span class="icon-slot"><FlagIcon/></span>
                        <span class="number">{props.mines_missed}</span>
                    </div>
                    <div class="info-wrap">
                        <span class="icon-slot"><ClockIcon/></span>
                        <span class="number">{format_for_counter(props.play_secs)}</span>
                    </div>
                </div>
                <p class="verdict">{result_text}</p>
                <button class="btn" onclick={props.on_play_again.clone()}>{"Play again"}</button>
            </dialog>
        </Modal>
    }
}
