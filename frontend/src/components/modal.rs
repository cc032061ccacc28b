use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Dialog over a dimmed backdrop. Clicking the backdrop closes it.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" role="dialog" onclick={on_modal_click}>
                <h3 class="modal-title">{props.title.clone()}</h3>
                <div class="modal-content">
                    { props.children.clone() }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::from("Delete"))]
    pub confirm_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_cancel.clone()}>
            <p>{props.message.clone()}</p>
            <div class="modal-buttons">
                <button type="button" class="btn btn-danger" onclick={on_confirm}>
                    {props.confirm_label.clone()}
                </button>
                <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                    {"Cancel"}
                </button>
            </div>
        </Modal>
    }
}
