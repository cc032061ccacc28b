//! Labelled inputs bound to a form field. Each shows its validation message
//! underneath and validates on blur.

use shared::Choice;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::Binding;

/// Options for a closed enum, wire value first.
pub fn choice_options<C: Choice>() -> Vec<(String, String)> {
    C::all()
        .iter()
        .map(|c| (c.wire().to_string(), c.text().to_string()))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct FieldProps {
    pub label: AttrValue,
    pub bind: Binding,
    #[prop_or(AttrValue::from("text"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

fn field_shell(label: &AttrValue, bind: &Binding, required: bool, input: Html) -> Html {
    html! {
        <div class={classes!("form-group", bind.error.is_some().then_some("has-error"))}>
            <label for={bind.name}>
                {label.clone()}
                { if required { html! { <span class="required">{" *"}</span> } } else { html! {} } }
            </label>
            { input }
            { match &bind.error {
                Some(message) => html! { <div class="field-error">{message}</div> },
                None => html! {},
            } }
        </div>
    }
}

#[function_component(TextField)]
pub fn text_field(props: &FieldProps) -> Html {
    let bind = &props.bind;
    let oninput = {
        let on_input = bind.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let onblur = {
        let on_blur = bind.on_blur.clone();
        Callback::from(move |_: FocusEvent| on_blur.emit(()))
    };

    let input = html! {
        <input
            id={bind.name}
            name={bind.name}
            type={props.kind.clone()}
            class="form-input"
            placeholder={props.placeholder.clone()}
            value={bind.value.clone()}
            {oninput}
            {onblur}
            disabled={bind.disabled || props.disabled}
        />
    };
    field_shell(&props.label, bind, props.required, input)
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &FieldProps) -> Html {
    let bind = &props.bind;
    let oninput = {
        let on_input = bind.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let onblur = {
        let on_blur = bind.on_blur.clone();
        Callback::from(move |_: FocusEvent| on_blur.emit(()))
    };

    let input = html! {
        <textarea
            id={bind.name}
            name={bind.name}
            class="form-input"
            rows="3"
            placeholder={props.placeholder.clone()}
            value={bind.value.clone()}
            {oninput}
            {onblur}
            disabled={bind.disabled || props.disabled}
        />
    };
    field_shell(&props.label, bind, props.required, input)
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub bind: Binding,
    pub options: Vec<(String, String)>,
    /// Label of the empty option.
    #[prop_or(AttrValue::from("Select..."))]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let bind = &props.bind;
    let onchange = {
        let on_input = bind.on_input.clone();
        let on_blur = bind.on_blur.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_input.emit(select.value());
            on_blur.emit(());
        })
    };

    let input = html! {
        <select
            id={bind.name}
            name={bind.name}
            class="form-input"
            {onchange}
            disabled={bind.disabled || props.disabled}
        >
            <option value="" selected={bind.value.is_empty()}>{props.placeholder.clone()}</option>
            { for props.options.iter().map(|(value, label)| html! {
                <option value={value.clone()} selected={*value == bind.value}>{label}</option>
            }) }
        </select>
    };
    field_shell(&props.label, bind, props.required, input)
}

#[derive(Properties, PartialEq)]
pub struct CheckboxFieldProps {
    pub label: AttrValue,
    pub bind: Binding,
}

#[function_component(CheckboxField)]
pub fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let bind = &props.bind;
    let onchange = {
        let on_input = bind.on_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.checked().to_string());
        })
    };

    html! {
        <div class="form-group form-check">
            <label>
                <input
                    type="checkbox"
                    name={bind.name}
                    checked={bind.value == "true"}
                    {onchange}
                    disabled={bind.disabled}
                />
                {" "}{props.label.clone()}
            </label>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormActionsProps {
    pub submitting: bool,
    pub submit_label: AttrValue,
    pub on_cancel: Callback<()>,
    /// Server message for the whole form.
    #[prop_or_default]
    pub message: Option<String>,
}

/// Submit and cancel buttons, with the last server message above them.
#[function_component(FormActions)]
pub fn form_actions(props: &FormActionsProps) -> Html {
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <>
            { match &props.message {
                Some(message) => html! { <div class="form-error">{message}</div> },
                None => html! {},
            } }
            <div class="form-buttons">
                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    { if props.submitting { "Saving...".into() } else { props.submit_label.clone() } }
                </button>
                <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.submitting}>
                    {"Cancel"}
                </button>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::LoanStatus;

    #[test]
    fn test_choice_options_use_wire_values() {
        let options = choice_options::<LoanStatus>();
        assert_eq!(options.len(), LoanStatus::ALL.len());
        assert_eq!(options[0], ("pending".to_string(), "Pending".to_string()));
        assert!(options.contains(&("written_off".to_string(), "Written Off".to_string())));
    }
}
