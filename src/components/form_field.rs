// ============================================================================
// FORM FIELDS - Inputs controlados con mensaje de error bajo el campo
// ============================================================================

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::ApiError;
use crate::utils::FieldErrors;

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

/// Errores por campo de un ApiError (422 o validación local)
pub fn errors_of(error: &ApiError) -> FieldErrors {
    error.field_errors().cloned().unwrap_or_default()
}

/// Campo opcional: vacío se envía como null
pub fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

pub fn field_error(errors: &FieldErrors, field: &str) -> Option<AttrValue> {
    errors.get(field).map(|message| AttrValue::from(message.to_string()))
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| on_change.emit(input_value(&e)))
    };
    let class = if props.error.is_some() { "form-group has-error" } else { "form-group" };

    html! {
        <div class={class}>
            <label for={props.name.clone()}>{props.label.clone()}</label>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
            />
            if let Some(error) = &props.error {
                <span class="field-error">{error.clone()}</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaFieldProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            on_change.emit(e.target_unchecked_into::<HtmlTextAreaElement>().value())
        })
    };

    html! {
        <div class={if props.error.is_some() { "form-group has-error" } else { "form-group" }}>
            <label for={props.name.clone()}>{props.label.clone()}</label>
            <textarea id={props.name.clone()} name={props.name.clone()} rows="3" value={props.value.clone()} {oninput} />
            if let Some(error) = &props.error {
                <span class="field-error">{error.clone()}</span>
            }
        </div>
    }
}

/// Select con opciones `(valor, etiqueta)`; el valor vacío es "sin selección"
#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    pub options: Vec<(String, String)>,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            on_change.emit(e.target_unchecked_into::<HtmlSelectElement>().value())
        })
    };

    html! {
        <div class={if props.error.is_some() { "form-group has-error" } else { "form-group" }}>
            <label for={props.name.clone()}>{props.label.clone()}</label>
            <select id={props.name.clone()} name={props.name.clone()} {onchange}>
                if let Some(placeholder) = &props.placeholder {
                    <option value="" selected={props.value.is_empty()}>{placeholder.clone()}</option>
                }
                { for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == *props.value}>{label.clone()}</option>
                }) }
            </select>
            if let Some(error) = &props.error {
                <span class="field-error">{error.clone()}</span>
            }
        </div>
    }
}
