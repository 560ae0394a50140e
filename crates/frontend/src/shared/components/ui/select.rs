use leptos::prelude::*;

/// One `<option>` of a [`Select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Whether `value` is empty or one of `options`.
/// A stale value (e.g. a code missing from the list) renders as the placeholder.
pub fn is_known_value(options: &[SelectOption], value: &str) -> bool {
    value.is_empty() || options.iter().any(|o| o.value == value)
}

/// Labelled dropdown. An empty value selects the placeholder row.
#[component]
pub fn Select(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Text of the leading empty option
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    #[prop(into)]
    options: Signal<Vec<SelectOption>>,
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();
    let shown_value = move || {
        let current = value.get();
        if options.with(|o| is_known_value(o, &current)) {
            current
        } else {
            String::new()
        }
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class="form__select"
                disabled=move || disabled.get()
                prop:value=shown_value
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <option value="" selected=move || shown_value().is_empty()>
                    {move || placeholder.get().unwrap_or_default()}
                </option>
                <For
                    each=move || options.get()
                    key=|option| option.value.clone()
                    children=move |option| {
                        let SelectOption { value: val, label } = option;
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let options = vec![SelectOption::new("01", "Ilocos"), SelectOption::new("02", "Cagayan Valley")];
        assert!(is_known_value(&options, ""));
        assert!(is_known_value(&options, "02"));
        assert!(!is_known_value(&options, "13"));
        assert!(!is_known_value(&[], "01"));
    }
}
