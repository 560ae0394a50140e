//! Region → province → city → barangay dropdowns for address forms
//!
//! The embedding form gets every touched field through `on_address_change`
//! and keeps the values in its own payload.

use contracts::shared::location::{
    reference_data, AddressField, AddressSink, LocationCodes, LocationEntry, LocationSelection,
};
use leptos::prelude::*;

use super::ui::{Select, SelectOption};
use crate::shared::icons::icon;

/// One `Select` option per reference row, in table order
fn to_options<'a, T, I>(rows: I) -> Vec<SelectOption>
where
    T: LocationEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    rows.into_iter()
        .map(|row| SelectOption::new(row.code(), row.name()))
        .collect()
}

/// Run the cascade for one dropdown change. The sink has seen every touched
/// field by the time the resulting codes are returned.
pub fn apply_selection<S: AddressSink>(
    selection: &mut LocationSelection<'_, S>,
    field: AddressField,
    code: &str,
) -> LocationCodes {
    log::debug!("Address cascade from {}: {:?}", field, code);
    selection.set(field, code);
    selection.codes().clone()
}

#[component]
pub fn AddressSelector(
    /// Codes of a saved address (edit mode), adopted without emitting
    #[prop(optional)]
    initial: LocationCodes,
    /// Receives `(field, display name)` for each field touched by a cascade
    on_address_change: Callback<(AddressField, String)>,
    /// Receives the selected codes after each cascade
    #[prop(optional)]
    on_codes_change: Option<Callback<LocationCodes>>,
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
) -> impl IntoView {
    let selection = RwSignal::new(LocationSelection::new(
        reference_data(),
        initial,
        move |field: AddressField, value: &str| {
            on_address_change.run((field, value.to_string()));
        },
    ));

    let select = move |field: AddressField, code: String| {
        let Some(codes) = selection.try_update(|s| apply_selection(s, field, &code)) else {
            return;
        };
        if let Some(cb) = on_codes_change {
            cb.run(codes);
        }
    };

    let region_options = Signal::derive(move || selection.with(|s| to_options(s.regions())));
    let province_options = Signal::derive(move || selection.with(|s| to_options(s.provinces())));
    let city_options = Signal::derive(move || selection.with(|s| to_options(s.cities())));
    let barangay_options = Signal::derive(move || selection.with(|s| to_options(s.barangays())));

    view! {
        <fieldset class="address-selector">
            <legend>{icon("map-pin")} " Location"</legend>
            <Select
                label="Region".to_string()
                placeholder="Select region".to_string()
                id="address-region".to_string()
                value=Signal::derive(move || selection.with(|s| s.region().to_string()))
                options=region_options
                on_change=Callback::new(move |code: String| select(AddressField::Region, code))
                disabled=disabled
            />
            <Select
                label="Province".to_string()
                placeholder="Select province".to_string()
                id="address-province".to_string()
                value=Signal::derive(move || selection.with(|s| s.province().to_string()))
                options=province_options
                on_change=Callback::new(move |code: String| select(AddressField::Province, code))
                disabled=Signal::derive(move || disabled.get() || selection.with(|s| s.region().is_empty()))
            />
            <Select
                label="City / Municipality".to_string()
                placeholder="Select city / municipality".to_string()
                id="address-city".to_string()
                value=Signal::derive(move || selection.with(|s| s.city().to_string()))
                options=city_options
                on_change=Callback::new(move |code: String| select(AddressField::City, code))
                disabled=Signal::derive(move || disabled.get() || selection.with(|s| s.province().is_empty()))
            />
            // Stays disabled for cities without listed barangays
            <Select
                label="Barangay".to_string()
                placeholder="Select barangay".to_string()
                id="address-barangay".to_string()
                value=Signal::derive(move || selection.with(|s| s.barangay().to_string()))
                options=barangay_options
                on_change=Callback::new(move |code: String| select(AddressField::Barangay, code))
                disabled=Signal::derive(move || disabled.get() || barangay_options.with(|o| o.is_empty()))
            />
        </fieldset>
    }
}
