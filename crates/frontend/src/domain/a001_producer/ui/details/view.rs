use super::view_model::ProducerDetailsViewModel;
use crate::domain::a001_producer::repository::use_producer_repository;
use crate::shared::components::AddressSelector;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a001_producer::aggregate::{ProducerDetailField, ProducerPatch};
use contracts::shared::location::{AddressField, LocationCodes};
use leptos::prelude::*;

#[component]
pub fn ProducerDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ProducerDetailsViewModel::new(use_producer_repository(), use_session());
    vm.load_if_needed(id);

    view! {
        <div class="details-container producer-details">
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { "Edit producer" } else { "New producer" }}
                </h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || vm.form.with(|f| f.name.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::Detail(ProducerDetailField::Name, event_target_value(&ev)))
                        placeholder="Registered business name"
                    />
                </div>

                <div class="form-group">
                    <label for="contact_person">{"Contact person"}</label>
                    <input
                        type="text"
                        id="contact_person"
                        prop:value=move || vm.form.with(|f| f.contact_person.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::Detail(ProducerDetailField::ContactPerson, event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        type="email"
                        id="email"
                        prop:value=move || vm.form.with(|f| f.email.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::Detail(ProducerDetailField::Email, event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="phone">{"Mobile number"}</label>
                    <input
                        type="tel"
                        id="phone"
                        prop:value=move || vm.form.with(|f| f.phone.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::Phone(event_target_value(&ev)))
                        placeholder="0917 123 4567"
                        maxlength="16"
                    />
                </div>

                <div class="form-group">
                    <label for="street">{"Street / building"}</label>
                    <input
                        type="text"
                        id="street"
                        prop:value=move || vm.form.with(|f| f.address.street.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::Street(event_target_value(&ev)))
                    />
                </div>

                {move || vm.address_warning().map(|w| view! { <div class="warning">{w}</div> })}

                // Mounted once the record is known so saved codes become the initial selection
                <Show when=move || vm.loaded.get()>
                    <AddressSelector
                        initial=vm.form.with_untracked(|f| f.address.codes.clone())
                        on_address_change=Callback::new(move |(field, value): (AddressField, String)| {
                            vm.apply(ProducerPatch::Address(field, value));
                        })
                        on_codes_change=Callback::new(move |codes: LocationCodes| {
                            vm.set_address_codes(codes);
                        })
                        disabled=Signal::derive(move || vm.saving.get())
                    />
                </Show>

                <div class="form-group">
                    <label for="zip_code">{"ZIP code"}</label>
                    <input
                        type="text"
                        id="zip_code"
                        prop:value=move || vm.form.with(|f| f.address.zip_code.clone())
                        on:input=move |ev| vm.apply(ProducerPatch::ZipCode(event_target_value(&ev)))
                        maxlength="4"
                    />
                </div>

                <div class="form-group">
                    <label for="comment">{"Comment"}</label>
                    <textarea
                        id="comment"
                        prop:value=move || vm.form.with(|f| f.comment.clone().unwrap_or_default())
                        on:input=move |ev| vm.apply(ProducerPatch::Detail(ProducerDetailField::Comment, event_target_value(&ev)))
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || vm.saving.get() || !vm.is_form_valid()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| on_cancel.run(())
                >
                    {icon("cancel")}
                    {"Cancel"}
                </button>
            </div>
        </div>
    }
}
