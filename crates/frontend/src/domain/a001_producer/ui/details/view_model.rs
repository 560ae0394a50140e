use contracts::domain::a001_producer::aggregate::{ProducerDto, ProducerPatch};
use contracts::shared::location::{reference_data, LocationCodes};
use contracts::system::auth::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_producer::repository::ProducerRepository;
use crate::shared::http::ApiClient;

/// ViewModel for Producer details form
#[derive(Clone, Copy)]
pub struct ProducerDetailsViewModel {
    pub form: RwSignal<ProducerDto>,
    pub error: RwSignal<Option<String>>,
    /// False until an existing record has been fetched
    pub loaded: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    repo: ProducerRepository,
    session: Signal<Option<Session>>,
}

impl ProducerDetailsViewModel {
    pub fn new(repo: ProducerRepository, session: Signal<Option<Session>>) -> Self {
        Self {
            form: RwSignal::new(ProducerDto::default()),
            error: RwSignal::new(None),
            loaded: RwSignal::new(false),
            saving: RwSignal::new(false),
            repo,
            session,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(self.session.get_untracked())
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.is_edit())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    pub fn apply(&self, patch: ProducerPatch) {
        self.form.update(|f| f.apply(patch));
    }

    pub fn set_address_codes(&self, codes: LocationCodes) {
        self.form.update(|f| f.address.codes = codes);
    }

    /// Saved codes that no longer line up with the reference tables.
    /// They are still shown as saved; the user decides whether to re-select.
    pub fn address_warning(&self) -> Option<String> {
        let codes = self.form.with(|f| f.address.codes.clone());
        if codes.is_empty() || codes.is_consistent(reference_data()) {
            return None;
        }
        Some("The saved address does not match the location list. Please re-select it.".to_string())
    }

    /// Load form data from server if ID is provided
    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            self.loaded.set(true);
            return;
        };

        let vm = *self;
        let client = self.client();
        spawn_local(async move {
            match vm.repo.get(&client, &existing_id).await {
                Ok(producer) => {
                    vm.form.set(producer.to_dto());
                    vm.loaded.set(true);
                }
                Err(e) => vm.error.set(Some(format!("Failed to load producer: {}", e))),
            }
        });
    }

    /// Save form data to server
    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();

        if let Err(e) = current.validate() {
            self.error.set(Some(e));
            return;
        }

        let vm = *self;
        let client = self.client();
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = vm.repo.save(&client, &current).await;
            vm.saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("Producer {} saved", saved.id.as_string());
                    on_saved.run(());
                }
                Err(e) => vm.error.set(Some(e)),
            }
        });
    }
}
