use crate::shared::toast::{provide_toaster, ToastHost};
use crate::system::auth::credentials::provide_credentials;
use crate::usecases::u601_inventory_csv_upload::{storage, InventoryCsvUploadPage};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ConfigProvider};

#[component]
pub fn App() -> impl IntoView {
    // Токен читается один раз при старте
    let credentials = provide_credentials();
    let toaster = provide_toaster();

    let on_logout = move |_| {
        credentials.logout();
        // разобранный файл не должен пережить сессию
        storage::clear_upload();
        toaster.info("Sesión cerrada");
    };

    view! {
        <ConfigProvider>
            <header class="app__header">
                <span class="app__title">"Pharmatech Admin"</span>
                {move || credentials.is_signed_in().then(|| view! {
                    <Button appearance=ButtonAppearance::Subtle on_click=on_logout>
                        "Cerrar sesión"
                    </Button>
                })}
            </header>
            <InventoryCsvUploadPage />
            <ToastHost />
        </ConfigProvider>
    }
}
