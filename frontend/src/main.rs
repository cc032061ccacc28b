use anyhow::{Context, Result};
use collections_client::{ApiClient, ClientConfig, Services, Session};
use std::rc::Rc;
use yew::prelude::*;

mod app;
mod components;
mod hooks;
mod pages;
mod services;

use app::{App, AppProps, Runtime};
use services::api::GlooTransport;
use services::logging::{self, Logger};
use services::session_store::LocalStorageStore;

fn bootstrap() -> Result<Runtime> {
    let config = ClientConfig::from_build_env().context("invalid build configuration")?;
    logging::init(&config.log_level)?;
    tracing::info!(api = %config.api_base_url, page_size = config.page_size, "Starting collections admin");

    let store = Rc::new(LocalStorageStore::new(config.storage_key.clone()));
    let session = Session::init(store);
    let client = ApiClient::new(config, Rc::new(GlooTransport), session);
    let services = Services::new(&client);
    Ok(Runtime { client, services })
}

#[derive(Properties, PartialEq)]
struct StartupErrorProps {
    message: AttrValue,
}

#[function_component(StartupError)]
fn startup_error(props: &StartupErrorProps) -> Html {
    html! {
        <div class="startup-error">
            <h1>{"The application could not start"}</h1>
            <p>{props.message.clone()}</p>
        </div>
    }
}

fn main() {
    match bootstrap() {
        Ok(runtime) => {
            yew::Renderer::<App>::with_props(AppProps { runtime }).render();
        }
        Err(e) => {
            let message = format!("{e:#}");
            Logger::error_with_component("main", &message);
            gloo::console::error!(message.clone());
            yew::Renderer::<StartupError>::with_props(StartupErrorProps {
                message: message.into(),
            })
            .render();
        }
    }
}
