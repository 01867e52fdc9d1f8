use std::rc::Rc;

use log::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;

mod attribution;
mod config;
mod error;
mod funnel;
mod lead;
mod payload;
mod pixel;
mod submission;
#[cfg(test)]
mod test_log;
mod pages {
    pub mod lead_capture;
    pub mod video;
}
mod components {
    pub mod chat_simulator;
    pub mod external_script;
    pub mod footer;
}

use pages::{lead_capture::LeadCapturePage, video::VideoPage};
use pixel::MetaPixel;
use submission::FunnelServices;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/story")]
    Story,
    #[at("/v/:slug")]
    Variant { slug: String },
    #[at("/video")]
    Video,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route, services: FunnelServices) -> Html {
    match route {
        Route::Home => {
            info!("Rendering whitelabel funnel");
            html! { <LeadCapturePage variant={&config::WHITELABEL} {services} /> }
        }
        Route::Story => {
            info!("Rendering real story funnel");
            html! { <LeadCapturePage variant={&config::REAL_STORY} {services} /> }
        }
        Route::Variant { slug } => match config::variant_by_slug(&slug) {
            Some(variant) => {
                info!("Rendering {} funnel", variant.slug);
                html! { <LeadCapturePage {variant} {services} /> }
            }
            None => html! { <Redirect<Route> to={Route::Home} /> },
        },
        Route::Video => {
            info!("Rendering Video page");
            html! { <VideoPage variant={&config::WHITELABEL} {services} /> }
        }
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    services: FunnelServices,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    let render = {
        let services = props.services.clone();
        Callback::from(move |route: Route| switch(route, services.clone()))
    };

    html! {
        <BrowserRouter>
            <Switch<Route> {render} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting funnel");

    // The same pixel instance stamps its id on every submitted lead.
    let pixel = Rc::new(MetaPixel::default());
    if let Err(e) = pixel.init() {
        warn!("Meta pixel not initialized: {}", e);
    }

    yew::Renderer::<App>::with_props(AppProps {
        services: FunnelServices::browser(pixel),
    })
    .render();
}
