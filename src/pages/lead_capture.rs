use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::attribution::AttributionSnapshot;
use crate::components::chat_simulator::ChatSimulator;
use crate::components::footer::Footer;
use crate::config::{AdvanceMode, FunnelVariant};
use crate::funnel::{FunnelStep, VideoQuery};
use crate::lead::{can_submit, LeadInput};
use crate::pages::video::VideoPage;
use crate::submission::{submit_lead, FunnelServices};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LeadCaptureProps {
    pub variant: &'static FunnelVariant,
    pub services: FunnelServices,
}

fn text_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[function_component]
pub fn LeadCapturePage(props: &LeadCaptureProps) -> Html {
    let variant = props.variant;
    let navigator = use_navigator();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(|| variant.phone_prefix.to_string());
    let is_submitting = use_state(|| false);
    let attribution = use_state(AttributionSnapshot::default);
    let step = use_state(FunnelStep::default);

    // Attribution is gathered once per page view, before the visitor types.
    {
        let attribution = attribution.clone();
        let provider = props.services.attribution.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    attribution.set(provider.collect().await);
                });
                || ()
            },
            (),
        );
    }

    let input = LeadInput::new((*name).clone(), (*email).clone(), (*phone).clone());
    let submit_enabled = can_submit(&input, *is_submitting);

    let onsubmit = {
        let services = props.services.clone();
        let attribution = attribution.clone();
        let is_submitting = is_submitting.clone();
        let step = step.clone();
        let input = input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !can_submit(&input, *is_submitting) {
                return;
            }
            is_submitting.set(true);

            let services = services.clone();
            let snapshot = (*attribution).clone();
            let is_submitting = is_submitting.clone();
            let step = step.clone();
            let navigator = navigator.clone();
            let input = input.clone();
            spawn_local(async move {
                let result = submit_lead(
                    variant,
                    &input,
                    &snapshot,
                    services.pixel.as_ref(),
                    services.sink.as_ref(),
                    Utc::now(),
                )
                .await;
                is_submitting.set(false);

                let outcome = match result {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        log::warn!("Lead not submitted: {}", e);
                        return;
                    }
                };
                log::info!("Advancing {} funnel to step {}", variant.slug, outcome.next_step().number());
                match variant.advance {
                    AdvanceMode::InPlace => step.set(outcome.next_step()),
                    AdvanceMode::Route => {
                        let query = VideoQuery {
                            name: input.normalized().name,
                        };
                        match navigator {
                            Some(navigator) => {
                                if let Err(e) = navigator.push_with_query(&Route::Video, &query) {
                                    log::error!("Navigation to video page failed: {}", e);
                                }
                            }
                            None => log::error!("No router available to leave the lead form"),
                        }
                    }
                }
            });
        })
    };

    if *step == FunnelStep::Offer {
        return html! {
            <VideoPage
                variant={variant}
                services={props.services.clone()}
                name={Some(input.normalized().name)}
            />
        };
    }

    html! {
        <div class="funnel-page">
            <div class="funnel-container">
                <div class="hero">
                    <div class="hero-badge">
                        <span class="pulse-dot"></span>
                        <span>{variant.badge}</span>
                    </div>
                    <h1>
                        {variant.headline}
                        <span class="gradient-text">{variant.headline_highlight}</span>
                    </h1>
                    <p class="hero-subheadline">{variant.subheadline}</p>
                </div>

                if variant.show_simulator {
                    <ChatSimulator />
                }

                <div class="funnel-grid">
                    <div class="funnel-pitch">
                        <h3>{"In deze korte video zie je:"}</h3>
                        <ul class="pitch-list">
                            { variant.bullets.iter().map(|&bullet| html! {
                                <li>{bullet}</li>
                            }).collect::<Html>() }
                        </ul>
                        <div class="scarcity">
                            <h3>{"⚠️ WAARSCHUWING"}</h3>
                            <p>
                                {"Deze exclusieve kans is beperkt tot slechts "}
                                <strong>{format!("{} partners", variant.spots_left)}</strong>
                                {" om concurrentie te voorkomen."}
                            </p>
                        </div>
                    </div>

                    <div class="lead-card">
                        <h2>{variant.form_title}</h2>
                        <div class="spots-left">{format!("BEPERKT TOT {} PARTNERS", variant.spots_left)}</div>
                        <img src="/thumbnew.avif" alt="Preview" class="lead-thumbnail" />

                        <form class="lead-form" onsubmit={onsubmit}>
                            <input
                                type="text"
                                placeholder="Voornaam..."
                                autocomplete="given-name"
                                required=true
                                value={(*name).clone()}
                                oninput={text_input(&name)}
                            />
                            <input
                                type="email"
                                placeholder="Emailadres..."
                                autocomplete="email"
                                required=true
                                value={(*email).clone()}
                                oninput={text_input(&email)}
                            />
                            <input
                                type="tel"
                                placeholder="WhatsApp Nummer..."
                                autocomplete="tel"
                                required=true
                                value={(*phone).clone()}
                                oninput={text_input(&phone)}
                            />
                            <button type="submit" class="lead-submit" disabled={!submit_enabled}>
                                {
                                    if *is_submitting {
                                        html! { <><span class="loading-spinner"></span>{" Even geduld..."}</> }
                                    } else {
                                        html! { <>{variant.cta_label}</> }
                                    }
                                }
                            </button>
                        </form>
                        <div class="lead-assurance">{"Geen spam • Eerlijk verhaal • Echte cijfers"}</div>
                    </div>
                </div>
            </div>
            <Footer />
        </div>
    }
}
