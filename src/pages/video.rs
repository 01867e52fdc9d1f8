use std::rc::Rc;

use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::external_script::use_external_script;
use crate::components::footer::Footer;
use crate::config::{self, ContactCta, FunnelVariant};
use crate::payload::PixelParams;
use crate::pixel::ConversionPixel;
use crate::submission::FunnelServices;

const VIDEO_MOMENTS: &[(&str, &str)] = &[
    ("3:14", "Waarom harder werken NIET de oplossing is"),
    ("3:47", "Het €40.000 WhatsApp gesprek (met screenshots)"),
    ("7:15", "Sohaib's verhaal: van €100 op zijn 14e tot €30.000/maand op zijn 17e"),
    ("11:23", "De exacte 3 stappen om het systeem te implementeren"),
    ("13:45", "Voorbeelden uit verschillende branches"),
    ("14:30", "Hoe je het systeem LIVE kunt testen"),
];

const DELAY_COSTS: &[&str] = &["Meer gemiste leads", "Meer overwerk", "Meer stress", "Minder tijd met familie"];

const REFLECTION_QUESTIONS: &[&str] = &[
    "Hoeveel leads mis je nu per week?",
    "Wat kost je dat aan omzet?",
    "Hoeveel avonden werk je nog door?",
    "Wanneer had je voor het laatst écht vrij?",
];

#[derive(Properties, PartialEq)]
pub struct VideoPageProps {
    pub variant: &'static FunnelVariant,
    pub services: FunnelServices,
    /// Set when the page is shown in place of the form; otherwise the name is
    /// read from `?name=`.
    #[prop_or_default]
    pub name: Option<String>,
}

pub fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{}, je video staat klaar!", name),
        None => "Je video staat klaar!".to_string(),
    }
}

/// Fires the `Contact` event for a WhatsApp button. The link opens either way.
fn send_contact(pixel: &dyn ConversionPixel, cta: ContactCta) {
    let params = PixelParams::contact(cta.content_name, cta.content_category, cta.value, cta.currency);
    if let Err(e) = pixel.track("Contact", &params, None) {
        log::warn!("Contact event for {} not sent: {}", cta.content_name, e);
    }
}

fn whatsapp_button(pixel: &Rc<dyn ConversionPixel>, cta: ContactCta) -> Html {
    let onclick = {
        let pixel = pixel.clone();
        Callback::from(move |_: MouseEvent| send_contact(pixel.as_ref(), cta))
    };
    html! {
        <a
            class="demo-button"
            href={config::WHATSAPP_DEMO_LINK}
            target="_blank"
            rel="noopener noreferrer"
            {onclick}
        >
            {cta.label}
        </a>
    }
}

#[function_component]
pub fn VideoPage(props: &VideoPageProps) -> Html {
    let name_param = use_search_param("name".to_string());
    let name = props.name.clone().or(name_param);

    use_external_script(config::VOOMLY_SCRIPT_URL);

    use_effect_with_deps(
        |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    let pixel = &props.services.pixel;

    html! {
        <div class="funnel-page">
            <div class="video-container">
                <div class="video-hero">
                    <p class="video-greeting">{greeting(name.as_deref())}</p>
                    <h1>
                        <span class="accent-red">{"BEWIJS: "}</span>
                        {"Het 'Verboden' WhatsApp Systeem Dat"}
                        <span class="gradient-text">{" FueGenix €3 Miljoen Extra"}</span>
                        {" Opleverde"}
                    </h1>
                    <div class="video-notice">
                        {"⏰ Deze Presentatie Duurt 15 Minuten. Bevat Informatie Die Marketing Bureaus Liever Geheim Houden. Zet Je Telefoon Op Stil."}
                    </div>
                </div>

                <div class="video-card">
                    <div class="video-frame">
                        <div
                            class="voomly-embed"
                            data-id={config::VOOMLY_VIDEO_ID}
                            data-ratio="1.777778"
                            data-type="v"
                            data-skin-color="rgba(37,211,102,1)"
                            data-shadow=""
                        />
                    </div>
                    <h3>{"Wat Je Gaat Ontdekken:"}</h3>
                    <p>{"In deze presentatie laat Sohaib je zien hoe hij FueGenix hielp groeien met €3 miljoen extra omzet, terwijl de eigenaar zijn werkweek halveerde."}</p>
                    <p>{"Geen theorie. Geen hype. Gewoon bewezen resultaten."}</p>
                </div>

                <div class="video-columns">
                    <div class="video-moments">
                        <h3>{"Belangrijke Momenten In De Video:"}</h3>
                        { VIDEO_MOMENTS.iter().map(|&(at, what)| html! {
                            <div class="moment"><strong>{at}</strong>{" - "}{what}</div>
                        }).collect::<Html>() }
                    </div>
                    <div class="video-reflection">
                        <h3>{"Terwijl Je Kijkt, Bedenk:"}</h3>
                        { REFLECTION_QUESTIONS.iter().map(|&q| html! {
                            <div class="reflection">{q}</div>
                        }).collect::<Html>() }
                        <p class="reflection-close">{"Dit systeem lost al deze problemen op. Permanent."}</p>
                    </div>
                </div>

                <div class="demo-cta">
                    <h3>{"👇 Klaar Voor De Volgende Stap? 👇"}</h3>
                    <h4>{"Test Het WhatsApp Systeem LIVE"}</h4>
                    <p>{"Ervaar zelf hoe snel het reageert. Zie hoe het jouw vragen beantwoordt. Ontdek wat het voor jouw business kan betekenen."}</p>
                    <div class="demo-number">
                        <div>{"Stuur \"DEMO\" naar:"}</div>
                        <div class="demo-number-value">{config::WHATSAPP_DEMO_DISPLAY}</div>
                    </div>
                    { whatsapp_button(pixel, config::DEMO_CTA) }
                    <div class="demo-assurances">
                        <span>{"Geen verplichtingen"}</span>
                        <span>{"100% gratis demo"}</span>
                        <span>{"Specifiek voor jouw business"}</span>
                    </div>
                </div>

                <div class="final-cta">
                    <h3>{"⏰ Nu Is Het Moment:"}</h3>
                    <p>{"De EU onderzoekt al of deze systemen \"te veel voordeel\" geven. WhatsApp test AI-detectie features. Marketing bureaus lobbyen tegen deze technologie."}</p>
                    <p class="accent-red">{"Het raam van mogelijkheid wordt kleiner."}</p>
                    <div class="delay-costs">
                        <h4>{"Elke dag uitstel betekent:"}</h4>
                        { DELAY_COSTS.iter().map(|&cost| html! {
                            <div class="delay-cost">{cost}</div>
                        }).collect::<Html>() }
                    </div>
                    <p class="final-cta-close">{"Stop met uitstellen. Start met automatiseren."}</p>
                    <div class="demo-number">
                        <div>{"Test Het Nu - Stuur \"DEMO\" naar:"}</div>
                        <div class="demo-number-value">{config::WHATSAPP_DEMO_DISPLAY}</div>
                    </div>
                    { whatsapp_button(pixel, config::FINAL_CTA) }
                    <p class="final-cta-guarantee">
                        <strong>{"Garantie:"}</strong>
                        {" Als de demo je niet overtuigt, geen probleem. Geen spam, geen verkooppraatjes. Gewoon een eerlijke demonstratie van wat mogelijk is."}
                    </p>
                </div>
            </div>
            <Footer />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FunnelError;
    use crate::payload::EventId;
    use crate::test_log;
    use log::Level;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPixel {
        events: RefCell<Vec<(String, PixelParams)>>,
    }

    impl ConversionPixel for RecordingPixel {
        fn pixel_id(&self) -> &str {
            "900000000000001"
        }

        fn track(&self, event: &str, params: &PixelParams, _: Option<&EventId>) -> Result<(), FunnelError> {
            self.events.borrow_mut().push((event.to_string(), params.clone()));
            Ok(())
        }
    }

    #[test]
    fn greeting_uses_the_name_when_present() {
        assert_eq!(greeting(Some("Jan")), "Jan, je video staat klaar!");
        assert_eq!(greeting(Some("  ")), "Je video staat klaar!");
        assert_eq!(greeting(None), "Je video staat klaar!");
    }

    #[test]
    fn final_cta_fires_its_own_contact_event() {
        let pixel = RecordingPixel::default();

        send_contact(&pixel, config::DEMO_CTA);
        send_contact(&pixel, config::FINAL_CTA);

        let events = pixel.events.borrow();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|(event, _)| event == "Contact"));
        assert_eq!(events[0].1.content_name, "WhatsApp Demo Request");
        assert_eq!(events[1].1.content_name, "WhatsApp Final Demo Request");
        assert_eq!(events[1].1.content_category, "Video Page Final CTA");
        assert_eq!(events[1].1.value, 97.0);
    }

    struct MissingPixel;

    impl ConversionPixel for MissingPixel {
        fn pixel_id(&self) -> &str {
            "900000000000001"
        }

        fn track(&self, _: &str, _: &PixelParams, _: Option<&EventId>) -> Result<(), FunnelError> {
            Err(FunnelError::PixelUnavailable)
        }
    }

    #[test]
    fn unsent_contact_event_is_logged_as_warning() {
        test_log::capture();
        send_contact(&MissingPixel, config::DEMO_CTA);
        assert_eq!(
            test_log::messages_at(Level::Warn),
            vec!["Contact event for WhatsApp Demo Request not sent: meta pixel is not loaded".to_string()]
        );
    }
}
