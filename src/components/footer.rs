use chrono::Datelike;
use yew::prelude::*;

use crate::config;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Utc::now().year();

    html! {
        <footer class="funnel-footer">
            <div class="footer-top">
                <img src="/DM_Champ_Logo_Black.png" alt="DM Champ Logo" class="footer-logo" />
                <div class="footer-links">
                    <a href={config::TERMS_URL} target="_blank" rel="noopener noreferrer">{"Terms of Service"}</a>
                    <a href={config::PRIVACY_URL} target="_blank" rel="noopener noreferrer">{"Privacy Policy"}</a>
                </div>
            </div>
            <div class="footer-legal">
                <p>{format!("© {} DM Champ. Alle rechten voorbehouden.", year)}</p>
                <p>{"DM Champ is een eigen tool van OneGlimpse B.V."}</p>
                <p>{"Ongeoorloofd delen of kopiëren is ten strengste verboden."}</p>
                <p>{"Deze site heeft geen banden met Google LLC of Meta LLC."}</p>
                <p class="footer-warning">
                    <strong>{"LET OP: "}</strong>
                    {"Resultaten kunnen verschillen. Het succes hangt af van verschillende factoren zoals je branche, doelgroep, en hoe je de verstrekte informatie toepast."}
                </p>
            </div>
        </footer>
    }
}
