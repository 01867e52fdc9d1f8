use log::Level;

pub const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
pub const VOOMLY_SCRIPT_URL: &str = "https://embed.voomly.com/embed/embed-build.js";
pub const VOOMLY_VIDEO_ID: &str = "x6-RLg9cnUQPU_JYBfBvNE88VGAUpw5j9hNvSVS8fzrICF8MA";
pub const WHATSAPP_DEMO_DISPLAY: &str = "+31 6 16834455";
pub const WHATSAPP_DEMO_LINK: &str = "https://wa.me/31616834455?text=DEMO";
pub const TERMS_URL: &str = "https://dmchamp.com/terms";
pub const PRIVACY_URL: &str = "https://dmchamp.com/privacy-policy";

/// Cookie set by the Meta pixel script for the browser id.
pub const FBP_COOKIE: &str = "_fbp";
/// Cookie holding a click id from an earlier visit.
pub const FBC_COOKIE: &str = "_fbc";

const DEFAULT_FORM_ENDPOINT: &str = "https://submit-form.com/3lpsJaFF8";
const DEFAULT_PIXEL_ID: &str = "1533692663974167";

pub fn form_endpoint() -> &'static str {
    option_env!("FUNNEL_FORM_ENDPOINT").unwrap_or(DEFAULT_FORM_ENDPOINT)
}

pub fn pixel_id() -> &'static str {
    option_env!("FUNNEL_PIXEL_ID").unwrap_or(DEFAULT_PIXEL_ID)
}

/// A WhatsApp call-to-action on the video page and the `Contact` event it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactCta {
    pub label: &'static str,
    pub content_name: &'static str,
    pub content_category: &'static str,
    pub value: f64,
    pub currency: &'static str,
}

pub const DEMO_CTA: ContactCta = ContactCta {
    label: "📱 KLIK HIER & TEST HET SYSTEEM LIVE",
    content_name: "WhatsApp Demo Request",
    content_category: "Video Page Demo",
    value: 47.00,
    currency: "EUR",
};

pub const FINAL_CTA: ContactCta = ContactCta {
    label: "📱 TEST HET SYSTEEM NU LIVE",
    content_name: "WhatsApp Final Demo Request",
    content_category: "Video Page Final CTA",
    value: 97.00,
    currency: "EUR",
};

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// How the funnel moves on after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Navigate to `/video?name=...`.
    Route,
    /// Swap the lead form for the offer view without leaving the page.
    InPlace,
}

/// Everything that differs between campaign copies of the landing page.
#[derive(Debug, PartialEq)]
pub struct FunnelVariant {
    pub slug: &'static str,
    /// Label stored with every lead so the intake inbox can tell funnels apart.
    pub source_label: &'static str,
    pub pixel_event: &'static str,
    pub content_name: &'static str,
    pub content_category: &'static str,
    pub value: f64,
    pub currency: &'static str,
    pub badge: &'static str,
    pub headline: &'static str,
    pub headline_highlight: &'static str,
    pub subheadline: &'static str,
    pub form_title: &'static str,
    pub bullets: &'static [&'static str],
    pub spots_left: u32,
    pub cta_label: &'static str,
    pub phone_prefix: &'static str,
    pub show_simulator: bool,
    pub advance: AdvanceMode,
}

pub static WHITELABEL: FunnelVariant = FunnelVariant {
    slug: "whitelabel",
    source_label: "WhatsApp AI Whitelabel Partner Funnel",
    pixel_event: "Lead",
    content_name: "WhatsApp AI Whitelabel Partner Application",
    content_category: "Lead Form",
    value: 47.00,
    currency: "EUR",
    badge: "WAARSCHUWING: Deze video gaat binnenkort offline",
    headline: "Het WhatsApp AI Whitelabel Programma Waarmee Je",
    headline_highlight: " Maandelijks €2.000 Tot €5.000+ Kunt Verdienen",
    subheadline: "Door Lokale Bedrijven Te Helpen (Terwijl Jij Alleen Klanten Werft En Wij Al Het Technische Werk Doen!)",
    form_title: "Vul Je Gegevens In Om Direct Toegang Te Krijgen",
    bullets: &[
        "Hoe je €200-€500 per maand per klant verdient met jouw eigen gebrandede WhatsApp AI systeem",
        "Waarom 75% van de bedrijven nog moet beginnen met AI (CBS-rapport)",
        "Hoe je in 3 simpele stappen start zonder technische kennis",
        "Echte voorbeelden van partners die €2.000-€5.000 per maand verdienen",
        "Complete strategie voor kappers, restaurants, coaches, schoonheidssalons en meer",
    ],
    spots_left: 17,
    cta_label: "JA, TOON MIJ HOE IK €2.000-€5.000 PER MAAND KAN VERDIENEN ALS WHITELABEL PARTNER!",
    phone_prefix: "+31",
    show_simulator: false,
    advance: AdvanceMode::Route,
};

pub static REAL_STORY: FunnelVariant = FunnelVariant {
    slug: "real-story",
    source_label: "DM Champ Real Story Funnel",
    pixel_event: "Lead",
    content_name: "DM Champ Partner Application",
    content_category: "Lead Form",
    value: 47.00,
    currency: "EUR",
    badge: "Van Counter-Strike video editor naar €100K software business",
    headline: "Iemand Verdient €2.500/Maand",
    headline_highlight: " Met Mijn Software",
    subheadline: "En ik ga je exact laten zien hoe ze het doen. Maar eerst moet ik je vertellen waarom dit überhaupt bestaat.",
    form_title: "Van Counter-Strike naar €100K Business",
    bullets: &[
        "Hoe één WhatsApp gesprek €40.000+ omzet opleverde",
        "Waarom bedrijven leads verliezen door trage opvolging",
        "Hoe partners €2.500 per maand verdienen met de software",
    ],
    spots_left: 17,
    cta_label: "JA, LAAT MIJ ZIEN HOE HET WERKT!",
    phone_prefix: "+31",
    show_simulator: true,
    advance: AdvanceMode::InPlace,
};

pub fn variant_by_slug(slug: &str) -> Option<&'static FunnelVariant> {
    [&WHITELABEL, &REAL_STORY]
        .into_iter()
        .find(|variant| variant.slug == slug)
}
