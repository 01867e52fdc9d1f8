use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::attribution::{AttributionSnapshot, UtmParams};
use crate::config::FunnelVariant;
use crate::lead::LeadInput;

/// Shared between the browser pixel event and the intake POST so the
/// server-side conversion can be deduplicated against the browser one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn generate() -> Self {
        EventId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub meta_event_id: EventId,
    pub meta_pixel_id: String,
    #[serde(flatten)]
    pub attribution: AttributionSnapshot,
    pub submitted_at: String,
}

impl SubmissionPayload {
    pub fn build(
        variant: &FunnelVariant,
        input: &LeadInput,
        attribution: &AttributionSnapshot,
        event_id: EventId,
        pixel_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let input = input.normalized();
        SubmissionPayload {
            name: input.name,
            email: input.email,
            phone: input.phone,
            source: variant.source_label.to_string(),
            meta_event_id: event_id,
            meta_pixel_id: pixel_id.to_string(),
            attribution: attribution.clone(),
            submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Parameters for `fbq('track', ...)`. Attribution fields are only present on
/// the Lead event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelParams {
    pub content_name: String,
    pub content_category: String,
    pub value: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(flatten)]
    pub client: Option<PixelClientData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<UtmParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelClientData {
    pub fbc: String,
    pub fbp: String,
    pub client_ip_address: String,
    pub client_user_agent: String,
    pub page_url: String,
    pub page_referrer: String,
}

impl PixelParams {
    pub fn lead(variant: &FunnelVariant, attribution: &AttributionSnapshot, event_id: &EventId) -> Self {
        PixelParams {
            content_name: variant.content_name.to_string(),
            content_category: variant.content_category.to_string(),
            value: variant.value,
            currency: variant.currency.to_string(),
            external_id: Some(event_id.as_str().to_string()),
            client: Some(PixelClientData {
                fbc: attribution.fbc.clone(),
                fbp: attribution.fbp.clone(),
                client_ip_address: attribution.client_ip_address.clone(),
                client_user_agent: attribution.client_user_agent.clone(),
                page_url: attribution.page_url.clone(),
                page_referrer: attribution.page_referrer.clone(),
            }),
            custom_data: Some(attribution.utm.clone()),
        }
    }

    pub fn contact(content_name: &str, content_category: &str, value: f64, currency: &str) -> Self {
        PixelParams {
            content_name: content_name.to_string(),
            content_category: content_category.to_string(),
            value,
            currency: currency.to_string(),
            external_id: None,
            client: None,
            custom_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEMO_CTA, FINAL_CTA, WHITELABEL};
    use chrono::TimeZone;

    fn attribution() -> AttributionSnapshot {
        AttributionSnapshot {
            utm: UtmParams {
                utm_source: "ads".into(),
                utm_campaign: "x".into(),
                ..UtmParams::default()
            },
            fbc: "fb.1.1718000000.abc123".into(),
            fbp: "fb.1.99.77".into(),
            page_title: "DM Champ".into(),
            ..AttributionSnapshot::default()
        }
    }

    #[test]
    fn payload_merges_lead_and_attribution() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 8, 30, 0).unwrap();
        let payload = SubmissionPayload::build(
            &WHITELABEL,
            &LeadInput::new(" Jan ", "jan@example.com", "+31 6 12345678"),
            &attribution(),
            EventId("evt-1".into()),
            "1533692663974167",
            now,
        );
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["name"], "Jan");
        assert_eq!(json["phone"], "+31612345678");
        assert_eq!(json["source"], "WhatsApp AI Whitelabel Partner Funnel");
        assert_eq!(json["meta_event_id"], "evt-1");
        assert_eq!(json["meta_pixel_id"], "1533692663974167");
        assert_eq!(json["utm_source"], "ads");
        assert_eq!(json["utm_medium"], "");
        assert_eq!(json["fbc"], "fb.1.1718000000.abc123");
        assert_eq!(json["page_title"], "DM Champ");
        assert_eq!(json["submitted_at"], "2024-06-10T08:30:00.000Z");
    }

    #[test]
    fn lead_pixel_nests_utm_under_custom_data() {
        let event_id = EventId::generate();
        let json = serde_json::to_value(PixelParams::lead(&WHITELABEL, &attribution(), &event_id)).unwrap();

        assert_eq!(json["external_id"], event_id.as_str());
        assert_eq!(json["fbp"], "fb.1.99.77");
        assert_eq!(json["value"], 47.0);
        assert_eq!(json["custom_data"]["utm_campaign"], "x");
        assert!(json.get("utm_campaign").is_none());
    }

    #[test]
    fn contact_pixel_has_no_attribution() {
        let cta = DEMO_CTA;
        let json = serde_json::to_value(PixelParams::contact(
            cta.content_name,
            cta.content_category,
            cta.value,
            cta.currency,
        ))
        .unwrap();
        assert_eq!(json["content_name"], "WhatsApp Demo Request");
        assert_eq!(json["content_category"], "Video Page Demo");
        assert_eq!(json["value"], 47.0);
        assert!(json.get("custom_data").is_none());
        assert!(json.get("fbc").is_none());
        assert!(json.get("external_id").is_none());
    }

    #[test]
    fn final_cta_reports_its_own_contact_params() {
        let cta = FINAL_CTA;
        let json = serde_json::to_value(PixelParams::contact(
            cta.content_name,
            cta.content_category,
            cta.value,
            cta.currency,
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content_name": "WhatsApp Final Demo Request",
                "content_category": "Video Page Final CTA",
                "value": 97.0,
                "currency": "EUR",
            })
        );
    }

    #[test]
    fn generated_event_ids_are_unique() {
        assert_ne!(EventId::generate(), EventId::generate());
        assert!(!EventId::generate().as_str().is_empty());
    }
}
