//! Submit handler: pixel event plus one POST to the form intake.
//!
//! Delivery is best effort. Neither the pixel nor the POST result decides
//! whether the visitor moves on; both are only logged.

use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gloo_net::http::Request;

use crate::attribution::{AttributionProvider, AttributionSnapshot, BrowserAttribution};
use crate::config::{self, FunnelVariant};
use crate::error::FunnelError;
use crate::funnel::FunnelStep;
use crate::lead::LeadInput;
use crate::payload::{EventId, PixelParams, SubmissionPayload};
use crate::pixel::{ConversionPixel, MetaPixel};

#[async_trait(?Send)]
pub trait LeadSink {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), FunnelError>;
}

/// Posts leads as JSON to the external form-intake endpoint.
pub struct FormIntake {
    endpoint: String,
}

impl FormIntake {
    pub fn new(endpoint: impl Into<String>) -> Self {
        FormIntake {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for FormIntake {
    fn default() -> Self {
        FormIntake::new(config::form_endpoint())
    }
}

#[async_trait(?Send)]
impl LeadSink for FormIntake {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), FunnelError> {
        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(payload)?
            .send()
            .await?;

        if response.ok() {
            Ok(())
        } else {
            Err(FunnelError::Rejected {
                status: response.status(),
            })
        }
    }
}

/// Result of one submit attempt.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub event_id: EventId,
    pub pixel: Result<(), FunnelError>,
    pub delivery: Result<(), FunnelError>,
}

impl SubmitOutcome {
    /// Every attempt moves the visitor on, delivered or not.
    pub fn next_step(&self) -> FunnelStep {
        FunnelStep::LeadCapture.advance()
    }
}

/// Validates, fires the pixel and posts the lead once.
///
/// Only a validation failure returns `Err`, and in that case nothing has been
/// sent anywhere.
pub async fn submit_lead(
    variant: &FunnelVariant,
    input: &LeadInput,
    attribution: &AttributionSnapshot,
    pixel: &dyn ConversionPixel,
    sink: &dyn LeadSink,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, FunnelError> {
    input.validate()?;

    let event_id = EventId::generate();
    let payload = SubmissionPayload::build(variant, input, attribution, event_id.clone(), pixel.pixel_id(), now);

    let pixel_result = pixel.track(
        variant.pixel_event,
        &PixelParams::lead(variant, attribution, &event_id),
        Some(&event_id),
    );
    if let Err(e) = &pixel_result {
        log::warn!("{} pixel event not sent: {}", variant.pixel_event, e);
    }

    let delivery = sink.deliver(&payload).await;
    match &delivery {
        Ok(()) => log::info!("Lead {} delivered for {}", event_id.as_str(), variant.slug),
        Err(e) => log::error!("Form submission error: {}", e),
    }

    Ok(SubmitOutcome {
        event_id,
        pixel: pixel_result,
        delivery,
    })
}

/// Collaborators injected into the lead form.
#[derive(Clone)]
pub struct FunnelServices {
    pub attribution: Rc<dyn AttributionProvider>,
    pub pixel: Rc<dyn ConversionPixel>,
    pub sink: Rc<dyn LeadSink>,
}

impl FunnelServices {
    /// Live collaborators around an already initialised pixel.
    pub fn browser(pixel: Rc<MetaPixel>) -> Self {
        FunnelServices {
            attribution: Rc::new(BrowserAttribution),
            pixel,
            sink: Rc::new(FormIntake::default()),
        }
    }
}

impl PartialEq for FunnelServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.attribution, &other.attribution)
            && Rc::ptr_eq(&self.pixel, &other.pixel)
            && Rc::ptr_eq(&self.sink, &other.sink)
    }
}
