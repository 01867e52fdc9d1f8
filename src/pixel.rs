use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::config;
use crate::error::FunnelError;
use crate::payload::{EventId, PixelParams};

/// Client-side conversion tracking.
pub trait ConversionPixel {
    /// Id the pixel reports to; also sent with the lead so the server-side
    /// event lands on the same dataset.
    fn pixel_id(&self) -> &str;

    fn track(&self, event: &str, params: &PixelParams, event_id: Option<&EventId>) -> Result<(), FunnelError>;
}

/// Forwards events to the Meta pixel loader in `index.html`. The loader only
/// queues calls; `init` binds it to `pixel_id`.
pub struct MetaPixel {
    pixel_id: String,
}

impl MetaPixel {
    pub fn new(pixel_id: impl Into<String>) -> Self {
        MetaPixel {
            pixel_id: pixel_id.into(),
        }
    }

    fn fbq() -> Result<Function, FunnelError> {
        let window = web_sys::window().ok_or(FunnelError::PixelUnavailable)?;
        Reflect::get(&window, &JsValue::from_str("fbq"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(FunnelError::PixelUnavailable)
    }

    /// `fbq('init', id)` followed by the `PageView` event. Call once per page load.
    pub fn init(&self) -> Result<(), FunnelError> {
        let fbq = Self::fbq()?;
        let calls = [
            js_sys::Array::of2(&JsValue::from_str("init"), &JsValue::from_str(&self.pixel_id)),
            js_sys::Array::of2(&JsValue::from_str("track"), &JsValue::from_str("PageView")),
        ];
        for args in calls.iter() {
            fbq.apply(&JsValue::NULL, args)
                .map_err(|e| FunnelError::Pixel(format!("{:?}", e)))?;
        }
        Ok(())
    }
}

impl Default for MetaPixel {
    fn default() -> Self {
        MetaPixel::new(config::pixel_id())
    }
}

impl ConversionPixel for MetaPixel {
    fn pixel_id(&self) -> &str {
        &self.pixel_id
    }

    fn track(&self, event: &str, params: &PixelParams, event_id: Option<&EventId>) -> Result<(), FunnelError> {
        let fbq = Self::fbq()?;
        // Flattened fields serialize as a map; fbq expects a plain object.
        let params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| FunnelError::Pixel(e.to_string()))?;

        let args = js_sys::Array::of3(&JsValue::from_str("track"), &JsValue::from_str(event), &params);
        if let Some(id) = event_id {
            let options = Object::new();
            Reflect::set(&options, &JsValue::from_str("eventID"), &JsValue::from_str(id.as_str()))
                .map_err(|e| FunnelError::Pixel(format!("{:?}", e)))?;
            args.push(&options);
        }

        fbq.apply(&JsValue::NULL, &args)
            .map(|_| ())
            .map_err(|e| FunnelError::Pixel(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pixel_uses_the_configured_id() {
        assert_eq!(MetaPixel::default().pixel_id(), config::pixel_id());
        assert_eq!(MetaPixel::new("42").pixel_id(), "42");
    }
}
