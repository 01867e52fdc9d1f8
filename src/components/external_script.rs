use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;
use yew::prelude::*;

fn append_script(src: &str) -> Option<HtmlScriptElement> {
    let document = web_sys::window()?.document()?;
    let script = document
        .create_element("script")
        .ok()?
        .dyn_into::<HtmlScriptElement>()
        .ok()?;
    script.set_src(src);
    script.set_async(true);
    document.head()?.append_child(&script).ok()?;
    Some(script)
}

/// Injects a third-party embed script into `<head>` for as long as the calling
/// component is mounted.
#[hook]
pub fn use_external_script(src: &'static str) {
    use_effect_with_deps(
        move |src| {
            let script = append_script(src);
            if script.is_none() {
                log::warn!("Could not load script {}", src);
            }
            move || {
                if let Some(script) = script {
                    script.remove();
                }
            }
        },
        src,
    );
}
