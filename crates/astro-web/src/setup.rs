use astro_canvas::OnceFlag;
use wasm_bindgen::JsValue;

static LOGGING: OnceFlag = OnceFlag::new();
static RIPPLE_STYLE: OnceFlag = OnceFlag::new();

const RIPPLE_STYLE_ID: &str = "astro-ripple-style";
const RIPPLE_CSS: &str = "\
.ripple { position: relative; overflow: hidden; }
.ripple-wave {
  position: absolute; border-radius: 50%; pointer-events: none;
  background: rgba(255, 255, 255, 0.35);
  transform: scale(0); animation: astro-ripple 600ms ease-out;
}
@keyframes astro-ripple { to { transform: scale(4); opacity: 0; } }
";

/// Panic hook and console logger. Safe to call from every entry point.
pub fn install_logging() {
    LOGGING.run_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// Add the button ripple `<style>` block to `<head>`, once per page.
/// Returns `true` on the call that injected it.
pub fn inject_ripple_style() -> bool {
    RIPPLE_STYLE.run_once(|| {
        if let Err(e) = append_style(RIPPLE_STYLE_ID, RIPPLE_CSS) {
            log::warn!("ripple style not injected: {e:?}");
        }
    })
}

fn append_style(id: &str, css: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let head = document.head().ok_or_else(|| JsValue::from_str("no <head>"))?;
    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}
