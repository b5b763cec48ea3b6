//! Browser renderer.
//!
//! Owns the single `Terminal` session in a thread-local and drives it from
//! `setTimeout` callbacks (boot) and input events (interactive phase).
//! Everything here runs on the page's event loop.

use crate::{
    boot::{BootEvent, BootStep},
    commands::SessionFacts,
    config::TerminalConfig,
    history::HistoryEntry,
    log,
    shell::{Dispatch, KeyInput, KeyOutcome},
    terminal::Terminal,
};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent};

const BANNER: &str = "
██████  ██      ██  █████  ███████ ██   ██
██   ██ ██      ██ ██   ██ ██      ██   ██
██   ██ ██      ██ ███████ ███████ ███████
██   ██ ██ ██   ██ ██   ██      ██ ██   ██
██████  ██  █████  ██   ██ ███████ ██   ██
";

const LOG_ID: &str = "tp-log";
const INPUT_ID: &str = "tp-input";
const PROGRESS_ID: &str = "tp-progress";

thread_local! {
    static SESSION: RefCell<Option<Terminal>> = const { RefCell::new(None) };
    static ROOT_ID: RefCell<String> = const { RefCell::new(String::new()) };
    static GENERATION: Cell<u32> = const { Cell::new(0) };
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn root(doc: &Document) -> Result<Element, JsValue> {
    let id = ROOT_ID.with(|r| r.borrow().clone());
    doc.get_element_by_id(&id)
        .ok_or_else(|| JsValue::from_str("root element not found"))
}

fn by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has unexpected type", id)))
}

fn with_session<R>(f: impl FnOnce(&mut Terminal) -> R) -> Option<R> {
    SESSION.with(|s| s.borrow_mut().as_mut().map(f))
}

fn el(doc: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let e = doc.create_element(tag)?;
    if !class.is_empty() {
        e.set_class_name(class);
    }
    if !text.is_empty() {
        e.set_text_content(Some(text));
    }
    Ok(e)
}

fn add(
    doc: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<Element, JsValue> {
    let child = el(doc, tag, class, text)?;
    parent.append_child(&child)?;
    Ok(child)
}

/// Mount the terminal into the element with id `root_id` and start booting.
///
/// Mounting again replaces the session; timers left over from the previous
/// mount see a stale generation and stop.
#[wasm_bindgen]
pub fn mount(root_id: &str) -> Result<(), JsValue> {
    ROOT_ID.with(|r| *r.borrow_mut() = root_id.to_string());
    let doc = document()?;
    let root = root(&doc)?;

    let terminal = Terminal::with_config(TerminalConfig::default(), &SessionFacts::capture());
    let start = terminal.start_boot();
    render_boot_screen(&doc, &root, terminal.config())?;
    SESSION.with(|s| *s.borrow_mut() = Some(terminal));
    let generation = next_generation();

    log::info(&format!("terminal mounted on #{}", root_id));
    schedule(start, generation)
}

fn next_generation() -> u32 {
    GENERATION.with(|g| {
        let next = g.get().wrapping_add(1);
        g.set(next);
        next
    })
}

fn is_current(generation: u32) -> bool {
    GENERATION.with(|g| g.get() == generation)
}

fn schedule(delay_ms: u32, generation: u32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::once_into_js(move || boot_tick(generation));
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    )?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Tick {
    Stale,
    Next(u32),
    Interactive,
}

/// Advance the current session by one boot step. A failed render is logged
/// and never stops the chain.
fn advance_boot_tick<E: std::fmt::Debug>(
    generation: u32,
    render: impl FnOnce(&BootStep) -> Result<(), E>,
) -> Tick {
    if !is_current(generation) {
        return Tick::Stale;
    }
    match with_session(|t| t.advance_boot()) {
        None => Tick::Stale,
        Some(None) => Tick::Interactive,
        Some(Some(step)) => {
            if let Err(e) = render(&step) {
                log::error(&format!("boot render failed: {:?}", e));
            }
            Tick::Next(step.delay_ms)
        }
    }
}

fn boot_tick(generation: u32) {
    let result = match advance_boot_tick(generation, render_boot_step) {
        Tick::Stale => Ok(()),
        Tick::Next(delay_ms) => schedule(delay_ms, generation),
        Tick::Interactive => document().and_then(|doc| enter_interactive(&doc)),
    };
    if let Err(e) = result {
        log::error(&format!("boot tick failed: {:?}", e));
    }
}

fn render_boot_step(step: &BootStep) -> Result<(), JsValue> {
    let BootEvent::Reveal { index, text } = &step.event else {
        return Ok(());
    };
    let doc = document()?;
    let line: Element = by_id(&doc, &format!("tp-boot-text-{}", index))?;
    line.set_text_content(Some(text));
    let row: Element = by_id(&doc, &format!("tp-boot-line-{}", index))?;
    row.class_list().add_1("shown")?;
    let progress = with_session(|t| t.boot_progress()).unwrap_or(1.0);
    let bar: HtmlElement = by_id(&doc, PROGRESS_ID)?;
    bar.style()
        .set_property("width", &format!("{}%", progress * 100.0))?;
    Ok(())
}

fn render_boot_screen(
    doc: &Document,
    root: &Element,
    config: &TerminalConfig,
) -> Result<(), JsValue> {
    root.set_inner_html("");
    let screen = el(doc, "div", "tp-boot", "")?;
    add(doc, &screen, "pre", "tp-banner", BANNER)?;
    add(doc, &screen, "h1", "tp-title", "Terminal Portfolio")?;
    add(doc, &screen, "p", "tp-subtitle", "Loading developer experience...")?;

    let lines = el(doc, "div", "tp-boot-lines", "")?;
    for i in 0..config.boot_messages.len() {
        let row = el(doc, "div", &format!("tp-boot-line tone-{}", i % 3), "")?;
        row.set_id(&format!("tp-boot-line-{}", i));
        add(doc, &row, "span", "tp-marker", "▶ ")?;
        let text = el(doc, "span", "", "")?;
        text.set_id(&format!("tp-boot-text-{}", i));
        row.append_child(&text)?;
        add(doc, &row, "span", "tp-caret", "|")?;
        lines.append_child(&row)?;
    }
    screen.append_child(&lines)?;

    let track = el(doc, "div", "tp-progress-track", "")?;
    let bar = el(doc, "div", "tp-progress", "")?;
    bar.set_id(PROGRESS_ID);
    track.append_child(&bar)?;
    screen.append_child(&track)?;

    root.append_child(&screen)?;
    Ok(())
}

fn enter_interactive(doc: &Document) -> Result<(), JsValue> {
    let Some((title, version, prompt)) =
        with_session(|t| (t.title(), t.config().version_label.clone(), t.prompt()))
    else {
        return Ok(());
    };

    let root = root(doc)?;
    root.set_inner_html("");
    let window_el = el(doc, "div", "tp-window", "")?;

    let header = el(doc, "div", "tp-header", "")?;
    let dots = el(doc, "div", "tp-dots", "")?;
    for color in ["red", "yellow", "green"] {
        add(doc, &dots, "span", &format!("tp-dot {}", color), "")?;
    }
    header.append_child(&dots)?;
    add(doc, &header, "div", "tp-path", &title)?;
    add(doc, &header, "div", "tp-version", &version)?;
    window_el.append_child(&header)?;

    let log_el = el(doc, "div", "tp-log", "")?;
    log_el.set_id(LOG_ID);
    let entries = el(doc, "div", "tp-entries", "")?;
    entries.set_id("tp-entries");
    log_el.append_child(&entries)?;

    let input_line = el(doc, "div", "tp-input-line", "")?;
    add(doc, &input_line, "span", "tp-prompt", &prompt)?;
    let input: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
    input.set_id(INPUT_ID);
    input.set_class_name("tp-input");
    input.set_attribute("spellcheck", "false")?;
    input.set_attribute("autocomplete", "off")?;
    input_line.append_child(&input)?;
    add(doc, &input_line, "span", "tp-cursor", "█")?;
    log_el.append_child(&input_line)?;
    window_el.append_child(&log_el)?;

    let footer = el(doc, "div", "tp-footer", "")?;
    add(doc, &footer, "span", "", "Press Ctrl+L to clear • Ctrl+C to cancel")?;
    add(doc, &footer, "span", "", "Online • Ready")?;
    window_el.append_child(&footer)?;

    root.append_child(&window_el)?;

    install_listeners(&input, &log_el)?;
    render_history(doc)?;
    let _ = input.focus();
    Ok(())
}

fn install_listeners(input: &HtmlInputElement, log_el: &Element) -> Result<(), JsValue> {
    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        if let Err(err) = on_keydown(&e) {
            log::error(&format!("keydown failed: {:?}", err));
        }
    });
    input.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    let oninput = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        if let Some(value) = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .map(|i| i.value())
        {
            with_session(|t| t.set_input(&value));
        }
    });
    input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
    oninput.forget();

    let click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_e: web_sys::MouseEvent| {
        if let Ok(doc) = document() {
            if let Ok(i) = by_id::<HtmlInputElement>(&doc, INPUT_ID) {
                let _ = i.focus();
            }
        }
    });
    log_el.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

fn on_keydown(e: &KeyboardEvent) -> Result<(), JsValue> {
    // Plain characters arrive through the `input` event.
    let key = match KeyInput::from_key(&e.key(), e.ctrl_key()) {
        Some(KeyInput::Char(_)) | Some(KeyInput::Backspace) | None => return Ok(()),
        Some(k) => k,
    };
    if matches!(key, KeyInput::CtrlC | KeyInput::CtrlL) {
        e.prevent_default();
    }

    let doc = document()?;
    let input: HtmlInputElement = by_id(&doc, INPUT_ID)?;
    let value = input.value();
    let Some(outcome) = with_session(|t| {
        t.set_input(&value);
        t.press(key)
    }) else {
        return Ok(());
    };

    match outcome {
        KeyOutcome::Dispatched(Dispatch::Exit) => {
            input.set_value("");
            close_window();
        }
        KeyOutcome::Dispatched(_) | KeyOutcome::Cancelled => input.set_value(""),
        KeyOutcome::Cleared | KeyOutcome::Edited => {}
    }
    render_history(&doc)
}

fn close_window() {
    match window().map(|w| w.close()) {
        Some(Ok(())) => {}
        Some(Err(e)) => log::warn(&format!("window.close refused: {:?}", e)),
        None => log::warn("window.close unavailable"),
    }
}

fn render_history(doc: &Document) -> Result<(), JsValue> {
    let entries: Element = by_id(doc, "tp-entries")?;
    let Some((history, prompt)) =
        with_session(|t| (t.history().entries().to_vec(), t.prompt()))
    else {
        return Ok(());
    };

    entries.set_inner_html("");
    for entry in &history {
        let item = render_entry(doc, entry, &prompt)?;
        entries.append_child(&item)?;
    }

    let log_el: Element = by_id(doc, LOG_ID)?;
    log_el.set_scroll_top(log_el.scroll_height());
    Ok(())
}

fn render_entry(doc: &Document, entry: &HistoryEntry, prompt: &str) -> Result<Element, JsValue> {
    let item = el(doc, "div", "tp-entry", "")?;
    if !entry.input.is_empty() {
        let line = el(doc, "div", "tp-command", "")?;
        add(doc, &line, "span", "tp-prompt", prompt)?;
        add(doc, &line, "span", "tp-typed", &entry.input)?;
        item.append_child(&line)?;
    }
    if !entry.output.is_empty() {
        let out = el(doc, "div", "tp-output", "")?;
        add(doc, &out, "span", "tp-marker", "╰─▶ ")?;
        add(doc, &out, "pre", "tp-text", &entry.output)?;
        item.append_child(&out)?;
    }
    Ok(item)
}
