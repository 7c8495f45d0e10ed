//! End-to-end activation cycles through the runtime.
//!
//! These tests drive full cycles (command in, keystrokes, action out)
//! against a scripted surface, a recording sink, and a recording overlay
//! host, pinning the observable behavior of the whole stack.

use keyhints::engine::{ActivationMode, KeyCode, KeyPress};
use keyhints::kurbo::Rect;
use keyhints::overlay::{OverlayHost, OverlayModel};
use keyhints::runtime::{HintRuntime, InboundCommand, OutboundEvent, RecordingSink};
use keyhints::surface::scripted::{RecordedEffect, ScriptedSurface};
use keyhints::Config;

/// Overlay host that keeps every model pushed to it.
#[derive(Debug, Default)]
struct RecordingOverlay {
    renders: Vec<OverlayModel>,
    clears: usize,
}

impl OverlayHost for RecordingOverlay {
    fn render(&mut self, model: &OverlayModel) {
        self.renders.push(model.clone());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

type TestRuntime = HintRuntime<ScriptedSurface, RecordingSink, RecordingOverlay>;

fn runtime(surface: ScriptedSurface) -> TestRuntime {
    HintRuntime::new(
        &Config::default(),
        surface,
        RecordingSink::default(),
        RecordingOverlay::default(),
    )
}

fn activate(runtime: &mut TestRuntime, mode: ActivationMode, now_ms: i64) {
    runtime.handle_command(&InboundCommand::ActivateHints { mode }, now_ms);
}

#[test]
fn label_selection_activates_the_second_candidate() {
    // Working set [Link "Home", Link "Docs", Button "Submit"] labels A, B, C
    // in enumeration order, so "B" is the Docs link.
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    let _home = surface.push_link("Home", Some("https://example.com/"));
    let docs = surface.push_link("Docs", Some("https://example.com/docs"));
    let _submit = surface.push_button("Submit");

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);

    let model = &runtime.overlay().renders[0];
    let labels: Vec<&str> = model.markers.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);

    runtime.key_pressed(&KeyPress::char('B'), 10);

    assert!(!runtime.is_active());
    assert_eq!(runtime.surface().effects(), &[RecordedEffect::Click(docs)]);
    assert_eq!(runtime.overlay().clears, 1);
}

#[test]
fn dead_end_label_keystroke_restores_the_full_set() {
    // Thirty candidates give labels A..Z, AA..AD: "A" narrows without
    // resolving, and "AZ" matches nothing. The viewport is tall enough to
    // keep every auto-placed row visible.
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 2000.0));
    for i in 0..30 {
        surface.push_link(&format!("link {i}"), None);
    }

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);
    runtime.key_pressed(&KeyPress::char('A'), 10);

    let narrowed = runtime.overlay().renders.last().unwrap();
    assert_eq!(narrowed.markers.iter().filter(|m| m.visible).count(), 5);

    runtime.key_pressed(&KeyPress::char('Z'), 20);

    assert!(runtime.is_active());
    let restored = runtime.overlay().renders.last().unwrap();
    assert_eq!(restored.partial_input, "");
    assert!(restored.markers.iter().all(|m| m.visible));
}

#[test]
fn text_search_resolves_at_the_unique_keystroke() {
    // "s" appears only in "submit button", so a single text-mode keystroke
    // resolves.
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    let _home = surface.push_link("home page", None);
    let _docs = surface.push_link("documentation", None);
    let submit = surface.push_button("submit button");

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);

    runtime.key_pressed(&KeyPress::bare(KeyCode::Shift), 10);
    runtime.key_pressed(&KeyPress::char('s'), 20);

    assert!(!runtime.is_active());
    assert_eq!(runtime.surface().effects(), &[RecordedEffect::Click(submit)]);
}

#[test]
fn fresh_cache_is_used_and_stale_cache_is_not() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    for i in 0..5 {
        surface.push_link(&format!("link {i}"), None);
    }

    let mut runtime = runtime(surface);
    runtime.handle_command(&InboundCommand::PrecomputeHints, 0);
    let queries_after_precompute = runtime.surface().queries_served();

    // t=4000, expiry 5000: the cached 5-element set is used without touching
    // the surface.
    activate(&mut runtime, ActivationMode::Normal, 4000);
    assert_eq!(runtime.surface().queries_served(), queries_after_precompute);
    assert_eq!(runtime.engine().session().unwrap().working_set().len(), 5);

    // Tear down, repopulate the cache, and let it expire: an activation past
    // the window enumerates fresh.
    activate(&mut runtime, ActivationMode::Normal, 4100);
    runtime.handle_command(&InboundCommand::PrecomputeHints, 7000);
    let queries_before_stale = runtime.surface().queries_served();
    activate(&mut runtime, ActivationMode::Normal, 12_001);
    assert!(runtime.surface().queries_served() > queries_before_stale);
}

#[test]
fn background_open_emits_one_tab_request_and_nothing_else() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    surface.push_link("release notes", Some("https://example.com/notes"));
    surface.push_button("ignore me");

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::OpenBackground, 0);
    runtime.key_pressed(&KeyPress::char('A'), 10);

    assert_eq!(
        runtime.sink().events(),
        &[OutboundEvent::RequestOpenTab {
            url: "https://example.com/notes".to_string(),
            switch_to_it: false,
        }]
    );
    // The current context is untouched: no click, no focus.
    assert!(runtime.surface().effects().is_empty());
    assert!(!runtime.is_active());
}

#[test]
fn foreground_open_requests_the_switch() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    surface.push_link("release notes", Some("https://example.com/notes"));

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::OpenForeground, 0);
    runtime.key_pressed(&KeyPress::char('A'), 10);

    assert_eq!(
        runtime.sink().events(),
        &[OutboundEvent::RequestOpenTab {
            url: "https://example.com/notes".to_string(),
            switch_to_it: true,
        }]
    );
}

#[test]
fn text_entry_resolution_focuses_instead_of_clicking() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    let field = surface.push_text_entry("search the docs");

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::OpenForeground, 0);
    runtime.key_pressed(&KeyPress::char('A'), 10);

    // Activation mode is irrelevant for text entry: it gets focus.
    assert_eq!(runtime.surface().effects(), &[RecordedEffect::Focus(field)]);
    assert!(runtime.sink().events().is_empty());
}

#[test]
fn repeated_activation_is_activate_then_cancel() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    surface.push_link("home", None);

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);
    activate(&mut runtime, ActivationMode::Normal, 100);

    assert!(!runtime.is_active());
    assert_eq!(runtime.overlay().renders.len(), 1);
    assert_eq!(runtime.overlay().clears, 1);
    assert!(runtime.surface().effects().is_empty());
    assert!(runtime.sink().events().is_empty());
}

#[test]
fn escape_cancels_and_clears_the_overlay() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    surface.push_link("home", None);
    surface.push_link("docs", None);

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);
    runtime.key_pressed(&KeyPress::bare(KeyCode::Escape), 10);

    assert!(!runtime.is_active());
    assert_eq!(runtime.overlay().clears, 1);
    assert!(runtime.surface().effects().is_empty());
}

#[test]
fn detached_target_still_tears_the_session_down() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    let home = surface.push_link("home", None);
    surface.push_link("docs", None);

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);

    // The element disappears between labeling and resolution.
    runtime.surface_mut().detach(home);
    runtime.key_pressed(&KeyPress::char('A'), 10);

    // Dispatch failed silently; the user still gets a clean surface.
    assert!(!runtime.is_active());
    assert_eq!(runtime.overlay().clears, 1);
    assert!(runtime.surface().effects().is_empty());
}

#[test]
fn resolution_precomputes_after_the_surface_settles() {
    let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
    surface.push_link("home", None);

    let mut runtime = runtime(surface);
    activate(&mut runtime, ActivationMode::Normal, 0);
    runtime.key_pressed(&KeyPress::char('A'), 1000);

    assert!(runtime.precompute_pending());
    let queries_before = runtime.surface().queries_served();
    runtime.tick(1499);
    assert_eq!(runtime.surface().queries_served(), queries_before);
    runtime.tick(1500);
    assert!(runtime.surface().queries_served() > queries_before);
}
